use campfire_core::{Snowflake, Vote, VoteScores};

use crate::models::VoteModel;

impl From<VoteModel> for Vote {
    fn from(model: VoteModel) -> Self {
        Vote {
            id: Snowflake::new(model.id),
            judge_id: Snowflake::new(model.judge_id),
            team_id: Snowflake::new(model.team_id),
            // Range is enforced by CHECK constraints
            scores: VoteScores {
                innovation: model.innovation,
                implementation: model.implementation,
                design: model.design,
                presentation: model.presentation,
            },
            comments: model.comments,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
