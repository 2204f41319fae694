use campfire_core::{Snowflake, Team};

use crate::models::TeamModel;

impl From<TeamModel> for Team {
    fn from(model: TeamModel) -> Self {
        Team {
            id: Snowflake::new(model.id),
            name: model.name,
            avatar_path: model.avatar_path,
            created_at: model.created_at,
        }
    }
}
