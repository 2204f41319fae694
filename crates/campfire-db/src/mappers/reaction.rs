use campfire_core::{DomainError, Reaction, ReactionType, Snowflake};

use crate::models::{PostReactionCountModel, ReactionCountModel, ReactionModel};

impl TryFrom<ReactionModel> for Reaction {
    type Error = DomainError;

    fn try_from(model: ReactionModel) -> Result<Self, Self::Error> {
        Ok(Reaction {
            id: Snowflake::new(model.id),
            post_id: Snowflake::new(model.post_id),
            user_id: Snowflake::new(model.user_id),
            reaction_type: model.reaction_type.parse()?,
            created_at: model.created_at,
        })
    }
}

/// `(type, count)` pair from an aggregated row
pub fn count_pair(model: ReactionCountModel) -> Result<(ReactionType, i64), DomainError> {
    Ok((model.reaction_type.parse()?, model.count))
}

/// `(post, type, count)` triple from a per-post aggregated row
pub fn post_count_triple(
    model: PostReactionCountModel,
) -> Result<(Snowflake, ReactionType, i64), DomainError> {
    Ok((
        Snowflake::new(model.post_id),
        model.reaction_type.parse()?,
        model.count,
    ))
}
