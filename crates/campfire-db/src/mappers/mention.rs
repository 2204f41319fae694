use campfire_core::{DomainError, Mention, MentionSource, Snowflake};

use super::opt_id;
use crate::models::MentionModel;

/// `(post_id, comment_id)` column values for a mention source
pub fn source_columns(source: MentionSource) -> (Option<i64>, Option<i64>) {
    (
        source.post_id().map(Snowflake::into_inner),
        source.comment_id().map(Snowflake::into_inner),
    )
}

impl TryFrom<MentionModel> for Mention {
    type Error = DomainError;

    fn try_from(model: MentionModel) -> Result<Self, Self::Error> {
        let source = match (opt_id(model.post_id), opt_id(model.comment_id)) {
            (Some(post_id), None) => MentionSource::Post(post_id),
            (None, Some(comment_id)) => MentionSource::Comment(comment_id),
            _ => {
                return Err(DomainError::DatabaseError(format!(
                    "mention {} must reference exactly one post or comment",
                    model.id
                )))
            }
        };

        Ok(Mention {
            id: Snowflake::new(model.id),
            source,
            mentioned_user_id: Snowflake::new(model.mentioned_user_id),
            mentioner_user_id: Snowflake::new(model.mentioner_user_id),
            created_at: model.created_at,
        })
    }
}
