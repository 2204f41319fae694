use campfire_core::{Comment, Snowflake};

use crate::models::CommentModel;

impl From<CommentModel> for Comment {
    fn from(model: CommentModel) -> Self {
        Comment {
            id: Snowflake::new(model.id),
            post_id: Snowflake::new(model.post_id),
            user_id: Snowflake::new(model.user_id),
            content: model.content,
            deleted: model.deleted,
            created_at: model.created_at,
        }
    }
}
