//! Comment entity

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Maximum comment length in characters
pub const MAX_COMMENT_LENGTH: usize = 2000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: Snowflake,
    pub post_id: Snowflake,
    pub user_id: Snowflake,
    pub content: String,
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(id: Snowflake, post_id: Snowflake, user_id: Snowflake, content: String) -> Self {
        Self {
            id,
            post_id,
            user_id,
            content,
            deleted: false,
            created_at: Utc::now(),
        }
    }

    /// Authors can delete their own comments, admins can delete any
    pub fn can_delete(&self, user_id: Snowflake, is_admin: bool) -> bool {
        is_admin || self.user_id == user_id
    }
}
