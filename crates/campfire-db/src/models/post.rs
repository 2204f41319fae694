//! Post and attachment database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct PostModel {
    pub id: i64,
    pub user_id: i64,
    pub team_id: i64,
    pub description: String,
    pub is_global: bool,
    pub is_hidden: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl PostModel {
    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Row of the `post_media` table
#[derive(Debug, Clone, FromRow)]
pub struct PostMediaModel {
    pub id: i64,
    pub post_id: i64,
    /// `image` or `video`
    pub media_type: String,
    pub file_path: String,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
}
