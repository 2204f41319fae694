use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct CommentModel {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub content: String,
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
}

/// Per-post comment count (from query)
#[derive(Debug, Clone, FromRow)]
pub struct CommentCountModel {
    pub post_id: i64,
    pub count: i64,
}
