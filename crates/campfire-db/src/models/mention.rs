use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Row of the `mentions` table. Exactly one of `post_id`/`comment_id` is set.
#[derive(Debug, Clone, FromRow)]
pub struct MentionModel {
    pub id: i64,
    pub post_id: Option<i64>,
    pub comment_id: Option<i64>,
    pub mentioned_user_id: i64,
    pub mentioner_user_id: i64,
    pub created_at: DateTime<Utc>,
}
