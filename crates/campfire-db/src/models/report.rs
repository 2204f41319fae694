//! Report database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Row of the `reports` table. Exactly one of `post_id`/`comment_id` is set.
#[derive(Debug, Clone, FromRow)]
pub struct ReportModel {
    pub id: i64,
    pub post_id: Option<i64>,
    pub comment_id: Option<i64>,
    pub reported_by_user_id: i64,
    pub reason: String,
    pub details: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub resolved_by_admin_id: Option<i64>,
}
