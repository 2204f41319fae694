use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct AnnouncementModel {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub announcement_type: String,
    pub is_pinned: bool,
    pub created_by_admin_id: i64,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}
