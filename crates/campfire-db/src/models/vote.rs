use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct VoteModel {
    pub id: i64,
    pub judge_id: i64,
    pub team_id: i64,
    pub innovation: i16,
    pub implementation: i16,
    pub design: i16,
    pub presentation: i16,
    pub comments: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
