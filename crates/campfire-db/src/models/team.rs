use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct TeamModel {
    pub id: i64,
    pub name: String,
    pub avatar_path: Option<String>,
    pub created_at: DateTime<Utc>,
}
