use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct RegistrationCodeModel {
    pub id: i64,
    pub code: String,
    pub is_used: bool,
    pub used_by_user_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}
