//! Audit log database model

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct AuditLogModel {
    pub id: i64,
    pub user_id: Option<i64>,
    pub action_type: String,
    pub action_details: JsonValue,
    pub ip_address: Option<String>,
    pub created_at: DateTime<Utc>,
}
