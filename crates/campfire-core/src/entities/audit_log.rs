//! Audit log entry - append-only record of who did what

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::value_objects::Snowflake;

pub const MAX_ACTION_TYPE_LENGTH: usize = 50;
/// Long enough for a full IPv6 address
pub const MAX_IP_LENGTH: usize = 45;

#[derive(Debug, Clone, PartialEq)]
pub struct AuditLog {
    pub id: Snowflake,
    pub user_id: Option<Snowflake>,
    pub action_type: String,
    pub action_details: Value,
    pub ip_address: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl AuditLog {
    /// Oversized action types and addresses are truncated to their column widths.
    pub fn new(
        id: Snowflake,
        user_id: Option<Snowflake>,
        action_type: &str,
        action_details: Value,
        ip_address: Option<String>,
    ) -> Self {
        Self {
            id,
            user_id,
            action_type: action_type.chars().take(MAX_ACTION_TYPE_LENGTH).collect(),
            action_details,
            ip_address: ip_address.map(|ip| ip.chars().take(MAX_IP_LENGTH).collect()),
            created_at: Utc::now(),
        }
    }
}
