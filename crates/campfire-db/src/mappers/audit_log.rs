use campfire_core::{AuditLog, Snowflake};

use super::opt_id;
use crate::models::AuditLogModel;

impl From<AuditLogModel> for AuditLog {
    fn from(model: AuditLogModel) -> Self {
        AuditLog {
            id: Snowflake::new(model.id),
            user_id: opt_id(model.user_id),
            action_type: model.action_type,
            action_details: model.action_details,
            ip_address: model.ip_address,
            created_at: model.created_at,
        }
    }
}
