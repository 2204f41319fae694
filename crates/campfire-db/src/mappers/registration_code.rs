use campfire_core::{RegistrationCode, Snowflake};

use super::opt_id;
use crate::models::RegistrationCodeModel;

impl From<RegistrationCodeModel> for RegistrationCode {
    fn from(model: RegistrationCodeModel) -> Self {
        RegistrationCode {
            id: Snowflake::new(model.id),
            code: model.code,
            is_used: model.is_used,
            used_by_user_id: opt_id(model.used_by_user_id),
            created_at: model.created_at,
        }
    }
}
