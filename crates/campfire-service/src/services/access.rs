//! Role and account-state checks shared by the services

use campfire_core::{DomainError, Snowflake, User};
use chrono::{DateTime, Utc};

use super::error::{ServiceError, ServiceResult};

pub fn require_admin(user: &User) -> ServiceResult<()> {
    if user.roles().is_admin() {
        Ok(())
    } else {
        Err(ServiceError::permission_denied("Admin"))
    }
}

/// Judges and admins
pub fn require_judge(user: &User) -> ServiceResult<()> {
    if user.roles().can_judge() {
        Ok(())
    } else {
        Err(ServiceError::permission_denied("Judge"))
    }
}

pub fn require_not_banned(user: &User, now: DateTime<Utc>) -> ServiceResult<()> {
    if user.is_actively_banned(now) {
        Err(DomainError::UserBanned {
            reason: user.ban_reason.clone(),
        }
        .into())
    } else {
        Ok(())
    }
}

/// The caller's team, or 400 when they have none
pub fn require_team(user: &User) -> ServiceResult<Snowflake> {
    user.team_id.ok_or_else(|| DomainError::NoTeamAssigned.into())
}
