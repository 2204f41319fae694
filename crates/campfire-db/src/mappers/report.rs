//! Report model -> entity

use campfire_core::{DomainError, Report, ReportTarget, Snowflake};

use super::opt_id;
use crate::models::ReportModel;

/// `(post_id, comment_id)` column values for a report target
pub fn target_columns(target: ReportTarget) -> (Option<i64>, Option<i64>) {
    (
        target.post_id().map(Snowflake::into_inner),
        target.comment_id().map(Snowflake::into_inner),
    )
}

impl TryFrom<ReportModel> for Report {
    type Error = DomainError;

    fn try_from(model: ReportModel) -> Result<Self, Self::Error> {
        let target = match (opt_id(model.post_id), opt_id(model.comment_id)) {
            (Some(post_id), None) => ReportTarget::Post(post_id),
            (None, Some(comment_id)) => ReportTarget::Comment(comment_id),
            _ => {
                return Err(DomainError::DatabaseError(format!(
                    "report {} must reference exactly one post or comment",
                    model.id
                )))
            }
        };

        Ok(Report {
            id: Snowflake::new(model.id),
            target,
            reported_by_user_id: Snowflake::new(model.reported_by_user_id),
            reason: model.reason.parse()?,
            details: model.details,
            status: model.status.parse().unwrap_or_default(),
            created_at: model.created_at,
            resolved_at: model.resolved_at,
            resolved_by_admin_id: opt_id(model.resolved_by_admin_id),
        })
    }
}
