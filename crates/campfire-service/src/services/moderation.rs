//! Moderation service
//!
//! Content reports, their resolution, hiding posts, and user bans.

use campfire_common::RateLimitAction;
use campfire_core::entities::{Report, ReportTarget, User};
use campfire_core::{DomainError, Snowflake};
use chrono::{Duration, Utc};
use serde_json::json;
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::dto::{
    AdminUserResponse, BanUserRequest, CreateReportRequest, ReportListQuery, ReportResponse,
    ResolveAction, ResolveReportRequest,
};

use super::access::require_admin;
use super::audit::{AuditService, RequestMeta};
use super::context::{RateSubject, ServiceContext};
use super::error::{ServiceError, ServiceResult};

pub struct ModerationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ModerationService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Flag a post or comment for admin review
    #[instrument(skip(self, reporter, request), fields(reporter_id = %reporter.id))]
    pub async fn report(
        &self,
        reporter: &User,
        content_type: &str,
        content_id: Snowflake,
        request: CreateReportRequest,
    ) -> ServiceResult<ReportResponse> {
        self.ctx
            .check_rate_limit(RateSubject::User(reporter), RateLimitAction::Report)?;
        request.validate()?;

        let target = ReportTarget::parse(content_type, content_id)?;
        self.ensure_target_exists(target).await?;

        if self
            .ctx
            .report_repo()
            .has_pending(reporter.id, target)
            .await?
        {
            return Err(DomainError::DuplicateReport.into());
        }

        let details = request
            .details
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        let report = Report::new(
            self.ctx.generate_id(),
            target,
            reporter.id,
            request.reason,
            details,
        );
        self.ctx.report_repo().create(&report).await?;

        info!(
            report_id = %report.id,
            content_type = target.content_type(),
            content_id = %target.id(),
            reason = %report.reason,
            "Content reported"
        );
        Ok(ReportResponse::from(&report))
    }

    #[instrument(skip(self, actor), fields(admin_id = %actor.id))]
    pub async fn list_reports(
        &self,
        actor: &User,
        query: ReportListQuery,
    ) -> ServiceResult<Vec<ReportResponse>> {
        require_admin(actor)?;
        let reports = self.ctx.report_repo().list(query.status).await?;
        Ok(reports.iter().map(ReportResponse::from).collect())
    }

    /// Close a pending report, acting on the reported content first
    #[instrument(skip(self, actor, meta), fields(admin_id = %actor.id))]
    pub async fn resolve_report(
        &self,
        actor: &User,
        report_id: Snowflake,
        request: ResolveReportRequest,
        meta: &RequestMeta,
    ) -> ServiceResult<ReportResponse> {
        require_admin(actor)?;

        let mut report = self
            .ctx
            .report_repo()
            .find_by_id(report_id)
            .await?
            .ok_or(DomainError::ReportNotFound(report_id))?;
        report.resolve(actor.id)?;

        match (request.action, report.target) {
            (ResolveAction::Dismiss, _) => {}
            (ResolveAction::HideContent, ReportTarget::Post(post_id)) => {
                self.set_post_hidden(post_id, true).await?;
            }
            (ResolveAction::DeleteContent, ReportTarget::Post(post_id)) => {
                if let Some(mut post) = self.ctx.post_repo().find_by_id(post_id).await? {
                    post.soft_delete();
                    self.ctx.post_repo().update(&post).await?;
                }
            }
            // Comments cannot be hidden; both actions remove them
            (
                ResolveAction::HideContent | ResolveAction::DeleteContent,
                ReportTarget::Comment(comment_id),
            ) => {
                self.ctx.comment_repo().mark_deleted(comment_id).await?;
            }
        }

        self.ctx.report_repo().update(&report).await?;

        info!(report_id = %report.id, action = ?request.action, "Report resolved");
        AuditService::new(self.ctx)
            .record(
                Some(actor.id),
                "report_resolve",
                meta,
                json!({
                    "report_id": report.id.to_string(),
                    "action": request.action,
                    "content_type": report.target.content_type(),
                    "content_id": report.target.id().to_string(),
                }),
            )
            .await;

        Ok(ReportResponse::from(&report))
    }

    #[instrument(skip(self, actor, meta), fields(admin_id = %actor.id))]
    pub async fn hide_post(
        &self,
        actor: &User,
        post_id: Snowflake,
        hidden: bool,
        meta: &RequestMeta,
    ) -> ServiceResult<()> {
        require_admin(actor)?;
        self.set_post_hidden(post_id, hidden).await?;

        let action = if hidden { "post_hide" } else { "post_unhide" };
        AuditService::new(self.ctx)
            .record(
                Some(actor.id),
                action,
                meta,
                json!({ "post_id": post_id.to_string() }),
            )
            .await;
        Ok(())
    }

    /// Ban for `duration_hours`, or indefinitely; every session is revoked
    #[instrument(skip(self, actor, request, meta), fields(admin_id = %actor.id))]
    pub async fn ban_user(
        &self,
        actor: &User,
        user_id: Snowflake,
        request: BanUserRequest,
        meta: &RequestMeta,
    ) -> ServiceResult<AdminUserResponse> {
        require_admin(actor)?;
        request.validate()?;
        if user_id == actor.id {
            return Err(DomainError::CannotTargetSelf.into());
        }

        let mut user = self.find_user(user_id).await?;
        let until = match request.duration_hours {
            Some(hours) => Some(
                Duration::try_hours(hours)
                    .and_then(|d| Utc::now().checked_add_signed(d))
                    .ok_or_else(|| ServiceError::validation("Ban duration is too long"))?,
            ),
            None => None,
        };
        let reason = request
            .reason
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());
        user.ban(reason, until);
        self.ctx.user_repo().update(&user).await?;

        // The ban is enforced on every request, so a failed revoke only delays logout
        match self
            .ctx
            .refresh_token_store()
            .revoke_all_for_user(user.id)
            .await
        {
            Ok(revoked) => info!(user_id = %user.id, revoked, "User banned"),
            Err(e) => warn!(user_id = %user.id, error = %e, "User banned, session revoke failed"),
        }

        AuditService::new(self.ctx)
            .record(
                Some(actor.id),
                "user_ban",
                meta,
                json!({
                    "target_user_id": user.id.to_string(),
                    "username": user.username,
                    "reason": user.ban_reason,
                    "duration_hours": request.duration_hours,
                }),
            )
            .await;

        Ok(AdminUserResponse::from(&user))
    }

    #[instrument(skip(self, actor, meta), fields(admin_id = %actor.id))]
    pub async fn unban_user(
        &self,
        actor: &User,
        user_id: Snowflake,
        meta: &RequestMeta,
    ) -> ServiceResult<AdminUserResponse> {
        require_admin(actor)?;
        let mut user = self.find_user(user_id).await?;
        user.unban();
        self.ctx.user_repo().update(&user).await?;

        info!(user_id = %user.id, "User unbanned");
        AuditService::new(self.ctx)
            .record(
                Some(actor.id),
                "user_unban",
                meta,
                json!({ "target_user_id": user.id.to_string(), "username": user.username }),
            )
            .await;

        Ok(AdminUserResponse::from(&user))
    }

    async fn ensure_target_exists(&self, target: ReportTarget) -> ServiceResult<()> {
        match target {
            ReportTarget::Post(id) => {
                self.ctx
                    .post_repo()
                    .find_by_id(id)
                    .await?
                    .filter(|p| !p.is_deleted())
                    .ok_or(DomainError::PostNotFound(id))?;
            }
            ReportTarget::Comment(id) => {
                self.ctx
                    .comment_repo()
                    .find_by_id(id)
                    .await?
                    .filter(|c| !c.deleted)
                    .ok_or(DomainError::CommentNotFound(id))?;
            }
        }
        Ok(())
    }

    async fn set_post_hidden(&self, post_id: Snowflake, hidden: bool) -> ServiceResult<()> {
        let mut post = self
            .ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .filter(|p| !p.is_deleted())
            .ok_or(DomainError::PostNotFound(post_id))?;

        post.is_hidden = hidden;
        self.ctx.post_repo().update(&post).await?;
        info!(post_id = %post.id, hidden, "Post visibility changed");
        Ok(())
    }

    async fn find_user(&self, user_id: Snowflake) -> ServiceResult<User> {
        Ok(self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?)
    }
}
