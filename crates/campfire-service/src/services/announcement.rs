//! Announcement service

use campfire_core::entities::{Announcement, User};
use campfire_core::{DomainError, Snowflake};
use chrono::Utc;
use serde_json::json;
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{AnnouncementResponse, CreateAnnouncementRequest, UpdateAnnouncementRequest};

use super::access::require_admin;
use super::audit::{AuditService, RequestMeta};
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

pub struct AnnouncementService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AnnouncementService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Unexpired announcements, pinned first then newest
    #[instrument(skip(self))]
    pub async fn list_active(&self) -> ServiceResult<Vec<AnnouncementResponse>> {
        let now = Utc::now();
        let announcements = self.ctx.announcement_repo().find_active(now).await?;
        Ok(announcements
            .iter()
            .filter(|a| a.is_active(now))
            .map(AnnouncementResponse::from)
            .collect())
    }

    #[instrument(skip(self, actor), fields(admin_id = %actor.id))]
    pub async fn list_all(&self, actor: &User) -> ServiceResult<Vec<AnnouncementResponse>> {
        require_admin(actor)?;
        let announcements = self.ctx.announcement_repo().list_all().await?;
        Ok(announcements.iter().map(AnnouncementResponse::from).collect())
    }

    #[instrument(skip(self, actor, request, meta), fields(admin_id = %actor.id))]
    pub async fn create(
        &self,
        actor: &User,
        request: CreateAnnouncementRequest,
        meta: &RequestMeta,
    ) -> ServiceResult<AnnouncementResponse> {
        require_admin(actor)?;
        request.validate()?;

        let mut announcement = Announcement::new(
            self.ctx.generate_id(),
            request.title,
            request.content,
            request.announcement_type,
            actor.id,
        );
        announcement.is_pinned = request.is_pinned;
        announcement.expires_at = request.expires_at;

        self.ctx.announcement_repo().create(&announcement).await?;

        info!(announcement_id = %announcement.id, "Announcement created");
        AuditService::new(self.ctx)
            .record(
                Some(actor.id),
                "announcement_create",
                meta,
                json!({
                    "announcement_id": announcement.id.to_string(),
                    "title": announcement.title,
                }),
            )
            .await;

        Ok(AnnouncementResponse::from(&announcement))
    }

    /// Partial update; `expires_at: null` clears the expiry
    #[instrument(skip(self, actor, request, meta), fields(admin_id = %actor.id))]
    pub async fn update(
        &self,
        actor: &User,
        announcement_id: Snowflake,
        request: UpdateAnnouncementRequest,
        meta: &RequestMeta,
    ) -> ServiceResult<AnnouncementResponse> {
        require_admin(actor)?;
        request.validate()?;

        let mut announcement = self.find(announcement_id).await?;
        if let Some(title) = request.title {
            announcement.title = title;
        }
        if let Some(content) = request.content {
            if content.trim().is_empty() {
                return Err(ServiceError::validation("Content cannot be empty"));
            }
            announcement.content = content;
        }
        if let Some(kind) = request.announcement_type {
            announcement.announcement_type = kind;
        }
        if let Some(pinned) = request.is_pinned {
            announcement.is_pinned = pinned;
        }
        if let Some(expires_at) = request.expires_at {
            announcement.expires_at = expires_at;
        }

        self.ctx.announcement_repo().update(&announcement).await?;

        AuditService::new(self.ctx)
            .record(
                Some(actor.id),
                "announcement_update",
                meta,
                json!({ "announcement_id": announcement.id.to_string() }),
            )
            .await;

        Ok(AnnouncementResponse::from(&announcement))
    }

    #[instrument(skip(self, actor, meta), fields(admin_id = %actor.id))]
    pub async fn delete(
        &self,
        actor: &User,
        announcement_id: Snowflake,
        meta: &RequestMeta,
    ) -> ServiceResult<()> {
        require_admin(actor)?;
        let announcement = self.find(announcement_id).await?;
        self.ctx.announcement_repo().delete(announcement.id).await?;

        info!(announcement_id = %announcement.id, "Announcement deleted");
        AuditService::new(self.ctx)
            .record(
                Some(actor.id),
                "announcement_delete",
                meta,
                json!({
                    "announcement_id": announcement.id.to_string(),
                    "title": announcement.title,
                }),
            )
            .await;
        Ok(())
    }

    async fn find(&self, id: Snowflake) -> ServiceResult<Announcement> {
        Ok(self
            .ctx
            .announcement_repo()
            .find_by_id(id)
            .await?
            .ok_or(DomainError::AnnouncementNotFound(id))?)
    }
}
