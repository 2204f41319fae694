//! Site branding settings

use campfire_common::UploadKind;
use campfire_core::entities::{SiteSettings, User};
use serde_json::json;
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{SiteSettingsResponse, UpdateSettingsRequest};

use super::access::require_admin;
use super::audit::{AuditService, RequestMeta};
use super::context::ServiceContext;
use super::error::ServiceResult;
use super::uploads::UploadedFile;

pub struct SettingsService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SettingsService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// The settings row, created with defaults on first read
    #[instrument(skip(self))]
    pub async fn ensure(&self) -> ServiceResult<SiteSettings> {
        if let Some(settings) = self.ctx.settings_repo().get().await? {
            return Ok(settings);
        }

        let settings = SiteSettings::default();
        self.ctx.settings_repo().save(&settings).await?;
        info!("Created default site settings");
        Ok(settings)
    }

    pub async fn get(&self) -> ServiceResult<SiteSettingsResponse> {
        let settings = self.ensure().await?;
        Ok(SiteSettingsResponse::from(&settings))
    }

    #[instrument(skip(self, actor, request, meta), fields(admin_id = %actor.id))]
    pub async fn update(
        &self,
        actor: &User,
        request: UpdateSettingsRequest,
        meta: &RequestMeta,
    ) -> ServiceResult<SiteSettingsResponse> {
        require_admin(actor)?;
        request.validate()?;

        let mut settings = self.ensure().await?;
        let mut changed = Vec::new();

        if let Some(name) = request.site_name {
            settings.site_name = name.trim().to_string();
            changed.push("site_name");
        }
        if let Some(color) = request.primary_color {
            settings.primary_color = color;
            changed.push("primary_color");
        }
        if let Some(color) = request.secondary_color {
            settings.secondary_color = color;
            changed.push("secondary_color");
        }
        if let Some(font) = request.font_family {
            settings.font_family = font.trim().to_string();
            changed.push("font_family");
        }
        if let Some(css) = request.custom_css {
            settings.custom_css = (!css.trim().is_empty()).then_some(css);
            changed.push("custom_css");
        }

        settings.touch(actor.id);
        self.ctx.settings_repo().save(&settings).await?;

        info!(?changed, "Site settings updated");
        AuditService::new(self.ctx)
            .record(
                Some(actor.id),
                "settings_update",
                meta,
                json!({ "changed": changed }),
            )
            .await;

        Ok(SiteSettingsResponse::from(&settings))
    }

    #[instrument(skip(self, actor, file, meta), fields(admin_id = %actor.id))]
    pub async fn upload_logo(
        &self,
        actor: &User,
        file: UploadedFile,
        meta: &RequestMeta,
    ) -> ServiceResult<SiteSettingsResponse> {
        self.upload_branding(actor, file, UploadKind::Logo, meta)
            .await
    }

    #[instrument(skip(self, actor, file, meta), fields(admin_id = %actor.id))]
    pub async fn upload_favicon(
        &self,
        actor: &User,
        file: UploadedFile,
        meta: &RequestMeta,
    ) -> ServiceResult<SiteSettingsResponse> {
        self.upload_branding(actor, file, UploadKind::Favicon, meta)
            .await
    }

    async fn upload_branding(
        &self,
        actor: &User,
        file: UploadedFile,
        kind: UploadKind,
        meta: &RequestMeta,
    ) -> ServiceResult<SiteSettingsResponse> {
        require_admin(actor)?;
        let mut settings = self.ensure().await?;

        let store = self.ctx.file_store();
        let name = store.save(&file, kind).await?;
        let (slot, action) = match kind {
            UploadKind::Favicon => (&mut settings.favicon_path, "settings_favicon_upload"),
            _ => (&mut settings.logo_path, "settings_logo_upload"),
        };
        let previous = slot.replace(name.clone());

        settings.touch(actor.id);
        self.ctx.settings_repo().save(&settings).await?;
        if let Some(old) = previous {
            store.remove(kind, &old).await;
        }

        AuditService::new(self.ctx)
            .record(Some(actor.id), action, meta, json!({ "file": name }))
            .await;

        Ok(SiteSettingsResponse::from(&settings))
    }
}
