//! First-run seeding: upload folders, the admin account, registration codes
//! and the settings row

use campfire_common::auth::hash_password;
use campfire_common::BootstrapConfig;
use campfire_core::entities::User;
use tracing::{info, instrument, warn};

use super::admin::generate_code_batch;
use super::context::ServiceContext;
use super::error::ServiceResult;
use super::settings::SettingsService;

/// What a bootstrap run changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapReport {
    pub admin_created: bool,
    pub codes_generated: usize,
}

pub struct BootstrapService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> BootstrapService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Idempotent; safe to run on every start
    #[instrument(skip(self, config))]
    pub async fn run(&self, config: &BootstrapConfig) -> ServiceResult<BootstrapReport> {
        self.ctx.file_store().ensure_folders().await?;

        let report = BootstrapReport {
            admin_created: self.seed_admin(config).await?,
            codes_generated: self.seed_codes(config.initial_code_count).await?,
        };
        SettingsService::new(self.ctx).ensure().await?;

        info!(
            admin_created = report.admin_created,
            codes_generated = report.codes_generated,
            "Bootstrap complete"
        );
        Ok(report)
    }

    async fn seed_admin(&self, config: &BootstrapConfig) -> ServiceResult<bool> {
        let Some(username) = config.admin_username.as_deref() else {
            return Ok(false);
        };
        if self.ctx.user_repo().username_exists(username).await? {
            return Ok(false);
        }
        let Some(password) = config.admin_password.as_deref() else {
            warn!(username, "ADMIN_PASSWORD not set, admin account not created");
            return Ok(false);
        };

        let mut admin = User::new(self.ctx.generate_id(), username.to_string());
        admin.is_admin = true;
        self.ctx
            .user_repo()
            .create(&admin, &hash_password(password)?)
            .await?;

        info!(user_id = %admin.id, username, "Seeded admin account");
        Ok(true)
    }

    async fn seed_codes(&self, count: u32) -> ServiceResult<usize> {
        if count == 0 || self.ctx.code_repo().count().await? > 0 {
            return Ok(0);
        }
        Ok(generate_code_batch(self.ctx, count).await?.len())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::services::testing::{self, MemoryStore};

    fn config(password: Option<&str>, codes: u32) -> BootstrapConfig {
        BootstrapConfig {
            admin_username: Some("admin".to_string()),
            admin_password: password.map(str::to_string),
            initial_code_count: codes,
        }
    }

    #[tokio::test]
    async fn test_run_is_idempotent() {
        let store = Arc::new(MemoryStore::default());
        let ctx = testing::context(&store).await;
        let service = BootstrapService::new(&ctx);

        let first = service.run(&config(Some("campfire"), 10)).await.unwrap();
        assert_eq!(
            first,
            BootstrapReport {
                admin_created: true,
                codes_generated: 10,
            }
        );
        assert!(ctx.file_store().root().join("profiles").is_dir());
        assert!(store.settings.lock().unwrap().is_some());

        let second = service.run(&config(Some("campfire"), 10)).await.unwrap();
        assert_eq!(second, BootstrapReport::default());
        assert_eq!(store.codes.lock().unwrap().len(), 10);

        let users = store.users.lock().unwrap();
        assert_eq!(users.len(), 1);
        assert!(users[0].0.is_admin);
    }

    #[tokio::test]
    async fn test_admin_needs_a_password() {
        let store = Arc::new(MemoryStore::default());
        let ctx = testing::context(&store).await;

        let report = BootstrapService::new(&ctx)
            .run(&config(None, 0))
            .await
            .unwrap();
        assert_eq!(report, BootstrapReport::default());
        assert!(store.users.lock().unwrap().is_empty());
    }
}
