//! PostgreSQL implementation of SiteSettingsRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use campfire_core::{RepoResult, SiteSettings, SiteSettingsRepository, Snowflake};

use crate::models::SiteSettingsModel;

use super::error::map_db_error;

#[derive(Clone)]
pub struct PgSiteSettingsRepository {
    pool: PgPool,
}

impl PgSiteSettingsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SiteSettingsRepository for PgSiteSettingsRepository {
    #[instrument(skip(self))]
    async fn get(&self) -> RepoResult<Option<SiteSettings>> {
        let result = sqlx::query_as::<_, SiteSettingsModel>(
            r"
            SELECT site_name, logo_path, favicon_path, primary_color, secondary_color,
                   font_family, custom_css, updated_at, updated_by_admin_id
            FROM site_settings
            WHERE id = 1
            ",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(SiteSettings::from))
    }

    #[instrument(skip(self, settings))]
    async fn save(&self, settings: &SiteSettings) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO site_settings (id, site_name, logo_path, favicon_path, primary_color,
                                       secondary_color, font_family, custom_css, updated_at,
                                       updated_by_admin_id)
            VALUES (1, $1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (id) DO UPDATE
            SET site_name = EXCLUDED.site_name,
                logo_path = EXCLUDED.logo_path,
                favicon_path = EXCLUDED.favicon_path,
                primary_color = EXCLUDED.primary_color,
                secondary_color = EXCLUDED.secondary_color,
                font_family = EXCLUDED.font_family,
                custom_css = EXCLUDED.custom_css,
                updated_at = EXCLUDED.updated_at,
                updated_by_admin_id = EXCLUDED.updated_by_admin_id
            ",
        )
        .bind(&settings.site_name)
        .bind(&settings.logo_path)
        .bind(&settings.favicon_path)
        .bind(&settings.primary_color)
        .bind(&settings.secondary_color)
        .bind(&settings.font_family)
        .bind(&settings.custom_css)
        .bind(settings.updated_at)
        .bind(settings.updated_by_admin_id.map(Snowflake::into_inner))
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}
