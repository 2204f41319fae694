use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// The single row of `site_settings` (id = 1)
#[derive(Debug, Clone, FromRow)]
pub struct SiteSettingsModel {
    pub site_name: String,
    pub logo_path: Option<String>,
    pub favicon_path: Option<String>,
    pub primary_color: String,
    pub secondary_color: String,
    pub font_family: String,
    pub custom_css: Option<String>,
    pub updated_at: DateTime<Utc>,
    pub updated_by_admin_id: Option<i64>,
}
