use campfire_core::SiteSettings;

use super::opt_id;
use crate::models::SiteSettingsModel;

impl From<SiteSettingsModel> for SiteSettings {
    fn from(model: SiteSettingsModel) -> Self {
        SiteSettings {
            site_name: model.site_name,
            logo_path: model.logo_path,
            favicon_path: model.favicon_path,
            primary_color: model.primary_color,
            secondary_color: model.secondary_color,
            font_family: model.font_family,
            custom_css: model.custom_css,
            updated_at: model.updated_at,
            updated_by_admin_id: opt_id(model.updated_by_admin_id),
        }
    }
}
