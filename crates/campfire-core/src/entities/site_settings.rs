//! Site settings - singleton branding row

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

pub const DEFAULT_SITE_NAME: &str = "Campfire Adelaide Dashboard";
pub const DEFAULT_PRIMARY_COLOR: &str = "#FF6B35";
pub const DEFAULT_SECONDARY_COLOR: &str = "#004E89";
pub const DEFAULT_FONT_FAMILY: &str = "Inter";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteSettings {
    pub site_name: String,
    pub logo_path: Option<String>,
    pub favicon_path: Option<String>,
    pub primary_color: String,
    pub secondary_color: String,
    pub font_family: String,
    pub custom_css: Option<String>,
    pub updated_at: DateTime<Utc>,
    pub updated_by_admin_id: Option<Snowflake>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            site_name: DEFAULT_SITE_NAME.to_string(),
            logo_path: None,
            favicon_path: None,
            primary_color: DEFAULT_PRIMARY_COLOR.to_string(),
            secondary_color: DEFAULT_SECONDARY_COLOR.to_string(),
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            custom_css: None,
            updated_at: Utc::now(),
            updated_by_admin_id: None,
        }
    }
}

impl SiteSettings {
    /// `#RRGGBB`, case-insensitive
    pub fn is_hex_color(value: &str) -> bool {
        value.len() == 7
            && value.starts_with('#')
            && value[1..].bytes().all(|b| b.is_ascii_hexdigit())
    }

    pub fn touch(&mut self, admin_id: Snowflake) {
        self.updated_at = Utc::now();
        self.updated_by_admin_id = Some(admin_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = SiteSettings::default();
        assert_eq!(s.site_name, "Campfire Adelaide Dashboard");
        assert_eq!(s.primary_color, "#FF6B35");
        assert_eq!(s.secondary_color, "#004E89");
        assert_eq!(s.font_family, "Inter");
    }

    #[test]
    fn test_hex_color() {
        assert!(SiteSettings::is_hex_color("#ff6b35"));
        assert!(SiteSettings::is_hex_color("#004E89"));
        assert!(!SiteSettings::is_hex_color("004E89"));
        assert!(!SiteSettings::is_hex_color("#04E89"));
        assert!(!SiteSettings::is_hex_color("#GGGGGG"));
    }
}
