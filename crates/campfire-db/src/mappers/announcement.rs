use campfire_core::{Announcement, Snowflake};

use crate::models::AnnouncementModel;

impl From<AnnouncementModel> for Announcement {
    fn from(model: AnnouncementModel) -> Self {
        Announcement {
            id: Snowflake::new(model.id),
            title: model.title,
            content: model.content,
            announcement_type: model.announcement_type.parse().unwrap_or_default(),
            is_pinned: model.is_pinned,
            created_by_admin_id: Snowflake::new(model.created_by_admin_id),
            created_at: model.created_at,
            expires_at: model.expires_at,
        }
    }
}
