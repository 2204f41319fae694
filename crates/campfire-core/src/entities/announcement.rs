//! Announcement entity - site-wide notices posted by admins

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::value_objects::Snowflake;

pub const MAX_TITLE_LENGTH: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnouncementType {
    #[default]
    Info,
    Warning,
    Success,
    Important,
}

impl AnnouncementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Success => "success",
            Self::Important => "important",
        }
    }
}

impl fmt::Display for AnnouncementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnnouncementType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" => Ok(Self::Info),
            "warning" => Ok(Self::Warning),
            "success" => Ok(Self::Success),
            "important" => Ok(Self::Important),
            other => Err(DomainError::ValidationError(format!(
                "Unknown announcement type: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    pub id: Snowflake,
    pub title: String,
    pub content: String,
    pub announcement_type: AnnouncementType,
    pub is_pinned: bool,
    pub created_by_admin_id: Snowflake,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Announcement {
    pub fn new(
        id: Snowflake,
        title: String,
        content: String,
        announcement_type: AnnouncementType,
        created_by_admin_id: Snowflake,
    ) -> Self {
        Self {
            id,
            title,
            content,
            announcement_type,
            is_pinned: false,
            created_by_admin_id,
            created_at: Utc::now(),
            expires_at: None,
        }
    }

    /// Announcements without an expiry never lapse
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_none_or(|at| at > now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_is_active() {
        let now = Utc::now();
        let mut a = Announcement::new(
            Snowflake::new(1),
            "Lunch".to_string(),
            "Pizza at noon".to_string(),
            AnnouncementType::Info,
            Snowflake::new(2),
        );
        assert!(a.is_active(now));

        a.expires_at = Some(now - Duration::minutes(1));
        assert!(!a.is_active(now));

        a.expires_at = Some(now + Duration::minutes(1));
        assert!(a.is_active(now));
    }

    #[test]
    fn test_type_roundtrip() {
        assert_eq!(
            "important".parse::<AnnouncementType>().unwrap(),
            AnnouncementType::Important
        );
        assert!("urgent".parse::<AnnouncementType>().is_err());
    }
}
