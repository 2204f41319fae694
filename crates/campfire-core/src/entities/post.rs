//! Post entity - a timeline entry authored by a team member

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Maximum description length in characters
pub const MAX_DESCRIPTION_LENGTH: usize = 5000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub team_id: Snowflake,
    pub description: String,
    pub is_global: bool,
    pub is_hidden: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Post {
    pub fn new(
        id: Snowflake,
        user_id: Snowflake,
        team_id: Snowflake,
        description: String,
        is_global: bool,
    ) -> Self {
        Self {
            id,
            user_id,
            team_id,
            description,
            is_global,
            is_hidden: false,
            deleted_at: None,
            created_at: Utc::now(),
        }
    }

    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Deleted posts are gone for everyone; hidden posts only for non-admins.
    pub fn is_visible_to(&self, is_admin: bool) -> bool {
        !self.is_deleted() && (!self.is_hidden || is_admin)
    }

    #[inline]
    pub fn is_author(&self, user_id: Snowflake) -> bool {
        self.user_id == user_id
    }

    pub fn soft_delete(&mut self) {
        if self.deleted_at.is_none() {
            self.deleted_at = Some(Utc::now());
        }
    }
}

/// Kind of attachment on a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
}

impl MediaType {
    const IMAGE_EXTENSIONS: &'static [&'static str] = &["png", "jpg", "jpeg", "gif"];
    const VIDEO_EXTENSIONS: &'static [&'static str] = &["mp4", "webm", "mov"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
        }
    }

    /// Infer the media type from a lowercase file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        if Self::IMAGE_EXTENSIONS.contains(&ext) {
            Some(Self::Image)
        } else if Self::VIDEO_EXTENSIONS.contains(&ext) {
            Some(Self::Video)
        } else {
            None
        }
    }

    /// Upload subfolder the file is stored in
    pub fn folder(&self) -> &'static str {
        match self {
            Self::Image => "posts",
            Self::Video => "videos",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" => Ok(Self::Image),
            "video" => Ok(Self::Video),
            other => Err(DomainError::ValidationError(format!("Unknown media type: {other}"))),
        }
    }
}

/// Ordered attachment on a post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostMedia {
    pub id: Snowflake,
    pub post_id: Snowflake,
    pub media_type: MediaType,
    pub file_path: String,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
}

impl PostMedia {
    pub fn new(
        id: Snowflake,
        post_id: Snowflake,
        media_type: MediaType,
        file_path: String,
        display_order: i32,
    ) -> Self {
        Self {
            id,
            post_id,
            media_type,
            file_path,
            display_order,
            created_at: Utc::now(),
        }
    }

    pub fn url(&self) -> String {
        format!("/uploads/{}/{}", self.media_type.folder(), self.file_path)
    }
}
