//! User entity - a dashboard account

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::value_objects::{Roles, Snowflake};

/// UI theme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(DomainError::ValidationError(format!("Unknown theme: {other}"))),
        }
    }
}

/// Optional profile links
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SocialLinks {
    pub github_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub twitter_url: Option<String>,
    pub portfolio_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub username: String,
    pub is_admin: bool,
    pub is_judge: bool,
    pub team_id: Option<Snowflake>,
    pub profile_picture: Option<String>,
    pub theme: Theme,
    pub is_banned: bool,
    pub ban_reason: Option<String>,
    pub banned_until: Option<DateTime<Utc>>,
    pub social: SocialLinks,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(id: Snowflake, username: String) -> Self {
        Self {
            id,
            username,
            is_admin: false,
            is_judge: false,
            team_id: None,
            profile_picture: None,
            theme: Theme::default(),
            is_banned: false,
            ban_reason: None,
            banned_until: None,
            social: SocialLinks::default(),
            created_at: Utc::now(),
        }
    }

    #[inline]
    pub fn roles(&self) -> Roles {
        Roles::from_flags(self.is_admin, self.is_judge)
    }

    /// A ban with no end date is permanent; one whose end date passed has lapsed.
    pub fn is_actively_banned(&self, now: DateTime<Utc>) -> bool {
        self.is_banned && self.banned_until.is_none_or(|until| until > now)
    }

    pub fn ban(&mut self, reason: Option<String>, until: Option<DateTime<Utc>>) {
        self.is_banned = true;
        self.ban_reason = reason;
        self.banned_until = until;
    }

    pub fn unban(&mut self) {
        self.is_banned = false;
        self.ban_reason = None;
        self.banned_until = None;
    }

    /// Profile picture path relative to the upload root
    pub fn profile_picture_url(&self) -> Option<String> {
        self.profile_picture
            .as_ref()
            .map(|name| format!("/uploads/profiles/{name}"))
    }
}
