//! Report entity - a moderation queue entry against a post or comment

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::value_objects::Snowflake;

pub const MAX_DETAILS_LENGTH: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportReason {
    Spam,
    Inappropriate,
    Offensive,
    Other,
}

impl ReportReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spam => "spam",
            Self::Inappropriate => "inappropriate",
            Self::Offensive => "offensive",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ReportReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportReason {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "spam" => Ok(Self::Spam),
            "inappropriate" => Ok(Self::Inappropriate),
            "offensive" => Ok(Self::Offensive),
            "other" => Ok(Self::Other),
            other => Err(DomainError::ValidationError(format!(
                "Unknown report reason: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    #[default]
    Pending,
    Resolved,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Resolved => "resolved",
        }
    }
}

impl FromStr for ReportStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "resolved" => Ok(Self::Resolved),
            other => Err(DomainError::ValidationError(format!(
                "Unknown report status: {other}"
            ))),
        }
    }
}

/// Reported content. Exactly one target per report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportTarget {
    Post(Snowflake),
    Comment(Snowflake),
}

impl ReportTarget {
    /// Build from the `content_type` path segment
    pub fn parse(content_type: &str, id: Snowflake) -> Result<Self, DomainError> {
        match content_type {
            "post" => Ok(Self::Post(id)),
            "comment" => Ok(Self::Comment(id)),
            other => Err(DomainError::ValidationError(format!(
                "Unknown content type: {other}"
            ))),
        }
    }

    pub fn post_id(&self) -> Option<Snowflake> {
        match self {
            Self::Post(id) => Some(*id),
            Self::Comment(_) => None,
        }
    }

    pub fn comment_id(&self) -> Option<Snowflake> {
        match self {
            Self::Comment(id) => Some(*id),
            Self::Post(_) => None,
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Post(_) => "post",
            Self::Comment(_) => "comment",
        }
    }

    pub fn id(&self) -> Snowflake {
        match self {
            Self::Post(id) | Self::Comment(id) => *id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub id: Snowflake,
    pub target: ReportTarget,
    pub reported_by_user_id: Snowflake,
    pub reason: ReportReason,
    pub details: Option<String>,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub resolved_by_admin_id: Option<Snowflake>,
}

impl Report {
    pub fn new(
        id: Snowflake,
        target: ReportTarget,
        reported_by_user_id: Snowflake,
        reason: ReportReason,
        details: Option<String>,
    ) -> Self {
        Self {
            id,
            target,
            reported_by_user_id,
            reason,
            details,
            status: ReportStatus::Pending,
            created_at: Utc::now(),
            resolved_at: None,
            resolved_by_admin_id: None,
        }
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.status == ReportStatus::Pending
    }

    pub fn resolve(&mut self, admin_id: Snowflake) -> Result<(), DomainError> {
        if !self.is_pending() {
            return Err(DomainError::ReportAlreadyResolved);
        }
        self.status = ReportStatus::Resolved;
        self.resolved_at = Some(Utc::now());
        self.resolved_by_admin_id = Some(admin_id);
        Ok(())
    }
}
