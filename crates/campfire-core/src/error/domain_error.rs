//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("Team not found: {0}")]
    TeamNotFound(Snowflake),

    #[error("Post not found: {0}")]
    PostNotFound(Snowflake),

    #[error("Comment not found: {0}")]
    CommentNotFound(Snowflake),

    #[error("Announcement not found: {0}")]
    AnnouncementNotFound(Snowflake),

    #[error("Report not found: {0}")]
    ReportNotFound(Snowflake),

    #[error("Registration code not found")]
    RegistrationCodeNotFound,

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    #[error("Password too weak: {0}")]
    WeakPassword(String),

    #[error("Invalid registration code")]
    InvalidRegistrationCode,

    #[error("Invalid reaction type: {0}")]
    InvalidReactionType(String),

    #[error("Score for {criterion} must be between 1 and 10, got {value}")]
    InvalidScore { criterion: &'static str, value: i16 },

    #[error("Content too long: max {max} characters")]
    ContentTooLong { max: usize },

    #[error("You are not assigned to a team yet")]
    NoTeamAssigned,

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Missing permission: {0}")]
    MissingPermission(String),

    #[error("Not the author of this content")]
    NotContentAuthor,

    #[error("Account is banned")]
    UserBanned { reason: Option<String> },

    #[error("Cannot perform this action on your own account")]
    CannotTargetSelf,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Username already taken")]
    UsernameAlreadyExists,

    #[error("Team name already taken")]
    TeamNameAlreadyExists,

    #[error("Registration code already used")]
    RegistrationCodeUsed,

    #[error("Registration code already exists")]
    RegistrationCodeExists,

    #[error("You have already reported this content")]
    DuplicateReport,

    #[error("Report already resolved")]
    ReportAlreadyResolved,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::TeamNotFound(_) => "UNKNOWN_TEAM",
            Self::PostNotFound(_) => "UNKNOWN_POST",
            Self::CommentNotFound(_) => "UNKNOWN_COMMENT",
            Self::AnnouncementNotFound(_) => "UNKNOWN_ANNOUNCEMENT",
            Self::ReportNotFound(_) => "UNKNOWN_REPORT",
            Self::RegistrationCodeNotFound => "UNKNOWN_REGISTRATION_CODE",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidUsername(_) => "INVALID_USERNAME",
            Self::WeakPassword(_) => "WEAK_PASSWORD",
            Self::InvalidRegistrationCode => "INVALID_REGISTRATION_CODE",
            Self::InvalidReactionType(_) => "INVALID_REACTION_TYPE",
            Self::InvalidScore { .. } => "INVALID_SCORE",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",
            Self::NoTeamAssigned => "NO_TEAM_ASSIGNED",

            // Authorization
            Self::MissingPermission(_) => "MISSING_PERMISSIONS",
            Self::NotContentAuthor => "NOT_CONTENT_AUTHOR",
            Self::UserBanned { .. } => "USER_BANNED",
            Self::CannotTargetSelf => "CANNOT_TARGET_SELF",

            // Conflict
            Self::UsernameAlreadyExists => "USERNAME_ALREADY_EXISTS",
            Self::TeamNameAlreadyExists => "TEAM_NAME_ALREADY_EXISTS",
            Self::RegistrationCodeUsed => "REGISTRATION_CODE_USED",
            Self::RegistrationCodeExists => "REGISTRATION_CODE_EXISTS",
            Self::DuplicateReport => "DUPLICATE_REPORT",
            Self::ReportAlreadyResolved => "REPORT_ALREADY_RESOLVED",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::TeamNotFound(_)
                | Self::PostNotFound(_)
                | Self::CommentNotFound(_)
                | Self::AnnouncementNotFound(_)
                | Self::ReportNotFound(_)
                | Self::RegistrationCodeNotFound
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidUsername(_)
                | Self::WeakPassword(_)
                | Self::InvalidRegistrationCode
                | Self::InvalidReactionType(_)
                | Self::InvalidScore { .. }
                | Self::ContentTooLong { .. }
                | Self::NoTeamAssigned
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::MissingPermission(_)
                | Self::NotContentAuthor
                | Self::UserBanned { .. }
                | Self::CannotTargetSelf
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::UsernameAlreadyExists
                | Self::TeamNameAlreadyExists
                | Self::RegistrationCodeUsed
                | Self::RegistrationCodeExists
                | Self::DuplicateReport
                | Self::ReportAlreadyResolved
        )
    }
}
