//! Application error type shared by every layer above the domain

use campfire_core::DomainError;
use serde::Serialize;
use std::fmt;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Authentication
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Missing authentication")]
    MissingAuth,

    #[error("Insufficient permissions")]
    InsufficientPermissions,

    // Validation
    #[error("Validation error: {0}")]
    Validation(String),

    // Resources
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Rate limit exceeded. Please wait {wait_minutes} minutes before trying again.")]
    RateLimitExceeded { wait_minutes: i64 },

    // Infrastructure
    #[error("Database error: {0}")]
    Database(String),

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,

            Self::InvalidCredentials | Self::InvalidToken | Self::TokenExpired | Self::MissingAuth => 401,

            Self::InsufficientPermissions => 403,

            Self::NotFound(_) => 404,

            Self::Conflict(_) => 409,

            Self::RateLimitExceeded { .. } => 429,

            Self::Database(_)
            | Self::Cache(_)
            | Self::Storage(_)
            | Self::Internal(_)
            | Self::Config(_) => 500,

            Self::Domain(e) => {
                if e.is_not_found() {
                    404
                } else if e.is_authorization() {
                    403
                } else if e.is_validation() {
                    400
                } else if e.is_conflict() {
                    409
                } else {
                    500
                }
            }
        }
    }

    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::MissingAuth => "MISSING_AUTH",
            Self::InsufficientPermissions => "INSUFFICIENT_PERMISSIONS",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::RateLimitExceeded { .. } => "RATE_LIMIT_EXCEEDED",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Cache(_) => "CACHE_ERROR",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Domain(e) => e.code(),
        }
    }

    #[must_use]
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }

    #[must_use]
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status_code())
    }

    #[must_use]
    pub fn not_found(resource: impl fmt::Display) -> Self {
        Self::NotFound(resource.to_string())
    }

    #[must_use]
    pub fn validation(msg: impl fmt::Display) -> Self {
        Self::Validation(msg.to_string())
    }

    /// Rate limit error rounding the remaining window up to whole minutes
    #[must_use]
    pub fn rate_limited(retry_after: chrono::Duration) -> Self {
        let seconds = retry_after.num_seconds().max(1);
        Self::RateLimitExceeded {
            wait_minutes: (seconds + 59) / 60,
        }
    }

    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

/// Error body: `{"code", "message", "details"?}`
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        Self {
            code: err.error_code().to_string(),
            message: err.to_string(),
            details: None,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use campfire_core::Snowflake;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::InvalidCredentials.status_code(), 401);
        assert_eq!(AppError::InsufficientPermissions.status_code(), 403);
        assert_eq!(AppError::not_found("post").status_code(), 404);
        assert_eq!(AppError::validation("x").status_code(), 400);
        assert_eq!(AppError::rate_limited(chrono::Duration::minutes(3)).status_code(), 429);
        assert_eq!(AppError::Storage("disk".into()).status_code(), 500);
    }

    #[test]
    fn test_domain_errors_map_by_category() {
        let not_found = AppError::from(DomainError::PostNotFound(Snowflake::new(1)));
        assert_eq!(not_found.status_code(), 404);

        let banned = AppError::from(DomainError::UserBanned { reason: None });
        assert_eq!(banned.status_code(), 403);

        let duplicate = AppError::from(DomainError::DuplicateReport);
        assert_eq!(duplicate.status_code(), 409);

        let no_team = AppError::from(DomainError::NoTeamAssigned);
        assert_eq!(no_team.status_code(), 400);
    }

    #[test]
    fn test_rate_limit_rounds_up_to_minutes() {
        let err = AppError::rate_limited(chrono::Duration::seconds(61));
        assert!(matches!(err, AppError::RateLimitExceeded { wait_minutes: 2 }));
        assert_eq!(
            err.to_string(),
            "Rate limit exceeded. Please wait 2 minutes before trying again."
        );

        let err = AppError::rate_limited(chrono::Duration::zero());
        assert!(matches!(err, AppError::RateLimitExceeded { wait_minutes: 1 }));
    }

    #[test]
    fn test_error_response() {
        let err = AppError::not_found("team");
        let body = ErrorResponse::from(&err);

        assert_eq!(body.code, "NOT_FOUND");
        assert_eq!(body.message, "Resource not found: team");
        assert!(body.details.is_none());
        assert!(err.is_client_error());
        assert!(!err.is_server_error());
    }
}
