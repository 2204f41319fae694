//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use campfire_core::{
    AnnouncementType, ReactionType, ReportReason, ReportStatus, SiteSettings, Snowflake, Theme,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationError};

/// Code batch sizes the admin console offers
pub const CODE_BATCH_SIZES: [u32; 4] = [5, 10, 20, 50];

fn validate_registration_code(code: &str) -> Result<(), ValidationError> {
    if campfire_core::RegistrationCode::is_valid_format(code) {
        Ok(())
    } else {
        Err(ValidationError::new("registration_code")
            .with_message("Registration code must be 6 digits".into()))
    }
}

/// Empty clears the link, anything else must be an http(s) URL
fn validate_social_url(url: &str) -> Result<(), ValidationError> {
    if url.trim().is_empty() || campfire_common::validate_url(url.trim()) {
        Ok(())
    } else {
        Err(ValidationError::new("url").with_message("Invalid URL".into()))
    }
}

fn validate_hex_color(color: &str) -> Result<(), ValidationError> {
    if SiteSettings::is_hex_color(color) {
        Ok(())
    } else {
        Err(ValidationError::new("color").with_message("Colors must look like #RRGGBB".into()))
    }
}

fn validate_code_count(count: u32) -> Result<(), ValidationError> {
    if CODE_BATCH_SIZES.contains(&count) {
        Ok(())
    } else {
        Err(ValidationError::new("count").with_message("Count must be 5, 10, 20 or 50".into()))
    }
}

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`)
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// ============================================================================
// Auth Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(custom(function = "validate_registration_code"))]
    pub registration_code: String,

    #[validate(length(min = 3, max = 80, message = "Username must be 3-80 characters"))]
    pub username: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogoutRequest {
    pub refresh_token: String,
}

// ============================================================================
// User Requests
// ============================================================================

/// Social links; omitted fields are left alone, empty strings clear
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(custom(function = "validate_social_url"))]
    pub github_url: Option<String>,

    #[validate(custom(function = "validate_social_url"))]
    pub linkedin_url: Option<String>,

    #[validate(custom(function = "validate_social_url"))]
    pub twitter_url: Option<String>,

    #[validate(custom(function = "validate_social_url"))]
    pub portfolio_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateThemeRequest {
    pub theme: Theme,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchUsersQuery {
    #[serde(default)]
    pub q: String,
}

// ============================================================================
// Post Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, max = 5000, message = "Description must be 1-5000 characters"))]
    pub description: String,

    #[serde(default)]
    pub is_global: bool,
}

/// `?before=<id>&limit=<n>` on timelines
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct TimelineQuery {
    pub before: Option<Snowflake>,

    #[validate(range(min = 1, max = 100, message = "Limit must be 1-100"))]
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ToggleReactionRequest {
    pub reaction_type: ReactionType,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, max = 2000, message = "Comment must be 1-2000 characters"))]
    pub content: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateReportRequest {
    pub reason: ReportReason,

    #[validate(length(max = 1000, message = "Details must be at most 1000 characters"))]
    pub details: Option<String>,
}

// ============================================================================
// Judging Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CastVoteRequest {
    #[validate(range(min = 1, max = 10, message = "Scores must be 1-10"))]
    pub innovation: i16,

    #[validate(range(min = 1, max = 10, message = "Scores must be 1-10"))]
    pub implementation: i16,

    #[validate(range(min = 1, max = 10, message = "Scores must be 1-10"))]
    pub design: i16,

    #[validate(range(min = 1, max = 10, message = "Scores must be 1-10"))]
    pub presentation: i16,

    pub comments: Option<String>,
}

// ============================================================================
// Announcement Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAnnouncementRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,

    #[serde(default)]
    pub announcement_type: AnnouncementType,

    #[serde(default)]
    pub is_pinned: bool,

    pub expires_at: Option<DateTime<Utc>>,
}

/// Partial update; `"expires_at": null` removes the expiry
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateAnnouncementRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 1, message = "Content is required"))]
    pub content: Option<String>,

    pub announcement_type: Option<AnnouncementType>,

    pub is_pinned: Option<bool>,

    #[serde(default, deserialize_with = "double_option")]
    pub expires_at: Option<Option<DateTime<Utc>>>,
}

// ============================================================================
// Moderation Requests
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolveAction {
    Dismiss,
    HideContent,
    DeleteContent,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResolveReportRequest {
    pub action: ResolveAction,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportListQuery {
    pub status: Option<ReportStatus>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct BanUserRequest {
    #[validate(length(max = 500, message = "Reason must be at most 500 characters"))]
    pub reason: Option<String>,

    /// Permanent when absent
    #[validate(range(min = 1, message = "Duration must be at least one hour"))]
    pub duration_hours: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AuditLogListQuery {
    #[validate(length(max = 50))]
    pub action_type: Option<String>,

    pub user_id: Option<Snowflake>,

    pub before: Option<Snowflake>,

    #[validate(range(min = 1, max = 100, message = "Limit must be 1-100"))]
    pub limit: Option<i64>,
}

// ============================================================================
// Admin Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 80, message = "Username must be 3-80 characters"))]
    pub username: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: String,

    #[serde(default)]
    pub is_admin: bool,

    #[serde(default)]
    pub is_judge: bool,

    pub team_id: Option<Snowflake>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssignTeamRequest {
    /// `null` removes the user from their team
    pub team_id: Option<Snowflake>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetRolesRequest {
    pub is_admin: bool,
    pub is_judge: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TeamNameRequest {
    #[validate(length(min = 2, max = 100, message = "Team name must be 2-100 characters"))]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerateCodesRequest {
    #[validate(custom(function = "validate_code_count"))]
    pub count: u32,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateSettingsRequest {
    #[validate(length(min = 1, max = 100, message = "Site name must be 1-100 characters"))]
    pub site_name: Option<String>,

    #[validate(custom(function = "validate_hex_color"))]
    pub primary_color: Option<String>,

    #[validate(custom(function = "validate_hex_color"))]
    pub secondary_color: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Font family must be 1-100 characters"))]
    pub font_family: Option<String>,

    /// Empty string clears the custom stylesheet
    pub custom_css: Option<String>,
}
