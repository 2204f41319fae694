//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use campfire_core::{AnnouncementType, MediaType, ReactionCount, ReportReason, ReportStatus, Theme};
use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

// ============================================================================
// Common Response Types
// ============================================================================

/// Cursor-paginated list
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    /// `next_before` is the id to pass as `before` for the next page
    pub fn new(data: Vec<T>, next_before: Option<String>, limit: i64) -> Self {
        let has_more = next_before.is_some();
        Self {
            data,
            pagination: PaginationMeta {
                next_before,
                has_more,
                limit,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_before: Option<String>,
    pub has_more: bool,
    pub limit: i64,
}

// ============================================================================
// Health Responses
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy",
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub database: bool,
    pub redis: bool,
}

impl ReadinessResponse {
    pub fn ready(database: bool, redis: bool) -> Self {
        Self {
            status: if database && redis { "ready" } else { "not_ready" },
            checks: HealthChecks { database, redis },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.checks.database && self.checks.redis
    }
}

// ============================================================================
// Auth Responses
// ============================================================================

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: CurrentUserResponse,
}

// ============================================================================
// User Responses
// ============================================================================

/// Author/mentioner badge shown next to content
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    pub id: String,
    pub username: String,
    pub profile_picture: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SocialLinksResponse {
    pub github_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub twitter_url: Option<String>,
    pub portfolio_url: Option<String>,
}

/// The authenticated user's own account
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUserResponse {
    pub id: String,
    pub username: String,
    pub is_admin: bool,
    pub is_judge: bool,
    pub roles: Vec<&'static str>,
    pub team_id: Option<String>,
    pub team_name: Option<String>,
    pub profile_picture: Option<String>,
    pub theme: Theme,
    pub social: SocialLinksResponse,
    pub created_at: DateTime<Utc>,
}

/// Another user's profile
#[derive(Debug, Clone, Serialize)]
pub struct UserProfileResponse {
    pub id: String,
    pub username: String,
    pub is_admin: bool,
    pub is_judge: bool,
    pub team_id: Option<String>,
    pub team_name: Option<String>,
    pub profile_picture: Option<String>,
    pub social: SocialLinksResponse,
    pub created_at: DateTime<Utc>,
}

/// Admin console row, ban state included
#[derive(Debug, Clone, Serialize)]
pub struct AdminUserResponse {
    pub id: String,
    pub username: String,
    pub is_admin: bool,
    pub is_judge: bool,
    pub team_id: Option<String>,
    pub is_banned: bool,
    pub ban_reason: Option<String>,
    pub banned_until: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MentionResponse {
    pub id: String,
    /// `post` or `comment`
    pub source_type: &'static str,
    pub post_id: Option<String>,
    pub comment_id: Option<String>,
    pub mentioner: Option<UserSummary>,
    pub time_ago: String,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Team Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct TeamResponse {
    pub id: String,
    pub name: String,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamDetailResponse {
    #[serde(flatten)]
    pub team: TeamResponse,
    pub members: Vec<UserSummary>,
}

// ============================================================================
// Post Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct MediaResponse {
    pub id: String,
    pub media_type: MediaType,
    pub url: String,
    pub display_order: i32,
}

/// Serializes as `{"like": {"count": 2, "user_reacted": true}, ...}` in a fixed order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionSummary(pub Vec<ReactionCount>);

#[derive(Serialize)]
struct ReactionEntry {
    count: i64,
    user_reacted: bool,
}

impl Serialize for ReactionSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for entry in &self.0 {
            map.serialize_entry(
                entry.reaction_type.as_str(),
                &ReactionEntry {
                    count: entry.count,
                    user_reacted: entry.user_reacted,
                },
            )?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PostResponse {
    pub id: String,
    pub author: UserSummary,
    pub team_id: String,
    pub description: String,
    pub content_html: String,
    pub is_global: bool,
    pub is_hidden: bool,
    pub media: Vec<MediaResponse>,
    pub reactions: ReactionSummary,
    pub comment_count: i64,
    pub can_delete: bool,
    pub time_ago: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentResponse {
    pub id: String,
    pub post_id: String,
    pub user: UserSummary,
    pub content_html: String,
    pub can_delete: bool,
    pub time_ago: String,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Judging Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct VoteResponse {
    pub id: String,
    pub team_id: String,
    pub innovation: i16,
    pub implementation: i16,
    pub design: i16,
    pub presentation: i16,
    pub total_score: f64,
    pub comments: Option<String>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct JudgingTeamResponse {
    #[serde(flatten)]
    pub team: TeamResponse,
    pub my_vote: Option<VoteResponse>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub team_id: String,
    pub team_name: String,
    pub vote_count: usize,
    pub avg_innovation: f64,
    pub avg_implementation: f64,
    pub avg_design: f64,
    pub avg_presentation: f64,
    pub avg_total: f64,
}

// ============================================================================
// Announcement & Moderation Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct AnnouncementResponse {
    pub id: String,
    pub title: String,
    pub content: String,
    pub announcement_type: AnnouncementType,
    pub is_pinned: bool,
    pub created_by_admin_id: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportResponse {
    pub id: String,
    pub content_type: &'static str,
    pub content_id: String,
    pub reported_by_user_id: String,
    pub reason: ReportReason,
    pub details: Option<String>,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub resolved_by_admin_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuditLogResponse {
    pub id: String,
    pub user_id: Option<String>,
    pub action_type: String,
    pub action_details: serde_json::Value,
    pub ip_address: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Admin & Settings Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct DashboardResponse {
    pub user_count: i64,
    pub team_count: i64,
    pub post_count: i64,
    pub unused_code_count: i64,
    pub pending_report_count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegistrationCodeResponse {
    pub id: String,
    pub code: String,
    pub is_used: bool,
    pub used_by_user_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SiteSettingsResponse {
    pub site_name: String,
    pub logo_url: Option<String>,
    pub favicon_url: Option<String>,
    pub primary_color: String,
    pub secondary_color: String,
    pub font_family: String,
    pub custom_css: Option<String>,
    pub updated_at: DateTime<Utc>,
}
