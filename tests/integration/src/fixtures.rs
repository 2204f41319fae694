//! Test fixtures and data generators
//!
//! Request bodies the tests send and the subset of each response they read.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique suffix that survives across test runs against the same database
pub fn unique_suffix() -> String {
    Uuid::new_v4().simple().to_string()[..12].to_string()
}

pub fn unique_username(prefix: &str) -> String {
    format!("{prefix}_{}", unique_suffix())
}

pub const TEST_PASSWORD: &str = "campfire-pass";

// ============================================================================
// Auth
// ============================================================================

#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub registration_code: String,
    pub username: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn unique(code: &str) -> Self {
        Self {
            registration_code: code.to_string(),
            username: unique_username("member"),
            password: TEST_PASSWORD.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_register(reg: &RegisterRequest) -> Self {
        Self {
            username: reg.username.clone(),
            password: reg.password.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub user: CurrentUser,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub username: String,
    pub is_admin: bool,
    pub is_judge: bool,
    pub team_id: Option<String>,
    pub team_name: Option<String>,
    pub profile_picture: Option<String>,
    pub theme: String,
}

#[derive(Debug, Deserialize)]
pub struct UserSummary {
    pub id: String,
    pub username: String,
}

// ============================================================================
// Admin
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CodeResponse {
    pub id: String,
    pub code: String,
    pub is_used: bool,
}

#[derive(Debug, Deserialize)]
pub struct TeamResponse {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct TeamDetail {
    pub id: String,
    pub name: String,
    pub members: Vec<UserSummary>,
}

#[derive(Debug, Deserialize)]
pub struct AdminUser {
    pub id: String,
    pub is_admin: bool,
    pub is_judge: bool,
    pub team_id: Option<String>,
    pub is_banned: bool,
}

#[derive(Debug, Deserialize)]
pub struct AuditEntry {
    pub action_type: String,
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub team_id: String,
    pub vote_count: usize,
    pub avg_total: f64,
}

// ============================================================================
// Content
// ============================================================================

#[derive(Debug, Serialize)]
pub struct CreatePostRequest {
    pub description: String,
    pub is_global: bool,
}

#[derive(Debug, Deserialize)]
pub struct PostResponse {
    pub id: String,
    pub description: String,
    pub content_html: String,
    pub is_global: bool,
    pub is_hidden: bool,
    pub comment_count: i64,
    pub can_delete: bool,
    pub reactions: serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub struct CommentResponse {
    pub id: String,
    pub post_id: String,
    pub content_html: String,
}

#[derive(Debug, Deserialize)]
pub struct MentionResponse {
    pub source_type: String,
    pub post_id: Option<String>,
    pub comment_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub pagination: PageMeta,
}

#[derive(Debug, Deserialize)]
pub struct PageMeta {
    pub has_more: bool,
    pub next_before: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReportResponse {
    pub id: String,
    pub content_type: String,
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct AnnouncementResponse {
    pub id: String,
    pub title: String,
    pub is_pinned: bool,
}

#[derive(Debug, Deserialize)]
pub struct VoteResponse {
    pub team_id: String,
    pub total_score: f64,
}

#[derive(Debug, Deserialize)]
pub struct SettingsResponse {
    pub site_name: String,
    pub primary_color: String,
    pub logo_url: Option<String>,
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}
