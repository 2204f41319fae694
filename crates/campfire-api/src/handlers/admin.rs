//! Admin console handlers
//!
//! Every handler here requires an admin account; the services enforce it.

use axum::{extract::State, Json};
use campfire_service::dto::{
    AdminUserResponse, AnnouncementResponse, AssignTeamRequest, AuditLogListQuery,
    AuditLogResponse, BanUserRequest, CreateAnnouncementRequest, CreateUserRequest,
    DashboardResponse, GenerateCodesRequest, LeaderboardEntry, PaginatedResponse,
    RegistrationCodeResponse, ReportListQuery, ReportResponse, ResolveReportRequest,
    SetRolesRequest, SiteSettingsResponse, TeamNameRequest, TeamResponse,
    UpdateAnnouncementRequest, UpdateSettingsRequest,
};
use campfire_service::{
    AdminService, AnnouncementService, AuditService, ModerationService, SettingsService,
    TeamService, VoteService,
};

use crate::extractors::{AuthUser, ClientMeta, JsonBody, QueryParams, SnowflakePath, Uploads};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Headline counts
///
/// GET /admin/dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    AuthUser(admin): AuthUser,
) -> ApiResult<Json<DashboardResponse>> {
    let service = AdminService::new(state.service_context());
    Ok(Json(service.dashboard(&admin).await?))
}

// ============================================================================
// Users
// ============================================================================

/// GET /admin/users
pub async fn list_users(
    State(state): State<AppState>,
    AuthUser(admin): AuthUser,
) -> ApiResult<Json<Vec<AdminUserResponse>>> {
    let service = AdminService::new(state.service_context());
    Ok(Json(service.list_users(&admin).await?))
}

/// Create an account without a registration code
///
/// POST /admin/users
pub async fn create_user(
    State(state): State<AppState>,
    AuthUser(admin): AuthUser,
    ClientMeta(meta): ClientMeta,
    JsonBody(request): JsonBody<CreateUserRequest>,
) -> ApiResult<Created<Json<AdminUserResponse>>> {
    let service = AdminService::new(state.service_context());
    let response = service.create_user(&admin, request, &meta).await?;
    Ok(Created(Json(response)))
}

/// Move a user to a team, or out of one with `"team_id": null`
///
/// PUT /admin/users/{user_id}/team
pub async fn assign_team(
    State(state): State<AppState>,
    AuthUser(admin): AuthUser,
    ClientMeta(meta): ClientMeta,
    SnowflakePath(user_id): SnowflakePath,
    JsonBody(request): JsonBody<AssignTeamRequest>,
) -> ApiResult<Json<AdminUserResponse>> {
    let service = AdminService::new(state.service_context());
    Ok(Json(
        service.assign_team(&admin, user_id, request, &meta).await?,
    ))
}

/// PUT /admin/users/{user_id}/roles
pub async fn set_roles(
    State(state): State<AppState>,
    AuthUser(admin): AuthUser,
    ClientMeta(meta): ClientMeta,
    SnowflakePath(user_id): SnowflakePath,
    JsonBody(request): JsonBody<SetRolesRequest>,
) -> ApiResult<Json<AdminUserResponse>> {
    let service = AdminService::new(state.service_context());
    Ok(Json(service.set_roles(&admin, user_id, request, &meta).await?))
}

/// DELETE /admin/users/{user_id}
pub async fn delete_user(
    State(state): State<AppState>,
    AuthUser(admin): AuthUser,
    ClientMeta(meta): ClientMeta,
    SnowflakePath(user_id): SnowflakePath,
) -> ApiResult<NoContent> {
    let service = AdminService::new(state.service_context());
    service.delete_user(&admin, user_id, &meta).await?;
    Ok(NoContent)
}

/// Ban a user, permanently unless `duration_hours` is given
///
/// POST /admin/users/{user_id}/ban
pub async fn ban_user(
    State(state): State<AppState>,
    AuthUser(admin): AuthUser,
    ClientMeta(meta): ClientMeta,
    SnowflakePath(user_id): SnowflakePath,
    JsonBody(request): JsonBody<BanUserRequest>,
) -> ApiResult<Json<AdminUserResponse>> {
    let service = ModerationService::new(state.service_context());
    Ok(Json(service.ban_user(&admin, user_id, request, &meta).await?))
}

/// DELETE /admin/users/{user_id}/ban
pub async fn unban_user(
    State(state): State<AppState>,
    AuthUser(admin): AuthUser,
    ClientMeta(meta): ClientMeta,
    SnowflakePath(user_id): SnowflakePath,
) -> ApiResult<Json<AdminUserResponse>> {
    let service = ModerationService::new(state.service_context());
    Ok(Json(service.unban_user(&admin, user_id, &meta).await?))
}

// ============================================================================
// Teams
// ============================================================================

/// POST /admin/teams
pub async fn create_team(
    State(state): State<AppState>,
    AuthUser(admin): AuthUser,
    ClientMeta(meta): ClientMeta,
    JsonBody(request): JsonBody<TeamNameRequest>,
) -> ApiResult<Created<Json<TeamResponse>>> {
    let service = TeamService::new(state.service_context());
    let response = service.create(&admin, request, &meta).await?;
    Ok(Created(Json(response)))
}

/// PATCH /admin/teams/{team_id}
pub async fn rename_team(
    State(state): State<AppState>,
    AuthUser(admin): AuthUser,
    ClientMeta(meta): ClientMeta,
    SnowflakePath(team_id): SnowflakePath,
    JsonBody(request): JsonBody<TeamNameRequest>,
) -> ApiResult<Json<TeamResponse>> {
    let service = TeamService::new(state.service_context());
    Ok(Json(service.rename(&admin, team_id, request, &meta).await?))
}

/// Delete a team; its members become teamless
///
/// DELETE /admin/teams/{team_id}
pub async fn delete_team(
    State(state): State<AppState>,
    AuthUser(admin): AuthUser,
    ClientMeta(meta): ClientMeta,
    SnowflakePath(team_id): SnowflakePath,
) -> ApiResult<NoContent> {
    let service = TeamService::new(state.service_context());
    service.delete(&admin, team_id, &meta).await?;
    Ok(NoContent)
}

/// POST /admin/teams/{team_id}/avatar (multipart)
pub async fn upload_team_avatar(
    State(state): State<AppState>,
    AuthUser(admin): AuthUser,
    ClientMeta(meta): ClientMeta,
    SnowflakePath(team_id): SnowflakePath,
    uploads: Uploads,
) -> ApiResult<Json<TeamResponse>> {
    let file = uploads.single()?;
    let service = TeamService::new(state.service_context());
    Ok(Json(
        service.upload_avatar(&admin, team_id, file, &meta).await?,
    ))
}

// ============================================================================
// Registration codes
// ============================================================================

/// GET /admin/codes
pub async fn list_codes(
    State(state): State<AppState>,
    AuthUser(admin): AuthUser,
) -> ApiResult<Json<Vec<RegistrationCodeResponse>>> {
    let service = AdminService::new(state.service_context());
    Ok(Json(service.list_codes(&admin).await?))
}

/// Generate a batch of 5, 10, 20 or 50 codes
///
/// POST /admin/codes
pub async fn generate_codes(
    State(state): State<AppState>,
    AuthUser(admin): AuthUser,
    ClientMeta(meta): ClientMeta,
    JsonBody(request): JsonBody<GenerateCodesRequest>,
) -> ApiResult<Created<Json<Vec<RegistrationCodeResponse>>>> {
    let service = AdminService::new(state.service_context());
    let response = service.generate_codes(&admin, request, &meta).await?;
    Ok(Created(Json(response)))
}

/// Make a used code available again
///
/// POST /admin/codes/{code_id}/reset
pub async fn reset_code(
    State(state): State<AppState>,
    AuthUser(admin): AuthUser,
    ClientMeta(meta): ClientMeta,
    SnowflakePath(code_id): SnowflakePath,
) -> ApiResult<Json<RegistrationCodeResponse>> {
    let service = AdminService::new(state.service_context());
    Ok(Json(service.reset_code(&admin, code_id, &meta).await?))
}

// ============================================================================
// Announcements
// ============================================================================

/// Every announcement, expired ones included
///
/// GET /admin/announcements
pub async fn list_announcements(
    State(state): State<AppState>,
    AuthUser(admin): AuthUser,
) -> ApiResult<Json<Vec<AnnouncementResponse>>> {
    let service = AnnouncementService::new(state.service_context());
    Ok(Json(service.list_all(&admin).await?))
}

/// POST /admin/announcements
pub async fn create_announcement(
    State(state): State<AppState>,
    AuthUser(admin): AuthUser,
    ClientMeta(meta): ClientMeta,
    JsonBody(request): JsonBody<CreateAnnouncementRequest>,
) -> ApiResult<Created<Json<AnnouncementResponse>>> {
    let service = AnnouncementService::new(state.service_context());
    let response = service.create(&admin, request, &meta).await?;
    Ok(Created(Json(response)))
}

/// PATCH /admin/announcements/{announcement_id}
pub async fn update_announcement(
    State(state): State<AppState>,
    AuthUser(admin): AuthUser,
    ClientMeta(meta): ClientMeta,
    SnowflakePath(announcement_id): SnowflakePath,
    JsonBody(request): JsonBody<UpdateAnnouncementRequest>,
) -> ApiResult<Json<AnnouncementResponse>> {
    let service = AnnouncementService::new(state.service_context());
    Ok(Json(
        service
            .update(&admin, announcement_id, request, &meta)
            .await?,
    ))
}

/// DELETE /admin/announcements/{announcement_id}
pub async fn delete_announcement(
    State(state): State<AppState>,
    AuthUser(admin): AuthUser,
    ClientMeta(meta): ClientMeta,
    SnowflakePath(announcement_id): SnowflakePath,
) -> ApiResult<NoContent> {
    let service = AnnouncementService::new(state.service_context());
    service.delete(&admin, announcement_id, &meta).await?;
    Ok(NoContent)
}

// ============================================================================
// Moderation
// ============================================================================

/// Reports, optionally filtered with `?status=pending`
///
/// GET /admin/reports
pub async fn list_reports(
    State(state): State<AppState>,
    AuthUser(admin): AuthUser,
    QueryParams(query): QueryParams<ReportListQuery>,
) -> ApiResult<Json<Vec<ReportResponse>>> {
    let service = ModerationService::new(state.service_context());
    Ok(Json(service.list_reports(&admin, query).await?))
}

/// POST /admin/reports/{report_id}/resolve
pub async fn resolve_report(
    State(state): State<AppState>,
    AuthUser(admin): AuthUser,
    ClientMeta(meta): ClientMeta,
    SnowflakePath(report_id): SnowflakePath,
    JsonBody(request): JsonBody<ResolveReportRequest>,
) -> ApiResult<Json<ReportResponse>> {
    let service = ModerationService::new(state.service_context());
    Ok(Json(
        service
            .resolve_report(&admin, report_id, request, &meta)
            .await?,
    ))
}

/// POST /admin/posts/{post_id}/hide
pub async fn hide_post(
    State(state): State<AppState>,
    AuthUser(admin): AuthUser,
    ClientMeta(meta): ClientMeta,
    SnowflakePath(post_id): SnowflakePath,
) -> ApiResult<NoContent> {
    let service = ModerationService::new(state.service_context());
    service.hide_post(&admin, post_id, true, &meta).await?;
    Ok(NoContent)
}

/// POST /admin/posts/{post_id}/unhide
pub async fn unhide_post(
    State(state): State<AppState>,
    AuthUser(admin): AuthUser,
    ClientMeta(meta): ClientMeta,
    SnowflakePath(post_id): SnowflakePath,
) -> ApiResult<NoContent> {
    let service = ModerationService::new(state.service_context());
    service.hide_post(&admin, post_id, false, &meta).await?;
    Ok(NoContent)
}

// ============================================================================
// Results, audit and branding
// ============================================================================

/// Teams ranked by average total score
///
/// GET /admin/leaderboard
pub async fn leaderboard(
    State(state): State<AppState>,
    AuthUser(admin): AuthUser,
) -> ApiResult<Json<Vec<LeaderboardEntry>>> {
    let service = VoteService::new(state.service_context());
    Ok(Json(service.leaderboard(&admin).await?))
}

/// Audit entries newest first, filterable by action and user
///
/// GET /admin/audit-logs
pub async fn audit_logs(
    State(state): State<AppState>,
    AuthUser(admin): AuthUser,
    QueryParams(query): QueryParams<AuditLogListQuery>,
) -> ApiResult<Json<PaginatedResponse<AuditLogResponse>>> {
    let service = AuditService::new(state.service_context());
    Ok(Json(service.list(&admin, query).await?))
}

/// PATCH /admin/settings
pub async fn update_settings(
    State(state): State<AppState>,
    AuthUser(admin): AuthUser,
    ClientMeta(meta): ClientMeta,
    JsonBody(request): JsonBody<UpdateSettingsRequest>,
) -> ApiResult<Json<SiteSettingsResponse>> {
    let service = SettingsService::new(state.service_context());
    Ok(Json(service.update(&admin, request, &meta).await?))
}

/// POST /admin/settings/logo (multipart)
pub async fn upload_logo(
    State(state): State<AppState>,
    AuthUser(admin): AuthUser,
    ClientMeta(meta): ClientMeta,
    uploads: Uploads,
) -> ApiResult<Json<SiteSettingsResponse>> {
    let file = uploads.single()?;
    let service = SettingsService::new(state.service_context());
    Ok(Json(service.upload_logo(&admin, file, &meta).await?))
}

/// POST /admin/settings/favicon (multipart)
pub async fn upload_favicon(
    State(state): State<AppState>,
    AuthUser(admin): AuthUser,
    ClientMeta(meta): ClientMeta,
    uploads: Uploads,
) -> ApiResult<Json<SiteSettingsResponse>> {
    let file = uploads.single()?;
    let service = SettingsService::new(state.service_context());
    Ok(Json(service.upload_favicon(&admin, file, &meta).await?))
}
