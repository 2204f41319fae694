//! User handlers
//!
//! The caller's own account, profile lookups, search and the mentions inbox.

use axum::{extract::State, Json};
use campfire_service::dto::{
    CurrentUserResponse, MentionResponse, PaginatedResponse, PostResponse, SearchUsersQuery,
    TimelineQuery, UpdateProfileRequest, UpdateThemeRequest, UserProfileResponse, UserSummary,
};
use campfire_service::UserService;

use crate::extractors::{AuthUser, JsonBody, QueryParams, SnowflakePath, Uploads};
use crate::response::ApiResult;
use crate::state::AppState;

/// Get current user
///
/// GET /users/@me
pub async fn get_current_user(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> ApiResult<Json<CurrentUserResponse>> {
    let service = UserService::new(state.service_context());
    Ok(Json(service.get_me(&user).await?))
}

/// Update social links
///
/// PATCH /users/@me
pub async fn update_current_user(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    JsonBody(request): JsonBody<UpdateProfileRequest>,
) -> ApiResult<Json<CurrentUserResponse>> {
    let service = UserService::new(state.service_context());
    Ok(Json(service.update_profile(&user, request).await?))
}

/// PUT /users/@me/theme
pub async fn set_theme(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    JsonBody(request): JsonBody<UpdateThemeRequest>,
) -> ApiResult<Json<CurrentUserResponse>> {
    let service = UserService::new(state.service_context());
    Ok(Json(service.set_theme(&user, request).await?))
}

/// Replace the profile picture
///
/// POST /users/@me/avatar (multipart)
pub async fn upload_avatar(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    uploads: Uploads,
) -> ApiResult<Json<CurrentUserResponse>> {
    let file = uploads.single()?;
    let service = UserService::new(state.service_context());
    Ok(Json(service.upload_profile_picture(&user, file).await?))
}

/// Mentions of the current user, newest first
///
/// GET /users/@me/mentions
pub async fn get_mentions(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> ApiResult<Json<Vec<MentionResponse>>> {
    let service = UserService::new(state.service_context());
    Ok(Json(service.my_mentions(&user).await?))
}

/// Username prefix search for the mention picker
///
/// GET /users/search?q=
pub async fn search_users(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
    QueryParams(query): QueryParams<SearchUsersQuery>,
) -> ApiResult<Json<Vec<UserSummary>>> {
    let service = UserService::new(state.service_context());
    Ok(Json(service.search(query).await?))
}

/// GET /users/{user_id}
pub async fn get_user(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
    SnowflakePath(user_id): SnowflakePath,
) -> ApiResult<Json<UserProfileResponse>> {
    let service = UserService::new(state.service_context());
    Ok(Json(service.get_user(user_id).await?))
}

/// Posts written by a user
///
/// GET /users/{user_id}/posts
pub async fn get_user_posts(
    State(state): State<AppState>,
    AuthUser(viewer): AuthUser,
    SnowflakePath(user_id): SnowflakePath,
    QueryParams(query): QueryParams<TimelineQuery>,
) -> ApiResult<Json<PaginatedResponse<PostResponse>>> {
    let service = UserService::new(state.service_context());
    Ok(Json(service.list_user_posts(&viewer, user_id, query).await?))
}
