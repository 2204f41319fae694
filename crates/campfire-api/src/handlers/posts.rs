//! Timeline and post handlers
//!
//! Timelines page backwards with `?before=<id>&limit=<n>`.

use axum::{extract::State, Json};
use campfire_service::dto::{
    CreatePostRequest, PaginatedResponse, PostResponse, ReactionSummary, TimelineQuery,
    ToggleReactionRequest,
};
use campfire_service::{PostService, ReactionService};

use crate::extractors::{AuthUser, ClientMeta, JsonBody, QueryParams, SnowflakePath, Uploads};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Posts from the caller's team
///
/// GET /timeline/team
pub async fn team_timeline(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    QueryParams(query): QueryParams<TimelineQuery>,
) -> ApiResult<Json<PaginatedResponse<PostResponse>>> {
    let service = PostService::new(state.service_context());
    Ok(Json(service.team_timeline(&user, query).await?))
}

/// Posts shared with every team
///
/// GET /timeline/global
pub async fn global_timeline(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    QueryParams(query): QueryParams<TimelineQuery>,
) -> ApiResult<Json<PaginatedResponse<PostResponse>>> {
    let service = PostService::new(state.service_context());
    Ok(Json(service.global_timeline(&user, query).await?))
}

/// Create a post; media is attached with a follow-up upload
///
/// POST /posts
pub async fn create_post(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    JsonBody(request): JsonBody<CreatePostRequest>,
) -> ApiResult<Created<Json<PostResponse>>> {
    let service = PostService::new(state.service_context());
    let response = service.create_post(&user, request).await?;
    Ok(Created(Json(response)))
}

/// GET /posts/{post_id}
pub async fn get_post(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    SnowflakePath(post_id): SnowflakePath,
) -> ApiResult<Json<PostResponse>> {
    let service = PostService::new(state.service_context());
    Ok(Json(service.get_post(&user, post_id).await?))
}

/// Delete a post (author or admin)
///
/// DELETE /posts/{post_id}
pub async fn delete_post(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ClientMeta(meta): ClientMeta,
    SnowflakePath(post_id): SnowflakePath,
) -> ApiResult<NoContent> {
    let service = PostService::new(state.service_context());
    service.delete_post(&user, post_id, &meta).await?;
    Ok(NoContent)
}

/// Attach images or videos to the caller's post
///
/// POST /posts/{post_id}/media (multipart)
pub async fn upload_media(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    SnowflakePath(post_id): SnowflakePath,
    Uploads(files): Uploads,
) -> ApiResult<Json<PostResponse>> {
    let service = PostService::new(state.service_context());
    Ok(Json(service.add_media(&user, post_id, files).await?))
}

/// GET /posts/{post_id}/reactions
pub async fn get_reactions(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    SnowflakePath(post_id): SnowflakePath,
) -> ApiResult<Json<ReactionSummary>> {
    let service = ReactionService::new(state.service_context());
    Ok(Json(service.get(&user, post_id).await?))
}

/// Add the reaction, or remove it if the caller already gave it
///
/// POST /posts/{post_id}/reactions
pub async fn toggle_reaction(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    SnowflakePath(post_id): SnowflakePath,
    JsonBody(request): JsonBody<ToggleReactionRequest>,
) -> ApiResult<Json<ReactionSummary>> {
    let service = ReactionService::new(state.service_context());
    Ok(Json(service.toggle(&user, post_id, request).await?))
}
