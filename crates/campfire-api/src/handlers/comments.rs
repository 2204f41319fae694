//! Comment handlers

use axum::{extract::State, Json};
use campfire_service::dto::{CommentResponse, CreateCommentRequest};
use campfire_service::CommentService;

use crate::extractors::{AuthUser, ClientMeta, JsonBody, SnowflakePath};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Comments on a post, oldest first
///
/// GET /posts/{post_id}/comments
pub async fn list_comments(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    SnowflakePath(post_id): SnowflakePath,
) -> ApiResult<Json<Vec<CommentResponse>>> {
    let service = CommentService::new(state.service_context());
    Ok(Json(service.list(&user, post_id).await?))
}

/// POST /posts/{post_id}/comments
pub async fn create_comment(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    SnowflakePath(post_id): SnowflakePath,
    JsonBody(request): JsonBody<CreateCommentRequest>,
) -> ApiResult<Created<Json<CommentResponse>>> {
    let service = CommentService::new(state.service_context());
    let response = service.create(&user, post_id, request).await?;
    Ok(Created(Json(response)))
}

/// Delete a comment (author or admin)
///
/// DELETE /comments/{comment_id}
pub async fn delete_comment(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ClientMeta(meta): ClientMeta,
    SnowflakePath(comment_id): SnowflakePath,
) -> ApiResult<NoContent> {
    let service = CommentService::new(state.service_context());
    service.delete(&user, comment_id, &meta).await?;
    Ok(NoContent)
}
