//! Authentication handlers
//!
//! Endpoints for registration with a one-time code, login, logout, and
//! token refresh.

use axum::{extract::State, Json};
use campfire_service::dto::{
    AuthResponse, LoginRequest, LogoutRequest, RefreshTokenRequest, RegisterRequest,
};
use campfire_service::AuthService;

use crate::extractors::{ClientMeta, JsonBody};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Register a new user
///
/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    ClientMeta(meta): ClientMeta,
    JsonBody(request): JsonBody<RegisterRequest>,
) -> ApiResult<Created<Json<AuthResponse>>> {
    let service = AuthService::new(state.service_context());
    let response = service.register(request, &meta).await?;
    Ok(Created(Json(response)))
}

/// Login with username and password
///
/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    ClientMeta(meta): ClientMeta,
    JsonBody(request): JsonBody<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.login(request, &meta).await?;
    Ok(Json(response))
}

/// Refresh access token
///
/// POST /auth/refresh
pub async fn refresh_token(
    State(state): State<AppState>,
    ClientMeta(meta): ClientMeta,
    JsonBody(request): JsonBody<RefreshTokenRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.refresh(request, &meta).await?;
    Ok(Json(response))
}

/// Revoke the session behind a refresh token
///
/// POST /auth/logout
pub async fn logout(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<LogoutRequest>,
) -> ApiResult<NoContent> {
    let service = AuthService::new(state.service_context());
    service.logout(request).await?;
    Ok(NoContent)
}
