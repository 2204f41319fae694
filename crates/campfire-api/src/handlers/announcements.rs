//! Announcement handlers for members

use axum::{extract::State, Json};
use campfire_service::dto::AnnouncementResponse;
use campfire_service::AnnouncementService;

use crate::extractors::AuthUser;
use crate::response::ApiResult;
use crate::state::AppState;

/// Unexpired announcements, pinned first
///
/// GET /announcements
pub async fn list_active(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
) -> ApiResult<Json<Vec<AnnouncementResponse>>> {
    let service = AnnouncementService::new(state.service_context());
    Ok(Json(service.list_active().await?))
}
