//! Content reports filed by members

use axum::{extract::State, Json};
use campfire_service::dto::{CreateReportRequest, ReportResponse};
use campfire_service::ModerationService;

use crate::extractors::{AuthUser, ContentPath, JsonBody};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Report a post or comment
///
/// POST /reports/{content_type}/{content_id}
pub async fn create_report(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    path: ContentPath,
    JsonBody(request): JsonBody<CreateReportRequest>,
) -> ApiResult<Created<Json<ReportResponse>>> {
    let service = ModerationService::new(state.service_context());
    let response = service
        .report(&user, &path.content_type, path.id, request)
        .await?;
    Ok(Created(Json(response)))
}
