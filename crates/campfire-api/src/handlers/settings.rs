//! Public site branding

use axum::{extract::State, Json};
use campfire_service::dto::SiteSettingsResponse;
use campfire_service::SettingsService;

use crate::response::ApiResult;
use crate::state::AppState;

/// Site name, colours and logo for the login page and shell
///
/// GET /settings
pub async fn get_settings(State(state): State<AppState>) -> ApiResult<Json<SiteSettingsResponse>> {
    let service = SettingsService::new(state.service_context());
    Ok(Json(service.get().await?))
}
