//! Team handlers

use axum::{extract::State, Json};
use campfire_service::dto::{TeamDetailResponse, TeamResponse};
use campfire_service::TeamService;

use crate::extractors::{AuthUser, SnowflakePath};
use crate::response::ApiResult;
use crate::state::AppState;

/// List teams by name
///
/// GET /teams
pub async fn list_teams(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
) -> ApiResult<Json<Vec<TeamResponse>>> {
    let service = TeamService::new(state.service_context());
    Ok(Json(service.list().await?))
}

/// Team with its members
///
/// GET /teams/{team_id}
pub async fn get_team(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
    SnowflakePath(team_id): SnowflakePath,
) -> ApiResult<Json<TeamDetailResponse>> {
    let service = TeamService::new(state.service_context());
    Ok(Json(service.get(team_id).await?))
}
