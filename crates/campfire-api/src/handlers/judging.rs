//! Judge handlers
//!
//! Judges score every team on four criteria; one vote per team, updated in place.

use axum::{extract::State, Json};
use campfire_service::dto::{CastVoteRequest, JudgingTeamResponse, VoteResponse};
use campfire_service::VoteService;

use crate::extractors::{AuthUser, ClientMeta, JsonBody, SnowflakePath};
use crate::response::ApiResult;
use crate::state::AppState;

/// Teams with the caller's current vote, if any
///
/// GET /judging/teams
pub async fn list_teams(
    State(state): State<AppState>,
    AuthUser(judge): AuthUser,
) -> ApiResult<Json<Vec<JudgingTeamResponse>>> {
    let service = VoteService::new(state.service_context());
    Ok(Json(service.list_judging_teams(&judge).await?))
}

/// Create or replace the caller's vote for a team
///
/// PUT /judging/teams/{team_id}/vote
pub async fn cast_vote(
    State(state): State<AppState>,
    AuthUser(judge): AuthUser,
    ClientMeta(meta): ClientMeta,
    SnowflakePath(team_id): SnowflakePath,
    JsonBody(request): JsonBody<CastVoteRequest>,
) -> ApiResult<Json<VoteResponse>> {
    let service = VoteService::new(state.service_context());
    Ok(Json(service.cast_vote(&judge, team_id, request, &meta).await?))
}

/// GET /judging/votes
pub async fn my_votes(
    State(state): State<AppState>,
    AuthUser(judge): AuthUser,
) -> ApiResult<Json<Vec<VoteResponse>>> {
    let service = VoteService::new(state.service_context());
    Ok(Json(service.my_votes(&judge).await?))
}
