//! Judge voting and the leaderboard

use std::cmp::Ordering;
use std::collections::HashMap;

use campfire_core::entities::{Team, User, Vote, VoteScores};
use campfire_core::{DomainError, Snowflake};
use serde_json::json;
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{
    CastVoteRequest, JudgingTeamResponse, LeaderboardEntry, TeamResponse, VoteResponse,
};

use super::access::{require_admin, require_judge};
use super::audit::{AuditService, RequestMeta};
use super::context::ServiceContext;
use super::error::ServiceResult;

pub struct VoteService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> VoteService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Every team with the caller's vote, if they cast one
    #[instrument(skip(self, judge), fields(judge_id = %judge.id))]
    pub async fn list_judging_teams(
        &self,
        judge: &User,
    ) -> ServiceResult<Vec<JudgingTeamResponse>> {
        require_judge(judge)?;

        let teams = self.ctx.team_repo().list_all().await?;
        let mut mine: HashMap<Snowflake, Vote> = self
            .ctx
            .vote_repo()
            .find_by_judge(judge.id)
            .await?
            .into_iter()
            .map(|v| (v.team_id, v))
            .collect();

        Ok(teams
            .iter()
            .map(|team| JudgingTeamResponse {
                team: TeamResponse::from(team),
                my_vote: mine.remove(&team.id).as_ref().map(VoteResponse::from),
            })
            .collect())
    }

    /// Score a team; voting again replaces the earlier sheet
    #[instrument(skip(self, judge, request, meta), fields(judge_id = %judge.id))]
    pub async fn cast_vote(
        &self,
        judge: &User,
        team_id: Snowflake,
        request: CastVoteRequest,
        meta: &RequestMeta,
    ) -> ServiceResult<VoteResponse> {
        require_judge(judge)?;
        request.validate()?;

        let scores = VoteScores::new(
            request.innovation,
            request.implementation,
            request.design,
            request.presentation,
        )?;

        let team = self
            .ctx
            .team_repo()
            .find_by_id(team_id)
            .await?
            .ok_or(DomainError::TeamNotFound(team_id))?;

        let comments = request
            .comments
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        let vote = Vote::new(self.ctx.generate_id(), judge.id, team.id, scores, comments);
        let stored = self.ctx.vote_repo().upsert(&vote).await?;

        info!(team_id = %team.id, total = stored.total_score(), "Vote recorded");
        AuditService::new(self.ctx)
            .record(
                Some(judge.id),
                "vote_cast",
                meta,
                json!({ "team_id": team.id.to_string(), "total_score": stored.total_score() }),
            )
            .await;

        Ok(VoteResponse::from(&stored))
    }

    #[instrument(skip(self, judge), fields(judge_id = %judge.id))]
    pub async fn my_votes(&self, judge: &User) -> ServiceResult<Vec<VoteResponse>> {
        require_judge(judge)?;
        let votes = self.ctx.vote_repo().find_by_judge(judge.id).await?;
        Ok(votes.iter().map(VoteResponse::from).collect())
    }

    #[instrument(skip(self, actor), fields(admin_id = %actor.id))]
    pub async fn leaderboard(&self, actor: &User) -> ServiceResult<Vec<LeaderboardEntry>> {
        require_admin(actor)?;
        let teams = self.ctx.team_repo().list_all().await?;
        let votes = self.ctx.vote_repo().list_all().await?;
        Ok(compute_leaderboard(&teams, &votes))
    }
}

/// Rank teams by their average weighted total, best first
///
/// Averages are rounded to two decimals. Teams without votes score 0 and
/// rank last; ties are broken by team name.
pub fn compute_leaderboard(teams: &[Team], votes: &[Vote]) -> Vec<LeaderboardEntry> {
    let mut by_team: HashMap<Snowflake, Vec<&Vote>> = HashMap::new();
    for vote in votes {
        by_team.entry(vote.team_id).or_default().push(vote);
    }

    let mut entries: Vec<LeaderboardEntry> = teams
        .iter()
        .map(|team| {
            let team_votes = by_team.get(&team.id).map(Vec::as_slice).unwrap_or_default();

            LeaderboardEntry {
                rank: 0,
                team_id: team.id.to_string(),
                team_name: team.name.clone(),
                vote_count: team_votes.len(),
                avg_innovation: average(team_votes, |v| f64::from(v.scores.innovation)),
                avg_implementation: average(team_votes, |v| f64::from(v.scores.implementation)),
                avg_design: average(team_votes, |v| f64::from(v.scores.design)),
                avg_presentation: average(team_votes, |v| f64::from(v.scores.presentation)),
                avg_total: average(team_votes, Vote::total_score),
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        b.avg_total
            .partial_cmp(&a.avg_total)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.vote_count.cmp(&a.vote_count))
            .then_with(|| a.team_name.cmp(&b.team_name))
    });
    for (i, entry) in entries.iter_mut().enumerate() {
        entry.rank = i + 1;
    }
    entries
}

fn average(votes: &[&Vote], score: impl Fn(&Vote) -> f64) -> f64 {
    if votes.is_empty() {
        return 0.0;
    }
    let sum: f64 = votes.iter().map(|v| score(*v)).sum();
    #[allow(clippy::cast_precision_loss)]
    let mean = sum / votes.len() as f64;
    (mean * 100.0).round() / 100.0
}
