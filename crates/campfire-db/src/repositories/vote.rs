//! PostgreSQL implementation of VoteRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use campfire_core::{RepoResult, Snowflake, Vote, VoteRepository};

use crate::models::VoteModel;

use super::error::map_db_error;

const VOTE_COLUMNS: &str = r"
    id, judge_id, team_id, innovation, implementation, design, presentation,
    comments, created_at, updated_at
";

#[derive(Clone)]
pub struct PgVoteRepository {
    pool: PgPool,
}

impl PgVoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VoteRepository for PgVoteRepository {
    #[instrument(skip(self))]
    async fn find(&self, judge_id: Snowflake, team_id: Snowflake) -> RepoResult<Option<Vote>> {
        let result = sqlx::query_as::<_, VoteModel>(&format!(
            "SELECT {VOTE_COLUMNS} FROM votes WHERE judge_id = $1 AND team_id = $2"
        ))
        .bind(judge_id.into_inner())
        .bind(team_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Vote::from))
    }

    #[instrument(skip(self, vote), fields(judge_id = %vote.judge_id, team_id = %vote.team_id))]
    async fn upsert(&self, vote: &Vote) -> RepoResult<Vote> {
        // On conflict the original id and created_at are kept
        let stored = sqlx::query_as::<_, VoteModel>(&format!(
            r"
            INSERT INTO votes (id, judge_id, team_id, innovation, implementation, design,
                               presentation, comments, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9)
            ON CONFLICT (judge_id, team_id) DO UPDATE
            SET innovation = EXCLUDED.innovation,
                implementation = EXCLUDED.implementation,
                design = EXCLUDED.design,
                presentation = EXCLUDED.presentation,
                comments = EXCLUDED.comments,
                updated_at = EXCLUDED.updated_at
            RETURNING {VOTE_COLUMNS}
            "
        ))
        .bind(vote.id.into_inner())
        .bind(vote.judge_id.into_inner())
        .bind(vote.team_id.into_inner())
        .bind(vote.scores.innovation)
        .bind(vote.scores.implementation)
        .bind(vote.scores.design)
        .bind(vote.scores.presentation)
        .bind(&vote.comments)
        .bind(vote.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Vote::from(stored))
    }

    #[instrument(skip(self))]
    async fn find_by_judge(&self, judge_id: Snowflake) -> RepoResult<Vec<Vote>> {
        let results = sqlx::query_as::<_, VoteModel>(&format!(
            "SELECT {VOTE_COLUMNS} FROM votes WHERE judge_id = $1 ORDER BY updated_at DESC"
        ))
        .bind(judge_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Vote::from).collect())
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> RepoResult<Vec<Vote>> {
        let results = sqlx::query_as::<_, VoteModel>(&format!(
            "SELECT {VOTE_COLUMNS} FROM votes ORDER BY team_id, id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Vote::from).collect())
    }
}
