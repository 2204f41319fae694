//! PostgreSQL implementation of TeamRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use campfire_core::{DomainError, RepoResult, Snowflake, Team, TeamRepository};

use crate::models::TeamModel;

use super::error::{map_db_error, map_unique_violation};

#[derive(Clone)]
pub struct PgTeamRepository {
    pool: PgPool,
}

impl PgTeamRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeamRepository for PgTeamRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Team>> {
        let result = sqlx::query_as::<_, TeamModel>(
            "SELECT id, name, avatar_path, created_at FROM teams WHERE id = $1",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Team::from))
    }

    #[instrument(skip(self))]
    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Team>> {
        let result = sqlx::query_as::<_, TeamModel>(
            "SELECT id, name, avatar_path, created_at FROM teams WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Team::from))
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> RepoResult<Vec<Team>> {
        let results = sqlx::query_as::<_, TeamModel>(
            "SELECT id, name, avatar_path, created_at FROM teams ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Team::from).collect())
    }

    #[instrument(skip(self))]
    async fn create(&self, team: &Team) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO teams (id, name, avatar_path, created_at)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(team.id.into_inner())
        .bind(&team.name)
        .bind(&team.avatar_path)
        .bind(team.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::TeamNameAlreadyExists))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update(&self, team: &Team) -> RepoResult<()> {
        let result = sqlx::query("UPDATE teams SET name = $2, avatar_path = $3 WHERE id = $1")
            .bind(team.id.into_inner())
            .bind(&team.name)
            .bind(&team.avatar_path)
            .execute(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, || DomainError::TeamNameAlreadyExists))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::TeamNotFound(team.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM teams WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::TeamNotFound(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn count(&self) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM teams")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }
}
