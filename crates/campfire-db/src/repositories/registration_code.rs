//! PostgreSQL implementation of RegistrationCodeRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use campfire_core::{DomainError, RegistrationCode, RegistrationCodeRepository, RepoResult, Snowflake};

use crate::models::RegistrationCodeModel;

use super::error::{map_db_error, map_unique_violation};

#[derive(Clone)]
pub struct PgRegistrationCodeRepository {
    pool: PgPool,
}

impl PgRegistrationCodeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RegistrationCodeRepository for PgRegistrationCodeRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<RegistrationCode>> {
        let result = sqlx::query_as::<_, RegistrationCodeModel>(
            r"
            SELECT id, code, is_used, used_by_user_id, created_at
            FROM registration_codes
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(RegistrationCode::from))
    }

    #[instrument(skip(self))]
    async fn find_by_code(&self, code: &str) -> RepoResult<Option<RegistrationCode>> {
        let result = sqlx::query_as::<_, RegistrationCodeModel>(
            r"
            SELECT id, code, is_used, used_by_user_id, created_at
            FROM registration_codes
            WHERE code = $1
            ",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(RegistrationCode::from))
    }

    #[instrument(skip(self))]
    async fn code_exists(&self, code: &str) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM registration_codes WHERE code = $1)",
        )
        .bind(code)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> RepoResult<Vec<RegistrationCode>> {
        let results = sqlx::query_as::<_, RegistrationCodeModel>(
            r"
            SELECT id, code, is_used, used_by_user_id, created_at
            FROM registration_codes
            ORDER BY id DESC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(RegistrationCode::from).collect())
    }

    #[instrument(skip(self))]
    async fn create(&self, code: &RegistrationCode) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO registration_codes (id, code, is_used, used_by_user_id, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(code.id.into_inner())
        .bind(&code.code)
        .bind(code.is_used)
        .bind(code.used_by_user_id.map(Snowflake::into_inner))
        .bind(code.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::RegistrationCodeExists))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn mark_used(&self, id: Snowflake, user_id: Snowflake) -> RepoResult<()> {
        // The is_used guard makes two concurrent registrations race safely
        let result = sqlx::query(
            r"
            UPDATE registration_codes
            SET is_used = TRUE, used_by_user_id = $2
            WHERE id = $1 AND is_used = FALSE
            ",
        )
        .bind(id.into_inner())
        .bind(user_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::RegistrationCodeUsed);
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn reset(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE registration_codes
            SET is_used = FALSE, used_by_user_id = NULL
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::RegistrationCodeNotFound);
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn count(&self) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM registration_codes")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn count_unused(&self) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM registration_codes WHERE is_used = FALSE",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }
}
