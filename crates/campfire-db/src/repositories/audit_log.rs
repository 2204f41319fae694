//! PostgreSQL implementation of AuditLogRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use campfire_core::{AuditLog, AuditLogQuery, AuditLogRepository, RepoResult, Snowflake};

use crate::models::AuditLogModel;

use super::error::{clamp_limit, map_db_error};

#[derive(Clone)]
pub struct PgAuditLogRepository {
    pool: PgPool,
}

impl PgAuditLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditLogRepository for PgAuditLogRepository {
    #[instrument(skip(self, entry), fields(action = %entry.action_type))]
    async fn append(&self, entry: &AuditLog) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO audit_logs (id, user_id, action_type, action_details, ip_address, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(entry.id.into_inner())
        .bind(entry.user_id.map(Snowflake::into_inner))
        .bind(&entry.action_type)
        .bind(&entry.action_details)
        .bind(&entry.ip_address)
        .bind(entry.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list(&self, query: AuditLogQuery) -> RepoResult<Vec<AuditLog>> {
        let results = sqlx::query_as::<_, AuditLogModel>(
            r"
            SELECT id, user_id, action_type, action_details, ip_address, created_at
            FROM audit_logs
            WHERE ($1::TEXT IS NULL OR action_type = $1)
              AND ($2::BIGINT IS NULL OR user_id = $2)
              AND ($3::BIGINT IS NULL OR id < $3)
            ORDER BY id DESC
            LIMIT $4
            ",
        )
        .bind(query.action_type)
        .bind(query.user_id.map(Snowflake::into_inner))
        .bind(query.before.map(Snowflake::into_inner))
        .bind(clamp_limit(query.limit))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(AuditLog::from).collect())
    }
}
