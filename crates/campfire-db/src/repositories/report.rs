//! PostgreSQL implementation of ReportRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use campfire_core::{
    DomainError, RepoResult, Report, ReportRepository, ReportStatus, ReportTarget, Snowflake,
};

use crate::mappers::target_columns;
use crate::models::ReportModel;

use super::error::map_db_error;

const REPORT_COLUMNS: &str = r"
    id, post_id, comment_id, reported_by_user_id, reason, details, status,
    created_at, resolved_at, resolved_by_admin_id
";

#[derive(Clone)]
pub struct PgReportRepository {
    pool: PgPool,
}

impl PgReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportRepository for PgReportRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Report>> {
        let result = sqlx::query_as::<_, ReportModel>(&format!(
            "SELECT {REPORT_COLUMNS} FROM reports WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Report::try_from).transpose()
    }

    #[instrument(skip(self, report), fields(report_id = %report.id))]
    async fn create(&self, report: &Report) -> RepoResult<()> {
        let (post_id, comment_id) = target_columns(report.target);

        sqlx::query(
            r"
            INSERT INTO reports (id, post_id, comment_id, reported_by_user_id, reason, details,
                                 status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(report.id.into_inner())
        .bind(post_id)
        .bind(comment_id)
        .bind(report.reported_by_user_id.into_inner())
        .bind(report.reason.as_str())
        .bind(&report.details)
        .bind(report.status.as_str())
        .bind(report.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, report), fields(report_id = %report.id))]
    async fn update(&self, report: &Report) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE reports
            SET status = $2, resolved_at = $3, resolved_by_admin_id = $4
            WHERE id = $1
            ",
        )
        .bind(report.id.into_inner())
        .bind(report.status.as_str())
        .bind(report.resolved_at)
        .bind(report.resolved_by_admin_id.map(Snowflake::into_inner))
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::ReportNotFound(report.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list(&self, status: Option<ReportStatus>) -> RepoResult<Vec<Report>> {
        let results = sqlx::query_as::<_, ReportModel>(&format!(
            r"
            SELECT {REPORT_COLUMNS} FROM reports
            WHERE $1::TEXT IS NULL OR status = $1
            ORDER BY id DESC
            "
        ))
        .bind(status.map(|s| s.as_str()))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Report::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn has_pending(&self, reporter_id: Snowflake, target: ReportTarget) -> RepoResult<bool> {
        let (post_id, comment_id) = target_columns(target);

        sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(
                SELECT 1 FROM reports
                WHERE reported_by_user_id = $1
                  AND post_id IS NOT DISTINCT FROM $2
                  AND comment_id IS NOT DISTINCT FROM $3
                  AND status = 'pending'
            )
            ",
        )
        .bind(reporter_id.into_inner())
        .bind(post_id)
        .bind(comment_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn count_pending(&self) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM reports WHERE status = 'pending'")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }
}
