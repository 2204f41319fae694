//! PostgreSQL implementation of AnnouncementRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use campfire_core::{Announcement, AnnouncementRepository, DomainError, RepoResult, Snowflake};

use crate::models::AnnouncementModel;

use super::error::map_db_error;

const ANNOUNCEMENT_COLUMNS: &str = r"
    id, title, content, announcement_type, is_pinned, created_by_admin_id, created_at, expires_at
";

#[derive(Clone)]
pub struct PgAnnouncementRepository {
    pool: PgPool,
}

impl PgAnnouncementRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnnouncementRepository for PgAnnouncementRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Announcement>> {
        let result = sqlx::query_as::<_, AnnouncementModel>(&format!(
            "SELECT {ANNOUNCEMENT_COLUMNS} FROM announcements WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Announcement::from))
    }

    #[instrument(skip(self, announcement), fields(announcement_id = %announcement.id))]
    async fn create(&self, announcement: &Announcement) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO announcements (id, title, content, announcement_type, is_pinned,
                                       created_by_admin_id, created_at, expires_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(announcement.id.into_inner())
        .bind(&announcement.title)
        .bind(&announcement.content)
        .bind(announcement.announcement_type.as_str())
        .bind(announcement.is_pinned)
        .bind(announcement.created_by_admin_id.into_inner())
        .bind(announcement.created_at)
        .bind(announcement.expires_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, announcement), fields(announcement_id = %announcement.id))]
    async fn update(&self, announcement: &Announcement) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE announcements
            SET title = $2, content = $3, announcement_type = $4, is_pinned = $5, expires_at = $6
            WHERE id = $1
            ",
        )
        .bind(announcement.id.into_inner())
        .bind(&announcement.title)
        .bind(&announcement.content)
        .bind(announcement.announcement_type.as_str())
        .bind(announcement.is_pinned)
        .bind(announcement.expires_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::AnnouncementNotFound(announcement.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM announcements WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::AnnouncementNotFound(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_active(&self, now: DateTime<Utc>) -> RepoResult<Vec<Announcement>> {
        let results = sqlx::query_as::<_, AnnouncementModel>(&format!(
            r"
            SELECT {ANNOUNCEMENT_COLUMNS} FROM announcements
            WHERE expires_at IS NULL OR expires_at > $1
            ORDER BY is_pinned DESC, id DESC
            "
        ))
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Announcement::from).collect())
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> RepoResult<Vec<Announcement>> {
        let results = sqlx::query_as::<_, AnnouncementModel>(&format!(
            "SELECT {ANNOUNCEMENT_COLUMNS} FROM announcements ORDER BY is_pinned DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Announcement::from).collect())
    }
}
