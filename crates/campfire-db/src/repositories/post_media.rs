//! PostgreSQL implementation of PostMediaRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use campfire_core::{PostMedia, PostMediaRepository, RepoResult, Snowflake};

use crate::models::PostMediaModel;

use super::error::{map_db_error, raw_ids};

#[derive(Clone)]
pub struct PgPostMediaRepository {
    pool: PgPool,
}

impl PgPostMediaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostMediaRepository for PgPostMediaRepository {
    #[instrument(skip(self))]
    async fn create(&self, media: &PostMedia) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO post_media (id, post_id, media_type, file_path, display_order, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(media.id.into_inner())
        .bind(media.post_id.into_inner())
        .bind(media.media_type.as_str())
        .bind(&media.file_path)
        .bind(media.display_order)
        .bind(media.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_post(&self, post_id: Snowflake) -> RepoResult<Vec<PostMedia>> {
        self.find_by_posts(&[post_id]).await
    }

    #[instrument(skip(self))]
    async fn find_by_posts(&self, post_ids: &[Snowflake]) -> RepoResult<Vec<PostMedia>> {
        if post_ids.is_empty() {
            return Ok(Vec::new());
        }

        let results = sqlx::query_as::<_, PostMediaModel>(
            r"
            SELECT id, post_id, media_type, file_path, display_order, created_at
            FROM post_media
            WHERE post_id = ANY($1)
            ORDER BY post_id, display_order, id
            ",
        )
        .bind(raw_ids(post_ids))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(PostMedia::from).collect())
    }

    #[instrument(skip(self))]
    async fn max_display_order(&self, post_id: Snowflake) -> RepoResult<Option<i32>> {
        sqlx::query_scalar::<_, Option<i32>>(
            "SELECT MAX(display_order) FROM post_media WHERE post_id = $1",
        )
        .bind(post_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }
}
