//! PostgreSQL implementation of CommentRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use campfire_core::{Comment, CommentRepository, DomainError, RepoResult, Snowflake};

use crate::models::{CommentCountModel, CommentModel};

use super::error::{map_db_error, raw_ids};

#[derive(Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>> {
        let result = sqlx::query_as::<_, CommentModel>(
            "SELECT id, post_id, user_id, content, deleted, created_at FROM comments WHERE id = $1",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Comment::from))
    }

    #[instrument(skip(self))]
    async fn find_by_post(&self, post_id: Snowflake) -> RepoResult<Vec<Comment>> {
        let results = sqlx::query_as::<_, CommentModel>(
            r"
            SELECT id, post_id, user_id, content, deleted, created_at
            FROM comments
            WHERE post_id = $1 AND deleted = FALSE
            ORDER BY id
            ",
        )
        .bind(post_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Comment::from).collect())
    }

    #[instrument(skip(self, comment), fields(comment_id = %comment.id))]
    async fn create(&self, comment: &Comment) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO comments (id, post_id, user_id, content, deleted, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(comment.id.into_inner())
        .bind(comment.post_id.into_inner())
        .bind(comment.user_id.into_inner())
        .bind(&comment.content)
        .bind(comment.deleted)
        .bind(comment.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn mark_deleted(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("UPDATE comments SET deleted = TRUE WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::CommentNotFound(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn count_by_posts(&self, post_ids: &[Snowflake]) -> RepoResult<Vec<(Snowflake, i64)>> {
        if post_ids.is_empty() {
            return Ok(Vec::new());
        }

        let results = sqlx::query_as::<_, CommentCountModel>(
            r"
            SELECT post_id, COUNT(*) AS count
            FROM comments
            WHERE post_id = ANY($1) AND deleted = FALSE
            GROUP BY post_id
            ",
        )
        .bind(raw_ids(post_ids))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results
            .into_iter()
            .map(|row| (Snowflake::new(row.post_id), row.count))
            .collect())
    }
}
