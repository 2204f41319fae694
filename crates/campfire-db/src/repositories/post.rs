//! PostgreSQL implementation of PostRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use campfire_core::{DomainError, Post, PostQuery, PostRepository, RepoResult, Snowflake};

use crate::models::PostModel;

use super::error::{clamp_limit, map_db_error};

const POST_COLUMNS: &str =
    "id, user_id, team_id, description, is_global, is_hidden, deleted_at, created_at";

// $1 cursor, $2 include_hidden, $3 limit; scopes bind their id as $4
const PAGE_FILTER: &str = r"
    deleted_at IS NULL
    AND ($1::BIGINT IS NULL OR id < $1)
    AND ($2 OR is_hidden = FALSE)
";

#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn page(&self, scope: &str, scope_id: Option<i64>, query: PostQuery) -> RepoResult<Vec<Post>> {
        let sql = format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE {scope} AND {PAGE_FILTER} ORDER BY id DESC LIMIT $3"
        );

        let mut statement = sqlx::query_as::<_, PostModel>(&sql)
            .bind(query.before.map(Snowflake::into_inner))
            .bind(query.include_hidden)
            .bind(clamp_limit(query.limit));
        if let Some(id) = scope_id {
            statement = statement.bind(id);
        }

        let results = statement
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(Post::from).collect())
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Post>> {
        let result = sqlx::query_as::<_, PostModel>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Post::from))
    }

    #[instrument(skip(self, post), fields(post_id = %post.id))]
    async fn create(&self, post: &Post) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO posts (id, user_id, team_id, description, is_global, is_hidden, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(post.id.into_inner())
        .bind(post.user_id.into_inner())
        .bind(post.team_id.into_inner())
        .bind(&post.description)
        .bind(post.is_global)
        .bind(post.is_hidden)
        .bind(post.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, post), fields(post_id = %post.id))]
    async fn update(&self, post: &Post) -> RepoResult<()> {
        let result = sqlx::query(
            "UPDATE posts SET is_hidden = $2, deleted_at = $3 WHERE id = $1",
        )
        .bind(post.id.into_inner())
        .bind(post.is_hidden)
        .bind(post.deleted_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::PostNotFound(post.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_team(&self, team_id: Snowflake, query: PostQuery) -> RepoResult<Vec<Post>> {
        self.page("team_id = $4", Some(team_id.into_inner()), query).await
    }

    #[instrument(skip(self))]
    async fn find_global(&self, query: PostQuery) -> RepoResult<Vec<Post>> {
        self.page("is_global", None, query).await
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Snowflake, query: PostQuery) -> RepoResult<Vec<Post>> {
        self.page("user_id = $4", Some(user_id.into_inner()), query).await
    }

    #[instrument(skip(self))]
    async fn count(&self) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM posts WHERE deleted_at IS NULL")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }
}
