//! PostgreSQL implementation of ReactionRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use campfire_core::{Reaction, ReactionRepository, ReactionType, RepoResult, Snowflake};

use crate::mappers::{count_pair, post_count_triple};
use crate::models::{PostReactionCountModel, ReactionCountModel, ReactionModel};

use super::error::{map_db_error, raw_ids};

#[derive(Clone)]
pub struct PgReactionRepository {
    pool: PgPool,
}

impl PgReactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReactionRepository for PgReactionRepository {
    #[instrument(skip(self))]
    async fn find(
        &self,
        post_id: Snowflake,
        user_id: Snowflake,
        reaction_type: ReactionType,
    ) -> RepoResult<Option<Reaction>> {
        let result = sqlx::query_as::<_, ReactionModel>(
            r"
            SELECT id, post_id, user_id, reaction_type, created_at
            FROM reactions
            WHERE post_id = $1 AND user_id = $2 AND reaction_type = $3
            ",
        )
        .bind(post_id.into_inner())
        .bind(user_id.into_inner())
        .bind(reaction_type.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Reaction::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn create(&self, reaction: &Reaction) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO reactions (id, post_id, user_id, reaction_type, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (post_id, user_id, reaction_type) DO NOTHING
            ",
        )
        .bind(reaction.id.into_inner())
        .bind(reaction.post_id.into_inner())
        .bind(reaction.user_id.into_inner())
        .bind(reaction.reaction_type.as_str())
        .bind(reaction.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(
        &self,
        post_id: Snowflake,
        user_id: Snowflake,
        reaction_type: ReactionType,
    ) -> RepoResult<()> {
        sqlx::query(
            "DELETE FROM reactions WHERE post_id = $1 AND user_id = $2 AND reaction_type = $3",
        )
        .bind(post_id.into_inner())
        .bind(user_id.into_inner())
        .bind(reaction_type.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn count_by_type(&self, post_id: Snowflake) -> RepoResult<Vec<(ReactionType, i64)>> {
        let results = sqlx::query_as::<_, ReactionCountModel>(
            r"
            SELECT reaction_type, COUNT(*) AS count
            FROM reactions
            WHERE post_id = $1
            GROUP BY reaction_type
            ",
        )
        .bind(post_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(count_pair).collect()
    }

    #[instrument(skip(self))]
    async fn find_types_by_user(
        &self,
        post_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Vec<ReactionType>> {
        let results = sqlx::query_scalar::<_, String>(
            "SELECT reaction_type FROM reactions WHERE post_id = $1 AND user_id = $2",
        )
        .bind(post_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.iter().map(|kind| kind.parse()).collect()
    }

    #[instrument(skip(self, post_ids), fields(posts = post_ids.len()))]
    async fn count_by_posts(
        &self,
        post_ids: &[Snowflake],
    ) -> RepoResult<Vec<(Snowflake, ReactionType, i64)>> {
        if post_ids.is_empty() {
            return Ok(Vec::new());
        }

        let results = sqlx::query_as::<_, PostReactionCountModel>(
            r"
            SELECT post_id, reaction_type, COUNT(*) AS count
            FROM reactions
            WHERE post_id = ANY($1)
            GROUP BY post_id, reaction_type
            ",
        )
        .bind(raw_ids(post_ids))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(post_count_triple).collect()
    }

    #[instrument(skip(self, post_ids), fields(posts = post_ids.len()))]
    async fn find_types_by_user_on_posts(
        &self,
        post_ids: &[Snowflake],
        user_id: Snowflake,
    ) -> RepoResult<Vec<(Snowflake, ReactionType)>> {
        if post_ids.is_empty() {
            return Ok(Vec::new());
        }

        let results = sqlx::query_as::<_, (i64, String)>(
            "SELECT post_id, reaction_type FROM reactions WHERE post_id = ANY($1) AND user_id = $2",
        )
        .bind(raw_ids(post_ids))
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results
            .into_iter()
            .map(|(post_id, kind)| Ok((Snowflake::new(post_id), kind.parse()?)))
            .collect()
    }
}
