//! PostgreSQL implementation of MentionRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use campfire_core::{Mention, MentionRepository, RepoResult, Snowflake};

use crate::mappers::source_columns;
use crate::models::MentionModel;

use super::error::{clamp_limit, map_db_error};

#[derive(Clone)]
pub struct PgMentionRepository {
    pool: PgPool,
}

impl PgMentionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MentionRepository for PgMentionRepository {
    #[instrument(skip(self, mentions), fields(count = mentions.len()))]
    async fn create_many(&self, mentions: &[Mention]) -> RepoResult<()> {
        if mentions.is_empty() {
            return Ok(());
        }

        let mut ids = Vec::with_capacity(mentions.len());
        let mut post_ids = Vec::with_capacity(mentions.len());
        let mut comment_ids = Vec::with_capacity(mentions.len());
        let mut mentioned = Vec::with_capacity(mentions.len());
        let mut mentioners = Vec::with_capacity(mentions.len());
        let mut created = Vec::with_capacity(mentions.len());

        for mention in mentions {
            let (post_id, comment_id) = source_columns(mention.source);
            ids.push(mention.id.into_inner());
            post_ids.push(post_id);
            comment_ids.push(comment_id);
            mentioned.push(mention.mentioned_user_id.into_inner());
            mentioners.push(mention.mentioner_user_id.into_inner());
            created.push(mention.created_at);
        }

        sqlx::query(
            r"
            INSERT INTO mentions (id, post_id, comment_id, mentioned_user_id, mentioner_user_id, created_at)
            SELECT * FROM UNNEST($1::BIGINT[], $2::BIGINT[], $3::BIGINT[], $4::BIGINT[], $5::BIGINT[], $6::TIMESTAMPTZ[])
            ",
        )
        .bind(ids)
        .bind(post_ids)
        .bind(comment_ids)
        .bind(mentioned)
        .bind(mentioners)
        .bind(created)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_mentioned(&self, user_id: Snowflake, limit: i64) -> RepoResult<Vec<Mention>> {
        let results = sqlx::query_as::<_, MentionModel>(
            r"
            SELECT id, post_id, comment_id, mentioned_user_id, mentioner_user_id, created_at
            FROM mentions
            WHERE mentioned_user_id = $1
            ORDER BY id DESC
            LIMIT $2
            ",
        )
        .bind(user_id.into_inner())
        .bind(clamp_limit(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Mention::try_from).collect()
    }
}
