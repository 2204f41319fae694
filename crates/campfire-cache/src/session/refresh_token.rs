//! Refresh-token sessions in Redis.
//!
//! One record per login, keyed by the session id carried in the token's
//! `sid` claim. A per-user set indexes the sessions so they can all be
//! revoked at once when the account is banned or deleted.

use crate::pool::{RedisPool, RedisResult};
use campfire_core::Snowflake;
use serde::{Deserialize, Serialize};

const REFRESH_TOKEN_PREFIX: &str = "refresh_token:";
const USER_SESSIONS_PREFIX: &str = "user_tokens:";

/// 7 days
const DEFAULT_REFRESH_TOKEN_TTL: u64 = 7 * 24 * 60 * 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshTokenData {
    pub user_id: Snowflake,
    pub session_id: String,
    /// Unix seconds
    pub created_at: i64,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
}

impl RefreshTokenData {
    #[must_use]
    pub fn new(user_id: Snowflake, session_id: String) -> Self {
        Self {
            user_id,
            session_id,
            created_at: chrono::Utc::now().timestamp(),
            user_agent: None,
            ip_address: None,
        }
    }

    #[must_use]
    pub fn with_user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    #[must_use]
    pub fn with_ip_address(mut self, ip: impl Into<String>) -> Self {
        self.ip_address = Some(ip.into());
        self
    }

    /// A session belongs to exactly one user; a token naming another user is forged
    pub fn belongs_to(&self, user_id: Snowflake) -> bool {
        self.user_id == user_id
    }
}

#[derive(Clone)]
pub struct RefreshTokenStore {
    pool: RedisPool,
    ttl_seconds: u64,
}

impl RefreshTokenStore {
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self::with_ttl(pool, DEFAULT_REFRESH_TOKEN_TTL)
    }

    #[must_use]
    pub fn with_ttl(pool: RedisPool, ttl_seconds: u64) -> Self {
        Self { pool, ttl_seconds }
    }

    fn key(session_id: &str) -> String {
        format!("{REFRESH_TOKEN_PREFIX}{session_id}")
    }

    fn user_key(user_id: Snowflake) -> String {
        format!("{USER_SESSIONS_PREFIX}{user_id}")
    }

    pub async fn store(&self, session_id: &str, data: &RefreshTokenData) -> RedisResult<()> {
        self.pool
            .set(&Self::key(session_id), data, Some(self.ttl_seconds))
            .await?;
        self.pool
            .set_add(&Self::user_key(data.user_id), session_id, self.ttl_seconds)
            .await?;

        tracing::debug!(
            session_id = %session_id,
            user_id = %data.user_id,
            "Stored refresh session"
        );
        Ok(())
    }

    pub async fn get(&self, session_id: &str) -> RedisResult<Option<RefreshTokenData>> {
        self.pool.get_value(&Self::key(session_id)).await
    }

    /// Session data if it exists and belongs to `user_id`
    pub async fn validate(
        &self,
        session_id: &str,
        user_id: Snowflake,
    ) -> RedisResult<Option<RefreshTokenData>> {
        Ok(self
            .get(session_id)
            .await?
            .filter(|data| data.belongs_to(user_id)))
    }

    pub async fn revoke(&self, session_id: &str) -> RedisResult<bool> {
        if let Some(data) = self.get(session_id).await? {
            self.pool
                .set_remove(&Self::user_key(data.user_id), session_id)
                .await?;
        }

        let deleted = self.pool.delete(&Self::key(session_id)).await?;
        if deleted {
            tracing::debug!(session_id = %session_id, "Revoked refresh session");
        }
        Ok(deleted)
    }

    /// Replace `old_session` with `new_session` for the same user
    pub async fn rotate(
        &self,
        old_session: &str,
        new_session: &str,
        data: &RefreshTokenData,
    ) -> RedisResult<()> {
        self.revoke(old_session).await?;
        self.store(new_session, data).await
    }

    /// Log the user out everywhere
    pub async fn revoke_all_for_user(&self, user_id: Snowflake) -> RedisResult<usize> {
        let user_key = Self::user_key(user_id);
        let session_ids = self.pool.set_members(&user_key).await?;
        let count = session_ids.len();

        let keys: Vec<String> = session_ids.iter().map(|id| Self::key(id)).collect();
        self.pool.delete_many(&keys).await?;
        self.pool.delete(&user_key).await?;

        tracing::info!(user_id = %user_id, count, "Revoked all refresh sessions for user");
        Ok(count)
    }

    /// Live sessions for a user; ids whose record already expired are skipped
    pub async fn get_user_sessions(&self, user_id: Snowflake) -> RedisResult<Vec<RefreshTokenData>> {
        let session_ids = self.pool.set_members(&Self::user_key(user_id)).await?;
        let mut sessions = Vec::with_capacity(session_ids.len());

        for session_id in session_ids {
            if let Some(data) = self.get(&session_id).await? {
                sessions.push(data);
            }
        }
        Ok(sessions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::RedisPoolConfig;

    #[test]
    fn test_refresh_token_data_creation() {
        let user_id = Snowflake::from(12345i64);
        let data = RefreshTokenData::new(user_id, "session123".to_string())
            .with_user_agent("Firefox")
            .with_ip_address("192.168.1.1");

        assert_eq!(data.user_id, user_id);
        assert_eq!(data.session_id, "session123");
        assert_eq!(data.user_agent.as_deref(), Some("Firefox"));
        assert_eq!(data.ip_address.as_deref(), Some("192.168.1.1"));
        assert!(data.belongs_to(user_id));
        assert!(!data.belongs_to(Snowflake::from(1i64)));
    }

    #[test]
    fn test_key_generation() {
        assert_eq!(RefreshTokenStore::key("abc123"), "refresh_token:abc123");
        assert_eq!(
            RefreshTokenStore::user_key(Snowflake::from(9i64)),
            "user_tokens:9"
        );
    }

    #[test]
    fn test_data_json_shape() {
        let data = RefreshTokenData::new(Snowflake::from(5i64), "s".to_string());
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["user_id"], "5");
        assert_eq!(json["session_id"], "s");
    }

    async fn get_test_store() -> Option<RefreshTokenStore> {
        let url = std::env::var("REDIS_URL").ok()?;
        let pool = RedisPool::new(RedisPoolConfig {
            url,
            max_connections: 4,
        })
        .ok()?;
        pool.health_check().await.ok()?;
        Some(RefreshTokenStore::with_ttl(pool, 60))
    }

    #[tokio::test]
    async fn test_store_validate_and_revoke_all() {
        let Some(store) = get_test_store().await else {
            eprintln!("Skipping test: REDIS_URL not set");
            return;
        };

        let user_id = Snowflake::from(chrono::Utc::now().timestamp_nanos_opt().unwrap_or(1));
        for sid in ["a", "b"] {
            let sid = format!("{user_id}-{sid}");
            store
                .store(&sid, &RefreshTokenData::new(user_id, sid.clone()))
                .await
                .unwrap();
        }

        let first = format!("{user_id}-a");
        assert!(store.validate(&first, user_id).await.unwrap().is_some());
        assert!(store
            .validate(&first, Snowflake::from(1i64))
            .await
            .unwrap()
            .is_none());
        assert_eq!(store.get_user_sessions(user_id).await.unwrap().len(), 2);

        assert_eq!(store.revoke_all_for_user(user_id).await.unwrap(), 2);
        assert!(store.get(&first).await.unwrap().is_none());
    }
}
