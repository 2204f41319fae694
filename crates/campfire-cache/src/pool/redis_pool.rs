//! Managed Redis connections plus the handful of typed commands the
//! session store needs.

use deadpool_redis::{Config, Pool, Runtime};
use redis::AsyncCommands;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct RedisPoolConfig {
    /// e.g. `redis://localhost:6379`
    pub url: String,
    pub max_connections: usize,
}

impl Default for RedisPoolConfig {
    fn default() -> Self {
        Self {
            url: "redis://127.0.0.1:6379".to_string(),
            max_connections: 16,
        }
    }
}

impl From<&campfire_common::RedisConfig> for RedisPoolConfig {
    fn from(config: &campfire_common::RedisConfig) -> Self {
        Self {
            url: config.url.clone(),
            max_connections: config.max_connections as usize,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RedisPoolError {
    #[error("Failed to create Redis pool: {0}")]
    CreatePool(String),

    #[error("Failed to get connection from pool: {0}")]
    GetConnection(#[from] deadpool_redis::PoolError),

    #[error("Redis command error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TTL out of range: {0}")]
    InvalidTtl(u64),
}

pub type RedisResult<T> = Result<T, RedisPoolError>;

#[derive(Clone)]
pub struct RedisPool {
    pool: Pool,
}

impl std::fmt::Debug for RedisPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisPool")
            .field("status", &self.pool.status())
            .finish()
    }
}

impl RedisPool {
    pub fn new(config: RedisPoolConfig) -> RedisResult<Self> {
        let pool = Config::from_url(&config.url)
            .builder()
            .map_err(|e| RedisPoolError::CreatePool(e.to_string()))?
            .max_size(config.max_connections)
            .runtime(Runtime::Tokio1)
            .build()
            .map_err(|e| RedisPoolError::CreatePool(e.to_string()))?;

        // Never log credentials
        let safe_url = config.url.split('@').next_back().unwrap_or(&config.url);
        tracing::info!(
            url = %safe_url,
            max_connections = config.max_connections,
            "Redis pool created"
        );

        Ok(Self { pool })
    }

    pub fn from_config(config: &campfire_common::RedisConfig) -> RedisResult<Self> {
        Self::new(RedisPoolConfig::from(config))
    }

    pub async fn get(&self) -> RedisResult<deadpool_redis::Connection> {
        self.pool.get().await.map_err(RedisPoolError::GetConnection)
    }

    #[must_use]
    pub fn status(&self) -> deadpool_redis::Status {
        self.pool.status()
    }

    /// PING round trip
    pub async fn health_check(&self) -> RedisResult<()> {
        let mut conn = self.get().await?;
        redis::cmd("PING").query_async::<String>(&mut conn).await?;
        Ok(())
    }

    /// Store `value` as JSON, optionally expiring after `ttl_seconds`
    pub async fn set<V: serde::Serialize>(
        &self,
        key: &str,
        value: &V,
        ttl_seconds: Option<u64>,
    ) -> RedisResult<()> {
        let serialized = serde_json::to_string(value)?;
        let mut conn = self.get().await?;

        match ttl_seconds {
            Some(ttl) => conn.set_ex::<_, _, ()>(key, &serialized, ttl).await?,
            None => conn.set::<_, _, ()>(key, &serialized).await?,
        }
        Ok(())
    }

    pub async fn get_value<V: serde::de::DeserializeOwned>(
        &self,
        key: &str,
    ) -> RedisResult<Option<V>> {
        let mut conn = self.get().await?;
        let value: Option<String> = conn.get(key).await?;
        value
            .map(|v| serde_json::from_str(&v))
            .transpose()
            .map_err(RedisPoolError::from)
    }

    pub async fn delete(&self, key: &str) -> RedisResult<bool> {
        let mut conn = self.get().await?;
        let deleted: i32 = conn.del(key).await?;
        Ok(deleted > 0)
    }

    pub async fn delete_many(&self, keys: &[String]) -> RedisResult<i32> {
        if keys.is_empty() {
            return Ok(0);
        }
        let mut conn = self.get().await?;
        let deleted: i32 = conn.del(keys).await?;
        Ok(deleted)
    }

    /// SADD followed by EXPIRE on the whole set
    pub async fn set_add(&self, key: &str, member: &str, ttl_seconds: u64) -> RedisResult<()> {
        let ttl = i64::try_from(ttl_seconds).map_err(|_| RedisPoolError::InvalidTtl(ttl_seconds))?;
        let mut conn = self.get().await?;
        redis::pipe()
            .atomic()
            .sadd(key, member)
            .ignore()
            .expire(key, ttl)
            .ignore()
            .query_async::<()>(&mut conn)
            .await?;
        Ok(())
    }

    pub async fn set_remove(&self, key: &str, member: &str) -> RedisResult<()> {
        let mut conn = self.get().await?;
        conn.srem::<_, _, ()>(key, member).await?;
        Ok(())
    }

    pub async fn set_members(&self, key: &str) -> RedisResult<Vec<String>> {
        let mut conn = self.get().await?;
        Ok(conn.smembers(key).await?)
    }
}

pub type SharedRedisPool = Arc<RedisPool>;
