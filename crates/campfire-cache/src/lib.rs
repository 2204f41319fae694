//! # campfire-cache
//!
//! Redis-backed storage for login sessions.
//!
//! Every login creates a session id that is embedded in both JWTs as `sid`.
//! The refresh token is only honoured while its session record exists, so
//! logout, bans and password changes revoke sessions by deleting records.
//!
//! ```ignore
//! use campfire_cache::{RedisPool, RefreshTokenStore, RefreshTokenData};
//!
//! let pool = RedisPool::from_config(&config.redis)?;
//! let sessions = RefreshTokenStore::with_ttl(pool, refresh_ttl);
//! sessions.store(&sid, &RefreshTokenData::new(user_id, sid.clone())).await?;
//! ```

pub mod pool;
pub mod session;

pub use pool::{
    RedisPool, RedisPoolConfig, RedisPoolError, RedisResult, SharedRedisPool,
};
pub use session::{RefreshTokenData, RefreshTokenStore};
