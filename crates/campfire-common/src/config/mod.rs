//! Configuration structs

mod app_config;

pub use app_config::{
    ActionLimitsConfig, AppConfig, AppSettings, BootstrapConfig, ConfigError, CorsConfig,
    DatabaseConfig, Environment, JwtConfig, RateLimitConfig, RedisConfig, ServerConfig,
    SnowflakeConfig, StorageConfig,
};
