//! # campfire-common
//!
//! Shared utilities including configuration, error handling, authentication,
//! telemetry, the per-action rate limiter and text/upload helpers.

pub mod auth;
pub mod config;
pub mod error;
pub mod rate_limit;
pub mod telemetry;
pub mod text;

// Re-export commonly used types at crate root
pub use auth::{
    hash_password, validate_password_strength, verify_password, Claims, JwtService,
    PasswordService, TokenPair, TokenType, MIN_PASSWORD_LENGTH,
};
pub use config::{
    ActionLimitsConfig, AppConfig, AppSettings, BootstrapConfig, ConfigError, CorsConfig,
    DatabaseConfig, Environment, JwtConfig, RateLimitConfig, RedisConfig, ServerConfig,
    SnowflakeConfig, StorageConfig,
};
pub use error::{AppError, AppResult, ErrorResponse};
pub use rate_limit::{RateDecision, RateLimitAction, RateLimiter, RateRule};
pub use telemetry::{
    init_tracing, init_tracing_with_config, try_init_tracing, try_init_tracing_with_config,
    TracingConfig, TracingError,
};
pub use text::{
    allowed_extension, file_extension, generate_upload_filename, time_ago, validate_url,
    UploadKind,
};
