//! Application configuration structs
//!
//! Everything comes from environment variables (optionally via a `.env`
//! file). Only `DATABASE_URL`, `REDIS_URL` and `JWT_SECRET` are required.

use serde::Deserialize;
use std::env;
use std::str::FromStr;

use crate::rate_limit::{RateLimitAction, RateRule};

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub jwt: JwtConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    pub storage: StorageConfig,
    pub snowflake: SnowflakeConfig,
    pub bootstrap: BootstrapConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default)]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl FromStr for Environment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "staging" => Ok(Self::Staging),
            "development" | "dev" => Ok(Self::Development),
            _ => Err(()),
        }
    }
}

/// HTTP listener configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Read the client address from X-Forwarded-For / X-Real-IP.
    /// Only enable behind a reverse proxy that overwrites these headers.
    #[serde(default)]
    pub trust_proxy_headers: bool,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Apply pending migrations on startup
    #[serde(default = "default_true")]
    pub run_migrations: bool,
    #[serde(default = "default_migrations_path")]
    pub migrations_path: String,
}

/// Redis configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    pub url: String,
    #[serde(default = "default_redis_max_connections")]
    pub max_connections: u32,
}

/// JWT configuration
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry: i64,
    #[serde(default = "default_refresh_token_expiry")]
    pub refresh_token_expiry: i64,
}

/// Rate limiting configuration
///
/// `requests_per_second`/`burst` drive the global per-IP throttle; `actions`
/// holds the fixed-window limits for individual user actions.
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
    #[serde(default = "default_burst")]
    pub burst: u32,
    #[serde(default)]
    pub actions: ActionLimitsConfig,
}

/// Per-action fixed-window limits
#[derive(Debug, Clone, Deserialize)]
pub struct ActionLimitsConfig {
    pub create_post: RateRule,
    pub create_comment: RateRule,
    pub react: RateRule,
    pub report: RateRule,
    pub login: RateRule,
    pub register: RateRule,
}

impl Default for ActionLimitsConfig {
    fn default() -> Self {
        Self {
            create_post: RateRule::new(10, 10),
            create_comment: RateRule::new(30, 5),
            react: RateRule::new(60, 1),
            report: RateRule::new(5, 60),
            login: RateRule::new(10, 15),
            register: RateRule::new(5, 60),
        }
    }
}

impl ActionLimitsConfig {
    #[must_use]
    pub fn rule(&self, action: RateLimitAction) -> RateRule {
        match action {
            RateLimitAction::CreatePost => self.create_post,
            RateLimitAction::CreateComment => self.create_comment,
            RateLimitAction::React => self.react,
            RateLimitAction::Report => self.report,
            RateLimitAction::Login => self.login,
            RateLimitAction::Register => self.register,
        }
    }

    fn rule_mut(&mut self, action: RateLimitAction) -> &mut RateRule {
        match action {
            RateLimitAction::CreatePost => &mut self.create_post,
            RateLimitAction::CreateComment => &mut self.create_comment,
            RateLimitAction::React => &mut self.react,
            RateLimitAction::Report => &mut self.report,
            RateLimitAction::Login => &mut self.login,
            RateLimitAction::Register => &mut self.register,
        }
    }
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Upload storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

/// Snowflake ID generator configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SnowflakeConfig {
    #[serde(default)]
    pub worker_id: u16,
}

/// First-run seeding
#[derive(Debug, Clone, Deserialize)]
pub struct BootstrapConfig {
    /// Admin account created when no user with this name exists
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
    /// Codes generated when the code table is empty
    #[serde(default = "default_initial_code_count")]
    pub initial_code_count: u32,
}

// Default value functions
fn default_app_name() -> String {
    "campfire".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_true() -> bool {
    true
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    2
}

fn default_migrations_path() -> String {
    "./migrations".to_string()
}

fn default_redis_max_connections() -> u32 {
    10
}

fn default_access_token_expiry() -> i64 {
    900 // 15 minutes
}

fn default_refresh_token_expiry() -> i64 {
    604_800 // 7 days
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

fn default_upload_dir() -> String {
    "./uploads".to_string()
}

fn default_max_upload_bytes() -> usize {
    16 * 1024 * 1024
}

fn default_initial_code_count() -> u32 {
    10
}

/// Reads typed values from a key lookup, reporting unparsable values
struct VarSource<F> {
    lookup: F,
}

impl<F> VarSource<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn string(&self, key: &str) -> Option<String> {
        (self.lookup)(key).filter(|v| !v.trim().is_empty())
    }

    fn required(&self, key: &'static str) -> Result<String, ConfigError> {
        self.string(key).ok_or(ConfigError::MissingVar(key))
    }

    fn parse_or<T: FromStr>(&self, key: &str, default: T) -> Result<T, ConfigError> {
        match self.string(key) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue(key.to_string(), raw)),
            None => Ok(default),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or a
    /// value cannot be parsed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = VarSource { lookup };

        let mut actions = ActionLimitsConfig::default();
        for action in RateLimitAction::ALL {
            let prefix = action.env_prefix();
            let rule = actions.rule_mut(action);
            rule.max_requests =
                vars.parse_or(&format!("RATE_LIMIT_{prefix}_MAX"), rule.max_requests)?;
            rule.window_minutes = vars.parse_or(
                &format!("RATE_LIMIT_{prefix}_WINDOW_MINUTES"),
                rule.window_minutes,
            )?;
        }

        Ok(Self {
            app: AppSettings {
                name: vars.string("APP_NAME").unwrap_or_else(default_app_name),
                env: vars
                    .string("APP_ENV")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_default(),
            },
            server: ServerConfig {
                host: vars.string("SERVER_HOST").unwrap_or_else(default_host),
                port: vars.parse_or("SERVER_PORT", default_port())?,
                trust_proxy_headers: vars.parse_or("TRUST_PROXY_HEADERS", false)?,
            },
            database: DatabaseConfig {
                url: vars.required("DATABASE_URL")?,
                max_connections: vars
                    .parse_or("DATABASE_MAX_CONNECTIONS", default_max_connections())?,
                min_connections: vars
                    .parse_or("DATABASE_MIN_CONNECTIONS", default_min_connections())?,
                run_migrations: vars.parse_or("DATABASE_RUN_MIGRATIONS", default_true())?,
                migrations_path: vars
                    .string("DATABASE_MIGRATIONS_PATH")
                    .unwrap_or_else(default_migrations_path),
            },
            redis: RedisConfig {
                url: vars.required("REDIS_URL")?,
                max_connections: vars
                    .parse_or("REDIS_MAX_CONNECTIONS", default_redis_max_connections())?,
            },
            jwt: JwtConfig {
                secret: vars.required("JWT_SECRET")?,
                access_token_expiry: vars
                    .parse_or("JWT_ACCESS_TOKEN_EXPIRY", default_access_token_expiry())?,
                refresh_token_expiry: vars
                    .parse_or("JWT_REFRESH_TOKEN_EXPIRY", default_refresh_token_expiry())?,
            },
            rate_limit: RateLimitConfig {
                requests_per_second: vars
                    .parse_or("RATE_LIMIT_REQUESTS_PER_SECOND", default_requests_per_second())?,
                burst: vars.parse_or("RATE_LIMIT_BURST", default_burst())?,
                actions,
            },
            cors: CorsConfig {
                allowed_origins: vars
                    .string("CORS_ORIGINS")
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|o| !o.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
            storage: StorageConfig {
                upload_dir: vars.string("UPLOAD_DIR").unwrap_or_else(default_upload_dir),
                max_upload_bytes: vars.parse_or("UPLOAD_MAX_BYTES", default_max_upload_bytes())?,
            },
            snowflake: SnowflakeConfig {
                worker_id: vars.parse_or("WORKER_ID", 0)?,
            },
            bootstrap: BootstrapConfig {
                admin_username: vars.string("ADMIN_USERNAME"),
                admin_password: vars.string("ADMIN_PASSWORD"),
                initial_code_count: vars
                    .parse_or("INITIAL_CODE_COUNT", default_initial_code_count())?,
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const REQUIRED: [(&str, &str); 3] = [
        ("DATABASE_URL", "postgres://localhost/campfire"),
        ("REDIS_URL", "redis://localhost"),
        ("JWT_SECRET", "secret"),
    ];

    #[test]
    fn test_defaults_with_required_vars() {
        let config = AppConfig::from_lookup(lookup(&REQUIRED)).unwrap();
        assert_eq!(config.server.address(), "127.0.0.1:8080");
        assert_eq!(config.storage.max_upload_bytes, 16 * 1024 * 1024);
        assert_eq!(config.bootstrap.initial_code_count, 10);
        assert!(config.bootstrap.admin_username.is_none());
        assert!(config.database.run_migrations);
        assert_eq!(config.rate_limit.actions.create_post, RateRule::new(10, 10));
        assert_eq!(config.app.env, Environment::Development);
        assert!(!config.server.trust_proxy_headers);
    }

    #[test]
    fn test_trust_proxy_headers_flag() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("TRUST_PROXY_HEADERS", "true"));
        let config = AppConfig::from_lookup(lookup(&pairs)).unwrap();
        assert!(config.server.trust_proxy_headers);
    }

    #[test]
    fn test_missing_required_var() {
        let err = AppConfig::from_lookup(lookup(&REQUIRED[..2])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("JWT_SECRET")));
    }

    #[test]
    fn test_invalid_value_is_reported() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("SERVER_PORT", "eighty"));
        let err = AppConfig::from_lookup(lookup(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref key, _) if key == "SERVER_PORT"));
    }

    #[test]
    fn test_action_limit_overrides() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("RATE_LIMIT_REPORT_MAX", "2"));
        pairs.push(("RATE_LIMIT_REPORT_WINDOW_MINUTES", "30"));
        pairs.push(("CORS_ORIGINS", "http://a.test, http://b.test,"));
        pairs.push(("APP_ENV", "production"));

        let config = AppConfig::from_lookup(lookup(&pairs)).unwrap();
        assert_eq!(
            config.rate_limit.actions.rule(RateLimitAction::Report),
            RateRule::new(2, 30)
        );
        assert_eq!(config.cors.allowed_origins.len(), 2);
        assert!(config.app.env.is_production());
    }

    #[test]
    fn test_server_address() {
        let config = ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 8080,
            trust_proxy_headers: false,
        };
        assert_eq!(config.address(), "0.0.0.0:8080");
    }
}
