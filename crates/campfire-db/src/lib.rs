//! # campfire-db
//!
//! PostgreSQL implementations of the repository traits defined in
//! `campfire-core`, plus pool setup and the migration runner.
//!
//! ```rust,ignore
//! use campfire_db::{create_pool, run_migrations, PgUserRepository};
//!
//! let pool = create_pool(&config.database).await?;
//! run_migrations(&pool, &config.database.migrations_path).await?;
//! let users = PgUserRepository::new(pool);
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

pub use pool::{create_pool, run_migrations, MigrationError, PgPool, PoolOptions};
pub use repositories::{
    PgAnnouncementRepository, PgAuditLogRepository, PgCommentRepository, PgMentionRepository,
    PgPostMediaRepository, PgPostRepository, PgReactionRepository, PgRegistrationCodeRepository,
    PgReportRepository, PgSiteSettingsRepository, PgTeamRepository, PgUserRepository,
    PgVoteRepository,
};
