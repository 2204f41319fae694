//! Connection pool and schema migrations

mod migrate;
mod postgres;

pub use migrate::{run_migrations, MigrationError};
pub use postgres::{create_pool, PoolOptions};

pub use sqlx::postgres::PgPool;
