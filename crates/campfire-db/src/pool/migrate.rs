//! Applies the SQL files in the migrations directory at startup

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::PgPool;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("failed to load migrations from {path}: {source}")]
    Load {
        path: String,
        #[source]
        source: MigrateError,
    },

    #[error("failed to apply migrations: {0}")]
    Apply(#[from] MigrateError),
}

/// Load migrations from `path` and apply any that are pending
pub async fn run_migrations(pool: &PgPool, path: &str) -> Result<(), MigrationError> {
    let migrator = Migrator::new(Path::new(path))
        .await
        .map_err(|source| MigrationError::Load {
            path: path.to_string(),
            source,
        })?;

    tracing::info!(
        count = migrator.iter().count(),
        path,
        "Applying database migrations"
    );
    migrator.run(pool).await?;

    Ok(())
}
