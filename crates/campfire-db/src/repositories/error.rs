//! Error handling utilities for repositories

use campfire_core::DomainError;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Map a unique violation to a domain conflict, anything else to a database error
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Raw ids for `= ANY($1)` binds
pub fn raw_ids(ids: &[campfire_core::Snowflake]) -> Vec<i64> {
    ids.iter().map(|id| id.into_inner()).collect()
}

/// Clamp a caller-supplied page size
pub fn clamp_limit(limit: i64) -> i64 {
    limit.clamp(1, 100)
}
