//! Model -> entity conversions
//!
//! Enum columns are stored as lowercase text guarded by CHECK constraints.
//! Rows whose shape the schema already rules out (a report or mention with
//! no target) convert through `TryFrom` so a corrupted row surfaces as an
//! error instead of a made-up value.

mod announcement;
mod audit_log;
mod comment;
mod mention;
mod post;
mod reaction;
mod registration_code;
mod report;
mod site_settings;
mod team;
mod user;
mod vote;

pub use mention::source_columns;
pub use reaction::{count_pair, post_count_triple};
pub use report::target_columns;

/// Convert an optional raw id column
#[inline]
pub(crate) fn opt_id(id: Option<i64>) -> Option<campfire_core::Snowflake> {
    id.map(campfire_core::Snowflake::new)
}
