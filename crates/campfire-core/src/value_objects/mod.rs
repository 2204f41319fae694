//! Value objects - immutable types that represent domain concepts

mod roles;
mod snowflake;

pub use roles::Roles;
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
