//! Axum extractors for request handling
//!
//! Custom extractors for authentication, JSON bodies, query strings, path
//! ids, multipart uploads and audit metadata.

mod auth;
mod json;
mod meta;
mod path;
mod query;
mod upload;

pub use auth::AuthUser;
pub use json::JsonBody;
pub use meta::ClientMeta;
pub use path::{ContentPath, SnowflakePath};
pub use query::QueryParams;
pub use upload::Uploads;
