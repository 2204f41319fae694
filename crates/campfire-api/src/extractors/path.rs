//! Path parameter extractors
//!
//! Type-safe extraction of Snowflake IDs from path parameters.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use campfire_core::Snowflake;

use crate::response::ApiError;

/// The single `:id` segment of a route, parsed as a Snowflake
#[derive(Debug, Clone, Copy)]
pub struct SnowflakePath(pub Snowflake);

#[async_trait]
impl<S> FromRequestParts<S> for SnowflakePath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.body_text()))?;

        parse_id(&raw).map(SnowflakePath)
    }
}

/// `/reports/:content_type/:id`
#[derive(Debug, Clone)]
pub struct ContentPath {
    pub content_type: String,
    pub id: Snowflake,
}

#[async_trait]
impl<S> FromRequestParts<S> for ContentPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path((content_type, raw)) = Path::<(String, String)>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.body_text()))?;

        Ok(ContentPath {
            content_type,
            id: parse_id(&raw)?,
        })
    }
}

fn parse_id(raw: &str) -> Result<Snowflake, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::invalid_path(format!("Invalid id: {raw}")))
}
