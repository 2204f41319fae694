//! Authentication extractor
//!
//! Resolves the bearer token in the Authorization header to the current
//! account. Ban checks happen here, so every authenticated route rejects
//! banned users.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use campfire_core::User;
use campfire_service::AuthService;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated user loaded from the access token
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        let app_state = AppState::from_ref(state);
        let user = AuthService::new(app_state.service_context())
            .authenticate(bearer.token())
            .await
            .map_err(|e| {
                tracing::debug!(error = %e, "Rejected access token");
                ApiError::from(e)
            })?;

        Ok(AuthUser(user))
    }
}
