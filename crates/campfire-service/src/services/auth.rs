//! Authentication service
//!
//! Handles registration, login, token refresh and logout. Refresh sessions
//! live in Redis keyed by the `sid` claim carried in both tokens.

use campfire_cache::RefreshTokenData;
use campfire_common::auth::{hash_password, validate_password_strength, verify_password};
use campfire_common::{AppError, RateLimitAction, TokenPair};
use campfire_core::entities::{RegistrationCode, User};
use campfire_core::DomainError;
use chrono::Utc;
use serde_json::json;
use tracing::{info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use crate::dto::{
    AuthResponse, CurrentUserResponse, LoginRequest, LogoutRequest, RefreshTokenRequest,
    RegisterRequest,
};

use super::access::require_not_banned;
use super::audit::{AuditService, RequestMeta};
use super::context::{RateSubject, ServiceContext};
use super::error::{ServiceError, ServiceResult};
use super::user::load_team;

pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register with a one-time code
    #[instrument(skip(self, request, meta), fields(username = %request.username))]
    pub async fn register(
        &self,
        request: RegisterRequest,
        meta: &RequestMeta,
    ) -> ServiceResult<AuthResponse> {
        self.ctx
            .check_rate_limit(RateSubject::Ip(meta.ip.as_deref()), RateLimitAction::Register)?;
        request.validate()?;
        validate_password_strength(&request.password)?;

        if !RegistrationCode::is_valid_format(&request.registration_code) {
            return Err(DomainError::InvalidRegistrationCode.into());
        }
        let code = self
            .ctx
            .code_repo()
            .find_by_code(&request.registration_code)
            .await?
            .filter(|c| !c.is_used)
            .ok_or(DomainError::InvalidRegistrationCode)?;

        if self.ctx.user_repo().username_exists(&request.username).await? {
            return Err(DomainError::UsernameAlreadyExists.into());
        }

        let password_hash = hash_password(&request.password)?;
        let user = User::new(self.ctx.generate_id(), request.username);
        self.ctx.user_repo().create(&user, &password_hash).await?;

        // Claim the code; a concurrent registration may have beaten us to it
        if let Err(e) = self.ctx.code_repo().mark_used(code.id, user.id).await {
            warn!(user_id = %user.id, code_id = %code.id, error = %e, "Code claim failed, rolling back user");
            if let Err(cleanup) = self.ctx.user_repo().delete(user.id).await {
                warn!(user_id = %user.id, error = %cleanup, "Failed to remove orphaned user");
            }
            return Err(e.into());
        }

        info!(user_id = %user.id, "User registered");
        AuditService::new(self.ctx)
            .record(
                Some(user.id),
                "user_register",
                meta,
                json!({ "username": user.username }),
            )
            .await;

        let tokens = self.start_session(&user, meta).await?;
        Ok(auth_response(tokens, CurrentUserResponse::new(&user, None)))
    }

    #[instrument(skip(self, request, meta), fields(username = %request.username))]
    pub async fn login(
        &self,
        request: LoginRequest,
        meta: &RequestMeta,
    ) -> ServiceResult<AuthResponse> {
        self.ctx
            .check_rate_limit(RateSubject::Ip(meta.ip.as_deref()), RateLimitAction::Login)?;
        request.validate()?;

        let user = self
            .ctx
            .user_repo()
            .find_by_username(&request.username)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: unknown user");
                AppError::InvalidCredentials
            })?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !verify_password(&request.password, &password_hash)? {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(AppError::InvalidCredentials.into());
        }

        require_not_banned(&user, Utc::now()).inspect_err(|_| {
            warn!(user_id = %user.id, "Login refused: account banned");
        })?;

        info!(user_id = %user.id, "User logged in");
        AuditService::new(self.ctx)
            .record(Some(user.id), "user_login", meta, json!({}))
            .await;

        let team = load_team(self.ctx, user.team_id).await?;
        let tokens = self.start_session(&user, meta).await?;
        Ok(auth_response(
            tokens,
            CurrentUserResponse::new(&user, team.as_ref()),
        ))
    }

    /// Swap a refresh token for a new pair; the old session is revoked
    #[instrument(skip(self, request, meta))]
    pub async fn refresh(
        &self,
        request: RefreshTokenRequest,
        meta: &RequestMeta,
    ) -> ServiceResult<AuthResponse> {
        let claims = self
            .ctx
            .jwt_service()
            .validate_refresh_token(&request.refresh_token)?;
        let user_id = claims.user_id()?;

        self.ctx
            .refresh_token_store()
            .validate(&claims.sid, user_id)
            .await?
            .ok_or(AppError::InvalidToken)?;

        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::InvalidToken)?;
        require_not_banned(&user, Utc::now())?;

        let session_id = Uuid::new_v4().to_string();
        let tokens = self.ctx.jwt_service().issue(user.id, &session_id)?;
        self.ctx
            .refresh_token_store()
            .rotate(&claims.sid, &session_id, &session_data(&user, &session_id, meta))
            .await?;

        info!(user_id = %user.id, "Rotated refresh session");
        let team = load_team(self.ctx, user.team_id).await?;
        Ok(auth_response(
            tokens,
            CurrentUserResponse::new(&user, team.as_ref()),
        ))
    }

    #[instrument(skip(self, request))]
    pub async fn logout(&self, request: LogoutRequest) -> ServiceResult<()> {
        let claims = self
            .ctx
            .jwt_service()
            .validate_refresh_token(&request.refresh_token)?;

        let revoked = self.ctx.refresh_token_store().revoke(&claims.sid).await?;
        info!(user = %claims.sub, revoked, "User logged out");
        Ok(())
    }

    /// Resolve a bearer access token to its user, refusing banned accounts
    #[instrument(skip(self, token))]
    pub async fn authenticate(&self, token: &str) -> ServiceResult<User> {
        let claims = self.ctx.jwt_service().validate_access_token(token)?;
        let user = self
            .ctx
            .user_repo()
            .find_by_id(claims.user_id()?)
            .await?
            .ok_or(AppError::InvalidToken)?;

        require_not_banned(&user, Utc::now())?;
        Ok(user)
    }

    async fn start_session(&self, user: &User, meta: &RequestMeta) -> ServiceResult<TokenPair> {
        let session_id = Uuid::new_v4().to_string();
        let tokens = self.ctx.jwt_service().issue(user.id, &session_id)?;
        self.ctx
            .refresh_token_store()
            .store(&session_id, &session_data(user, &session_id, meta))
            .await
            .map_err(ServiceError::from)?;
        Ok(tokens)
    }
}

fn session_data(user: &User, session_id: &str, meta: &RequestMeta) -> RefreshTokenData {
    let mut data = RefreshTokenData::new(user.id, session_id.to_string());
    if let Some(agent) = &meta.user_agent {
        data = data.with_user_agent(agent.clone());
    }
    if let Some(ip) = &meta.ip {
        data = data.with_ip_address(ip.clone());
    }
    data
}

fn auth_response(tokens: TokenPair, user: CurrentUserResponse) -> AuthResponse {
    AuthResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        token_type: tokens.token_type,
        expires_in: tokens.expires_in,
        user,
    }
}
