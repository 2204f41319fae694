//! Admin console: dashboard counters, user management, registration codes

use campfire_common::auth::{hash_password, validate_password_strength};
use campfire_common::UploadKind;
use campfire_core::entities::{RegistrationCode, User};
use campfire_core::{DomainError, Snowflake};
use serde_json::json;
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::dto::{
    AdminUserResponse, AssignTeamRequest, CreateUserRequest, DashboardResponse,
    GenerateCodesRequest, RegistrationCodeResponse, SetRolesRequest,
};

use super::access::require_admin;
use super::audit::{AuditService, RequestMeta};
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Attempts at drawing an unused code before giving up
const MAX_CODE_ATTEMPTS: usize = 100;

pub struct AdminService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AdminService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self, actor), fields(admin_id = %actor.id))]
    pub async fn dashboard(&self, actor: &User) -> ServiceResult<DashboardResponse> {
        require_admin(actor)?;

        Ok(DashboardResponse {
            user_count: self.ctx.user_repo().count().await?,
            team_count: self.ctx.team_repo().count().await?,
            post_count: self.ctx.post_repo().count().await?,
            unused_code_count: self.ctx.code_repo().count_unused().await?,
            pending_report_count: self.ctx.report_repo().count_pending().await?,
        })
    }

    #[instrument(skip(self, actor), fields(admin_id = %actor.id))]
    pub async fn list_users(&self, actor: &User) -> ServiceResult<Vec<AdminUserResponse>> {
        require_admin(actor)?;
        let users = self.ctx.user_repo().list_all().await?;
        Ok(users.iter().map(AdminUserResponse::from).collect())
    }

    /// Create an account directly, bypassing registration codes
    #[instrument(skip(self, actor, request, meta), fields(admin_id = %actor.id, username = %request.username))]
    pub async fn create_user(
        &self,
        actor: &User,
        request: CreateUserRequest,
        meta: &RequestMeta,
    ) -> ServiceResult<AdminUserResponse> {
        require_admin(actor)?;
        request.validate()?;
        validate_password_strength(&request.password)?;

        if self.ctx.user_repo().username_exists(&request.username).await? {
            return Err(DomainError::UsernameAlreadyExists.into());
        }
        if let Some(team_id) = request.team_id {
            self.ensure_team(team_id).await?;
        }

        let password_hash = hash_password(&request.password)?;
        let mut user = User::new(self.ctx.generate_id(), request.username);
        user.is_admin = request.is_admin;
        user.is_judge = request.is_judge;
        user.team_id = request.team_id;
        self.ctx.user_repo().create(&user, &password_hash).await?;

        info!(user_id = %user.id, "User created by admin");
        AuditService::new(self.ctx)
            .record(
                Some(actor.id),
                "user_create",
                meta,
                json!({
                    "target_user_id": user.id.to_string(),
                    "username": user.username,
                    "is_admin": user.is_admin,
                    "is_judge": user.is_judge,
                }),
            )
            .await;

        Ok(AdminUserResponse::from(&user))
    }

    /// Move a user to a team, or out of any team with `null`
    #[instrument(skip(self, actor, meta), fields(admin_id = %actor.id))]
    pub async fn assign_team(
        &self,
        actor: &User,
        user_id: Snowflake,
        request: AssignTeamRequest,
        meta: &RequestMeta,
    ) -> ServiceResult<AdminUserResponse> {
        require_admin(actor)?;
        let mut user = self.find_user(user_id).await?;
        if let Some(team_id) = request.team_id {
            self.ensure_team(team_id).await?;
        }

        let previous = std::mem::replace(&mut user.team_id, request.team_id);
        self.ctx.user_repo().update(&user).await?;

        AuditService::new(self.ctx)
            .record(
                Some(actor.id),
                "user_assign_team",
                meta,
                json!({
                    "target_user_id": user.id.to_string(),
                    "old_team_id": previous.map(|id| id.to_string()),
                    "new_team_id": user.team_id.map(|id| id.to_string()),
                }),
            )
            .await;

        Ok(AdminUserResponse::from(&user))
    }

    /// Admins cannot drop their own admin flag
    #[instrument(skip(self, actor, meta), fields(admin_id = %actor.id))]
    pub async fn set_roles(
        &self,
        actor: &User,
        user_id: Snowflake,
        request: SetRolesRequest,
        meta: &RequestMeta,
    ) -> ServiceResult<AdminUserResponse> {
        require_admin(actor)?;
        if user_id == actor.id && !request.is_admin {
            return Err(DomainError::CannotTargetSelf.into());
        }

        let mut user = self.find_user(user_id).await?;
        user.is_admin = request.is_admin;
        user.is_judge = request.is_judge;
        self.ctx.user_repo().update(&user).await?;

        info!(user_id = %user.id, roles = ?user.roles().names(), "Roles changed");
        AuditService::new(self.ctx)
            .record(
                Some(actor.id),
                "user_set_roles",
                meta,
                json!({
                    "target_user_id": user.id.to_string(),
                    "is_admin": user.is_admin,
                    "is_judge": user.is_judge,
                }),
            )
            .await;

        Ok(AdminUserResponse::from(&user))
    }

    /// Hard delete; the user's content goes with them
    #[instrument(skip(self, actor, meta), fields(admin_id = %actor.id))]
    pub async fn delete_user(
        &self,
        actor: &User,
        user_id: Snowflake,
        meta: &RequestMeta,
    ) -> ServiceResult<()> {
        require_admin(actor)?;
        if user_id == actor.id {
            return Err(DomainError::CannotTargetSelf.into());
        }

        let user = self.find_user(user_id).await?;
        self.ctx.user_repo().delete(user.id).await?;

        if let Err(e) = self
            .ctx
            .refresh_token_store()
            .revoke_all_for_user(user.id)
            .await
        {
            warn!(user_id = %user.id, error = %e, "Failed to revoke sessions of deleted user");
        }
        if let Some(picture) = &user.profile_picture {
            self.ctx
                .file_store()
                .remove(UploadKind::ProfilePicture, picture)
                .await;
        }

        info!(user_id = %user.id, "User deleted");
        AuditService::new(self.ctx)
            .record(
                Some(actor.id),
                "user_delete",
                meta,
                json!({ "target_user_id": user.id.to_string(), "username": user.username }),
            )
            .await;
        Ok(())
    }

    #[instrument(skip(self, actor), fields(admin_id = %actor.id))]
    pub async fn list_codes(&self, actor: &User) -> ServiceResult<Vec<RegistrationCodeResponse>> {
        require_admin(actor)?;
        let codes = self.ctx.code_repo().list_all().await?;
        Ok(codes.iter().map(RegistrationCodeResponse::from).collect())
    }

    #[instrument(skip(self, actor, meta), fields(admin_id = %actor.id))]
    pub async fn generate_codes(
        &self,
        actor: &User,
        request: GenerateCodesRequest,
        meta: &RequestMeta,
    ) -> ServiceResult<Vec<RegistrationCodeResponse>> {
        require_admin(actor)?;
        request.validate()?;

        let codes = generate_code_batch(self.ctx, request.count).await?;

        AuditService::new(self.ctx)
            .record(
                Some(actor.id),
                "codes_generate",
                meta,
                json!({ "count": codes.len() }),
            )
            .await;

        Ok(codes.iter().map(RegistrationCodeResponse::from).collect())
    }

    /// Make a used code claimable again
    #[instrument(skip(self, actor, meta), fields(admin_id = %actor.id))]
    pub async fn reset_code(
        &self,
        actor: &User,
        code_id: Snowflake,
        meta: &RequestMeta,
    ) -> ServiceResult<RegistrationCodeResponse> {
        require_admin(actor)?;

        let mut code = self
            .ctx
            .code_repo()
            .find_by_id(code_id)
            .await?
            .ok_or(DomainError::RegistrationCodeNotFound)?;
        self.ctx.code_repo().reset(code.id).await?;
        code.reset();

        AuditService::new(self.ctx)
            .record(
                Some(actor.id),
                "code_reset",
                meta,
                json!({ "code_id": code.id.to_string(), "code": code.code }),
            )
            .await;

        Ok(RegistrationCodeResponse::from(&code))
    }

    async fn find_user(&self, user_id: Snowflake) -> ServiceResult<User> {
        Ok(self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?)
    }

    async fn ensure_team(&self, team_id: Snowflake) -> ServiceResult<()> {
        self.ctx
            .team_repo()
            .find_by_id(team_id)
            .await?
            .ok_or(DomainError::TeamNotFound(team_id))?;
        Ok(())
    }
}

/// Store `count` fresh codes, drawing again whenever one is already taken
pub(crate) async fn generate_code_batch(
    ctx: &ServiceContext,
    count: u32,
) -> ServiceResult<Vec<RegistrationCode>> {
    let mut created = Vec::with_capacity(count as usize);

    while created.len() < count as usize {
        let mut stored = None;
        for _ in 0..MAX_CODE_ATTEMPTS {
            let candidate = RegistrationCode::generate_code(&mut rand::thread_rng());
            if ctx.code_repo().code_exists(&candidate).await? {
                continue;
            }

            let code = RegistrationCode::new(ctx.generate_id(), candidate);
            match ctx.code_repo().create(&code).await {
                Ok(()) => {
                    stored = Some(code);
                    break;
                }
                Err(DomainError::RegistrationCodeExists) => continue,
                Err(e) => return Err(e.into()),
            }
        }

        let code = stored.ok_or_else(|| {
            ServiceError::internal("Could not find an unused registration code")
        })?;
        created.push(code);
    }

    info!(count = created.len(), "Registration codes generated");
    Ok(created)
}
