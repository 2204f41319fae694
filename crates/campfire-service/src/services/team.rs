//! Team service

use campfire_common::UploadKind;
use campfire_core::entities::{Team, User};
use campfire_core::{DomainError, Snowflake};
use serde_json::json;
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{TeamDetailResponse, TeamNameRequest, TeamResponse, UserSummary};

use super::access::require_admin;
use super::audit::{AuditService, RequestMeta};
use super::context::ServiceContext;
use super::error::ServiceResult;
use super::uploads::UploadedFile;

pub struct TeamService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> TeamService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> ServiceResult<Vec<TeamResponse>> {
        let teams = self.ctx.team_repo().list_all().await?;
        Ok(teams.iter().map(TeamResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn get(&self, team_id: Snowflake) -> ServiceResult<TeamDetailResponse> {
        let team = self.find(team_id).await?;
        let members = self.ctx.user_repo().find_by_team(team_id).await?;

        Ok(TeamDetailResponse {
            team: TeamResponse::from(&team),
            members: members.iter().map(UserSummary::from).collect(),
        })
    }

    #[instrument(skip(self, actor, request, meta), fields(admin_id = %actor.id))]
    pub async fn create(
        &self,
        actor: &User,
        request: TeamNameRequest,
        meta: &RequestMeta,
    ) -> ServiceResult<TeamResponse> {
        require_admin(actor)?;
        request.validate()?;
        let name = request.name.trim().to_string();

        if self.ctx.team_repo().find_by_name(&name).await?.is_some() {
            return Err(DomainError::TeamNameAlreadyExists.into());
        }

        let team = Team::new(self.ctx.generate_id(), name);
        self.ctx.team_repo().create(&team).await?;

        info!(team_id = %team.id, "Team created");
        AuditService::new(self.ctx)
            .record(
                Some(actor.id),
                "team_create",
                meta,
                json!({ "team_id": team.id.to_string(), "name": team.name }),
            )
            .await;

        Ok(TeamResponse::from(&team))
    }

    #[instrument(skip(self, actor, request, meta), fields(admin_id = %actor.id))]
    pub async fn rename(
        &self,
        actor: &User,
        team_id: Snowflake,
        request: TeamNameRequest,
        meta: &RequestMeta,
    ) -> ServiceResult<TeamResponse> {
        require_admin(actor)?;
        request.validate()?;
        let name = request.name.trim().to_string();

        let mut team = self.find(team_id).await?;
        if let Some(existing) = self.ctx.team_repo().find_by_name(&name).await? {
            if existing.id != team.id {
                return Err(DomainError::TeamNameAlreadyExists.into());
            }
        }

        let old_name = std::mem::replace(&mut team.name, name);
        self.ctx.team_repo().update(&team).await?;

        AuditService::new(self.ctx)
            .record(
                Some(actor.id),
                "team_rename",
                meta,
                json!({
                    "team_id": team.id.to_string(),
                    "old_name": old_name,
                    "new_name": team.name,
                }),
            )
            .await;

        Ok(TeamResponse::from(&team))
    }

    /// Members keep their accounts; their team is cleared by the store
    #[instrument(skip(self, actor, meta), fields(admin_id = %actor.id))]
    pub async fn delete(
        &self,
        actor: &User,
        team_id: Snowflake,
        meta: &RequestMeta,
    ) -> ServiceResult<()> {
        require_admin(actor)?;
        let team = self.find(team_id).await?;

        self.ctx.team_repo().delete(team.id).await?;
        if let Some(avatar) = &team.avatar_path {
            self.ctx
                .file_store()
                .remove(UploadKind::TeamAvatar, avatar)
                .await;
        }

        info!(team_id = %team.id, "Team deleted");
        AuditService::new(self.ctx)
            .record(
                Some(actor.id),
                "team_delete",
                meta,
                json!({ "team_id": team.id.to_string(), "name": team.name }),
            )
            .await;
        Ok(())
    }

    #[instrument(skip(self, actor, file, meta), fields(admin_id = %actor.id))]
    pub async fn upload_avatar(
        &self,
        actor: &User,
        team_id: Snowflake,
        file: UploadedFile,
        meta: &RequestMeta,
    ) -> ServiceResult<TeamResponse> {
        require_admin(actor)?;
        let mut team = self.find(team_id).await?;

        let store = self.ctx.file_store();
        let name = store.save(&file, UploadKind::TeamAvatar).await?;
        let previous = team.avatar_path.replace(name);
        self.ctx.team_repo().update(&team).await?;

        if let Some(old) = previous {
            store.remove(UploadKind::TeamAvatar, &old).await;
        }

        AuditService::new(self.ctx)
            .record(
                Some(actor.id),
                "team_avatar_upload",
                meta,
                json!({ "team_id": team.id.to_string() }),
            )
            .await;

        Ok(TeamResponse::from(&team))
    }

    async fn find(&self, team_id: Snowflake) -> ServiceResult<Team> {
        Ok(self
            .ctx
            .team_repo()
            .find_by_id(team_id)
            .await?
            .ok_or(DomainError::TeamNotFound(team_id))?)
    }
}
