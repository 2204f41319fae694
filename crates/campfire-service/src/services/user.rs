//! User service
//!
//! Profiles, themes, avatars, mention autocomplete and the mention inbox.

use std::collections::HashMap;

use campfire_common::UploadKind;
use campfire_core::entities::{Team, User};
use campfire_core::{DomainError, Snowflake};
use chrono::Utc;
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{
    CurrentUserResponse, MentionResponse, PaginatedResponse, PostResponse, SearchUsersQuery,
    TimelineQuery, UpdateProfileRequest, UpdateThemeRequest, UserProfileResponse, UserSummary,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::post::PostService;
use super::uploads::UploadedFile;

/// Autocomplete results per query
const SEARCH_LIMIT: i64 = 10;
const MENTION_INBOX_LIMIT: i64 = 50;

pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    pub async fn get_me(&self, user: &User) -> ServiceResult<CurrentUserResponse> {
        let team = load_team(self.ctx, user.team_id).await?;
        Ok(CurrentUserResponse::new(user, team.as_ref()))
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, user_id: Snowflake) -> ServiceResult<UserProfileResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?;

        let team = load_team(self.ctx, user.team_id).await?;
        Ok(UserProfileResponse::new(&user, team.as_ref()))
    }

    /// Edit social links; an empty string clears a link, an absent one keeps it
    #[instrument(skip(self, user, request), fields(user_id = %user.id))]
    pub async fn update_profile(
        &self,
        user: &User,
        request: UpdateProfileRequest,
    ) -> ServiceResult<CurrentUserResponse> {
        request.validate()?;

        let mut updated = user.clone();
        apply_link(&mut updated.social.github_url, request.github_url);
        apply_link(&mut updated.social.linkedin_url, request.linkedin_url);
        apply_link(&mut updated.social.twitter_url, request.twitter_url);
        apply_link(&mut updated.social.portfolio_url, request.portfolio_url);

        self.ctx.user_repo().update(&updated).await?;
        info!("Profile updated");
        self.get_me(&updated).await
    }

    #[instrument(skip(self, user, request), fields(user_id = %user.id, theme = %request.theme))]
    pub async fn set_theme(
        &self,
        user: &User,
        request: UpdateThemeRequest,
    ) -> ServiceResult<CurrentUserResponse> {
        let mut updated = user.clone();
        updated.theme = request.theme;
        self.ctx.user_repo().update(&updated).await?;
        self.get_me(&updated).await
    }

    /// Replace the profile picture, removing the previous file
    #[instrument(skip(self, user, file), fields(user_id = %user.id))]
    pub async fn upload_profile_picture(
        &self,
        user: &User,
        file: UploadedFile,
    ) -> ServiceResult<CurrentUserResponse> {
        let store = self.ctx.file_store();
        let name = store.save(&file, UploadKind::ProfilePicture).await?;

        let mut updated = user.clone();
        let previous = updated.profile_picture.replace(name);
        self.ctx.user_repo().update(&updated).await?;

        if let Some(old) = previous {
            store.remove(UploadKind::ProfilePicture, &old).await;
        }
        info!("Profile picture updated");
        self.get_me(&updated).await
    }

    /// Username prefix search for `@mention` autocomplete
    #[instrument(skip(self))]
    pub async fn search(&self, query: SearchUsersQuery) -> ServiceResult<Vec<UserSummary>> {
        let prefix = query.q.trim();
        if prefix.is_empty() {
            return Ok(Vec::new());
        }

        let users = self
            .ctx
            .user_repo()
            .search_by_prefix(prefix, SEARCH_LIMIT)
            .await?;
        Ok(users.iter().map(UserSummary::from).collect())
    }

    #[instrument(skip(self, viewer, query), fields(viewer_id = %viewer.id))]
    pub async fn list_user_posts(
        &self,
        viewer: &User,
        user_id: Snowflake,
        query: TimelineQuery,
    ) -> ServiceResult<PaginatedResponse<PostResponse>> {
        if self.ctx.user_repo().find_by_id(user_id).await?.is_none() {
            return Err(ServiceError::not_found("User", user_id.to_string()));
        }
        PostService::new(self.ctx)
            .user_posts(viewer, user_id, query)
            .await
    }

    /// Mentions received, newest first
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    pub async fn my_mentions(&self, user: &User) -> ServiceResult<Vec<MentionResponse>> {
        let mentions = self
            .ctx
            .mention_repo()
            .find_by_mentioned(user.id, MENTION_INBOX_LIMIT)
            .await?;

        let mut mentioner_ids: Vec<Snowflake> =
            mentions.iter().map(|m| m.mentioner_user_id).collect();
        mentioner_ids.sort_unstable();
        mentioner_ids.dedup();

        let mentioners: HashMap<Snowflake, User> = self
            .ctx
            .user_repo()
            .find_by_ids(&mentioner_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        let now = Utc::now();
        Ok(mentions
            .iter()
            .map(|m| MentionResponse::new(m, mentioners.get(&m.mentioner_user_id), now))
            .collect())
    }
}

fn apply_link(slot: &mut Option<String>, value: Option<String>) {
    if let Some(value) = value {
        let value = value.trim().to_string();
        *slot = (!value.is_empty()).then_some(value);
    }
}

/// The team for an optional team id; a dangling id reads as no team
pub(crate) async fn load_team(
    ctx: &ServiceContext,
    team_id: Option<Snowflake>,
) -> ServiceResult<Option<Team>> {
    match team_id {
        Some(id) => Ok(ctx.team_repo().find_by_id(id).await?),
        None => Ok(None),
    }
}
