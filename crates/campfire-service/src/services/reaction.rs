//! Reaction service

use campfire_common::RateLimitAction;
use campfire_core::entities::{Reaction, ReactionCount, User};
use campfire_core::Snowflake;
use tracing::{debug, instrument};

use crate::dto::{ReactionSummary, ToggleReactionRequest};

use super::context::{RateSubject, ServiceContext};
use super::error::ServiceResult;
use super::post::PostService;

pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Add the reaction if the caller hasn't placed it, remove it otherwise
    #[instrument(skip(self, user), fields(user_id = %user.id, reaction = %request.reaction_type))]
    pub async fn toggle(
        &self,
        user: &User,
        post_id: Snowflake,
        request: ToggleReactionRequest,
    ) -> ServiceResult<ReactionSummary> {
        self.ctx
            .check_rate_limit(RateSubject::User(user), RateLimitAction::React)?;
        let post = PostService::new(self.ctx).find_visible(user, post_id).await?;
        let kind = request.reaction_type;

        let repo = self.ctx.reaction_repo();
        if repo.find(post.id, user.id, kind).await?.is_some() {
            repo.delete(post.id, user.id, kind).await?;
            debug!("Reaction removed");
        } else {
            let reaction = Reaction::new(self.ctx.generate_id(), post.id, user.id, kind);
            repo.create(&reaction).await?;
            debug!("Reaction added");
        }

        reaction_summary(self.ctx, post.id, user.id).await
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    pub async fn get(&self, user: &User, post_id: Snowflake) -> ServiceResult<ReactionSummary> {
        let post = PostService::new(self.ctx).find_visible(user, post_id).await?;
        reaction_summary(self.ctx, post.id, user.id).await
    }
}

/// All six reaction types with counts and whether `user_id` placed each
pub(crate) async fn reaction_summary(
    ctx: &ServiceContext,
    post_id: Snowflake,
    user_id: Snowflake,
) -> ServiceResult<ReactionSummary> {
    let counts = ctx.reaction_repo().count_by_type(post_id).await?;
    let mine = ctx
        .reaction_repo()
        .find_types_by_user(post_id, user_id)
        .await?;
    Ok(ReactionSummary(ReactionCount::summarize(&counts, &mine)))
}
