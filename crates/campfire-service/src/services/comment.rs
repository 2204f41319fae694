//! Comment service

use std::collections::HashMap;

use campfire_common::RateLimitAction;
use campfire_core::entities::{Comment, MentionSource, User};
use campfire_core::{render_content_html, DomainError, MentionParser, Snowflake};
use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{CommentResponse, CreateCommentRequest, UserSummary};

use super::audit::{AuditService, RequestMeta};
use super::context::{RateSubject, ServiceContext};
use super::error::ServiceResult;
use super::post::{record_mentions, PostService};

pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self, user, request), fields(user_id = %user.id))]
    pub async fn create(
        &self,
        user: &User,
        post_id: Snowflake,
        request: CreateCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        self.ctx
            .check_rate_limit(RateSubject::User(user), RateLimitAction::CreateComment)?;
        request.validate()?;
        let post = PostService::new(self.ctx).find_visible(user, post_id).await?;

        let comment = Comment::new(self.ctx.generate_id(), post.id, user.id, request.content);
        self.ctx.comment_repo().create(&comment).await?;

        let mentioned = record_mentions(
            self.ctx,
            &comment.content,
            user.id,
            MentionSource::Comment(comment.id),
        )
        .await?;
        info!(comment_id = %comment.id, post_id = %post.id, mentioned, "Comment created");

        self.respond(user, &comment, user, Utc::now()).await
    }

    /// Oldest first, deleted comments left out
    #[instrument(skip(self, viewer), fields(user_id = %viewer.id))]
    pub async fn list(
        &self,
        viewer: &User,
        post_id: Snowflake,
    ) -> ServiceResult<Vec<CommentResponse>> {
        let post = PostService::new(self.ctx).find_visible(viewer, post_id).await?;
        let comments = self.ctx.comment_repo().find_by_post(post.id).await?;

        let mut author_ids: Vec<Snowflake> = comments.iter().map(|c| c.user_id).collect();
        author_ids.sort_unstable();
        author_ids.dedup();
        let authors: HashMap<Snowflake, User> = self
            .ctx
            .user_repo()
            .find_by_ids(&author_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        let now = Utc::now();
        let mut responses = Vec::with_capacity(comments.len());
        for comment in &comments {
            if let Some(author) = authors.get(&comment.user_id) {
                responses.push(self.respond(viewer, comment, author, now).await?);
            }
        }
        Ok(responses)
    }

    /// Soft delete; authors and admins only
    #[instrument(skip(self, actor, meta), fields(user_id = %actor.id))]
    pub async fn delete(
        &self,
        actor: &User,
        comment_id: Snowflake,
        meta: &RequestMeta,
    ) -> ServiceResult<()> {
        let comment = self
            .ctx
            .comment_repo()
            .find_by_id(comment_id)
            .await?
            .filter(|c| !c.deleted)
            .ok_or(DomainError::CommentNotFound(comment_id))?;

        if !comment.can_delete(actor.id, actor.is_admin) {
            return Err(DomainError::NotContentAuthor.into());
        }

        self.ctx.comment_repo().mark_deleted(comment.id).await?;
        info!(comment_id = %comment.id, "Comment deleted");

        if comment.user_id != actor.id {
            AuditService::new(self.ctx)
                .record(
                    Some(actor.id),
                    "comment_delete",
                    meta,
                    json!({
                        "comment_id": comment.id.to_string(),
                        "author_id": comment.user_id.to_string(),
                    }),
                )
                .await;
        }
        Ok(())
    }

    async fn respond(
        &self,
        viewer: &User,
        comment: &Comment,
        author: &User,
        now: DateTime<Utc>,
    ) -> ServiceResult<CommentResponse> {
        let known = MentionParser::known_users(&comment.content, self.ctx.user_repo()).await?;
        Ok(CommentResponse {
            id: comment.id.to_string(),
            post_id: comment.post_id.to_string(),
            user: UserSummary::from(author),
            content_html: render_content_html(&comment.content, &known),
            can_delete: comment.can_delete(viewer.id, viewer.is_admin),
            time_ago: campfire_common::time_ago(comment.created_at, now),
            created_at: comment.created_at,
        })
    }
}
