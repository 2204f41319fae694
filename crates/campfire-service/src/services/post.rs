//! Post service
//!
//! Creating posts, attaching media, the team and global timelines, and the
//! batch assembly of post responses.

use std::collections::HashMap;

use campfire_common::{file_extension, RateLimitAction, UploadKind};
use campfire_core::entities::{
    Mention, MentionSource, Post, PostMedia, ReactionCount, ReactionType, User,
};
use campfire_core::{
    render_content_html, DomainError, MediaType, MentionParser, PostQuery, Snowflake,
};
use chrono::Utc;
use serde_json::json;
use tracing::{debug, info, instrument};
use validator::Validate;

use crate::dto::{
    CreatePostRequest, MediaResponse, PaginatedResponse, PostResponse, ReactionSummary,
    TimelineQuery, UserSummary,
};

use super::access::require_team;
use super::audit::{next_cursor, AuditService, RequestMeta};
use super::context::{RateSubject, ServiceContext};
use super::error::{ServiceError, ServiceResult};
use super::uploads::UploadedFile;

const DEFAULT_PAGE_SIZE: i64 = 50;

pub struct PostService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PostService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Post to the author's team, optionally also to the global feed
    #[instrument(skip(self, author, request), fields(user_id = %author.id))]
    pub async fn create_post(
        &self,
        author: &User,
        request: CreatePostRequest,
    ) -> ServiceResult<PostResponse> {
        let team_id = require_team(author)?;
        self.ctx
            .check_rate_limit(RateSubject::User(author), RateLimitAction::CreatePost)?;
        request.validate()?;

        let post = Post::new(
            self.ctx.generate_id(),
            author.id,
            team_id,
            request.description,
            request.is_global,
        );
        self.ctx.post_repo().create(&post).await?;

        let mentioned = record_mentions(
            self.ctx,
            &post.description,
            author.id,
            MentionSource::Post(post.id),
        )
        .await?;

        info!(post_id = %post.id, is_global = post.is_global, mentioned, "Post created");
        self.single_response(author, post).await
    }

    /// Attach images or videos to one of the caller's posts
    #[instrument(skip(self, user, files), fields(user_id = %user.id, count = files.len()))]
    pub async fn add_media(
        &self,
        user: &User,
        post_id: Snowflake,
        files: Vec<UploadedFile>,
    ) -> ServiceResult<PostResponse> {
        let post = self.find_visible(user, post_id).await?;
        if !post.is_author(user.id) {
            return Err(DomainError::NotContentAuthor.into());
        }
        if files.is_empty() {
            return Err(ServiceError::validation("No file selected"));
        }

        // Reject the whole batch before anything is written
        let store = self.ctx.file_store();
        let mut accepted = Vec::with_capacity(files.len());
        for file in &files {
            let kind = file_extension(&file.filename)
                .and_then(|ext| UploadKind::for_post_media(&ext))
                .ok_or_else(|| {
                    ServiceError::validation(format!(
                        "Invalid file type: {}. Allowed: {}, {}",
                        file.filename,
                        UploadKind::PostImage.allowed_extensions().join(", "),
                        UploadKind::PostVideo.allowed_extensions().join(", "),
                    ))
                })?;
            store.accept(file, kind)?;
            accepted.push((file, kind));
        }

        let mut order = self
            .ctx
            .media_repo()
            .max_display_order(post.id)
            .await?
            .map_or(0, |max| max + 1);

        for (file, kind) in accepted {
            let name = store.save(file, kind).await?;
            let media_type = match kind {
                UploadKind::PostVideo => MediaType::Video,
                _ => MediaType::Image,
            };
            let media = PostMedia::new(self.ctx.generate_id(), post.id, media_type, name, order);
            self.ctx.media_repo().create(&media).await?;
            debug!(media_id = %media.id, display_order = order, "Media attached");
            order += 1;
        }

        info!(post_id = %post.id, "Media added to post");
        self.single_response(user, post).await
    }

    /// Posts of the caller's team, newest first
    #[instrument(skip(self, viewer, query), fields(user_id = %viewer.id))]
    pub async fn team_timeline(
        &self,
        viewer: &User,
        query: TimelineQuery,
    ) -> ServiceResult<PaginatedResponse<PostResponse>> {
        let team_id = require_team(viewer)?;
        let post_query = page_query(viewer, &query)?;
        let limit = post_query.limit;
        let posts = self.ctx.post_repo().find_by_team(team_id, post_query).await?;
        self.page(viewer, posts, limit).await
    }

    /// Posts shared to everyone, newest first
    #[instrument(skip(self, viewer, query), fields(user_id = %viewer.id))]
    pub async fn global_timeline(
        &self,
        viewer: &User,
        query: TimelineQuery,
    ) -> ServiceResult<PaginatedResponse<PostResponse>> {
        let post_query = page_query(viewer, &query)?;
        let limit = post_query.limit;
        let posts = self.ctx.post_repo().find_global(post_query).await?;
        self.page(viewer, posts, limit).await
    }

    pub(crate) async fn user_posts(
        &self,
        viewer: &User,
        user_id: Snowflake,
        query: TimelineQuery,
    ) -> ServiceResult<PaginatedResponse<PostResponse>> {
        let post_query = page_query(viewer, &query)?;
        let limit = post_query.limit;
        let posts = self.ctx.post_repo().find_by_user(user_id, post_query).await?;
        self.page(viewer, posts, limit).await
    }

    #[instrument(skip(self, viewer), fields(user_id = %viewer.id))]
    pub async fn get_post(
        &self,
        viewer: &User,
        post_id: Snowflake,
    ) -> ServiceResult<PostResponse> {
        let post = self.find_visible(viewer, post_id).await?;
        self.single_response(viewer, post).await
    }

    /// Soft delete; authors and admins only
    #[instrument(skip(self, actor, meta), fields(user_id = %actor.id))]
    pub async fn delete_post(
        &self,
        actor: &User,
        post_id: Snowflake,
        meta: &RequestMeta,
    ) -> ServiceResult<()> {
        let mut post = self.find_visible(actor, post_id).await?;
        if !post.is_author(actor.id) && !actor.is_admin {
            return Err(DomainError::NotContentAuthor.into());
        }

        post.soft_delete();
        self.ctx.post_repo().update(&post).await?;
        info!(post_id = %post.id, "Post deleted");

        if !post.is_author(actor.id) {
            AuditService::new(self.ctx)
                .record(
                    Some(actor.id),
                    "post_delete",
                    meta,
                    json!({
                        "post_id": post.id.to_string(),
                        "author_id": post.user_id.to_string(),
                    }),
                )
                .await;
        }
        Ok(())
    }

    /// A post the viewer may see, or 404
    pub(crate) async fn find_visible(
        &self,
        viewer: &User,
        post_id: Snowflake,
    ) -> ServiceResult<Post> {
        self.ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .filter(|p| p.is_visible_to(viewer.is_admin))
            .ok_or_else(|| DomainError::PostNotFound(post_id).into())
    }

    async fn single_response(&self, viewer: &User, post: Post) -> ServiceResult<PostResponse> {
        let post_id = post.id;
        self.build_responses(viewer, vec![post])
            .await?
            .pop()
            .ok_or_else(|| DomainError::PostNotFound(post_id).into())
    }

    async fn page(
        &self,
        viewer: &User,
        posts: Vec<Post>,
        limit: i64,
    ) -> ServiceResult<PaginatedResponse<PostResponse>> {
        let next_before = next_cursor(posts.iter().map(|p| p.id), limit);
        let data = self.build_responses(viewer, posts).await?;
        Ok(PaginatedResponse::new(data, next_before, limit))
    }

    /// Assemble responses for a batch of posts, preserving order
    ///
    /// Authors, media, comment counts, reactions and mentioned users are
    /// each loaded with one query for the whole batch. Posts whose author no
    /// longer exists are skipped.
    pub(crate) async fn build_responses(
        &self,
        viewer: &User,
        posts: Vec<Post>,
    ) -> ServiceResult<Vec<PostResponse>> {
        if posts.is_empty() {
            return Ok(Vec::new());
        }

        let post_ids: Vec<Snowflake> = posts.iter().map(|p| p.id).collect();
        let mut author_ids: Vec<Snowflake> = posts.iter().map(|p| p.user_id).collect();
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

        let mut media: HashMap<Snowflake, Vec<PostMedia>> = HashMap::new();
        for item in self.ctx.media_repo().find_by_posts(&post_ids).await? {
            media.entry(item.post_id).or_default().push(item);
        }

        let comment_counts: HashMap<Snowflake, i64> = self
            .ctx
            .comment_repo()
            .count_by_posts(&post_ids)
            .await?
            .into_iter()
            .collect();

        let mut reaction_counts: HashMap<Snowflake, Vec<(ReactionType, i64)>> = HashMap::new();
        for (post_id, kind, n) in self.ctx.reaction_repo().count_by_posts(&post_ids).await? {
            reaction_counts.entry(post_id).or_default().push((kind, n));
        }
        let mut viewer_reactions: HashMap<Snowflake, Vec<ReactionType>> = HashMap::new();
        for (post_id, kind) in self
            .ctx
            .reaction_repo()
            .find_types_by_user_on_posts(&post_ids, viewer.id)
            .await?
        {
            viewer_reactions.entry(post_id).or_default().push(kind);
        }

        // Mentions never span a newline, so one lookup covers every post
        let all_text = posts
            .iter()
            .map(|p| p.description.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        let known = MentionParser::known_users(&all_text, self.ctx.user_repo()).await?;

        let now = Utc::now();
        let mut responses = Vec::with_capacity(posts.len());
        for post in posts {
            let Some(author) = authors.get(&post.user_id) else {
                continue;
            };

            let mut attachments = media.remove(&post.id).unwrap_or_default();
            attachments.sort_by_key(|m| m.display_order);

            let reactions = ReactionSummary(ReactionCount::summarize(
                reaction_counts.get(&post.id).map_or(&[][..], Vec::as_slice),
                viewer_reactions.get(&post.id).map_or(&[][..], Vec::as_slice),
            ));

            responses.push(PostResponse {
                id: post.id.to_string(),
                author: UserSummary::from(author),
                team_id: post.team_id.to_string(),
                content_html: render_content_html(&post.description, &known),
                is_global: post.is_global,
                is_hidden: post.is_hidden,
                media: attachments.iter().map(MediaResponse::from).collect(),
                reactions,
                comment_count: comment_counts.get(&post.id).copied().unwrap_or(0),
                can_delete: post.is_author(viewer.id) || viewer.is_admin,
                time_ago: campfire_common::time_ago(post.created_at, now),
                created_at: post.created_at,
                description: post.description,
            });
        }
        Ok(responses)
    }
}

fn page_query(viewer: &User, query: &TimelineQuery) -> ServiceResult<PostQuery> {
    query.validate()?;
    Ok(PostQuery {
        before: query.before,
        limit: query.limit.unwrap_or(DEFAULT_PAGE_SIZE),
        include_hidden: viewer.is_admin,
    })
}

/// Store one mention per distinct known user in `text`, returning how many
pub(crate) async fn record_mentions(
    ctx: &ServiceContext,
    text: &str,
    author_id: Snowflake,
    source: MentionSource,
) -> ServiceResult<usize> {
    let targets = MentionParser::resolve(text, author_id, ctx.user_repo()).await?;
    if targets.is_empty() {
        return Ok(0);
    }

    let mentions: Vec<Mention> = targets
        .iter()
        .map(|target| Mention::new(ctx.generate_id(), source, target.id, author_id))
        .collect();
    ctx.mention_repo().create_many(&mentions).await?;
    Ok(mentions.len())
}
