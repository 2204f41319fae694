//! Service context - dependency container for services
//!
//! Holds the repositories, the session store, the action rate limiter and
//! upload storage. Cheap to clone; every field is shared.

use std::sync::Arc;

use campfire_cache::{RefreshTokenStore, SharedRedisPool};
use campfire_common::auth::JwtService;
use campfire_common::{ActionLimitsConfig, AppError, RateDecision, RateLimitAction, RateLimiter};
use campfire_core::traits::{
    AnnouncementRepository, AuditLogRepository, CommentRepository, MentionRepository,
    PostMediaRepository, PostRepository, ReactionRepository, RegistrationCodeRepository,
    ReportRepository, SiteSettingsRepository, TeamRepository, UserRepository, VoteRepository,
};
use campfire_core::{Snowflake, SnowflakeGenerator, User};
use campfire_db::PgPool;
use tracing::warn;

use super::error::{ServiceError, ServiceResult};
use super::uploads::FileStore;

/// Who a rate-limited action is counted against
#[derive(Debug, Clone, Copy)]
pub enum RateSubject<'a> {
    /// Authenticated caller; admins are never limited
    User(&'a User),
    /// Anonymous caller by client address
    Ip(Option<&'a str>),
}

#[derive(Clone)]
pub struct ServiceContext {
    pool: PgPool,
    redis_pool: SharedRedisPool,

    user_repo: Arc<dyn UserRepository>,
    team_repo: Arc<dyn TeamRepository>,
    code_repo: Arc<dyn RegistrationCodeRepository>,
    post_repo: Arc<dyn PostRepository>,
    media_repo: Arc<dyn PostMediaRepository>,
    reaction_repo: Arc<dyn ReactionRepository>,
    comment_repo: Arc<dyn CommentRepository>,
    mention_repo: Arc<dyn MentionRepository>,
    vote_repo: Arc<dyn VoteRepository>,
    announcement_repo: Arc<dyn AnnouncementRepository>,
    report_repo: Arc<dyn ReportRepository>,
    audit_repo: Arc<dyn AuditLogRepository>,
    settings_repo: Arc<dyn SiteSettingsRepository>,

    refresh_token_store: RefreshTokenStore,

    jwt_service: Arc<JwtService>,
    snowflake_generator: Arc<SnowflakeGenerator>,
    rate_limiter: Arc<RateLimiter>,
    action_limits: ActionLimitsConfig,
    file_store: FileStore,
}

impl ServiceContext {
    // === Pools ===

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn redis_pool(&self) -> &SharedRedisPool {
        &self.redis_pool
    }

    // === Repositories ===

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn team_repo(&self) -> &dyn TeamRepository {
        self.team_repo.as_ref()
    }

    pub fn code_repo(&self) -> &dyn RegistrationCodeRepository {
        self.code_repo.as_ref()
    }

    pub fn post_repo(&self) -> &dyn PostRepository {
        self.post_repo.as_ref()
    }

    pub fn media_repo(&self) -> &dyn PostMediaRepository {
        self.media_repo.as_ref()
    }

    pub fn reaction_repo(&self) -> &dyn ReactionRepository {
        self.reaction_repo.as_ref()
    }

    pub fn comment_repo(&self) -> &dyn CommentRepository {
        self.comment_repo.as_ref()
    }

    pub fn mention_repo(&self) -> &dyn MentionRepository {
        self.mention_repo.as_ref()
    }

    pub fn vote_repo(&self) -> &dyn VoteRepository {
        self.vote_repo.as_ref()
    }

    pub fn announcement_repo(&self) -> &dyn AnnouncementRepository {
        self.announcement_repo.as_ref()
    }

    pub fn report_repo(&self) -> &dyn ReportRepository {
        self.report_repo.as_ref()
    }

    pub fn audit_repo(&self) -> &dyn AuditLogRepository {
        self.audit_repo.as_ref()
    }

    pub fn settings_repo(&self) -> &dyn SiteSettingsRepository {
        self.settings_repo.as_ref()
    }

    // === Sessions, ids, limits, storage ===

    pub fn refresh_token_store(&self) -> &RefreshTokenStore {
        &self.refresh_token_store
    }

    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    pub fn snowflake_generator(&self) -> &SnowflakeGenerator {
        self.snowflake_generator.as_ref()
    }

    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }

    pub fn rate_limiter(&self) -> &RateLimiter {
        self.rate_limiter.as_ref()
    }

    pub fn action_limits(&self) -> &ActionLimitsConfig {
        &self.action_limits
    }

    pub fn file_store(&self) -> &FileStore {
        &self.file_store
    }

    /// Count one `action` against `subject`, failing with 429 once its window is full
    pub fn check_rate_limit(
        &self,
        subject: RateSubject<'_>,
        action: RateLimitAction,
    ) -> ServiceResult<()> {
        let key = match subject {
            RateSubject::User(user) if user.is_admin => return Ok(()),
            RateSubject::User(user) => RateLimiter::user_key(user.id, action),
            RateSubject::Ip(addr) => RateLimiter::ip_key(addr.unwrap_or("unknown"), action),
        };

        match self.rate_limiter.check(&key, self.action_limits.rule(action)) {
            RateDecision::Allowed => Ok(()),
            RateDecision::Limited { retry_after } => {
                warn!(key = %key, action = %action, "Rate limit exceeded");
                Err(AppError::rate_limited(retry_after).into())
            }
        }
    }

    /// `SELECT 1` against Postgres
    pub async fn check_database(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }

    pub async fn check_redis(&self) -> bool {
        self.redis_pool.health_check().await.is_ok()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &"PgPool")
            .field("redis_pool", &self.redis_pool)
            .field("rate_limiter_entries", &self.rate_limiter.len())
            .field("file_store", &self.file_store)
            .finish()
    }
}

/// Builder for [`ServiceContext`]
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    redis_pool: Option<SharedRedisPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    team_repo: Option<Arc<dyn TeamRepository>>,
    code_repo: Option<Arc<dyn RegistrationCodeRepository>>,
    post_repo: Option<Arc<dyn PostRepository>>,
    media_repo: Option<Arc<dyn PostMediaRepository>>,
    reaction_repo: Option<Arc<dyn ReactionRepository>>,
    comment_repo: Option<Arc<dyn CommentRepository>>,
    mention_repo: Option<Arc<dyn MentionRepository>>,
    vote_repo: Option<Arc<dyn VoteRepository>>,
    announcement_repo: Option<Arc<dyn AnnouncementRepository>>,
    report_repo: Option<Arc<dyn ReportRepository>>,
    audit_repo: Option<Arc<dyn AuditLogRepository>>,
    settings_repo: Option<Arc<dyn SiteSettingsRepository>>,
    refresh_token_store: Option<RefreshTokenStore>,
    jwt_service: Option<Arc<JwtService>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
    rate_limiter: Option<Arc<RateLimiter>>,
    action_limits: Option<ActionLimitsConfig>,
    file_store: Option<FileStore>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn redis_pool(mut self, redis_pool: SharedRedisPool) -> Self {
        self.redis_pool = Some(redis_pool);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn team_repo(mut self, repo: Arc<dyn TeamRepository>) -> Self {
        self.team_repo = Some(repo);
        self
    }

    pub fn code_repo(mut self, repo: Arc<dyn RegistrationCodeRepository>) -> Self {
        self.code_repo = Some(repo);
        self
    }

    pub fn post_repo(mut self, repo: Arc<dyn PostRepository>) -> Self {
        self.post_repo = Some(repo);
        self
    }

    pub fn media_repo(mut self, repo: Arc<dyn PostMediaRepository>) -> Self {
        self.media_repo = Some(repo);
        self
    }

    pub fn reaction_repo(mut self, repo: Arc<dyn ReactionRepository>) -> Self {
        self.reaction_repo = Some(repo);
        self
    }

    pub fn comment_repo(mut self, repo: Arc<dyn CommentRepository>) -> Self {
        self.comment_repo = Some(repo);
        self
    }

    pub fn mention_repo(mut self, repo: Arc<dyn MentionRepository>) -> Self {
        self.mention_repo = Some(repo);
        self
    }

    pub fn vote_repo(mut self, repo: Arc<dyn VoteRepository>) -> Self {
        self.vote_repo = Some(repo);
        self
    }

    pub fn announcement_repo(mut self, repo: Arc<dyn AnnouncementRepository>) -> Self {
        self.announcement_repo = Some(repo);
        self
    }

    pub fn report_repo(mut self, repo: Arc<dyn ReportRepository>) -> Self {
        self.report_repo = Some(repo);
        self
    }

    pub fn audit_repo(mut self, repo: Arc<dyn AuditLogRepository>) -> Self {
        self.audit_repo = Some(repo);
        self
    }

    pub fn settings_repo(mut self, repo: Arc<dyn SiteSettingsRepository>) -> Self {
        self.settings_repo = Some(repo);
        self
    }

    pub fn refresh_token_store(mut self, store: RefreshTokenStore) -> Self {
        self.refresh_token_store = Some(store);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    pub fn rate_limiter(mut self, limiter: Arc<RateLimiter>) -> Self {
        self.rate_limiter = Some(limiter);
        self
    }

    pub fn action_limits(mut self, limits: ActionLimitsConfig) -> Self {
        self.action_limits = Some(limits);
        self
    }

    pub fn file_store(mut self, store: FileStore) -> Self {
        self.file_store = Some(store);
        self
    }

    /// Every repository, both pools, the JWT service and the file store are
    /// required. The session store defaults to one over `redis_pool`; the
    /// limiter and id generator default to fresh instances.
    pub fn build(self) -> ServiceResult<ServiceContext> {
        fn required<T>(value: Option<T>, name: &str) -> ServiceResult<T> {
            value.ok_or_else(|| ServiceError::validation(format!("{name} is required")))
        }

        let redis_pool = required(self.redis_pool, "redis_pool")?;
        let refresh_token_store = self
            .refresh_token_store
            .unwrap_or_else(|| RefreshTokenStore::new((*redis_pool).clone()));

        Ok(ServiceContext {
            pool: required(self.pool, "pool")?,
            redis_pool,
            user_repo: required(self.user_repo, "user_repo")?,
            team_repo: required(self.team_repo, "team_repo")?,
            code_repo: required(self.code_repo, "code_repo")?,
            post_repo: required(self.post_repo, "post_repo")?,
            media_repo: required(self.media_repo, "media_repo")?,
            reaction_repo: required(self.reaction_repo, "reaction_repo")?,
            comment_repo: required(self.comment_repo, "comment_repo")?,
            mention_repo: required(self.mention_repo, "mention_repo")?,
            vote_repo: required(self.vote_repo, "vote_repo")?,
            announcement_repo: required(self.announcement_repo, "announcement_repo")?,
            report_repo: required(self.report_repo, "report_repo")?,
            audit_repo: required(self.audit_repo, "audit_repo")?,
            settings_repo: required(self.settings_repo, "settings_repo")?,
            refresh_token_store,
            jwt_service: required(self.jwt_service, "jwt_service")?,
            snowflake_generator: self.snowflake_generator.unwrap_or_default(),
            rate_limiter: self.rate_limiter.unwrap_or_default(),
            action_limits: self.action_limits.unwrap_or_default(),
            file_store: required(self.file_store, "file_store")?,
        })
    }
}
