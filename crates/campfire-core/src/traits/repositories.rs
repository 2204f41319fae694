//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{
    Announcement, AuditLog, Comment, Mention, Post, PostMedia, Reaction, ReactionType,
    RegistrationCode, Report, ReportStatus, ReportTarget, SiteSettings, Team, User, Vote,
};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Find every user in `ids`; unknown ids are skipped
    async fn find_by_ids(&self, ids: &[Snowflake]) -> RepoResult<Vec<User>>;

    /// Find user by exact username
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;

    /// Find all users whose username is in the list (unknown names are skipped)
    async fn find_by_usernames(&self, usernames: &[String]) -> RepoResult<Vec<User>>;

    /// Case-insensitive username prefix search, ordered by username
    async fn search_by_prefix(&self, prefix: &str, limit: i64) -> RepoResult<Vec<User>>;

    /// List all users ordered by creation
    async fn list_all(&self) -> RepoResult<Vec<User>>;

    /// List members of a team
    async fn find_by_team(&self, team_id: Snowflake) -> RepoResult<Vec<User>>;

    /// Create a new user
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Persist every mutable column of the user
    async fn update(&self, user: &User) -> RepoResult<()>;

    /// Hard delete (cascades to the user's content)
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>>;

    /// Check if username is already taken
    async fn username_exists(&self, username: &str) -> RepoResult<bool>;

    async fn count(&self) -> RepoResult<i64>;
}

// ============================================================================
// Team Repository
// ============================================================================

#[async_trait]
pub trait TeamRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Team>>;

    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Team>>;

    /// All teams ordered by name
    async fn list_all(&self) -> RepoResult<Vec<Team>>;

    async fn create(&self, team: &Team) -> RepoResult<()>;

    async fn update(&self, team: &Team) -> RepoResult<()>;

    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    async fn count(&self) -> RepoResult<i64>;
}

// ============================================================================
// Registration Code Repository
// ============================================================================

#[async_trait]
pub trait RegistrationCodeRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<RegistrationCode>>;

    async fn find_by_code(&self, code: &str) -> RepoResult<Option<RegistrationCode>>;

    async fn code_exists(&self, code: &str) -> RepoResult<bool>;

    /// All codes, newest first
    async fn list_all(&self) -> RepoResult<Vec<RegistrationCode>>;

    async fn create(&self, code: &RegistrationCode) -> RepoResult<()>;

    /// Atomically claim an unused code. Fails with `RegistrationCodeUsed` if
    /// another registration got there first.
    async fn mark_used(&self, id: Snowflake, user_id: Snowflake) -> RepoResult<()>;

    /// Make a code usable again
    async fn reset(&self, id: Snowflake) -> RepoResult<()>;

    async fn count(&self) -> RepoResult<i64>;

    async fn count_unused(&self) -> RepoResult<i64>;
}

// ============================================================================
// Post Repository
// ============================================================================

/// Cursor pagination for timelines
#[derive(Debug, Clone)]
pub struct PostQuery {
    /// Only posts with an id lower than this
    pub before: Option<Snowflake>,
    pub limit: i64,
    /// Admins see hidden posts
    pub include_hidden: bool,
}

impl Default for PostQuery {
    fn default() -> Self {
        Self {
            before: None,
            limit: 50,
            include_hidden: false,
        }
    }
}

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find post by ID, including soft-deleted ones
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Post>>;

    async fn create(&self, post: &Post) -> RepoResult<()>;

    /// Persist visibility and deletion state
    async fn update(&self, post: &Post) -> RepoResult<()>;

    /// Non-deleted posts of a team, newest first
    async fn find_by_team(&self, team_id: Snowflake, query: PostQuery) -> RepoResult<Vec<Post>>;

    /// Non-deleted global posts, newest first
    async fn find_global(&self, query: PostQuery) -> RepoResult<Vec<Post>>;

    /// Non-deleted posts by one author, newest first
    async fn find_by_user(&self, user_id: Snowflake, query: PostQuery) -> RepoResult<Vec<Post>>;

    /// Count of non-deleted posts
    async fn count(&self) -> RepoResult<i64>;
}

// ============================================================================
// Post Media Repository
// ============================================================================

#[async_trait]
pub trait PostMediaRepository: Send + Sync {
    async fn create(&self, media: &PostMedia) -> RepoResult<()>;

    /// Media for a post ordered by display_order
    async fn find_by_post(&self, post_id: Snowflake) -> RepoResult<Vec<PostMedia>>;

    /// Media for many posts at once, ordered by post then display_order
    async fn find_by_posts(&self, post_ids: &[Snowflake]) -> RepoResult<Vec<PostMedia>>;

    /// Highest display_order on a post, if it has media
    async fn max_display_order(&self, post_id: Snowflake) -> RepoResult<Option<i32>>;
}

// ============================================================================
// Reaction Repository
// ============================================================================

#[async_trait]
pub trait ReactionRepository: Send + Sync {
    async fn find(
        &self,
        post_id: Snowflake,
        user_id: Snowflake,
        reaction_type: ReactionType,
    ) -> RepoResult<Option<Reaction>>;

    async fn create(&self, reaction: &Reaction) -> RepoResult<()>;

    async fn delete(
        &self,
        post_id: Snowflake,
        user_id: Snowflake,
        reaction_type: ReactionType,
    ) -> RepoResult<()>;

    /// Count reactions per type for a post
    async fn count_by_type(&self, post_id: Snowflake) -> RepoResult<Vec<(ReactionType, i64)>>;

    /// Reaction types the user has placed on a post
    async fn find_types_by_user(
        &self,
        post_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Vec<ReactionType>>;

    /// Count reactions per post and type for a batch of posts
    async fn count_by_posts(
        &self,
        post_ids: &[Snowflake],
    ) -> RepoResult<Vec<(Snowflake, ReactionType, i64)>>;

    /// `(post, type)` pairs the user has placed on any of the posts
    async fn find_types_by_user_on_posts(
        &self,
        post_ids: &[Snowflake],
        user_id: Snowflake,
    ) -> RepoResult<Vec<(Snowflake, ReactionType)>>;
}

// ============================================================================
// Comment Repository
// ============================================================================

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>>;

    /// Non-deleted comments on a post, oldest first
    async fn find_by_post(&self, post_id: Snowflake) -> RepoResult<Vec<Comment>>;

    async fn create(&self, comment: &Comment) -> RepoResult<()>;

    /// Soft delete
    async fn mark_deleted(&self, id: Snowflake) -> RepoResult<()>;

    /// Non-deleted comment counts for many posts
    async fn count_by_posts(&self, post_ids: &[Snowflake]) -> RepoResult<Vec<(Snowflake, i64)>>;
}

// ============================================================================
// Mention Repository
// ============================================================================

#[async_trait]
pub trait MentionRepository: Send + Sync {
    /// Insert mentions in one statement
    async fn create_many(&self, mentions: &[Mention]) -> RepoResult<()>;

    /// Mentions received by a user, newest first
    async fn find_by_mentioned(&self, user_id: Snowflake, limit: i64) -> RepoResult<Vec<Mention>>;
}

// ============================================================================
// Vote Repository
// ============================================================================

#[async_trait]
pub trait VoteRepository: Send + Sync {
    async fn find(&self, judge_id: Snowflake, team_id: Snowflake) -> RepoResult<Option<Vote>>;

    /// Insert or replace the judge's vote for the team, returning the stored row
    async fn upsert(&self, vote: &Vote) -> RepoResult<Vote>;

    async fn find_by_judge(&self, judge_id: Snowflake) -> RepoResult<Vec<Vote>>;

    async fn list_all(&self) -> RepoResult<Vec<Vote>>;
}

// ============================================================================
// Announcement Repository
// ============================================================================

#[async_trait]
pub trait AnnouncementRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Announcement>>;

    async fn create(&self, announcement: &Announcement) -> RepoResult<()>;

    async fn update(&self, announcement: &Announcement) -> RepoResult<()>;

    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Unexpired announcements, pinned first then newest
    async fn find_active(&self, now: DateTime<Utc>) -> RepoResult<Vec<Announcement>>;

    /// Everything, pinned first then newest
    async fn list_all(&self) -> RepoResult<Vec<Announcement>>;
}

// ============================================================================
// Report Repository
// ============================================================================

#[async_trait]
pub trait ReportRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Report>>;

    async fn create(&self, report: &Report) -> RepoResult<()>;

    /// Persist status and resolution fields
    async fn update(&self, report: &Report) -> RepoResult<()>;

    /// Reports newest first, optionally filtered by status
    async fn list(&self, status: Option<ReportStatus>) -> RepoResult<Vec<Report>>;

    /// Whether the reporter already has a pending report on the target
    async fn has_pending(&self, reporter_id: Snowflake, target: ReportTarget) -> RepoResult<bool>;

    async fn count_pending(&self) -> RepoResult<i64>;
}

// ============================================================================
// Audit Log Repository
// ============================================================================

/// Filters for browsing the audit log
#[derive(Debug, Clone)]
pub struct AuditLogQuery {
    pub action_type: Option<String>,
    pub user_id: Option<Snowflake>,
    pub before: Option<Snowflake>,
    pub limit: i64,
}

impl Default for AuditLogQuery {
    fn default() -> Self {
        Self {
            action_type: None,
            user_id: None,
            before: None,
            limit: 50,
        }
    }
}

#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    async fn append(&self, entry: &AuditLog) -> RepoResult<()>;

    /// Entries newest first
    async fn list(&self, query: AuditLogQuery) -> RepoResult<Vec<AuditLog>>;
}

// ============================================================================
// Site Settings Repository
// ============================================================================

#[async_trait]
pub trait SiteSettingsRepository: Send + Sync {
    /// The singleton row, if it has been created
    async fn get(&self) -> RepoResult<Option<SiteSettings>>;

    /// Insert or overwrite the singleton row
    async fn save(&self, settings: &SiteSettings) -> RepoResult<()>;
}
