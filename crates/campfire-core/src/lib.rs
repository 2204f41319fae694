//! # campfire-core
//!
//! Domain layer for the Campfire event dashboard: entities, value objects,
//! repository traits and the `@mention` parser.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod mentions;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Announcement, AnnouncementType, AuditLog, Comment, MediaType, Mention, MentionSource, Post,
    PostMedia, Reaction, ReactionCount, ReactionType, RegistrationCode, Report, ReportReason,
    ReportStatus, ReportTarget, SiteSettings, SocialLinks, Team, Theme, User, Vote, VoteScores,
};
pub use error::DomainError;
pub use mentions::{escape_html, extract_mentions, highlight_mentions, render_content_html, MentionParser};
pub use traits::{
    AnnouncementRepository, AuditLogQuery, AuditLogRepository, CommentRepository,
    MentionRepository, PostMediaRepository, PostQuery, PostRepository, ReactionRepository,
    RegistrationCodeRepository, RepoResult, ReportRepository, SiteSettingsRepository,
    TeamRepository, UserRepository, VoteRepository,
};
pub use value_objects::{Roles, Snowflake, SnowflakeGenerator, SnowflakeParseError};
