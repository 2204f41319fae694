//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in
//! campfire-core, one per aggregate.

mod announcement;
mod audit_log;
mod comment;
mod error;
mod mention;
mod post;
mod post_media;
mod reaction;
mod registration_code;
mod report;
mod site_settings;
mod team;
mod user;
mod vote;

pub use announcement::PgAnnouncementRepository;
pub use audit_log::PgAuditLogRepository;
pub use comment::PgCommentRepository;
pub use mention::PgMentionRepository;
pub use post::PgPostRepository;
pub use post_media::PgPostMediaRepository;
pub use reaction::PgReactionRepository;
pub use registration_code::PgRegistrationCodeRepository;
pub use report::PgReportRepository;
pub use site_settings::PgSiteSettingsRepository;
pub use team::PgTeamRepository;
pub use user::PgUserRepository;
pub use vote::PgVoteRepository;
