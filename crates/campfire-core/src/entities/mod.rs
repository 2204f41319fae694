//! Domain entities - core business objects

mod announcement;
mod audit_log;
mod comment;
mod mention;
mod post;
mod reaction;
mod registration_code;
mod report;
mod site_settings;
mod team;
mod user;
mod vote;

pub use announcement::{Announcement, AnnouncementType, MAX_TITLE_LENGTH};
pub use audit_log::{AuditLog, MAX_ACTION_TYPE_LENGTH, MAX_IP_LENGTH};
pub use comment::{Comment, MAX_COMMENT_LENGTH};
pub use mention::{Mention, MentionSource};
pub use post::{MediaType, Post, PostMedia, MAX_DESCRIPTION_LENGTH};
pub use reaction::{Reaction, ReactionCount, ReactionType};
pub use registration_code::{RegistrationCode, CODE_LENGTH};
pub use report::{Report, ReportReason, ReportStatus, ReportTarget, MAX_DETAILS_LENGTH};
pub use site_settings::{
    SiteSettings, DEFAULT_FONT_FAMILY, DEFAULT_PRIMARY_COLOR, DEFAULT_SECONDARY_COLOR,
    DEFAULT_SITE_NAME,
};
pub use team::Team;
pub use user::{SocialLinks, Theme, User};
pub use vote::{Vote, VoteScores, MAX_SCORE, MIN_SCORE};
