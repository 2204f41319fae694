//! Database models - SQLx-compatible structs for PostgreSQL tables

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

pub use announcement::AnnouncementModel;
pub use audit_log::AuditLogModel;
pub use comment::{CommentCountModel, CommentModel};
pub use mention::MentionModel;
pub use post::{PostMediaModel, PostModel};
pub use reaction::{PostReactionCountModel, ReactionCountModel, ReactionModel};
pub use registration_code::RegistrationCodeModel;
pub use report::ReportModel;
pub use site_settings::SiteSettingsModel;
pub use team::TeamModel;
pub use user::UserModel;
pub use vote::VoteModel;
