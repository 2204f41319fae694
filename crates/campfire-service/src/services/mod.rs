//! Business logic services
//!
//! Each service borrows the shared [`ServiceContext`] for the duration of a
//! request and handles validation, authorization and orchestration of
//! repository calls.

pub mod access;
pub mod admin;
pub mod announcement;
pub mod audit;
pub mod auth;
pub mod bootstrap;
pub mod comment;
pub mod context;
pub mod error;
pub mod moderation;
pub mod post;
pub mod reaction;
pub mod settings;
pub mod team;
pub mod uploads;
pub mod user;
pub mod vote;

#[cfg(test)]
pub(crate) mod testing;

// Re-export all services for convenience
pub use admin::AdminService;
pub use announcement::AnnouncementService;
pub use audit::{AuditService, RequestMeta};
pub use auth::AuthService;
pub use bootstrap::{BootstrapReport, BootstrapService};
pub use comment::CommentService;
pub use context::{RateSubject, ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use moderation::ModerationService;
pub use post::PostService;
pub use reaction::ReactionService;
pub use settings::SettingsService;
pub use team::TeamService;
pub use uploads::{FileStore, UploadedFile};
pub use user::UserService;
pub use vote::{compute_leaderboard, VoteService};
