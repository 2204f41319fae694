//! # campfire-service
//!
//! Application layer: one service per feature area, request/response DTOs,
//! and the `ServiceContext` that wires repositories, sessions, the rate
//! limiter and upload storage together.

pub mod dto;
pub mod services;

pub use services::{
    AdminService, AnnouncementService, AuditService, AuthService, BootstrapReport, BootstrapService,
    CommentService, FileStore, ModerationService, PostService, RateSubject, ReactionService,
    RequestMeta, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult,
    SettingsService, TeamService, UploadedFile, UserService, VoteService,
};
