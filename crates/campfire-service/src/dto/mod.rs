//! Data transfer objects for API requests and responses
//!
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    AssignTeamRequest, AuditLogListQuery, BanUserRequest, CastVoteRequest,
    CreateAnnouncementRequest, CreateCommentRequest, CreatePostRequest, CreateReportRequest,
    CreateUserRequest, GenerateCodesRequest, LoginRequest, LogoutRequest, RefreshTokenRequest,
    RegisterRequest, ReportListQuery, ResolveAction, ResolveReportRequest, SearchUsersQuery,
    SetRolesRequest, TeamNameRequest, TimelineQuery, ToggleReactionRequest,
    UpdateAnnouncementRequest, UpdateProfileRequest, UpdateSettingsRequest, UpdateThemeRequest,
    CODE_BATCH_SIZES,
};

pub use responses::{
    AdminUserResponse, AnnouncementResponse, AuditLogResponse, AuthResponse, CommentResponse,
    CurrentUserResponse, DashboardResponse, HealthChecks, HealthResponse, JudgingTeamResponse,
    LeaderboardEntry, MediaResponse, MentionResponse, PaginatedResponse, PaginationMeta,
    PostResponse, ReactionSummary, ReadinessResponse, RegistrationCodeResponse, ReportResponse,
    SiteSettingsResponse, SocialLinksResponse, TeamDetailResponse, TeamResponse,
    UserProfileResponse, UserSummary, VoteResponse,
};
