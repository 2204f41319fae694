//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::handlers::{
    admin, announcements, auth, comments, health, judging, posts, reports, settings, teams, users,
};
use crate::response::route_not_found;
use crate::state::AppState;

/// Create the main API router with all routes (health and uploads are mounted separately)
pub fn create_router() -> Router<AppState> {
    Router::new()
        .nest("/api/v1", api_v1_routes())
        .fallback(route_not_found)
}

/// Health check routes (kept outside the global throttle)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(team_routes())
        .merge(post_routes())
        .merge(judging_routes())
        .merge(public_routes())
        .nest("/admin", admin_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh_token))
        .route("/auth/logout", post(auth::logout))
}

/// User routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users/@me",
            get(users::get_current_user).patch(users::update_current_user),
        )
        .route("/users/@me/theme", put(users::set_theme))
        .route("/users/@me/avatar", post(users::upload_avatar))
        .route("/users/@me/mentions", get(users::get_mentions))
        .route("/users/search", get(users::search_users))
        .route("/users/:user_id", get(users::get_user))
        .route("/users/:user_id/posts", get(users::get_user_posts))
}

/// Team directory
fn team_routes() -> Router<AppState> {
    Router::new()
        .route("/teams", get(teams::list_teams))
        .route("/teams/:team_id", get(teams::get_team))
}

/// Timelines, posts, reactions, comments and reports
fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/timeline/team", get(posts::team_timeline))
        .route("/timeline/global", get(posts::global_timeline))
        .route("/posts", post(posts::create_post))
        .route(
            "/posts/:post_id",
            get(posts::get_post).delete(posts::delete_post),
        )
        .route("/posts/:post_id/media", post(posts::upload_media))
        .route(
            "/posts/:post_id/reactions",
            get(posts::get_reactions).post(posts::toggle_reaction),
        )
        .route(
            "/posts/:post_id/comments",
            get(comments::list_comments).post(comments::create_comment),
        )
        .route("/comments/:comment_id", delete(comments::delete_comment))
        .route(
            "/reports/:content_type/:content_id",
            post(reports::create_report),
        )
}

/// Judge routes
fn judging_routes() -> Router<AppState> {
    Router::new()
        .route("/judging/teams", get(judging::list_teams))
        .route("/judging/teams/:team_id/vote", put(judging::cast_vote))
        .route("/judging/votes", get(judging::my_votes))
}

/// Announcements and branding
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/announcements", get(announcements::list_active))
        .route("/settings", get(settings::get_settings))
}

/// Admin console, mounted at /admin
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(admin::dashboard))
        // Users
        .route("/users", get(admin::list_users).post(admin::create_user))
        .route("/users/:user_id", delete(admin::delete_user))
        .route("/users/:user_id/team", put(admin::assign_team))
        .route("/users/:user_id/roles", put(admin::set_roles))
        .route(
            "/users/:user_id/ban",
            post(admin::ban_user).delete(admin::unban_user),
        )
        // Teams
        .route("/teams", post(admin::create_team))
        .route(
            "/teams/:team_id",
            patch(admin::rename_team).delete(admin::delete_team),
        )
        .route("/teams/:team_id/avatar", post(admin::upload_team_avatar))
        // Registration codes
        .route("/codes", get(admin::list_codes).post(admin::generate_codes))
        .route("/codes/:code_id/reset", post(admin::reset_code))
        // Announcements
        .route(
            "/announcements",
            get(admin::list_announcements).post(admin::create_announcement),
        )
        .route(
            "/announcements/:announcement_id",
            patch(admin::update_announcement).delete(admin::delete_announcement),
        )
        // Moderation
        .route("/reports", get(admin::list_reports))
        .route("/reports/:report_id/resolve", post(admin::resolve_report))
        .route("/posts/:post_id/hide", post(admin::hide_post))
        .route("/posts/:post_id/unhide", post(admin::unhide_post))
        // Results, audit and branding
        .route("/leaderboard", get(admin::leaderboard))
        .route("/audit-logs", get(admin::audit_logs))
        .route("/settings", patch(admin::update_settings))
        .route("/settings/logo", post(admin::upload_logo))
        .route("/settings/favicon", post(admin::upload_favicon))
}
