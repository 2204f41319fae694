//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, Router};
use campfire_cache::{RedisPool, RefreshTokenStore};
use campfire_common::{AppConfig, AppError, JwtService};
use campfire_core::SnowflakeGenerator;
use campfire_db::{
    create_pool, run_migrations, PgAnnouncementRepository, PgAuditLogRepository,
    PgCommentRepository, PgMentionRepository, PgPool, PgPostMediaRepository, PgPostRepository,
    PgReactionRepository, PgRegistrationCodeRepository, PgReportRepository,
    PgSiteSettingsRepository, PgTeamRepository, PgUserRepository, PgVoteRepository,
};
use campfire_service::{BootstrapService, FileStore, ServiceContext, ServiceContextBuilder};
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tracing::info;

use crate::middleware::{apply_middleware, apply_rate_limit};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// API routes plus static uploads, with the upload size as body limit
fn api_router(config: &AppConfig) -> Router<AppState> {
    create_router()
        .nest_service("/uploads", ServeDir::new(&config.storage.upload_dir))
        .layer(DefaultBodyLimit::max(config.storage.max_upload_bytes))
}

/// Build the application without the per-IP throttle
pub fn create_app(state: AppState) -> Router {
    let config = state.config();
    let router = api_router(config).merge(health_routes());
    let router = apply_middleware(router, &config.cors, config.app.env.is_production());
    router.with_state(state)
}

/// Build the application with every layer, health checks exempt from throttling
pub fn create_app_with_rate_limit(state: AppState) -> Result<Router, AppError> {
    let config = state.config();
    let api = apply_rate_limit(
        api_router(config),
        &config.rate_limit,
        config.server.trust_proxy_headers,
    )?;
    let router = apply_middleware(
        api.merge(health_routes()),
        &config.cors,
        config.app.env.is_production(),
    );
    Ok(router.with_state(state))
}

/// Wire repositories, sessions and storage over existing pools
pub fn build_service_context(
    config: &AppConfig,
    pool: PgPool,
    redis_pool: RedisPool,
) -> Result<ServiceContext, AppError> {
    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
        config.jwt.refresh_token_expiry,
    ));
    let snowflake_generator = Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id));
    let refresh_ttl = u64::try_from(config.jwt.refresh_token_expiry).unwrap_or_default();
    let sessions = RefreshTokenStore::with_ttl(redis_pool.clone(), refresh_ttl);
    let file_store = FileStore::new(
        config.storage.upload_dir.clone(),
        config.storage.max_upload_bytes,
    );

    ServiceContextBuilder::new()
        .pool(pool.clone())
        .redis_pool(Arc::new(redis_pool))
        .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
        .team_repo(Arc::new(PgTeamRepository::new(pool.clone())))
        .code_repo(Arc::new(PgRegistrationCodeRepository::new(pool.clone())))
        .post_repo(Arc::new(PgPostRepository::new(pool.clone())))
        .media_repo(Arc::new(PgPostMediaRepository::new(pool.clone())))
        .reaction_repo(Arc::new(PgReactionRepository::new(pool.clone())))
        .comment_repo(Arc::new(PgCommentRepository::new(pool.clone())))
        .mention_repo(Arc::new(PgMentionRepository::new(pool.clone())))
        .vote_repo(Arc::new(PgVoteRepository::new(pool.clone())))
        .announcement_repo(Arc::new(PgAnnouncementRepository::new(pool.clone())))
        .report_repo(Arc::new(PgReportRepository::new(pool.clone())))
        .audit_repo(Arc::new(PgAuditLogRepository::new(pool.clone())))
        .settings_repo(Arc::new(PgSiteSettingsRepository::new(pool)))
        .refresh_token_store(sessions)
        .jwt_service(jwt_service)
        .snowflake_generator(snowflake_generator)
        .action_limits(config.rate_limit.actions.clone())
        .file_store(file_store)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&config.database)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    if config.database.run_migrations {
        run_migrations(&pool, &config.database.migrations_path)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
    }

    info!("Connecting to Redis...");
    let redis_pool =
        RedisPool::from_config(&config.redis).map_err(|e| AppError::Cache(e.to_string()))?;

    let service_context = build_service_context(&config, pool, redis_pool)?;
    Ok(AppState::new(service_context, config))
}

/// Seed the admin account, registration codes and branding on first start
pub async fn bootstrap(state: &AppState) -> Result<(), AppError> {
    let report = BootstrapService::new(state.service_context())
        .run(&state.config().bootstrap)
        .await?;

    info!(
        admin_created = report.admin_created,
        codes_generated = report.codes_generated,
        "Bootstrap complete"
    );
    Ok(())
}

/// Run the HTTP server until Ctrl-C
pub async fn run_server(app: Router, addr: &str) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.server.address();

    let state = create_app_state(config).await?;
    bootstrap(&state).await?;

    let app = create_app_with_rate_limit(state)?;

    run_server(app, &addr).await
}
