//! Middleware stack for the API server
//!
//! Provides logging, request ID generation, CORS, compression, and the
//! global per-IP throttle.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{header, HeaderValue, Method, Request, StatusCode},
    Router,
};
use campfire_common::{AppError, CorsConfig, RateLimitConfig};
use tower::ServiceBuilder;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

/// Header name for request ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Apply the shared middleware stack
///
/// Request -> RequestID -> Trace -> CORS -> Timeout -> Compression -> Handler
pub fn apply_middleware(
    router: Router<AppState>,
    cors_config: &CorsConfig,
    is_production: bool,
) -> Router<AppState> {
    router.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(
                header::HeaderName::from_static(REQUEST_ID_HEADER),
                MakeRequestUuid,
            ))
            .layer(PropagateRequestIdLayer::new(header::HeaderName::from_static(
                REQUEST_ID_HEADER,
            )))
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(|request: &Request<Body>| {
                        let request_id = request
                            .headers()
                            .get(REQUEST_ID_HEADER)
                            .and_then(|v| v.to_str().ok())
                            .unwrap_or("unknown");

                        tracing::info_span!(
                            "http_request",
                            method = %request.method(),
                            uri = %request.uri(),
                            request_id = %request_id,
                        )
                    })
                    .on_request(DefaultOnRequest::new().level(Level::INFO))
                    .on_response(DefaultOnResponse::new().level(Level::INFO)),
            )
            .layer(create_cors_layer(cors_config, is_production))
            // Returns 503 Service Unavailable on timeout
            .layer(TimeoutLayer::with_status_code(
                StatusCode::SERVICE_UNAVAILABLE,
                REQUEST_TIMEOUT,
            ))
            .layer(CompressionLayer::new()),
    )
}

/// Throttle each client address with a token bucket
///
/// Keys on the socket peer, so the server must be run with connect info.
/// Behind a trusted proxy the key comes from `X-Forwarded-For`/`X-Real-IP`/
/// `Forwarded` instead.
pub fn apply_rate_limit(
    router: Router<AppState>,
    config: &RateLimitConfig,
    trust_proxy_headers: bool,
) -> Result<Router<AppState>, AppError> {
    let replenish_ms = u64::from(1000 / config.requests_per_second.max(1)).max(1);
    let invalid = || AppError::Config("Invalid rate limit configuration".to_string());

    let mut builder = GovernorConfigBuilder::default();
    builder
        .per_millisecond(replenish_ms)
        .burst_size(config.burst.max(1));

    let router = if trust_proxy_headers {
        let governor_conf = builder
            .key_extractor(SmartIpKeyExtractor)
            .finish()
            .ok_or_else(invalid)?;
        router.layer(GovernorLayer {
            config: Arc::new(governor_conf),
        })
    } else {
        let governor_conf = builder.finish().ok_or_else(invalid)?;
        router.layer(GovernorLayer {
            config: Arc::new(governor_conf),
        })
    };

    tracing::info!(
        requests_per_second = config.requests_per_second,
        burst = config.burst,
        trust_proxy_headers,
        "Per-IP throttle enabled"
    );

    Ok(router)
}

/// Create CORS layer from configuration
fn create_cors_layer(config: &CorsConfig, is_production: bool) -> CorsLayer {
    let base_layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::HeaderName::from_static(REQUEST_ID_HEADER),
        ])
        .expose_headers([
            header::HeaderName::from_static(REQUEST_ID_HEADER),
            header::RETRY_AFTER,
        ]);

    // Development without configured origins allows any origin
    if !is_production && config.allowed_origins.is_empty() {
        tracing::warn!(
            "CORS: Allowing any origin (development mode). \
             Configure CORS_ORIGINS for production."
        );
        return base_layer.allow_origin(Any);
    }

    if config.allowed_origins.is_empty() {
        tracing::warn!(
            "CORS: No allowed origins configured in production mode. \
             Requests from browsers will be blocked."
        );
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| {
            origin.parse::<HeaderValue>().ok().or_else(|| {
                tracing::warn!(origin = %origin, "Invalid CORS origin");
                None
            })
        })
        .collect();

    tracing::info!(count = origins.len(), "CORS: Allowing configured origins");
    base_layer.allow_origin(AllowOrigin::list(origins))
}
