//! Request metadata for audit entries and per-IP limits
//!
//! The client address is the socket peer. Forwarding headers are only read
//! when `TRUST_PROXY_HEADERS` is set, since any client can send them.

use std::net::{IpAddr, SocketAddr};

use axum::{
    async_trait,
    extract::{ConnectInfo, FromRef, FromRequestParts, MatchedPath, OriginalUri},
    http::{header, request::Parts, HeaderMap},
};
use campfire_service::RequestMeta;

use crate::response::ApiError;
use crate::state::AppState;

/// Client address, route template and user agent of the current request
#[derive(Debug, Clone)]
pub struct ClientMeta(pub RequestMeta);

#[async_trait]
impl<S> FromRequestParts<S> for ClientMeta
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let trust_proxy = AppState::from_ref(state).config().server.trust_proxy_headers;
        Ok(ClientMeta(request_meta(parts, trust_proxy)))
    }
}

fn request_meta(parts: &Parts, trust_proxy: bool) -> RequestMeta {
    let peer = parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());

    let forwarded = if trust_proxy {
        forwarded_ip(&parts.headers)
    } else {
        None
    };

    // Nested routers see a stripped uri; `OriginalUri` keeps the full path
    let url = parts
        .extensions
        .get::<OriginalUri>()
        .map_or_else(|| parts.uri.path().to_string(), |OriginalUri(uri)| uri.path().to_string());

    let endpoint = parts
        .extensions
        .get::<MatchedPath>()
        .map_or_else(|| url.clone(), |path| path.as_str().to_string());

    let user_agent = parts
        .headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    RequestMeta {
        ip: forwarded.or(peer).map(|ip| ip.to_string()),
        method: parts.method.to_string(),
        endpoint,
        url,
        user_agent,
    }
}

/// First hop of `X-Forwarded-For`, then `X-Real-IP`; unparseable values are ignored
fn forwarded_ip(headers: &HeaderMap) -> Option<IpAddr> {
    let parse = |name: &str, first_hop: bool| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| if first_hop { v.split(',').next() } else { Some(v) })
            .and_then(|v| v.trim().parse::<IpAddr>().ok())
    };

    parse("x-forwarded-for", true).or_else(|| parse("x-real-ip", false))
}
