//! Rate limiting and request logging middleware.

use crate::error::ApiError;
use axum::{
    extract::{ConnectInfo, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use governor::{
    clock::DefaultClock, state::keyed::DefaultKeyedStateStore, Quota, RateLimiter,
};
use std::{net::SocketAddr, num::NonZeroU32, sync::Arc, time::Duration};
use tracing::{debug, info, warn};

/// Per-client-address rate limiter.
pub type ClientLimiter = RateLimiter<String, DefaultKeyedStateStore<String>, DefaultClock>;

/// Rate limiter state shared across requests.
#[derive(Clone)]
pub struct RateLimitState {
    /// Hourly quota, keyed by client address
    pub per_client: Arc<ClientLimiter>,
}

impl RateLimitState {
    /// Create a rate limit state allowing `per_hour` requests per client
    /// address per hour.
    pub fn new(per_hour: u32) -> Self {
        let quota =
            Quota::per_hour(NonZeroU32::new(per_hour).unwrap_or(NonZeroU32::new(5).unwrap()));

        Self {
            per_client: Arc::new(RateLimiter::keyed(quota)),
        }
    }

    /// Create a permissive rate limiter for testing.
    pub fn permissive() -> Self {
        Self::new(100_000)
    }

    /// Drop limiter entries whose quota has fully replenished.
    ///
    /// The keyed state map gains one entry per distinct client address, and
    /// the address comes from a client-controlled header, so without
    /// eviction the map grows without bound.
    pub fn evict_stale(&self) {
        self.per_client.retain_recent();
        self.per_client.shrink_to_fit();
    }
}

/// Spawn a background task that evicts stale limiter entries every `period`.
pub fn spawn_eviction_task(
    rate_limit: RateLimitState,
    period: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            rate_limit.evict_stale();
            debug!(
                tracked_clients = rate_limit.per_client.len(),
                "rate limiter state evicted"
            );
        }
    })
}

/// Client address as reported by the reverse proxy, if any.
///
/// The service runs behind a proxy in production, so `X-Forwarded-For`
/// takes precedence; the first entry is the original client.
pub fn forwarded_client_addr(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Rate limiting middleware.
///
/// Admits up to the configured hourly quota per client address and returns
/// 429 Too Many Requests past it. This runs before the handler, so a
/// rejected request never reaches the registration pipeline.
pub async fn rate_limit_middleware(
    State(rate_limit): State<RateLimitState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let client = forwarded_client_addr(request.headers())
        .or_else(|| {
            request
                .extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|info| info.0.ip().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string());

    if rate_limit.per_client.check_key(&client).is_err() {
        warn!(%client, "hourly rate limit exceeded");
        return Err(ApiError::RateLimitExceeded);
    }

    debug!(%client, "rate limit check passed");
    Ok(next.run(request).await)
}

/// Logging middleware for requests.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = std::time::Instant::now();

    info!(%method, %uri, "incoming request");

    let response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status();

    if status.is_server_error() {
        warn!(%method, %uri, %status, ?duration, "request failed");
    } else {
        debug!(%method, %uri, %status, ?duration, "request completed");
    }

    response
}
