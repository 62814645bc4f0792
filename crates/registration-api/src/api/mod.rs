//! HTTP API for the registration service.

mod extract;
mod handlers;
mod middleware;
mod types;

pub use extract::FormOrJson;
pub use handlers::*;
pub use middleware::{
    forwarded_client_addr, logging_middleware, rate_limit_middleware, spawn_eviction_task,
    RateLimitState,
};
pub use types::*;

use crate::config::Config;
use crate::store::RegistrationStore;
use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use mailgun_client::MailgunClient;
use recaptcha_client::RecaptchaClient;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared application state.
///
/// The store and both outbound clients are process-wide singletons created
/// once at startup, never reconstructed per request.
#[derive(Clone)]
pub struct AppState {
    /// Registration store
    pub store: Arc<RegistrationStore>,
    /// Human-verification client
    pub recaptcha: Arc<RecaptchaClient>,
    /// Mail relay client
    pub mailer: Arc<MailgunClient>,
    /// Service configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Create new application state.
    pub fn new(
        store: RegistrationStore,
        recaptcha: RecaptchaClient,
        mailer: MailgunClient,
        config: Config,
    ) -> Self {
        Self {
            store: Arc::new(store),
            recaptcha: Arc::new(recaptcha),
            mailer: Arc::new(mailer),
            config: Arc::new(config),
        }
    }
}

/// Create the API router with rate limiting from configuration.
pub fn create_router(state: AppState) -> Router {
    let per_hour = state.config.rate_limit.per_client_per_hour;
    create_router_with_rate_limit(state, RateLimitState::new(per_hour))
}

/// Create the API router with custom rate limiting.
///
/// The public surface lives under the configured version prefix and is
/// rate-limited; the health check sits outside both.
pub fn create_router_with_rate_limit(state: AppState, rate_limit: RateLimitState) -> Router {
    let versioned = Router::new()
        .route("/", get(handlers::describe))
        .route("/register", post(handlers::register))
        .layer(axum_middleware::from_fn_with_state(
            rate_limit.clone(),
            rate_limit_middleware,
        ));

    Router::new()
        // Health check (no rate limiting)
        .route("/health", get(handlers::health))
        .nest(&format!("/{}", state.config.api.version), versioned)
        .layer(axum_middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
