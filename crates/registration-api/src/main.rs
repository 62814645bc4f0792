//! Event Registration Service - Entry point.

use mailgun_client::MailgunClient;
use recaptcha_client::RecaptchaClient;
use registration_api::{
    api::{create_router_with_rate_limit, spawn_eviction_task, AppState, RateLimitState},
    config::Config,
    store::{RegistrationStore, Registry, StoreBackend},
};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Timeout applied to outbound calls to the verification service and the
/// mail relay.
const OUTBOUND_TIMEOUT: Duration = Duration::from_secs(30);

/// How often stale rate-limiter entries are evicted.
const LIMITER_EVICTION_PERIOD: Duration = Duration::from_secs(600);

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log.level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting event registration service");

    // Initialize storage
    let backend = if config.store.persist {
        StoreBackend::file(config.store.path.clone())
    } else {
        info!("Persistence disabled, using in-memory storage");
        StoreBackend::memory()
    };

    // Load existing registrations
    let registry = match backend.load().await {
        Ok(r) => r,
        Err(e) => {
            error!("Failed to load registry: {}", e);
            info!("Starting with empty registry");
            Registry::new()
        }
    };
    let store = RegistrationStore::new(registry, backend);

    // Initialize outbound clients
    let recaptcha = match RecaptchaClient::new(
        &config.recaptcha.site_key,
        &config.recaptcha.secret_key,
        &config.recaptcha.verify_url,
        OUTBOUND_TIMEOUT,
    ) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to create verification client: {}", e);
            std::process::exit(1);
        }
    };

    let mailer = match MailgunClient::new(
        &config.mailgun.api_key,
        &config.mailgun.domain,
        &config.mailgun.api_base,
        OUTBOUND_TIMEOUT,
    ) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to create mail relay client: {}", e);
            std::process::exit(1);
        }
    };

    // Create application state
    let addr = SocketAddr::new(
        config
            .server
            .listen_addr
            .parse()
            .unwrap_or([0, 0, 0, 0].into()),
        config.server.port,
    );
    let rate_limit = RateLimitState::new(config.rate_limit.per_client_per_hour);
    spawn_eviction_task(rate_limit.clone(), LIMITER_EVICTION_PERIOD);
    let state = AppState::new(store, recaptcha, mailer, config);

    // Create router with rate limiting
    let app = create_router_with_rate_limit(state, rate_limit);

    info!("Listening on {}", addr);

    let listener = match TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    // Run server; ConnectInfo feeds the rate limiter's fallback client key
    if let Err(e) = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
