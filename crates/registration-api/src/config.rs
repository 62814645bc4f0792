//! Configuration for the registration service.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Service configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// API surface configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Human-verification challenge configuration
    #[serde(default)]
    pub recaptcha: RecaptchaConfig,

    /// Registration store configuration
    #[serde(default)]
    pub store: StoreConfig,

    /// Mail relay configuration
    #[serde(default)]
    pub mailgun: MailgunConfig,

    /// Redirect destinations for terminal responses
    #[serde(default)]
    pub redirect: RedirectConfig,

    /// Rate limiting configuration
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server listen address
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Version segment prefixed to every public route
    #[serde(default = "default_api_version")]
    pub version: String,

    /// Descriptive text returned by the root endpoint
    #[serde(default = "default_description")]
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecaptchaConfig {
    /// Public site key (rendered into the registration form)
    #[serde(default)]
    pub site_key: String,

    /// Secret key sent on verification calls
    #[serde(default)]
    pub secret_key: String,

    /// siteverify endpoint URL
    #[serde(default = "default_verify_url")]
    pub verify_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Path to the registration document file
    #[serde(default = "default_store_path")]
    pub path: PathBuf,

    /// Enable persistence (if false, registrations are in-memory only)
    #[serde(default = "default_true")]
    pub persist: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MailgunConfig {
    /// Mailgun API key
    #[serde(default)]
    pub api_key: String,

    /// Sending domain
    #[serde(default)]
    pub domain: String,

    /// Fixed sender address
    #[serde(default = "default_mail_from")]
    pub from: String,

    /// Mailgun API base URL
    #[serde(default = "default_mailgun_api_base")]
    pub api_base: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedirectConfig {
    /// Destination for accepted registrations
    #[serde(default = "default_success_url")]
    pub success_url: String,

    /// Destination for validation and storage failures
    #[serde(default = "default_error_url")]
    pub error_url: String,

    /// Destination when the challenge must be re-entered
    #[serde(default = "default_form_url")]
    pub form_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    /// Accepted requests per client address per hour
    #[serde(default = "default_per_client_per_hour")]
    pub per_client_per_hour: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default implementations
impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            port: default_port(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            version: default_api_version(),
            description: default_description(),
        }
    }
}

impl Default for RecaptchaConfig {
    fn default() -> Self {
        Self {
            site_key: String::new(),
            secret_key: String::new(),
            verify_url: default_verify_url(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            persist: true,
        }
    }
}

impl Default for MailgunConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            domain: String::new(),
            from: default_mail_from(),
            api_base: default_mailgun_api_base(),
        }
    }
}

impl Default for RedirectConfig {
    fn default() -> Self {
        Self {
            success_url: default_success_url(),
            error_url: default_error_url(),
            form_url: default_form_url(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            per_client_per_hour: default_per_client_per_hour(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// Default value functions
fn default_listen_addr() -> String {
    "0.0.0.0".into()
}

fn default_port() -> u16 {
    8080
}

fn default_api_version() -> String {
    "v1".into()
}

fn default_description() -> String {
    "Welcome to the Ubertech ’16 registration API".into()
}

fn default_verify_url() -> String {
    recaptcha_client::DEFAULT_VERIFY_URL.into()
}

fn default_store_path() -> PathBuf {
    PathBuf::from("/data/registrations.json")
}

fn default_true() -> bool {
    true
}

fn default_mail_from() -> String {
    "Ubertech <noreply@ubertech.io>".into()
}

fn default_mailgun_api_base() -> String {
    mailgun_client::DEFAULT_API_BASE.into()
}

fn default_success_url() -> String {
    "https://www.ubertech.io/#success".into()
}

fn default_error_url() -> String {
    "https://www.ubertech.io/#error".into()
}

fn default_form_url() -> String {
    "https://www.ubertech.io/#RegForm".into()
}

fn default_per_client_per_hour() -> u32 {
    5
}

fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(false),
            )
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.version, "v1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.rate_limit.per_client_per_hour, 5);
        assert!(config.store.persist);
        assert!(config.redirect.success_url.ends_with("#success"));
        assert!(config.redirect.form_url.ends_with("#RegForm"));
    }
}
