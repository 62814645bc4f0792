//! Mailgun messages API HTTP client.

use crate::error::MailgunError;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Default Mailgun API base.
pub const DEFAULT_API_BASE: &str = "https://api.mailgun.net";

/// An outbound message.
#[derive(Debug, Clone)]
pub struct MailMessage {
    /// Sender address, e.g. `Ubertech <noreply@mg.ubertech.io>`.
    pub from: String,
    /// Recipient address.
    pub to: String,
    pub subject: String,
    /// Plain-text body. Mailgun renders its own HTML part; Markdown in the
    /// text body is the relay's concern, not ours.
    pub text: String,
}

/// Acknowledgement from the messages endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SendResponse {
    /// Queued message id assigned by the relay.
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Client for a Mailgun-compatible transactional mail relay.
///
/// Authenticates with HTTP basic auth (`api` / API key); the key is held as
/// a `SecretString` to keep it out of debug output.
#[derive(Clone)]
pub struct MailgunClient {
    client: Client,
    base_url: String,
    domain: String,
    api_key: SecretString,
}

impl MailgunClient {
    /// Create a new relay client for the given sending domain.
    pub fn new(
        api_key: impl Into<String>,
        domain: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, MailgunError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            domain: domain.into(),
            api_key: SecretString::new(api_key.into()),
        })
    }

    /// Dispatch a message through the relay.
    #[instrument(skip(self, message), fields(to = %message.to))]
    pub async fn send_message(&self, message: &MailMessage) -> Result<SendResponse, MailgunError> {
        let url = format!("{}/v3/{}/messages", self.base_url, self.domain);

        let params = [
            ("from", message.from.as_str()),
            ("to", message.to.as_str()),
            ("subject", message.subject.as_str()),
            ("text", message.text.as_str()),
        ];

        let response = self
            .client
            .post(&url)
            .basic_auth("api", Some(self.api_key.expose_secret()))
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            warn!("relay rejected API credentials");
            return Err(MailgunError::Unauthorized);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), body = %message, "relay send failed");
            return Err(MailgunError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let ack: SendResponse = response.json().await?;
        debug!(id = ?ack.id, "message queued by relay");
        Ok(ack)
    }
}
