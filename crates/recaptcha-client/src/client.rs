//! reCAPTCHA siteverify HTTP client.

use crate::error::RecaptchaError;
use crate::types::VerifyResponse;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Default Google siteverify endpoint.
pub const DEFAULT_VERIFY_URL: &str = "https://www.google.com/recaptcha/api/siteverify";

/// Client for validating human-verification proofs against a siteverify
/// endpoint.
///
/// The secret key is stored as a `SecretString` so it never shows up in
/// debug output or logs. The site key only matters for rendering the widget
/// on the client side and never travels on the verification call.
#[derive(Clone)]
pub struct RecaptchaClient {
    client: Client,
    verify_url: String,
    site_key: String,
    secret_key: SecretString,
}

impl RecaptchaClient {
    /// Create a new verification client.
    pub fn new(
        site_key: impl Into<String>,
        secret_key: impl Into<String>,
        verify_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, RecaptchaError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            verify_url: verify_url.into(),
            site_key: site_key.into(),
            secret_key: SecretString::new(secret_key.into()),
        })
    }

    /// The public site key paired with this client's secret.
    pub fn site_key(&self) -> &str {
        &self.site_key
    }

    /// Validate a challenge proof.
    ///
    /// Posts the proof to the siteverify endpoint and resolves only when the
    /// service confirms it. A rejected proof carries the service's error-code
    /// list (e.g. `missing-input-response`, `timeout-or-duplicate`). An empty
    /// proof is sent as-is; the service rejects it with
    /// `missing-input-response`.
    #[instrument(skip(self, proof))]
    pub async fn verify(
        &self,
        proof: &str,
        remote_ip: Option<&str>,
    ) -> Result<(), RecaptchaError> {
        let mut params = vec![
            ("secret", self.secret_key.expose_secret().as_str()),
            ("response", proof),
        ];
        if let Some(ip) = remote_ip {
            params.push(("remoteip", ip));
        }

        let response = self
            .client
            .post(&self.verify_url)
            .form(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            warn!(status, "siteverify returned non-success status");
            return Err(RecaptchaError::Api { status, message });
        }

        let verdict: VerifyResponse = response.json().await?;

        if verdict.success {
            debug!(hostname = ?verdict.hostname, "challenge proof accepted");
            Ok(())
        } else {
            warn!(error_codes = ?verdict.error_codes, "challenge proof rejected");
            Err(RecaptchaError::Rejected(verdict.error_codes))
        }
    }
}
