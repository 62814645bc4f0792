//! Wire types for the siteverify API.

use serde::Deserialize;

/// Response body from the siteverify endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyResponse {
    /// Whether the challenge proof was accepted.
    pub success: bool,

    /// Error codes explaining a rejection (absent on success).
    #[serde(rename = "error-codes", default)]
    pub error_codes: Vec<String>,

    /// Timestamp of the challenge load (ISO 8601), when provided.
    #[serde(default)]
    pub challenge_ts: Option<String>,

    /// Hostname of the site where the challenge was solved.
    #[serde(default)]
    pub hostname: Option<String>,
}
