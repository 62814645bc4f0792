//! reCAPTCHA client errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecaptchaError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Verification rejected: {}", .0.join(", "))]
    Rejected(Vec<String>),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RecaptchaError {
    /// Error codes returned by the verification service, if any.
    ///
    /// Transport and API failures carry no codes; the caller treats every
    /// variant as a failed verification regardless.
    pub fn error_codes(&self) -> &[String] {
        match self {
            RecaptchaError::Rejected(codes) => codes,
            _ => &[],
        }
    }
}
