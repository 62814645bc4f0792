//! Error types for the registration service.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Service error taxonomy.
///
/// The register handler maps `Verification`, `Validation`, and `Storage`
/// to redirect-style responses itself; the `IntoResponse` impl is the JSON
/// form used by middleware and any non-redirect surface.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Challenge verification failed: {}", .0.join(", "))]
    Verification(Vec<String>),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Notification error: {0}")]
    Notification(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::Verification(_) => (StatusCode::UNAUTHORIZED, "VERIFICATION_FAILED"),
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_FAILED"),
            ApiError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
            ApiError::Notification(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "NOTIFICATION_ERROR")
            }
            ApiError::RateLimitExceeded => (StatusCode::TOO_MANY_REQUESTS, "RATE_LIMIT_EXCEEDED"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = ErrorResponse {
            error: self.to_string(),
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<recaptcha_client::RecaptchaError> for ApiError {
    fn from(e: recaptcha_client::RecaptchaError) -> Self {
        match e {
            recaptcha_client::RecaptchaError::Rejected(codes) => ApiError::Verification(codes),
            // Transport and API failures also fail the gate; carry the
            // detail in place of service error codes.
            other => ApiError::Verification(vec![other.to_string()]),
        }
    }
}

impl From<mailgun_client::MailgunError> for ApiError {
    fn from(e: mailgun_client::MailgunError) -> Self {
        ApiError::Notification(e.to_string())
    }
}

impl From<std::io::Error> for ApiError {
    fn from(e: std::io::Error) -> Self {
        ApiError::Storage(e.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Storage(format!("JSON serialization error: {}", e))
    }
}
