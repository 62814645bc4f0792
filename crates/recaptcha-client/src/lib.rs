//! Client for a reCAPTCHA-style human-verification service.

mod client;
mod error;
mod types;

pub use client::{RecaptchaClient, DEFAULT_VERIFY_URL};
pub use error::RecaptchaError;
pub use types::VerifyResponse;

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_test_client(mock_server: &MockServer) -> RecaptchaClient {
        RecaptchaClient::new(
            "test-site-key",
            "test-secret-key",
            format!("{}/recaptcha/api/siteverify", mock_server.uri()),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_verify_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/recaptcha/api/siteverify"))
            .and(body_string_contains("secret=test-secret-key"))
            .and(body_string_contains("response=good-proof"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true,
                "challenge_ts": "2026-02-14T12:00:00Z",
                "hostname": "www.ubertech.io"
            })))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let result = client.verify("good-proof", None).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_verify_rejected_with_error_codes() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/recaptcha/api/siteverify"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": false,
                "error-codes": ["invalid-input-response", "timeout-or-duplicate"]
            })))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let err = client.verify("stale-proof", None).await.unwrap_err();
        assert_eq!(
            err.error_codes(),
            ["invalid-input-response", "timeout-or-duplicate"]
        );
    }

    #[tokio::test]
    async fn test_verify_empty_proof_rejected() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/recaptcha/api/siteverify"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": false,
                "error-codes": ["missing-input-response"]
            })))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let err = client.verify("", None).await.unwrap_err();
        assert!(matches!(err, RecaptchaError::Rejected(_)));
        assert_eq!(err.error_codes(), ["missing-input-response"]);
    }

    #[tokio::test]
    async fn test_verify_remote_ip_forwarded() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/recaptcha/api/siteverify"))
            .and(body_string_contains("remoteip=203.0.113.9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true
            })))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let result = client.verify("good-proof", Some("203.0.113.9")).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_verify_api_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/recaptcha/api/siteverify"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let err = client.verify("good-proof", None).await.unwrap_err();
        assert!(matches!(err, RecaptchaError::Api { status: 502, .. }));
    }

    #[tokio::test]
    async fn test_verify_unreachable_service() {
        // Nothing listening on this port; the call must surface as a
        // transport error, which callers treat as a failed verification.
        let client = RecaptchaClient::new(
            "test-site-key",
            "test-secret-key",
            "http://127.0.0.1:1/siteverify",
            Duration::from_secs(1),
        )
        .unwrap();

        let err = client.verify("good-proof", None).await.unwrap_err();
        assert!(matches!(err, RecaptchaError::Http(_)));
        assert!(err.error_codes().is_empty());
    }
}
