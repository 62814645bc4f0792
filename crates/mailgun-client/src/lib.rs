//! Client for the Mailgun transactional mail API.

mod client;
mod error;

pub use client::{MailMessage, MailgunClient, SendResponse, DEFAULT_API_BASE};
pub use error::MailgunError;

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{body_string_contains, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_test_client(mock_server: &MockServer) -> MailgunClient {
        MailgunClient::new(
            "key-test",
            "mg.ubertech.io",
            mock_server.uri(),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    fn sample_message() -> MailMessage {
        MailMessage {
            from: "Ubertech <noreply@mg.ubertech.io>".into(),
            to: "a@b.com".into(),
            subject: "Confirming your participation".into(),
            text: "Hello Jo".into(),
        }
    }

    #[tokio::test]
    async fn test_send_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v3/mg.ubertech.io/messages"))
            .and(header_exists("authorization"))
            .and(body_string_contains("to=a%40b.com"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "<20260214.1@mg.ubertech.io>",
                "message": "Queued. Thank you."
            })))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let ack = client.send_message(&sample_message()).await.unwrap();
        assert_eq!(ack.id.as_deref(), Some("<20260214.1@mg.ubertech.io>"));
    }

    #[tokio::test]
    async fn test_send_unauthorized() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v3/mg.ubertech.io/messages"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let err = client.send_message(&sample_message()).await.unwrap_err();
        assert!(matches!(err, MailgunError::Unauthorized));
    }

    #[tokio::test]
    async fn test_send_api_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v3/mg.ubertech.io/messages"))
            .respond_with(
                ResponseTemplate::new(400).set_body_string("'to' parameter is not a valid address"),
            )
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let err = client.send_message(&sample_message()).await.unwrap_err();
        match err {
            MailgunError::Api { status, message } => {
                assert_eq!(status, 400);
                assert!(message.contains("not a valid address"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_send_unreachable_relay() {
        let client = MailgunClient::new(
            "key-test",
            "mg.ubertech.io",
            "http://127.0.0.1:1",
            Duration::from_secs(1),
        )
        .unwrap();

        let err = client.send_message(&sample_message()).await.unwrap_err();
        assert!(matches!(err, MailgunError::Http(_)));
    }
}
