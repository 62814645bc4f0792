//! HTTP request handlers.

use super::extract::FormOrJson;
use super::middleware::forwarded_client_addr;
use super::types::{DescribeResponse, HealthResponse, RegisterSubmission};
use super::AppState;
use crate::error::ApiError;
use crate::store::Registration;
use crate::{email, token};
use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use mailgun_client::MailMessage;
use tracing::{error, info, warn};

/// Root endpoint: static service description.
pub async fn describe(State(state): State<AppState>) -> Json<DescribeResponse> {
    Json(DescribeResponse {
        message: state.config.api.description.clone(),
    })
}

/// Health check endpoint.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        registrations: state.store.count().await,
    })
}

/// Accept a registration submission.
///
/// Sequential pipeline: challenge verification, token assignment and
/// persistence, confirmation mail. Each outcome maps to a fixed redirect
/// destination plus a status code; failures are logged before the response
/// is constructed. The mail step never changes the committed outcome.
pub async fn register(
    State(state): State<AppState>,
    headers: HeaderMap,
    FormOrJson(submission): FormOrJson<RegisterSubmission>,
) -> Response {
    let redirects = &state.config.redirect;

    match process_registration(&state, &headers, submission).await {
        Ok(registration) => {
            info!(token = %registration.token, "new registration added");
            redirect(StatusCode::OK, &redirects.success_url)
        }
        Err(ApiError::Verification(codes)) => {
            warn!(error_codes = ?codes, "challenge verification failed");
            redirect(StatusCode::UNAUTHORIZED, &redirects.form_url)
        }
        Err(ApiError::Validation(detail)) => {
            warn!(%detail, "registration failed schema validation");
            redirect(StatusCode::BAD_REQUEST, &redirects.error_url)
        }
        Err(err) => {
            error!(error = %err, "registration could not be persisted");
            redirect(StatusCode::INTERNAL_SERVER_ERROR, &redirects.error_url)
        }
    }
}

/// Verify, persist, notify.
async fn process_registration(
    state: &AppState,
    headers: &HeaderMap,
    submission: RegisterSubmission,
) -> Result<Registration, ApiError> {
    // Mandatory gate: nothing is persisted or sent before this passes.
    // A missing proof goes to the service as-is and comes back as
    // missing-input-response.
    let proof = submission.recaptcha_response.clone().unwrap_or_default();
    let client_addr = forwarded_client_addr(headers);
    state.recaptcha.verify(&proof, client_addr.as_deref()).await?;

    // Token is assigned exactly once, after the gate and before the save.
    let registration = submission.into_registration(token::generate());
    let stored = state.store.save(registration).await?;

    // Confirmation mail outcome is logged and discarded; the response is
    // committed by the save alone.
    if let Err(err) = send_confirmation(state, &stored).await {
        error!(token = %stored.token, error = %err, "confirmation email failed to send");
    }

    Ok(stored)
}

/// Compose and dispatch the confirmation mail for a stored registration.
async fn send_confirmation(state: &AppState, stored: &Registration) -> Result<(), ApiError> {
    let message = MailMessage {
        from: state.config.mailgun.from.clone(),
        to: stored.email.clone(),
        subject: email::CONFIRMATION_SUBJECT.to_string(),
        text: email::compose_confirmation(stored),
    };

    let ack = state.mailer.send_message(&message).await?;
    info!(token = %stored.token, id = ?ack.id, "confirmation email dispatched");
    Ok(())
}

/// Build a redirect-style response: status code plus `Location`, no body.
fn redirect(status: StatusCode, location: &str) -> Response {
    let mut response = status.into_response();
    if let Ok(value) = HeaderValue::from_str(location) {
        response.headers_mut().insert(header::LOCATION, value);
    }
    response
}
