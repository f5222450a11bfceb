//! Alert receive-and-forward handler.
//!
//! Accepts an inbound trading alert, audits its receipt, relays the raw
//! bytes to the remote endpoint, audits the outcome, and reports the result
//! to the caller. One best-effort forward per request; every failure is
//! terminal.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::{error, info, instrument, warn};

use crate::server::AppState;

/// Response for an alert that was received and relayed.
///
/// `remote_status` carries the remote's verdict verbatim; any answer from
/// the remote counts as a completed forward.
#[derive(Debug, Serialize)]
pub struct RelayAccepted {
    /// Always `"success"`
    pub status: &'static str,
    /// Human-readable confirmation
    pub message: &'static str,
    /// HTTP status code returned by the remote
    pub remote_status: u16,
}

/// Response for an alert that could not be relayed.
#[derive(Debug, Serialize)]
pub struct RelayFailed {
    /// Always `"error"`
    pub status: &'static str,
    /// Human-readable failure summary
    pub message: &'static str,
    /// Underlying cause
    pub error: String,
}

/// Response for a request whose body is not a JSON payload.
#[derive(Debug, Serialize)]
pub struct InvalidPayload {
    /// Rejection reason
    pub error: &'static str,
}

/// Receives a trading alert and relays it to the remote endpoint.
///
/// The payload is opaque: it is parsed once to establish JSON
/// well-formedness and for the audit record, but the bytes that reach the
/// remote are the bytes that arrived.
///
/// # Errors
///
/// Returns appropriate HTTP status codes:
/// - 400: body missing, unparseable, or JSON `null`; nothing is forwarded
/// - 500: forwarding failed (timeout, connection error, unreadable response)
#[instrument(name = "receive_webhook", skip(state, body), fields(payload_bytes = body.len()))]
pub async fn receive_webhook(State(state): State<AppState>, body: Bytes) -> Response {
    let payload = match serde_json::from_slice::<serde_json::Value>(&body) {
        Ok(serde_json::Value::Null) | Err(_) => {
            warn!("Rejecting request without a JSON payload");
            return (StatusCode::BAD_REQUEST, Json(InvalidPayload { error: "Invalid JSON payload" }))
                .into_response();
        },
        Ok(payload) => payload,
    };

    info!(%payload, "Alert received");
    audit(&state, format!("Alert received: {payload}"));

    match state.forwarder.forward(body).await {
        Ok(outcome) => {
            info!(
                remote_status = outcome.status,
                duration_ms = outcome.duration.as_millis() as u64,
                "Alert forwarded"
            );
            audit(
                &state,
                format!(
                    "Forwarded to remote: {} | Status: {} | Response: {}",
                    state.forwarder.remote_url(),
                    outcome.status,
                    outcome.body
                ),
            );

            (
                StatusCode::OK,
                Json(RelayAccepted {
                    status: "success",
                    message: "Alert received and forwarded",
                    remote_status: outcome.status,
                }),
            )
                .into_response()
        },
        Err(e) => {
            error!(error = %e, "Alert forwarding failed");
            audit(&state, format!("Error forwarding to remote: {e}"));

            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(RelayFailed {
                    status: "error",
                    message: "Failed to forward to remote",
                    error: e.to_string(),
                }),
            )
                .into_response()
        },
    }
}

/// Appends one audit record; a failed append never fails the request.
fn audit(state: &AppState, event: String) {
    if let Err(e) = state.audit.append(&event) {
        warn!(error = %e, "Failed to append audit record");
    }
}
