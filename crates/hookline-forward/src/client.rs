//! HTTP client for alert forwarding with a bounded timeout.
//!
//! Relays the raw alert bytes to the configured remote endpoint and
//! categorizes failures so the handler can audit them. Any HTTP response from
//! the remote, whatever its status, is a completed forward; only transport
//! failures are errors.

use std::time::Duration;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{info_span, Instrument};

use crate::error::{ForwardError, Result};

/// Default timeout for the outbound call.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Response bodies longer than this are truncated before they reach the
/// audit log.
const MAX_LOGGED_BODY: usize = 1024;

/// Configuration for the forwarding client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForwardConfig {
    /// Destination URL every alert is relayed to.
    pub remote_url: String,
    /// Timeout for the outbound request.
    pub timeout: Duration,
    /// User agent string for outbound requests.
    pub user_agent: String,
}

impl ForwardConfig {
    /// Creates a configuration for the given remote URL with default timeout
    /// and user agent.
    pub fn new(remote_url: impl Into<String>) -> Self {
        Self {
            remote_url: remote_url.into(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: "Hookline-Relay/1.0".to_string(),
        }
    }
}

/// Result of a completed forward: the remote answered.
#[derive(Debug, Clone)]
pub struct ForwardOutcome {
    /// HTTP status code returned by the remote.
    pub status: u16,
    /// Response body, truncated to a bounded size.
    pub body: String,
    /// Total duration of the outbound call.
    pub duration: Duration,
}

/// HTTP client that relays alert payloads to the remote endpoint.
///
/// Cheap to clone; all clones share one pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ForwardClient {
    client: reqwest::Client,
    config: ForwardConfig,
}

impl ForwardClient {
    /// Creates a new forwarding client.
    ///
    /// # Errors
    ///
    /// Returns `ForwardError::Configuration` if the HTTP client cannot be
    /// built with the provided settings.
    pub fn new(config: ForwardConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| ForwardError::configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Destination URL alerts are relayed to.
    pub fn remote_url(&self) -> &str {
        &self.config.remote_url
    }

    /// Relays the raw payload bytes to the remote endpoint.
    ///
    /// The body is sent unmodified with `Content-Type: application/json`.
    ///
    /// # Errors
    ///
    /// - `Timeout` if the remote does not answer within the configured
    ///   timeout
    /// - `Network` for connection-level failures
    /// - `InvalidResponse` if the remote's response body cannot be read
    pub async fn forward(&self, body: Bytes) -> Result<ForwardOutcome> {
        let start = std::time::Instant::now();

        let span = info_span!("forward_alert", url = %self.config.remote_url);

        async move {
            tracing::debug!(payload_bytes = body.len(), "forwarding alert");

            let response = match self
                .client
                .post(&self.config.remote_url)
                .header("content-type", "application/json")
                .body(body)
                .send()
                .await
            {
                Ok(response) => response,
                Err(e) => {
                    let duration = start.elapsed();
                    tracing::warn!(duration_ms = duration.as_millis(), "forward failed: {}", e);

                    if e.is_timeout() {
                        return Err(ForwardError::timeout(self.config.timeout.as_secs()));
                    }
                    if e.is_connect() {
                        return Err(ForwardError::network(format!("connection failed: {e}")));
                    }
                    return Err(ForwardError::network(e.to_string()));
                },
            };

            let status = response.status().as_u16();
            let body = response
                .bytes()
                .await
                .map_err(|e| ForwardError::invalid_response(e.to_string()))?;
            let duration = start.elapsed();

            tracing::debug!(status, duration_ms = duration.as_millis(), "remote answered");

            Ok(ForwardOutcome { status, body: truncate_body(&body), duration })
        }
        .instrument(span)
        .await
    }
}

/// Renders a response body for the audit log, truncating oversized ones.
fn truncate_body(bytes: &[u8]) -> String {
    const SUFFIX: &str = "... (truncated)";

    if bytes.len() > MAX_LOGGED_BODY {
        let kept = String::from_utf8_lossy(&bytes[..MAX_LOGGED_BODY - SUFFIX.len()]);
        format!("{kept}{SUFFIX}")
    } else {
        String::from_utf8_lossy(bytes).into_owned()
    }
}
