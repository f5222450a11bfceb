//! Error types for alert forwarding.
//!
//! Every forwarding failure is terminal for its request: the relay makes a
//! single best-effort attempt and surfaces the cause to the caller. The
//! variants exist so the handler can audit the failure precisely, not to
//! drive retry decisions.

use thiserror::Error;

/// Result type alias for forwarding operations.
pub type Result<T> = std::result::Result<T, ForwardError>;

/// Failure modes of a single forwarding attempt.
#[derive(Debug, Clone, Error)]
pub enum ForwardError {
    /// HTTP request timeout exceeded.
    #[error("request timeout after {timeout_seconds}s")]
    Timeout {
        /// Number of seconds before the request timed out
        timeout_seconds: u64,
    },

    /// Network-level connectivity failure.
    #[error("network connection failed: {message}")]
    Network {
        /// Error message describing the network failure
        message: String,
    },

    /// The remote answered but its response could not be read.
    #[error("unreadable remote response: {message}")]
    InvalidResponse {
        /// Error message describing the read failure
        message: String,
    },

    /// Invalid client configuration.
    #[error("invalid forwarding configuration: {message}")]
    Configuration {
        /// Configuration error message
        message: String,
    },
}

impl ForwardError {
    /// Creates a timeout error.
    pub fn timeout(timeout_seconds: u64) -> Self {
        Self::Timeout { timeout_seconds }
    }

    /// Creates a network error from a message.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network { message: message.into() }
    }

    /// Creates an unreadable-response error from a message.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse { message: message.into() }
    }

    /// Creates a configuration error from a message.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration { message: message.into() }
    }
}
