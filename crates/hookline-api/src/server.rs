//! HTTP server configuration and request routing.
//!
//! Provides Axum server setup with middleware stack and graceful shutdown
//! for the alert relay endpoints. Requests flow through middleware in order:
//! 1. Request ID generation
//! 2. Request/response logging
//! 3. Timeout enforcement
//! 4. Handler execution
//!
//! # Graceful Shutdown
//!
//! The server handles SIGTERM gracefully: it stops accepting new connections
//! and waits for in-flight requests (which are themselves bounded by the
//! forward timeout) before exiting.

use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    extract::Request,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use hookline_core::{AuditLog, Clock};
use hookline_forward::ForwardClient;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;
use uuid::Uuid;

use crate::handlers;

/// Shared state threaded through every handler.
///
/// Everything the original kept as module-level globals (log destination,
/// fixed remote URL) arrives here explicitly at startup.
#[derive(Clone)]
pub struct AppState {
    /// Append-only audit log for alert traffic.
    pub audit: AuditLog,
    /// Client relaying alerts to the remote endpoint.
    pub forwarder: ForwardClient,
    /// Time source for health probe timestamps.
    pub clock: Arc<dyn Clock>,
    /// Inbound HTTP request timeout.
    pub request_timeout: Duration,
}

/// Creates the Axum router with all routes and middleware.
///
/// Sets up:
/// - The `/webhook` relay endpoint
/// - Health and liveness probes
/// - Request tracing and logging
/// - Timeout handling
pub fn create_router(state: AppState) -> Router {
    let probe_routes = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/live", get(handlers::liveness_check));

    let relay_routes = Router::new().route("/webhook", post(handlers::receive_webhook));

    Router::new()
        .merge(probe_routes)
        .merge(relay_routes)
        .layer(TimeoutLayer::new(state.request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(inject_request_id))
        .with_state(state)
}

/// Middleware to inject request ID into all responses.
///
/// Adds X-Request-Id header for tracing requests across services.
async fn inject_request_id(req: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();

    let mut req = req;
    req.extensions_mut().insert(request_id.clone());

    let mut response = next.run(req).await;

    if let Ok(header_value) = request_id.parse() {
        response.headers_mut().insert("X-Request-Id", header_value);
    }

    response
}

/// Starts the HTTP server with graceful shutdown support.
///
/// Binds to the specified address and serves requests until a shutdown
/// signal is received.
///
/// # Errors
///
/// Returns `std::io::Error` if the port is already in use or the network
/// interface is unavailable.
pub async fn start_server(state: AppState, addr: SocketAddr) -> Result<(), std::io::Error> {
    let app = create_router(state);

    info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let actual_addr = listener.local_addr()?;

    info!("HTTP server listening on {}", actual_addr);

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    info!("HTTP server stopped gracefully");
    Ok(())
}

/// Waits for shutdown signal (CTRL+C or SIGTERM).
///
/// Enables graceful shutdown on:
/// - CTRL+C (SIGINT) - Development
/// - SIGTERM - Kubernetes/Docker
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received CTRL+C, starting graceful shutdown");
        },
        () = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
