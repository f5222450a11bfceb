//! Health check handlers for service monitoring.
//!
//! Provides liveness and health endpoints with an audit-log writability
//! check for orchestration systems like Kubernetes. Probes never append
//! audit records.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, error, instrument};

use crate::server::AppState;

/// Health check response structure.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall service health status
    pub status: HealthStatus,
    /// Timestamp when health check was performed
    pub timestamp: DateTime<Utc>,
    /// Individual component health checks
    pub checks: HealthChecks,
    /// Service version information
    pub version: String,
}

/// Overall health status enumeration.
#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// All systems operational
    Healthy,
    /// Critical systems failing
    Unhealthy,
}

/// Individual component health check results.
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    /// Audit log writability
    pub audit_log: ComponentHealth,
}

/// Health status for individual components.
#[derive(Debug, Serialize)]
pub struct ComponentHealth {
    /// Component status
    pub status: ComponentStatus,
    /// Optional error message if unhealthy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Response time in milliseconds
    pub response_time_ms: u64,
}

/// Component-level health status.
#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentStatus {
    /// Component is healthy
    Up,
    /// Component is experiencing issues
    Down,
}

/// Health check endpoint handler.
///
/// This endpoint is designed to be called frequently by orchestration
/// systems and load balancers, so it avoids expensive operations: the audit
/// log is probed without writing a record.
#[instrument(name = "health_check", skip(state))]
pub async fn health_check(State(state): State<AppState>) -> Response {
    debug!("Performing health check");

    let timestamp = DateTime::<Utc>::from(state.clock.now_system());
    let start = state.clock.now();

    let audit_health = match state.audit.probe() {
        Ok(()) => {
            debug!("Audit log health check passed");
            ComponentHealth { status: ComponentStatus::Up, message: None, response_time_ms: 0 }
        },
        Err(e) => {
            error!("Audit log health check failed: {}", e);
            ComponentHealth {
                status: ComponentStatus::Down,
                message: Some(format!("Audit log unavailable: {e}")),
                response_time_ms: 0,
            }
        },
    };
    let probe_duration = start.elapsed();

    let overall_status = match audit_health.status {
        ComponentStatus::Up => HealthStatus::Healthy,
        ComponentStatus::Down => HealthStatus::Unhealthy,
    };
    let status_code = match overall_status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    let response = HealthResponse {
        status: overall_status,
        timestamp,
        checks: HealthChecks {
            audit_log: ComponentHealth {
                response_time_ms: u64::try_from(probe_duration.as_millis()).unwrap_or(u64::MAX),
                ..audit_health
            },
        },
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    debug!(status = ?response.status, "Health check completed");

    (status_code, Json(response)).into_response()
}

/// Liveness check endpoint for Kubernetes probes.
///
/// Returns a simple response indicating the service process is alive,
/// without testing external dependencies.
#[instrument(name = "liveness_check", skip(state))]
pub async fn liveness_check(State(state): State<AppState>) -> Response {
    debug!("Performing liveness check");

    let response = serde_json::json!({
        "status": "alive",
        "timestamp": DateTime::<Utc>::from(state.clock.now_system()),
        "service": "hookline-api"
    });

    (StatusCode::OK, Json(response)).into_response()
}
