//! Integration tests for the health and liveness probes.

mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use common::relay_router;
use hookline_testing::TestEnv;
use tower::ServiceExt;

fn get(uri: &str) -> Request<Body> {
    Request::builder().method("GET").uri(uri).body(Body::empty()).expect("build request")
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let body =
        axum::body::to_bytes(response.into_body(), usize::MAX).await.expect("read response body");
    serde_json::from_slice(&body).expect("parse response json")
}

#[tokio::test]
async fn health_reports_healthy_with_audit_log_up() {
    let env = TestEnv::new().await.expect("test env setup");

    let app = relay_router(&env);
    let response = app.oneshot(get("/health")).await.expect("execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["audit_log"]["status"], "up");
    assert!(body["version"].is_string());
    assert!(body["timestamp"].is_string());
}

/// Probes must not pollute the audit trail.
#[tokio::test]
async fn health_probe_appends_no_audit_records() {
    let env = TestEnv::new().await.expect("test env setup");

    let app = relay_router(&env);
    let response = app.oneshot(get("/health")).await.expect("execute request");
    assert_eq!(response.status(), StatusCode::OK);

    assert!(env.audit_lines().is_empty());
}

#[tokio::test]
async fn liveness_reports_alive() {
    let env = TestEnv::new().await.expect("test env setup");

    let app = relay_router(&env);
    let response = app.oneshot(get("/live")).await.expect("execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["status"], "alive");
    assert_eq!(body["service"], "hookline-api");
}

/// Every response carries the request-ID header injected by the middleware.
#[tokio::test]
async fn responses_carry_a_request_id() {
    let env = TestEnv::new().await.expect("test env setup");

    let app = relay_router(&env);
    let response = app.oneshot(get("/live")).await.expect("execute request");

    let request_id =
        response.headers().get("X-Request-Id").expect("request id header").to_str().unwrap();
    assert!(!request_id.is_empty());
}
