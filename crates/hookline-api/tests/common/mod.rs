//! Shared helpers for relay integration tests.

#![allow(dead_code)]

use std::time::Duration;

use axum::Router;
use hookline_api::{create_router, AppState};
use hookline_forward::ForwardClient;
use hookline_testing::TestEnv;

/// Builds the relay router against the test environment's mock remote.
pub fn relay_router(env: &TestEnv) -> Router {
    relay_router_with(env, env.forward_client())
}

/// Builds the relay router with a caller-supplied forwarding client.
pub fn relay_router_with(env: &TestEnv, forwarder: ForwardClient) -> Router {
    let state = AppState {
        audit: env.audit.clone(),
        forwarder,
        clock: env.clock.clone(),
        request_timeout: Duration::from_secs(5),
    };
    create_router(state)
}
