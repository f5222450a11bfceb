//! Request handlers for the relay endpoints.

pub mod health;
pub mod webhook;

pub use health::{health_check, liveness_check};
pub use webhook::receive_webhook;
