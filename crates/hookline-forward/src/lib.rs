//! Outbound forwarding for the Hookline relay.
//!
//! One job: relay the raw bytes of a received alert to the configured remote
//! endpoint with a bounded timeout, and report what happened in a form the
//! request handler can audit and surface to the caller.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod client;
pub mod error;

pub use client::{ForwardClient, ForwardConfig, ForwardOutcome};
pub use error::{ForwardError, Result};
