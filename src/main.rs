//! Hookline trading-alert relay.
//!
//! Main entry point for the relay server. Initializes logging, loads
//! configuration, opens the audit log, builds the forwarding client, and
//! serves the webhook endpoint until shutdown.

use std::sync::Arc;

use anyhow::{Context, Result};
use hookline_api::{AppState, Config};
use hookline_core::{AuditLog, RealClock};
use hookline_forward::ForwardClient;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    info!("Starting Hookline trading-alert relay");

    // Load configuration from defaults, config.toml, and environment
    let config = Config::load()?;
    let addr = config.parse_server_addr()?;
    info!(
        addr = %addr,
        remote_url = %config.remote_base_url,
        log_file = %config.log_file,
        forward_timeout_s = config.forward_timeout_seconds,
        "Configuration loaded"
    );

    let clock = Arc::new(RealClock::new());

    let audit = AuditLog::open(&config.log_file, clock.clone())
        .with_context(|| format!("Failed to open audit log at {}", config.log_file))?;
    info!(path = %audit.path().display(), "Audit log opened");

    let forwarder = ForwardClient::new(config.to_forward_config())
        .context("Failed to build forwarding client")?;

    let state = AppState { audit, forwarder, clock, request_timeout: config.request_timeout() };

    info!(addr = %addr, "Hookline is ready to receive alerts");

    hookline_api::start_server(state, addr).await.context("Server failed")?;

    info!("Hookline shutdown complete");
    Ok(())
}

/// Initializes tracing with environment-based configuration.
fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info,hookline=debug,tower_http=debug"))
        .expect("Invalid RUST_LOG environment variable");

    let fmt_layer = fmt::layer().with_target(true);

    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
}
