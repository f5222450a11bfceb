//! Configuration management for the Hookline relay.

use std::{net::SocketAddr, str::FromStr, time::Duration};

use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use hookline_forward::ForwardConfig;
use serde::{Deserialize, Serialize};

const CONFIG_FILE: &str = "config.toml";

/// Complete service configuration with defaults, file, and environment
/// overrides.
///
/// Configuration is loaded in priority order:
/// 1. Environment variables (highest priority)
/// 2. Configuration file (`config.toml`)
/// 3. Built-in defaults (lowest priority)
///
/// The relay works out-of-the-box: the defaults match the original
/// deployment, and every value can be overridden per environment.
///
/// # Example
///
/// ```no_run
/// use hookline_api::Config;
///
/// let config = Config::load().expect("Failed to load configuration");
///
/// println!("Relay will bind to {}:{}", config.host, config.port);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Server
    /// Server bind address.
    ///
    /// Environment variable: `HOST`
    #[serde(default = "default_host", alias = "HOST")]
    pub host: String,
    /// Server bind port.
    ///
    /// Environment variable: `PORT`
    #[serde(default = "default_port", alias = "PORT")]
    pub port: u16,
    /// Inbound HTTP request timeout in seconds.
    ///
    /// Environment variable: `REQUEST_TIMEOUT`
    #[serde(default = "default_request_timeout", alias = "REQUEST_TIMEOUT")]
    pub request_timeout: u64,

    // Forwarding
    /// Remote base URL every alert is relayed to.
    ///
    /// Environment variable: `REMOTE_BASE_URL`
    #[serde(default = "default_remote_base_url", alias = "REMOTE_BASE_URL")]
    pub remote_base_url: String,
    /// Timeout for the outbound forward in seconds.
    ///
    /// Environment variable: `FORWARD_TIMEOUT_SECONDS`
    #[serde(default = "default_forward_timeout", alias = "FORWARD_TIMEOUT_SECONDS")]
    pub forward_timeout_seconds: u64,

    // Audit log
    /// Path of the append-only audit file.
    ///
    /// Environment variable: `LOG_FILE`
    #[serde(default = "default_log_file", alias = "LOG_FILE")]
    pub log_file: String,

    // Logging
    /// Log level configuration.
    ///
    /// Environment variable: `RUST_LOG`
    #[serde(default = "default_log_level", alias = "RUST_LOG")]
    pub rust_log: String,
}

impl Config {
    /// Load configuration from defaults, config file, and environment
    /// variable overrides.
    ///
    /// Configuration priority (highest to lowest):
    /// 1. Environment variables (e.g., `REMOTE_BASE_URL`, `PORT`)
    /// 2. Configuration file (`config.toml`)
    /// 3. Built-in defaults
    pub fn load() -> Result<Self> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(""));

        let config: Self = figment.extract().context("Failed to load configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Convert to the forwarding client's configuration.
    pub fn to_forward_config(&self) -> ForwardConfig {
        ForwardConfig {
            timeout: Duration::from_secs(self.forward_timeout_seconds),
            ..ForwardConfig::new(self.remote_base_url.clone())
        }
    }

    /// Inbound request timeout as a duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    /// Parse server socket address from host and port configuration.
    pub fn parse_server_addr(&self) -> Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.host, self.port);
        SocketAddr::from_str(&addr_str).context("Invalid server address")
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<()> {
        if self.port == 0 {
            anyhow::bail!("port must be greater than 0");
        }

        if self.request_timeout == 0 {
            anyhow::bail!("request_timeout must be greater than 0");
        }

        if self.forward_timeout_seconds == 0 {
            anyhow::bail!("forward_timeout_seconds must be greater than 0");
        }

        if !self.remote_base_url.starts_with("http://")
            && !self.remote_base_url.starts_with("https://")
        {
            anyhow::bail!("remote_base_url must be an http(s) URL");
        }

        if self.log_file.is_empty() {
            anyhow::bail!("log_file must not be empty");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout: default_request_timeout(),
            remote_base_url: default_remote_base_url(),
            forward_timeout_seconds: default_forward_timeout(),
            log_file: default_log_file(),
            rust_log: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_request_timeout() -> u64 {
    30
}

fn default_remote_base_url() -> String {
    "https://ruojp8phda.execute-api.us-east-1.amazonaws.com/prod/".to_string()
}

fn default_forward_timeout() -> u64 {
    10
}

fn default_log_file() -> String {
    "webhook.log".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}
