//! Shared test environment for Hookline integration tests.
//!
//! `TestEnv` stands up everything a relay test needs: a wiremock server
//! playing the remote endpoint, a temporary audit log on a pinned test
//! clock, and a ready-made forwarding client pointed at the mock. Tests
//! assemble the router themselves so each one controls its own timeouts.

#![forbid(unsafe_code)]

use std::{
    io,
    path::Path,
    sync::Arc,
    time::{Duration, SystemTime},
};

use hookline_core::{AuditLog, TestClock};
use hookline_forward::{ForwardClient, ForwardConfig};
use tempfile::TempDir;
use wiremock::MockServer;

/// Forward timeout used by tests unless they ask for another one.
///
/// Short enough that timeout scenarios finish quickly, long enough that a
/// healthy mock always answers in time.
pub const TEST_FORWARD_TIMEOUT: Duration = Duration::from_millis(500);

/// Complete test environment for relay tests.
pub struct TestEnv {
    /// Mock remote endpoint alerts are forwarded to.
    pub remote: MockServer,
    /// Audit log backed by a temporary file.
    pub audit: AuditLog,
    /// Pinned clock driving audit timestamps.
    pub clock: Arc<TestClock>,
    log_dir: TempDir,
}

impl TestEnv {
    /// Creates a fresh environment: mock remote, temp audit log, pinned
    /// clock.
    ///
    /// # Errors
    ///
    /// Returns `io::Error` if the temporary directory or audit file cannot
    /// be created.
    pub async fn new() -> io::Result<Self> {
        let remote = MockServer::start().await;
        let log_dir = TempDir::new()?;

        // 2023-11-14 22:13:20 UTC
        let clock = Arc::new(TestClock::with_start_time(
            SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000),
        ));
        let audit = AuditLog::open(log_dir.path().join("webhook.log"), clock.clone())?;

        Ok(Self { remote, audit, clock, log_dir })
    }

    /// URI of the mock remote endpoint.
    pub fn remote_uri(&self) -> String {
        self.remote.uri()
    }

    /// Forwarding client pointed at the mock remote with the default test
    /// timeout.
    pub fn forward_client(&self) -> ForwardClient {
        self.forward_client_with_timeout(TEST_FORWARD_TIMEOUT)
    }

    /// Forwarding client pointed at the mock remote with a custom timeout.
    pub fn forward_client_with_timeout(&self, timeout: Duration) -> ForwardClient {
        let config = ForwardConfig { timeout, ..ForwardConfig::new(self.remote.uri()) };
        ForwardClient::new(config).expect("forward client builds")
    }

    /// Path of the temporary audit file.
    pub fn log_path(&self) -> std::path::PathBuf {
        self.log_dir.path().join("webhook.log")
    }

    /// Current audit records, one per line.
    pub fn audit_lines(&self) -> Vec<String> {
        read_lines(&self.log_path())
    }
}

fn read_lines(path: &Path) -> Vec<String> {
    match std::fs::read_to_string(path) {
        Ok(contents) => contents.lines().map(str::to_string).collect(),
        Err(_) => Vec::new(),
    }
}
