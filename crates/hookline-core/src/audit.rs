//! Append-only audit log for alert traffic.
//!
//! Every handled alert produces one receipt record and one outcome record in
//! a flat file, format `[<timestamp>] <event>`. Appends are line-atomic: a
//! record is written with a single `write_all` on an append-mode handle while
//! holding the log mutex, so concurrent requests never interleave within a
//! line.

use std::{
    fs::{File, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::time::Clock;

/// Timestamp layout used for audit records.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Handle to the append-only audit file.
///
/// Cheap to clone; all clones share one file handle and mutex.
#[derive(Debug, Clone)]
pub struct AuditLog {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    file: Mutex<File>,
    path: PathBuf,
    clock: Arc<dyn Clock>,
}

impl AuditLog {
    /// Opens the audit file at `path`, creating it and any parent directories
    /// if needed. Existing records are preserved; new records append.
    ///
    /// # Errors
    ///
    /// Returns `io::Error` if the parent directory cannot be created or the
    /// file cannot be opened for appending.
    pub fn open(path: impl AsRef<Path>, clock: Arc<dyn Clock>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        debug!(path = %path.display(), "audit log opened");

        Ok(Self { inner: Arc::new(Inner { file: Mutex::new(file), path, clock }) })
    }

    /// Appends one record: `[<timestamp>] <event>`.
    ///
    /// Embedded newlines in `event` are flattened to spaces so the record
    /// stays a single line.
    ///
    /// # Errors
    ///
    /// Returns `io::Error` if the write fails. Callers on the request path
    /// treat this as non-fatal.
    pub fn append(&self, event: &str) -> io::Result<()> {
        let timestamp = DateTime::<Utc>::from(self.inner.clock.now_system());
        let line =
            format!("[{}] {}\n", timestamp.format(TIMESTAMP_FORMAT), flatten_newlines(event));

        let mut file = self.inner.file.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        file.write_all(line.as_bytes())
    }

    /// Verifies the log handle is still usable, without appending a record.
    ///
    /// Used by health probes.
    ///
    /// # Errors
    ///
    /// Returns `io::Error` if the underlying handle is no longer valid.
    pub fn probe(&self) -> io::Result<()> {
        let file = self.inner.file.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        file.metadata().map(|_| ())
    }

    /// Path of the audit file.
    pub fn path(&self) -> &Path {
        &self.inner.path
    }
}

/// Replaces newline characters with spaces so one event stays one record.
fn flatten_newlines(event: &str) -> String {
    event.replace(['\n', '\r'], " ")
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, SystemTime};

    use tempfile::TempDir;

    use super::*;
    use crate::time::TestClock;

    fn pinned_clock() -> Arc<TestClock> {
        // 2023-11-14 22:13:20 UTC
        Arc::new(TestClock::with_start_time(
            SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000),
        ))
    }

    #[test]
    fn append_writes_timestamped_line() {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join("webhook.log");

        let log = AuditLog::open(&path, pinned_clock()).expect("open audit log");
        log.append("alert received: {\"ticker\":\"BTCUSD\"}").expect("append");

        let contents = std::fs::read_to_string(&path).expect("read log");
        assert_eq!(
            contents,
            "[2023-11-14 22:13:20] alert received: {\"ticker\":\"BTCUSD\"}\n"
        );
    }

    #[test]
    fn append_flattens_embedded_newlines() {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join("webhook.log");

        let log = AuditLog::open(&path, pinned_clock()).expect("open audit log");
        log.append("line one\nline two\r\nline three").expect("append");

        let contents = std::fs::read_to_string(&path).expect("read log");
        assert_eq!(contents.lines().count(), 1);
        assert!(contents.contains("line one line two"));
    }

    #[test]
    fn open_creates_parent_directories() {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join("nested").join("logs").join("webhook.log");

        let log = AuditLog::open(&path, pinned_clock()).expect("open audit log");
        log.append("created").expect("append");

        assert!(path.exists());
    }

    #[test]
    fn reopen_preserves_existing_records() {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join("webhook.log");

        {
            let log = AuditLog::open(&path, pinned_clock()).expect("open audit log");
            log.append("first").expect("append");
        }
        {
            let log = AuditLog::open(&path, pinned_clock()).expect("reopen audit log");
            log.append("second").expect("append");
        }

        let contents = std::fs::read_to_string(&path).expect("read log");
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("first"));
        assert!(lines[1].ends_with("second"));
    }

    #[test]
    fn concurrent_appends_stay_line_atomic() {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join("webhook.log");

        let log = AuditLog::open(&path, pinned_clock()).expect("open audit log");

        let threads: Vec<_> = (0..8)
            .map(|t| {
                let log = log.clone();
                std::thread::spawn(move || {
                    for i in 0..50 {
                        let marker = format!("worker-{t} event-{i} {}", "x".repeat(200));
                        log.append(&marker).expect("append");
                    }
                })
            })
            .collect();
        for handle in threads {
            handle.join().expect("join writer thread");
        }

        let contents = std::fs::read_to_string(&path).expect("read log");
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 400);
        for line in lines {
            assert!(line.starts_with('['), "corrupt record: {line}");
            assert!(line.ends_with(&"x".repeat(200)), "torn record: {line}");
        }
    }

    #[test]
    fn probe_succeeds_on_open_log() {
        let dir = TempDir::new().expect("create temp dir");
        let log =
            AuditLog::open(dir.path().join("webhook.log"), pinned_clock()).expect("open audit log");

        assert!(log.probe().is_ok());
    }
}
