//! Event log collaborators consumed by the cache core.
//!
//! The core emits one human-readable line per eviction/removal event and one
//! per statistics report. It only needs the "write one log line" capability
//! captured by [`CacheListener`]; everything else — destination, formatting
//! of the surrounding line, durability — belongs to the listener.
//!
//! A listener failure is never allowed to fail the cache operation that
//! triggered it: by the time a line is written the mutation is already
//! complete, so [`FileListener`] reports I/O errors through `tracing` and
//! returns normally.
//!
//! ## Key Components
//!
//! - [`CacheListener`]: the capability trait.
//! - [`FileListener`]: appends timestamped `[INFO]` lines to a text file.
//! - [`NoopListener`]: discards events; the default collaborator.
//! - [`MemoryListener`]: captures messages in memory for assertions.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

/// Append-only log capability consumed by the cache core.
///
/// Implementations must be callable from any thread holding the cache lock
/// and must not panic on I/O failure.
pub trait CacheListener: Send + Sync {
    /// Records one event line. Failures are the listener's to report.
    fn write_log(&self, message: &str);
}

/// Listener that appends each event to a text log file.
///
/// Every line is prefixed with a local timestamp and an `[INFO]` tag:
///
/// ```text
/// 2026-08-07T14:03:21.551 [INFO] removed entry: key=2, value="two"
/// ```
///
/// The file is created on first write and existing content is preserved.
/// Events are also echoed at `tracing::info!`; write failures surface as
/// `tracing::warn!` and are otherwise swallowed.
#[derive(Debug, Clone)]
pub struct FileListener {
    path: PathBuf,
}

impl FileListener {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the log file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CacheListener for FileListener {
    fn write_log(&self, message: &str) {
        let timestamp = chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f");
        let line = format!("{timestamp} [INFO] {message}");

        tracing::info!("{message}");

        let written = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| writeln!(file, "{line}"));
        if let Err(err) = written {
            tracing::warn!(
                log_file = %self.path.display(),
                error = %err,
                "cache event log write failed"
            );
        }
    }
}

/// Listener that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopListener;

impl CacheListener for NoopListener {
    fn write_log(&self, _message: &str) {}
}

/// Listener that captures raw event messages in memory.
///
/// Intended for tests that assert which events a cache emitted.
///
/// # Example
///
/// ```
/// use lfukit::listener::{CacheListener, MemoryListener};
///
/// let listener = MemoryListener::default();
/// listener.write_log("removed entry: key=1");
/// assert_eq!(listener.messages(), vec!["removed entry: key=1".to_string()]);
/// ```
#[derive(Debug, Default)]
pub struct MemoryListener {
    messages: Mutex<Vec<String>>,
}

impl MemoryListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every message recorded so far.
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }

    /// Returns the number of recorded messages.
    pub fn message_count(&self) -> usize {
        self.messages.lock().len()
    }
}

impl CacheListener for MemoryListener {
    fn write_log(&self, message: &str) {
        self.messages.lock().push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_listener_appends_tagged_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.log");
        let listener = FileListener::new(&path);

        listener.write_log("first event");
        listener.write_log("second event");

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);

        let (stamp, message) = lines[0].split_once(" [INFO] ").unwrap();
        assert!(!stamp.is_empty());
        assert_eq!(message, "first event");
        assert!(lines[1].ends_with(" [INFO] second event"));
    }

    #[test]
    fn file_listener_preserves_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.log");
        std::fs::write(&path, "earlier line\n").unwrap();

        FileListener::new(&path).write_log("new event");

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("earlier line\n"));
        assert!(contents.trim_end().ends_with("new event"));
    }

    #[test]
    fn file_listener_write_failure_does_not_panic() {
        let dir = tempfile::tempdir().unwrap();
        // The directory itself is not a writable file target.
        let listener = FileListener::new(dir.path());
        listener.write_log("dropped event");
    }

    #[test]
    fn memory_listener_records_in_order() {
        let listener = MemoryListener::new();
        listener.write_log("a");
        listener.write_log("b");
        assert_eq!(listener.messages(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(listener.message_count(), 2);
    }
}
