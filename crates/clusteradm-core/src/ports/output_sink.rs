//! Output sink port for user-facing progress lines.
//!
//! Workflows never print directly. The CLI injects [`StdoutSink`]; tests
//! inject [`CapturingSink`] and assert on the collected lines.

use std::io::Write;
use std::sync::{Mutex, PoisonError};

/// Port for emitting human-readable progress lines.
///
/// Implementations must be safe to call from concurrent tasks. Lines from
/// different tasks may interleave in any order.
pub trait OutputSink: Send + Sync {
    /// Emit one line (without trailing newline).
    fn line(&self, line: &str);
}

/// Writes lines to standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn line(&self, line: &str) {
        let mut out = std::io::stdout().lock();
        // Broken pipes are not worth failing a cluster operation over
        let _ = writeln!(out, "{line}");
    }
}

/// Discards every line.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl OutputSink for NoopSink {
    fn line(&self, _line: &str) {}
}

/// Collects lines in memory.
#[derive(Debug, Default)]
pub struct CapturingSink {
    lines: Mutex<Vec<String>>,
}

impl CapturingSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every line emitted so far, in arrival order.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl OutputSink for CapturingSink {
    fn line(&self, line: &str) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line.to_string());
    }
}
