//! Reporting of recoverable per-tag failures.

use std::sync::Mutex;

/// A tag interpreter (or the markdown pass) failed on one tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagFailure {
    pub tag: String,
    /// Normalized comment the tag came from.
    pub raw: String,
    /// Error chain, outermost first.
    pub error: String,
}

/// Receives tag failures. The failing tag is left out of its block.
pub trait DiagnosticsSink: Send + Sync {
    fn report(&self, failure: TagFailure);
}

/// Emits failures as `tracing` errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl DiagnosticsSink for TracingDiagnostics {
    fn report(&self, failure: TagFailure) {
        tracing::error!(
            tag = %failure.tag,
            raw = %failure.raw,
            error = %failure.error,
            "Failed to interpret docblock tag"
        );
    }
}

/// Keeps failures in memory, forwarding them to `tracing` as warnings.
#[derive(Debug, Default)]
pub struct CollectingDiagnostics {
    failures: Mutex<Vec<TagFailure>>,
}

impl CollectingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the failures reported so far.
    pub fn failures(&self) -> Vec<TagFailure> {
        self.failures
            .lock()
            .map(|failures| failures.clone())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.failures
            .lock()
            .map(|failures| failures.is_empty())
            .unwrap_or(true)
    }
}

impl DiagnosticsSink for CollectingDiagnostics {
    fn report(&self, failure: TagFailure) {
        tracing::warn!(tag = %failure.tag, error = %failure.error, "Docblock tag skipped");
        if let Ok(mut failures) = self.failures.lock() {
            failures.push(failure);
        }
    }
}
