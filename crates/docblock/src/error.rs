use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for docblock operations.
pub type Result<T> = std::result::Result<T, DocblockError>;

/// Error variants for docblock parsing.
///
/// Failures of individual tag interpreters are not represented here: they are
/// reported through a [`DiagnosticsSink`](crate::diagnostics::DiagnosticsSink)
/// and the tag is left out of the block.
#[derive(Debug, Error)]
pub enum DocblockError {
    /// Invalid parser configuration (tag filters, registry aliases, ...).
    #[error("invalid configuration: {message}")]
    Config {
        /// Human-readable description of the problem.
        message: String,
    },

    /// A path source does not exist on the filesystem.
    #[error("source path '{path}' does not exist on the filesystem")]
    SourceNotFound {
        /// Path that was requested.
        path: PathBuf,
    },

    /// A path source was requested on a target without filesystem access.
    #[error("cannot read '{path}': no filesystem available on this target, pass the source text instead")]
    FilesystemUnavailable {
        /// Path that was requested.
        path: PathBuf,
    },

    /// Failed to read a source file.
    #[error("failed to read source '{path}': {error}")]
    Io {
        /// Path to the source file that caused the error.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        error: std::io::Error,
    },

    /// Parsed results were accessed before `parse` completed.
    #[error("{what} has not been parsed yet, call `parse().await` first")]
    NotParsed {
        /// Which object was accessed.
        what: &'static str,
    },

    /// Serializing a projection failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DocblockError {
    /// Helper to create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
