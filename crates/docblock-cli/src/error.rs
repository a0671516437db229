//! Error types for the docblock CLI.
//!
//! Library errors convert automatically via `#[from]`; every variant carries
//! enough context to act on. [`cli_error_to_miette`] turns them into reports
//! at the top of `main`.

use std::path::PathBuf;

use docblock::DocblockError;
use miette::Report;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Parsing or configuration error reported by the library
    #[error(transparent)]
    Docblock(#[from] DocblockError),

    /// Configuration file or environment could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Reading stdin or a source file failed
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// `--strict` was given and some tags failed to interpret
    #[error("{count} tag(s) could not be interpreted")]
    TagFailures { count: usize },
}

/// Configuration-specific errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Explicit `--config` path does not exist
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Config file extension is neither `.json` nor `.toml`
    #[error("Unsupported config format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// Merged configuration does not match the expected shape
    #[error("Invalid configuration: {0}")]
    Invalid(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(error: figment::Error) -> Self {
        Self::Invalid(Box::new(error))
    }
}

impl CliError {
    /// Actionable hint shown under the error message.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Docblock(DocblockError::SourceNotFound { .. }) => {
                Some("Check the path, or pipe the source through stdin")
            }
            Self::Docblock(DocblockError::Config { .. }) => {
                Some("filterByTag values must be strings, { \"regex\": \"...\" } objects or lists of those")
            }
            Self::Config(ConfigError::NotFound(_)) => {
                Some("Create docblock.config.json or docblock.config.toml, or drop --config")
            }
            Self::Config(ConfigError::UnsupportedFormat(_)) => Some("Use a .json or .toml file"),
            Self::Config(ConfigError::Invalid(_)) => {
                Some("Check the config file and DOCBLOCK_* environment variables")
            }
            Self::TagFailures { .. } => Some("Run with --verbose to see every failing tag"),
            _ => None,
        }
    }
}

/// Convert a CLI error into a miette report.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err.hint() {
        Some(hint) => miette::miette!("{err}\n\nHint: {hint}"),
        None => miette::miette!("{err}"),
    }
}
