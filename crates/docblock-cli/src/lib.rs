//! Docblock CLI - extract JSDoc-style docblocks from source files.
//!
//! The CLI is organized into several key modules:
//!
//! - [`cli`] - Argument definitions (clap derive)
//! - [`config`] - Layered configuration: defaults, config file, environment, flags
//! - [`commands`] - `parse` and `namespaces` implementations
//! - [`error`] - Error types and miette conversion
//! - [`logger`] - Structured logging with tracing
//!
//! # Example
//!
//! ```rust,no_run
//! use docblock_cli::{error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, false, false);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;

pub use error::{CliError, Result};
