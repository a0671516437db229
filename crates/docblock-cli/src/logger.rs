//! Logging setup using the `tracing` ecosystem.
//!
//! - `--verbose` enables debug output for the docblock crates
//! - `--quiet` only shows errors
//! - `RUST_LOG` overrides the default filter
//!
//! Logs go to stderr so that stdout only carries the parsed output.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used by `--verbose`.
pub const VERBOSE_FILTER: &str = "docblock=debug,docblock_cli=debug";
/// Filter used by `--quiet`.
pub const QUIET_FILTER: &str = "docblock=error,docblock_cli=error";
/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "docblock=warn,docblock_cli=info";

/// Initialize the tracing subscriber. Call once, before any logging.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let filter = if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    };
    init_logger_with_filter(filter, no_color);
}

/// Initialize the logger with a custom filter.
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    // a second initialization (tests) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
