//! Command-line interface definition.
//!
//! - `docblock parse` - Parse files (or stdin) and print their docblocks
//! - `docblock namespaces` - Index the first namespaced docblock of every file in a folder

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Docblock - extract JSDoc-style docblocks as structured data
#[derive(Parser, Debug)]
#[command(
    name = "docblock",
    version,
    about = "Extract JSDoc-style docblocks as structured data",
    long_about = "Docblock finds every /** ... */ comment in a source file, interprets its\n\
                  @tags (params, authors, examples, namespaces...) and prints the result\n\
                  as JSON or as the normalized comment text."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file (JSON or TOML)
    ///
    /// Defaults to docblock.config.json or docblock.config.toml in the
    /// current directory when present.
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse docblocks from files, or from stdin when no file is given
    Parse(ParseArgs),

    /// Index the first namespaced docblock of every file in a folder
    Namespaces(NamespacesArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct ParseArgs {
    /// Source files to parse
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Keep only blocks whose tag has this value (repeatable, `tag=value`)
    #[arg(long = "filter-tag", value_name = "TAG=VALUE", value_parser = parse_filter_tag)]
    pub filter_tag: Vec<(String, String)>,

    /// Render markdown in interpreted values
    #[arg(long)]
    pub render_markdown: bool,

    /// Fail when any tag could not be interpreted
    #[arg(long)]
    pub strict: bool,
}

#[derive(Args, Debug, Clone)]
pub struct NamespacesArgs {
    /// Folder to scan
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Glob of files to skip, relative to DIR (repeatable)
    #[arg(long, value_name = "GLOB")]
    pub exclude: Vec<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Interpreted records as pretty JSON
    #[default]
    Json,
    /// Normalized comment text of every block
    Text,
}

/// Parse a `tag=value` filter.
pub fn parse_filter_tag(raw: &str) -> Result<(String, String), String> {
    let (tag, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected TAG=VALUE, got '{raw}'"))?;
    let tag = tag.trim().trim_start_matches('@');
    if tag.is_empty() {
        return Err(format!("missing tag name in '{raw}'"));
    }
    Ok((tag.to_string(), value.trim().to_string()))
}
