//! Docblock CLI entry point: argument parsing, logging and command dispatch.

use clap::Parser;
use docblock_cli::{cli, commands, error, logger};
use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);

    let config = args.config.as_deref();
    let result = match args.command {
        cli::Command::Parse(parse_args) => commands::parse_execute(parse_args, config).await,
        cli::Command::Namespaces(ns_args) => commands::namespaces_execute(ns_args, config).await,
    };

    result.map_err(error::cli_error_to_miette)
}
