//! knit CLI - check, print and scaffold bundler configuration.
//!
//! This is the main entry point for the knit CLI. It handles command-line argument
//! parsing, logging initialization, and command dispatch.

use clap::Parser;
use knit_cli::{cli, commands, error, logger, ui};
use miette::Result;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = cli::Cli::parse();

    // Initialize logging and colors based on global flags
    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let result = match args.command {
        cli::Command::Check(check_args) => commands::check_execute(check_args),
        cli::Command::Print(print_args) => commands::print_execute(print_args),
        cli::Command::Schema(schema_args) => commands::schema_execute(schema_args),
        cli::Command::Init(init_args) => commands::init_execute(init_args),
    };

    // Convert CLI errors to miette diagnostics for readable error reporting
    result.map_err(error::cli_error_to_miette)
}
