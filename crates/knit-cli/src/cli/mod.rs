//! Command-line interface definition for knit.
//!
//! # Command Structure
//!
//! - `knit check` - Load and validate a configuration
//! - `knit print` - Print the normalized configuration
//! - `knit schema` - Print the JSON Schema of configuration files
//! - `knit init` - Write an example configuration

mod commands;
pub mod enums;

use clap::Parser;

pub use commands::{CheckArgs, Command, InitArgs, LoadArgs, PrintArgs, SchemaArgs};
pub use enums::*;

/// knit - declarative bundler configuration
#[derive(Parser, Debug)]
#[command(
    name = "knit",
    version,
    about = "Load, validate and scaffold knit bundler configuration",
    long_about = "knit reads knit.config.{toml,json,yaml} (or the `knit` field of package.json),\n\
                  applies profiles and environment overrides, and validates the result.\n\
                  Every problem in a configuration is reported at once."
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

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
