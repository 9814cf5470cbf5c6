use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::cli::enums::OutputFormat;

/// Available knit subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a configuration
    ///
    /// Loads the configuration, applies the profile and environment
    /// overrides, and reports every validation error. Exits non-zero when the
    /// configuration is invalid.
    Check(CheckArgs),

    /// Print the normalized configuration
    ///
    /// Entries, rules and plugins are printed in their canonical long form,
    /// with defaults filled in.
    Print(PrintArgs),

    /// Print the JSON Schema for configuration files
    Schema(SchemaArgs),

    /// Write an example configuration file
    Init(InitArgs),
}

/// Where the configuration comes from and which layers apply
#[derive(Args, Debug, Default)]
pub struct LoadArgs {
    /// Path to the configuration file
    ///
    /// If not provided, searches the current directory for knit.config.toml,
    /// knit.config.json, knit.config.yaml, knit.config.yml and then the
    /// `knit` field of package.json.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Profile merged over the base configuration
    #[arg(short, long, value_name = "NAME")]
    pub profile: Option<String>,

    /// Apply KNIT_* environment overrides (e.g. KNIT_OUTPUT__PATH=build)
    #[arg(long)]
    pub env: bool,
}

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub load: LoadArgs,

    /// Also check that entry modules and aliased paths exist on disk
    #[arg(long)]
    pub fs: bool,

    /// Report best-practice advisories for a valid configuration
    #[arg(short, long)]
    pub lints: bool,
}

/// Arguments for the print command
#[derive(Args, Debug)]
pub struct PrintArgs {
    #[command(flatten)]
    pub load: LoadArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: OutputFormat,
}

/// Arguments for the schema command
#[derive(Args, Debug)]
pub struct SchemaArgs {
    /// Write the schema to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Configuration file format
    #[arg(short, long, value_enum, default_value = "toml")]
    pub format: OutputFormat,

    /// Directory to write the configuration into
    #[arg(short, long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Overwrite an existing configuration file
    #[arg(long)]
    pub force: bool,
}
