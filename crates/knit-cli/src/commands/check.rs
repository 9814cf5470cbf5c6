//! Check command implementation.
//!
//! Validates a configuration without building.

use std::path::Path;

use knit_config::{NormalizedConfig, lint, validate_fs};
use tracing::debug;

use crate::cli::CheckArgs;
use crate::commands::utils;
use crate::error::Result;
use crate::ui;

/// Execute the check command.
///
/// # Validation Steps
///
/// 1. Load the configuration with its profile and environment layers
/// 2. Report every validation error (the command fails)
/// 3. Check paths on disk (if --fs flag)
/// 4. Report lints (if --lints flag)
pub fn execute(args: CheckArgs) -> Result<()> {
    let cwd = utils::get_cwd()?;
    run(&args, &cwd)
}

fn run(args: &CheckArgs, cwd: &Path) -> Result<()> {
    let loader = utils::loader(&args.load, cwd)?;
    let source = loader.source().to_string();
    ui::info(&format!("Checking {source}..."));

    let config = match loader.load() {
        Ok(config) => config,
        Err(err) => {
            ui::error(&format!("{source} is invalid"));
            return Err(err.into());
        }
    };
    ui::success(&format!(
        "Configuration is valid ({} {}, {} mode)",
        config.entries().len(),
        if config.entries().len() == 1 { "entry" } else { "entries" },
        config.mode().as_str()
    ));

    if args.fs {
        ui::info("Checking paths...");
        validate_fs(&config, cwd)?;
        ui::success("All referenced paths exist");
    }

    if args.lints {
        report_lints(&config);
    }

    Ok(())
}

fn report_lints(config: &NormalizedConfig) {
    let lints = lint(config);
    debug!(count = lints.len(), "linted configuration");

    if lints.is_empty() {
        ui::info("No lints found");
    } else {
        ui::warning(&format!("Found {} potential issues:", lints.len()));
        for lint in lints {
            ui::warning(&format!("  - {lint}"));
        }
    }
}
