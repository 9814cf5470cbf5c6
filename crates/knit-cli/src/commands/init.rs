//! Init command implementation.
//!
//! Writes an example configuration file covering most options.

use std::fs;
use std::path::{Path, PathBuf};

use knit_config::{CONFIG_FILE_NAMES, Format, RawConfig};

use crate::cli::InitArgs;
use crate::commands::utils;
use crate::error::{CliError, Result, ResultExt};
use crate::ui;

/// Execute the init command.
///
/// # Errors
///
/// Returns `CliError::AlreadyExists` when the target file exists and
/// `--force` was not given, and I/O errors for a missing directory.
pub fn execute(args: InitArgs) -> Result<()> {
    let cwd = utils::get_cwd()?;
    let dir = match &args.dir {
        Some(dir) => utils::resolve_path(dir, &cwd),
        None => cwd,
    };

    let path = write_example(&dir, args.format.into(), args.force)?;
    ui::success(&format!("Created {}", path.display()));

    let others = other_configs(&dir, &path);
    if let Some(first) = others.first() {
        ui::warning(&format!(
            "{} is also present and is searched first",
            first.display()
        ));
    }

    ui::info("Next: run `knit check --lints` to validate it");
    Ok(())
}

/// Write the example configuration into `dir`, returning the file written.
fn write_example(dir: &Path, format: Format, force: bool) -> Result<PathBuf> {
    if !dir.is_dir() {
        return Err(CliError::FileNotFound(dir.to_path_buf()));
    }

    let path = dir.join(format!("knit.config.{}", format.extension()));
    if path.exists() && !force {
        return Err(CliError::AlreadyExists(path));
    }

    let text = utils::render(RawConfig::example().to_value()?, format)?;
    fs::write(&path, text).with_path(&path)?;
    Ok(path)
}

/// Configuration files in `dir` that discovery would pick before `written`.
fn other_configs(dir: &Path, written: &Path) -> Vec<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .take_while(|path| path != written)
        .filter(|path| path.is_file())
        .collect()
}
