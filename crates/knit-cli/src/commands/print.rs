//! Print command implementation.
//!
//! Prints the configuration after profiles, environment overrides and
//! normalization, so shorthand forms appear in their long form.

use std::io::Write;

use crate::cli::PrintArgs;
use crate::commands::utils;
use crate::error::Result;

/// Execute the print command.
pub fn execute(args: PrintArgs) -> Result<()> {
    let cwd = utils::get_cwd()?;
    let config = utils::loader(&args.load, &cwd)?.load()?;
    let text = utils::render(config.to_raw().to_value()?, args.format.into())?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
