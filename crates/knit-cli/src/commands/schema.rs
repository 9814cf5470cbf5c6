//! Schema command implementation.

use std::fs;
use std::io::Write;

use knit_config::json_schema;

use crate::cli::SchemaArgs;
use crate::error::{Result, ResultExt};
use crate::ui;

/// Execute the schema command.
///
/// Prints the JSON Schema of configuration files, or writes it to `--output`
/// for editors that read a local schema file.
pub fn execute(args: SchemaArgs) -> Result<()> {
    let mut text = serde_json::to_string_pretty(&json_schema()).context("Failed to render schema")?;
    text.push('\n');

    match args.output {
        Some(path) => {
            fs::write(&path, text).with_path(&path)?;
            ui::success(&format!("Wrote {}", path.display()));
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
