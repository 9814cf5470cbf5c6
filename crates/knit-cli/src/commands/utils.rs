//! Helpers shared by the commands.

use std::path::{Path, PathBuf};

use knit_config::{ConfigDiscovery, ConfigLoader, DEFAULT_ENV_PREFIX, Format};
use serde_json::Value;
use tracing::debug;

use crate::cli::LoadArgs;
use crate::error::{CliError, Result};

/// Get current working directory with error context.
pub fn get_cwd() -> Result<PathBuf> {
    std::env::current_dir()
        .map_err(|e| CliError::Custom(format!("Failed to get current working directory: {e}")))
}

/// Build a loader for `args`: an explicit `--config` file, or the file found
/// in `cwd`.
pub fn loader(args: &LoadArgs, cwd: &Path) -> Result<ConfigLoader> {
    let mut loader = match &args.config {
        Some(path) => {
            let path = resolve_path(path, cwd);
            if !path.is_file() {
                return Err(CliError::FileNotFound(path));
            }
            ConfigLoader::new(path)
        }
        None => ConfigDiscovery::new(cwd).loader()?,
    };

    if let Some(profile) = &args.profile {
        loader = loader.profile(profile);
    }
    if args.env {
        loader = loader.env_prefix(DEFAULT_ENV_PREFIX);
    }
    debug!(source = %loader.source(), profile = ?args.profile, env = args.env, "configured loader");
    Ok(loader)
}

/// Resolve a path relative to the current working directory.
pub fn resolve_path(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// Render a configuration document in `format`.
///
/// Nulls are dropped first: TOML has no null, and an omitted key means the
/// same thing to the loader in every format.
pub fn render(mut value: Value, format: Format) -> Result<String> {
    drop_nulls(&mut value);
    let text = match format {
        Format::Json => {
            let mut text = serde_json::to_string_pretty(&value)?;
            text.push('\n');
            text
        }
        Format::Toml => toml::to_string_pretty(&value)?,
        Format::Yaml => serde_yaml::to_string(&value)?,
    };
    Ok(text)
}

fn drop_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            map.values_mut().for_each(drop_nulls);
        }
        Value::Array(items) => items.iter_mut().for_each(drop_nulls),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use knit_config::{RawConfig, load_str};
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_path_absolute() {
        let cwd = Path::new("/project");
        let abs = if cfg!(windows) { Path::new("C:\\abs\\knit.config.toml") } else { Path::new("/abs/knit.config.toml") };
        assert_eq!(resolve_path(abs, cwd), abs);
    }

    #[test]
    fn test_resolve_path_relative() {
        let cwd = Path::new("/project");
        assert_eq!(
            resolve_path(Path::new("config/knit.config.toml"), cwd),
            PathBuf::from("/project/config/knit.config.toml")
        );
    }

    #[test]
    fn test_loader_missing_explicit_file() {
        let temp = TempDir::new().unwrap();
        let args = LoadArgs {
            config: Some(PathBuf::from("missing.toml")),
            ..LoadArgs::default()
        };
        let err = loader(&args, temp.path()).unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(path) if path.ends_with("missing.toml")));
    }

    #[test]
    fn test_loader_discovers_and_applies_profile() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("knit.config.yaml"),
            "entry: ./a.js\nprofiles:\n  dev:\n    mode: development\n",
        )
        .unwrap();

        let args = LoadArgs {
            profile: Some("dev".into()),
            ..LoadArgs::default()
        };
        let config = loader(&args, temp.path()).unwrap().load().unwrap();
        assert!(!config.mode().is_production());
    }

    #[test]
    fn test_get_cwd() {
        assert!(get_cwd().unwrap().is_absolute());
    }

    #[test]
    fn test_drop_nulls_nested() {
        let mut value = json!({ "a": null, "b": { "c": null, "d": 1 }, "e": [{ "f": null }] });
        drop_nulls(&mut value);
        assert_eq!(value, json!({ "b": { "d": 1 }, "e": [{}] }));
    }

    #[test]
    fn test_render_example_reloads_in_every_format() {
        let value = RawConfig::example().to_value().unwrap();
        for format in [Format::Json, Format::Toml, Format::Yaml] {
            let text = render(value.clone(), format).unwrap();
            let config = load_str(&text, format).unwrap();
            assert_eq!(config.entries().len(), 2, "{format}");
        }
    }
}
