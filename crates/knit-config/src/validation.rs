//! Pluggable config validation strategies
//!
//! Normalization already checks everything that can be checked from the
//! configuration alone. Validators add checks against the outside world, such
//! as the filesystem, and are run on demand (the CLI's `check --fs`).

use std::path::{Path, PathBuf};

use crate::error::{ValidationError, ValidationErrors};
use crate::normalized::NormalizedConfig;
use crate::options::RawConfig;

/// Trait for pluggable config validation strategies
pub trait ConfigValidator {
    /// Validate a loaded configuration, reporting every problem found
    fn validate(&self, config: &NormalizedConfig) -> Result<(), ValidationErrors>;
}

/// Filesystem validator (for CLI use)
///
/// Checks that entry modules given as paths, alias targets given as paths and
/// the dev server's static directory exist. Paths are resolved against the
/// root joined with the configuration's `context`. Bare package specifiers
/// such as `react` are left to the build engine.
///
/// # Example
///
/// ```no_run
/// use knit_config::{load_value, ConfigValidator, FsValidator};
/// use serde_json::json;
///
/// let config = load_value(json!({ "entry": "./src/index.js" })).unwrap();
/// FsValidator::new(".").validate(&config).unwrap();
/// ```
pub struct FsValidator {
    root: PathBuf,
}

impl FsValidator {
    /// Create a new filesystem validator with a root directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn base(&self, config: &NormalizedConfig) -> PathBuf {
        match config.context() {
            Some(context) => self.root.join(context),
            None => self.root.clone(),
        }
    }
}

impl ConfigValidator for FsValidator {
    fn validate(&self, config: &NormalizedConfig) -> Result<(), ValidationErrors> {
        let base = self.base(config);
        let mut errors = ValidationErrors::new();

        for entry in config.entries().values() {
            for import in entry.imports.iter().filter(|i| is_path_specifier(i)) {
                let path = base.join(import);
                if !path.exists() {
                    errors.push(ValidationError::EntryNotFound {
                        entry: entry.name.clone(),
                        path,
                    });
                }
            }
        }

        for (alias, target) in &config.resolve().alias {
            if !is_path_specifier(target) {
                continue;
            }
            let path = base.join(target);
            if !path.exists() {
                errors.push(ValidationError::PathNotFound {
                    field: format!("resolve.alias.{alias}"),
                    path,
                });
            }
        }

        if let Some(dir) = config.dev_server().and_then(|server| server.static_dir.as_ref()) {
            let path = base.join(dir);
            if !path.is_dir() {
                errors.push(ValidationError::PathNotFound {
                    field: "dev_server.static_dir".to_string(),
                    path,
                });
            }
        }

        errors.finish(())
    }
}

/// Relative (`./`, `../`) or absolute paths, as opposed to package names.
fn is_path_specifier(specifier: &str) -> bool {
    specifier.starts_with("./")
        || specifier.starts_with("../")
        || specifier.starts_with(".\\")
        || specifier.starts_with("..\\")
        || Path::new(specifier).is_absolute()
}

/// Convenience function for schema-only validation of a raw configuration
///
/// # Example
///
/// ```
/// use knit_config::{validate_schema, RawConfig};
/// use serde_json::json;
///
/// let raw = RawConfig::from_value(json!({ "entry": "./index.js" })).unwrap();
/// validate_schema(&raw).unwrap();
/// ```
pub fn validate_schema(raw: &RawConfig) -> Result<(), ValidationErrors> {
    NormalizedConfig::from_raw(raw.clone()).map(|_| ())
}

/// Convenience function for filesystem validation
///
/// # Example
///
/// ```no_run
/// use knit_config::{load_value, validate_fs};
/// use serde_json::json;
///
/// let config = load_value(json!({ "entry": "./src/index.js" })).unwrap();
/// validate_fs(&config, ".").unwrap();
/// ```
pub fn validate_fs(config: &NormalizedConfig, root: impl AsRef<Path>) -> Result<(), ValidationErrors> {
    FsValidator::new(root).validate(config)
}
