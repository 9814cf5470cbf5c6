//! File-based config discovery for CLI use
//!
//! Handles finding and loading knit configuration files from the filesystem.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::loader::ConfigLoader;
use crate::normalized::NormalizedConfig;
use crate::source::PACKAGE_FIELD;

/// Configuration file names, in the order they are searched.
pub const CONFIG_FILE_NAMES: [&str; 4] = [
    "knit.config.toml",
    "knit.config.json",
    "knit.config.yaml",
    "knit.config.yml",
];

/// File-based configuration discovery
///
/// Searches for knit configuration files in conventional locations and loads them.
/// This is primarily for CLI use - library users should use [`ConfigLoader`] or
/// [`load_value`](crate::load_value) directly.
///
/// # Example
///
/// ```no_run
/// use knit_config::ConfigDiscovery;
///
/// let discovery = ConfigDiscovery::new(".");
/// let config = discovery.load().unwrap();
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
}

impl ConfigDiscovery {
    /// Create a new config discovery with a root directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Find a config file in the root directory
    ///
    /// Searches in this order:
    /// 1. knit.config.toml, knit.config.json, knit.config.yaml, knit.config.yml
    /// 2. package.json (knit field)
    pub fn find(&self) -> Option<PathBuf> {
        for name in CONFIG_FILE_NAMES {
            let path = self.root.join(name);
            if path.is_file() {
                return Some(path);
            }
        }

        // package.json with knit field
        let pkg_path = self.root.join("package.json");
        if pkg_path.is_file() {
            if let Ok(content) = fs::read_to_string(&pkg_path) {
                if let Ok(parsed) = serde_json::from_str::<Value>(&content) {
                    if parsed.get(PACKAGE_FIELD).is_some_and(|field| !field.is_null()) {
                        return Some(pkg_path);
                    }
                }
            }
        }

        None
    }

    /// A loader for the discovered file, to add a profile or environment layer
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if no config file is found.
    pub fn loader(&self) -> Result<ConfigLoader> {
        let path = self
            .find()
            .ok_or_else(|| ConfigError::NotFound(self.root.clone()))?;
        debug!(path = %path.display(), "discovered configuration");
        Ok(ConfigLoader::new(path))
    }

    /// Load config from discovered file
    pub fn load(&self) -> Result<NormalizedConfig> {
        self.loader()?.load()
    }

    /// Load config with profile merging
    pub fn load_with_profile(&self, profile: &str) -> Result<NormalizedConfig> {
        self.loader()?.profile(profile).load()
    }
}

/// Discover and load config from current directory (convenience function)
///
/// # Example
///
/// ```no_run
/// use knit_config::discover;
///
/// let config = discover().unwrap();
/// ```
pub fn discover() -> Result<NormalizedConfig> {
    let root = std::env::current_dir()?;
    ConfigDiscovery::new(&root).load()
}

/// Discover and load config with profile (convenience function)
///
/// # Example
///
/// ```no_run
/// use knit_config::discover_with_profile;
///
/// let config = discover_with_profile("production").unwrap();
/// ```
pub fn discover_with_profile(profile: &str) -> Result<NormalizedConfig> {
    let root = std::env::current_dir()?;
    ConfigDiscovery::new(&root).load_with_profile(profile)
}
