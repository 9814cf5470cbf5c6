//! Loading: source -> layers -> raw configuration -> normalized configuration.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, instrument};

use crate::config::{apply_env, apply_profile};
use crate::error::{ConfigError, Result, ValidationErrors};
use crate::normalized::NormalizedConfig;
use crate::options::RawConfig;
use crate::source::{ConfigSource, Format};

/// Prefix of environment overrides when none is given.
pub const DEFAULT_ENV_PREFIX: &str = "KNIT_";

/// Loads a configuration from one source, with optional profile and
/// environment layers.
///
/// # Example
///
/// ```
/// use knit_config::ConfigLoader;
/// use serde_json::json;
///
/// let config = ConfigLoader::new(json!({
///     "entry": { "app": "./src/app.js" },
///     "profiles": { "dev": { "mode": "development" } }
/// }))
/// .profile("dev")
/// .load()
/// .unwrap();
///
/// assert_eq!(config.mode().as_str(), "development");
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    source: ConfigSource,
    profile: Option<String>,
    env_prefix: Option<String>,
}

impl ConfigLoader {
    pub fn new(source: impl Into<ConfigSource>) -> Self {
        Self {
            source: source.into(),
            profile: None,
            env_prefix: None,
        }
    }

    /// Merges the named entry of `profiles` over the base configuration.
    pub fn profile(mut self, name: impl Into<String>) -> Self {
        self.profile = Some(name.into());
        self
    }

    /// Overlays `PREFIX_KEY` / `PREFIX_SECTION__KEY` environment variables last.
    pub fn env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    /// Overlays environment variables with the default `KNIT_` prefix.
    pub fn with_env(self) -> Self {
        self.env_prefix(DEFAULT_ENV_PREFIX)
    }

    pub fn source(&self) -> &ConfigSource {
        &self.source
    }

    /// Reads, layers and deserializes the configuration without normalizing it.
    pub fn load_raw(&self) -> Result<RawConfig> {
        let (raw, pending) = self.read_raw()?;
        pending.finish(raw).map_err(ConfigError::from)
    }

    /// Loads and validates the configuration.
    ///
    /// Validation problems are collected: the error lists every issue found,
    /// including duplicate keys in JSON sources.
    #[instrument(level = "debug", skip(self), fields(profile = self.profile.as_deref()))]
    pub fn load(&self) -> Result<NormalizedConfig> {
        let (raw, mut pending) = self.read_raw()?;
        match NormalizedConfig::from_raw(raw) {
            Ok(config) => pending.finish(config).map_err(ConfigError::from),
            Err(errors) => {
                pending.extend(errors);
                Err(ConfigError::Invalid(pending))
            }
        }
    }

    fn read_raw(&self) -> Result<(RawConfig, ValidationErrors)> {
        let document = self.source.read()?;
        let pending = document.duplicate_errors();
        let mut value = document.value;

        if let Some(profile) = &self.profile {
            apply_profile(&mut value, profile)?;
        }
        if let Some(prefix) = &self.env_prefix {
            apply_env(&mut value, prefix)?;
        }

        let mut raw = match RawConfig::from_value(value) {
            Ok(raw) => raw,
            Err(ConfigError::Invalid(errors)) => {
                // duplicate keys come first, they usually explain the rest
                let mut all = pending;
                all.extend(errors);
                return Err(ConfigError::Invalid(all));
            }
            Err(other) => return Err(other),
        };

        if let Some(base) = self.source.base_dir() {
            raw.context = Some(resolve_context(base, raw.context.as_deref()));
        }
        debug!(
            mode = raw.mode.as_str(),
            context = ?raw.context,
            "deserialized configuration"
        );

        Ok((raw, pending))
    }
}

/// Relative contexts are relative to the configuration file.
fn resolve_context(base: &Path, context: Option<&Path>) -> PathBuf {
    match context {
        Some(context) if context.is_absolute() => context.to_path_buf(),
        Some(context) => base.join(context),
        None => base.to_path_buf(),
    }
}

/// Loads the configuration file at `path`.
pub fn load(path: impl AsRef<Path>) -> Result<NormalizedConfig> {
    ConfigLoader::new(path.as_ref()).load()
}

/// Loads a configuration from an in-memory structure.
pub fn load_value(value: Value) -> Result<NormalizedConfig> {
    ConfigLoader::new(value).load()
}

/// Loads configuration text in the given format.
pub fn load_str(content: &str, format: Format) -> Result<NormalizedConfig> {
    ConfigLoader::new(ConfigSource::text(content, format)).load()
}
