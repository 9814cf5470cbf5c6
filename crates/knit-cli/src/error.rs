//! Error handling for the knit CLI.
//!
//! `CliError` wraps the loader's `ConfigError` and the failures the commands
//! themselves can hit (arguments, files, output rendering). Each variant is
//! meant to be actionable; `main` renders them through miette.

mod report;

use std::path::PathBuf;

use thiserror::Error;

pub use report::cli_error_to_miette;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Loading or validating the configuration failed
    #[error(transparent)]
    Config(#[from] knit_config::ConfigError),

    /// File or directory not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Refusing to replace an existing file
    #[error("{} already exists", .0.display())]
    AlreadyExists(PathBuf),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML serialization errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),

    /// YAML serialization errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Generic errors with custom messages
    #[error("{0}")]
    Custom(String),
}

impl From<knit_config::ValidationErrors> for CliError {
    fn from(errors: knit_config::ValidationErrors) -> Self {
        CliError::Config(errors.into())
    }
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Extension trait for adding context to `Result` types.
pub trait ResultExt<T> {
    /// Report a missing file as [`CliError::FileNotFound`] for `path`.
    ///
    /// ```rust,no_run
    /// # use std::path::Path;
    /// # use knit_cli::error::{Result, ResultExt};
    /// # fn run() -> Result<()> {
    /// let path = Path::new("knit.config.toml");
    /// std::fs::read_to_string(path).with_path(path)?;
    /// # Ok(())
    /// # }
    /// ```
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T>;

    /// Prefix the error with what was being done.
    fn context(self, msg: impl std::fmt::Display) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T> {
        self.map_err(|e| match e.into() {
            CliError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => {
                CliError::FileNotFound(path.as_ref().to_path_buf())
            }
            other => other,
        })
    }

    fn context(self, msg: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{msg}: {err}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use knit_config::{ConfigError, ValidationError, ValidationErrors};

    #[test]
    fn test_config_error_is_transparent() {
        let err: CliError = ConfigError::ProfileNotFound("staging".into()).into();
        assert_eq!(err.to_string(), ConfigError::ProfileNotFound("staging".into()).to_string());
    }

    #[test]
    fn test_validation_errors_convert_to_config() {
        let errors = ValidationErrors::from(ValidationError::NoEntries);
        let err: CliError = errors.into();
        assert!(matches!(err, CliError::Config(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_result_ext_with_path() {
        let result: std::io::Result<()> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "file not found",
        ));

        let err = result.with_path("/test/knit.config.toml").unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(path) if path.ends_with("knit.config.toml")));
    }

    #[test]
    fn test_result_ext_keeps_other_io_errors() {
        let result: std::io::Result<()> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert!(matches!(result.with_path("x").unwrap_err(), CliError::Io(_)));
    }

    #[test]
    fn test_result_ext_context() {
        let result: std::result::Result<(), CliError> =
            Err(CliError::Custom("bad".into()));

        let err = result.context("Failed to render").unwrap_err();
        assert_eq!(err.to_string(), "Failed to render: bad");
    }
}
