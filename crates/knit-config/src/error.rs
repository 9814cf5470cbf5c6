//! Error types for configuration loading and validation.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::pattern::PatternError;
use crate::source::Format;
use crate::template::TemplateError;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    // Source discovery and reading
    #[error("no configuration file found in {}", .0.display())]
    NotFound(PathBuf),

    #[error("unsupported configuration format: {0}")]
    UnsupportedFormat(String),

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid {format} syntax: {message}")]
    Parse { format: Format, message: String },

    #[error("{} has no '{field}' field", .path.display())]
    MissingPackageField { path: PathBuf, field: String },

    // Layering
    #[error("profile '{0}' is not defined in the configuration")]
    ProfileNotFound(String),

    #[error("invalid profile override: {message}")]
    InvalidProfileOverride { message: String },

    #[error("invalid environment override: {0}")]
    Env(String),

    // Validation (every issue found in one pass)
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),

    #[error("failed to serialize configuration: {0}")]
    Serialize(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    /// The validation issues, when loading failed validation.
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            ConfigError::Invalid(errors) => Some(errors),
            _ => None,
        }
    }
}

/// A single problem found while validating a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required field '{field}': {hint}")]
    MissingField { field: String, hint: String },

    #[error("no entries specified: at least one entry point is required")]
    NoEntries,

    #[error("entry '{name}' is declared more than once")]
    DuplicateEntry { name: String },

    #[error("key '{path}' is declared more than once")]
    DuplicateKey { path: String },

    #[error("invalid entry name '{name}': {reason}")]
    InvalidEntryName { name: String, reason: String },

    #[error("entry '{name}' has no modules to import")]
    EmptyEntry { name: String },

    #[error("entry '{entry}' depends on undeclared entry '{dependency}'")]
    UnknownDependency { entry: String, dependency: String },

    #[error("entry dependencies form a cycle: {cycle}")]
    DependencyCycle { cycle: String },

    #[error("invalid filename template for '{field}' ({template}): {source}")]
    InvalidTemplate {
        field: String,
        template: String,
        #[source]
        source: TemplateError,
    },

    #[error(
        "filename template for '{field}' ({template}) would give several outputs the same name; add [name], [id] or a content hash"
    )]
    AmbiguousFilename { field: String, template: String },

    #[error("invalid pattern for '{field}' ({pattern}): {source}")]
    InvalidPattern {
        field: String,
        pattern: String,
        #[source]
        source: PatternError,
    },

    #[error("invalid value for '{field}': {value} ({hint})")]
    InvalidValue {
        field: String,
        value: String,
        hint: String,
    },

    #[error("malformed configuration: {message}")]
    Malformed { message: String },

    // Filesystem checks
    #[error("entry '{entry}' imports a module that does not exist: {}", .path.display())]
    EntryNotFound { entry: String, path: PathBuf },

    #[error("path for '{field}' does not exist: {}", .path.display())]
    PathNotFound { field: String, path: PathBuf },
}

impl ValidationError {
    pub(crate) fn invalid_value(
        field: impl Into<String>,
        value: impl fmt::Display,
        hint: impl Into<String>,
    ) -> Self {
        ValidationError::InvalidValue {
            field: field.into(),
            value: value.to_string(),
            hint: hint.into(),
        }
    }
}

/// Every validation issue found in a configuration.
///
/// Never empty when returned as an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub(crate) fn extend(&mut self, other: ValidationErrors) {
        self.errors.extend(other.errors);
    }

    /// `Ok(value)` when nothing was recorded, otherwise `Err(self)`.
    pub(crate) fn finish<T>(self, value: T) -> std::result::Result<T, Self> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    pub fn into_vec(self) -> Vec<ValidationError> {
        self.errors
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.errors.len();
        write!(
            f,
            "configuration is invalid ({count} {})",
            if count == 1 { "error" } else { "errors" }
        )?;
        for error in &self.errors {
            write!(f, "\n  - {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
