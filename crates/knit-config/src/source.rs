//! Where a configuration comes from, and how its text becomes a JSON value.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::error::{ConfigError, Result, ValidationError, ValidationErrors};
use crate::options::RawConfig;
use crate::strict;

/// Field of `package.json` holding the configuration.
pub const PACKAGE_FIELD: &str = "knit";

/// Text formats a configuration can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Json,
    Toml,
    Yaml,
}

impl Format {
    /// Infers the format from a file extension (`json`, `toml`, `yaml`, `yml`).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "json" => Some(Format::Json),
            "toml" => Some(Format::Toml),
            "yaml" | "yml" => Some(Format::Yaml),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    pub fn extension(self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Toml => "toml",
            Format::Yaml => "yaml",
        }
    }

    /// Parses `content` into a JSON value.
    ///
    /// Duplicate keys in JSON and YAML documents do not fail the parse (the
    /// last one wins in the value); they are returned as validation errors so
    /// they can be reported together with everything else. TOML rejects
    /// duplicate keys while parsing.
    pub(crate) fn parse(self, content: &str) -> Result<Document> {
        let parse_error = |message: String| ConfigError::Parse {
            format: self,
            message,
        };

        match self {
            Format::Json => {
                let value: Value =
                    serde_json::from_str(content).map_err(|e| parse_error(e.to_string()))?;
                let duplicates =
                    strict::duplicate_keys(content).map_err(|e| parse_error(e.to_string()))?;
                Ok(Document { value, duplicates })
            }
            Format::Toml => {
                let table: toml::Table =
                    toml::from_str(content).map_err(|e| parse_error(e.to_string()))?;
                let value = serde_json::to_value(table).map_err(|e| parse_error(e.to_string()))?;
                Ok(Document::new(value))
            }
            Format::Yaml => {
                let value: Value =
                    serde_yaml::from_str(content).map_err(|e| parse_error(e.to_string()))?;
                // an empty YAML document is an empty configuration
                let value = if value.is_null() {
                    Value::Object(serde_json::Map::new())
                } else {
                    value
                };
                let duplicates =
                    strict::duplicate_yaml_keys(content).map_err(|e| parse_error(e.to_string()))?;
                Ok(Document { value, duplicates })
            }
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Format::Json => "JSON",
            Format::Toml => "TOML",
            Format::Yaml => "YAML",
        };
        f.write_str(name)
    }
}

/// A parsed configuration document, before layering and deserialization.
#[derive(Debug, Clone)]
pub(crate) struct Document {
    pub value: Value,
    /// Key paths declared more than once, e.g. `["entry", "app"]`.
    pub duplicates: Vec<Vec<String>>,
}

impl Document {
    fn new(value: Value) -> Self {
        Self {
            value,
            duplicates: Vec::new(),
        }
    }

    /// Duplicate keys as validation errors; repeated entry names get their own variant.
    pub(crate) fn duplicate_errors(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        for path in &self.duplicates {
            let error = match path.as_slice() {
                [root, name] if root == "entry" => ValidationError::DuplicateEntry { name: name.clone() },
                _ => ValidationError::DuplicateKey {
                    path: path.join("."),
                },
            };
            errors.push(error);
        }
        errors
    }
}

/// Input accepted by [`ConfigLoader`](crate::ConfigLoader).
#[derive(Debug, Clone)]
pub enum ConfigSource {
    /// A configuration file; the format comes from the extension.
    /// `package.json` is read through its `knit` field.
    File(PathBuf),
    /// Configuration text held in memory.
    Str { content: String, format: Format },
    /// An already-parsed structure (for configuration from a database or an API).
    Value(Value),
    /// A typed configuration built in code.
    Raw(RawConfig),
}

impl ConfigSource {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        ConfigSource::File(path.into())
    }

    pub fn text(content: impl Into<String>, format: Format) -> Self {
        ConfigSource::Str {
            content: content.into(),
            format,
        }
    }

    /// Directory relative paths in the configuration are resolved against.
    pub fn base_dir(&self) -> Option<&Path> {
        match self {
            ConfigSource::File(path) => path.parent().map(|parent| {
                if parent.as_os_str().is_empty() {
                    Path::new(".")
                } else {
                    parent
                }
            }),
            _ => None,
        }
    }

    pub(crate) fn read(&self) -> Result<Document> {
        match self {
            ConfigSource::File(path) => read_file(path),
            ConfigSource::Str { content, format } => format.parse(content),
            ConfigSource::Value(value) => Ok(Document::new(value.clone())),
            ConfigSource::Raw(raw) => Ok(Document::new(raw.to_value()?)),
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "{}", path.display()),
            ConfigSource::Str { format, .. } => write!(f, "<inline {format}>"),
            ConfigSource::Value(_) => f.write_str("<value>"),
            ConfigSource::Raw(_) => f.write_str("<typed configuration>"),
        }
    }
}

impl From<PathBuf> for ConfigSource {
    fn from(path: PathBuf) -> Self {
        ConfigSource::File(path)
    }
}

impl From<&Path> for ConfigSource {
    fn from(path: &Path) -> Self {
        ConfigSource::File(path.to_path_buf())
    }
}

impl From<Value> for ConfigSource {
    fn from(value: Value) -> Self {
        ConfigSource::Value(value)
    }
}

impl From<RawConfig> for ConfigSource {
    fn from(raw: RawConfig) -> Self {
        ConfigSource::Raw(raw)
    }
}

pub(crate) fn is_package_json(path: &Path) -> bool {
    path.file_name() == Some(std::ffi::OsStr::new("package.json"))
}

fn read_file(path: &Path) -> Result<Document> {
    let format = Format::from_path(path).ok_or_else(|| {
        ConfigError::UnsupportedFormat(
            path.extension()
                .map(|ext| ext.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
        )
    })?;

    let content = fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ConfigError::NotFound(path.to_path_buf())
        } else {
            ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    debug!(path = %path.display(), %format, bytes = content.len(), "read configuration file");

    let document = format.parse(&content)?;
    if is_package_json(path) {
        return package_field(path, document);
    }
    Ok(document)
}

fn package_field(path: &Path, document: Document) -> Result<Document> {
    let Document {
        mut value,
        duplicates,
    } = document;

    let field = value
        .get_mut(PACKAGE_FIELD)
        .map(Value::take)
        .filter(|field| !field.is_null())
        .ok_or_else(|| ConfigError::MissingPackageField {
            path: path.to_path_buf(),
            field: PACKAGE_FIELD.to_string(),
        })?;

    let duplicates = duplicates
        .into_iter()
        .filter(|key_path| key_path.first().map(String::as_str) == Some(PACKAGE_FIELD))
        .map(|key_path| key_path[1..].to_vec())
        .filter(|key_path| !key_path.is_empty())
        .collect();

    Ok(Document {
        value: field,
        duplicates,
    })
}
