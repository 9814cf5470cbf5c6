//! Build configuration loading for the knit bundler.
//!
//! A configuration is read from a file, text or an in-memory value, layered
//! with an optional profile and environment overrides, and validated into a
//! [`NormalizedConfig`] the build engine consumes. Validation reports every
//! problem at once as [`ValidationErrors`].
//!
//! ```
//! use knit_config::{load_str, Format};
//!
//! let config = load_str(
//!     r#"
//! entry = "./src/index.js"
//!
//! [output]
//! filename = "[name].[contenthash:8].js"
//! "#,
//!     Format::Toml,
//! )
//! .unwrap();
//!
//! assert_eq!(config.entries()["main"].imports, vec!["./src/index.js"]);
//! ```

mod config;
pub mod dev;
pub mod discovery;
pub mod error;
pub mod lint;
pub mod loader;
pub mod normalized;
pub mod options;
pub mod pattern;
pub mod schema;
pub mod source;
mod strict;
pub mod template;
pub mod validation;

// Re-export main types
pub use dev::*;
pub use error::*;
pub use normalized::*;
pub use options::*;

pub use discovery::{CONFIG_FILE_NAMES, ConfigDiscovery, discover, discover_with_profile};
pub use lint::{Lint, LintCode, lint};
pub use loader::{ConfigLoader, DEFAULT_ENV_PREFIX, load, load_str, load_value};
pub use pattern::{Pattern, PatternError};
pub use schema::json_schema;
pub use source::{ConfigSource, Format, PACKAGE_FIELD};
pub use template::{FilenameTemplate, PathData, Placeholder, RenderError, TemplateError};
pub use validation::{ConfigValidator, FsValidator, validate_fs, validate_schema};
