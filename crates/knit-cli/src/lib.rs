//! knit CLI - command-line front end for knit build configuration.
//!
//! The CLI loads configuration through `knit-config` and reports the result:
//!
//! - [`error`] - CLI error type and miette rendering
//! - [`logger`] - Structured logging with tracing
//! - [`ui`] - Colored status lines on stderr
//! - [`commands`] - `check`, `print`, `schema` and `init`
//! - [`cli`] - Argument definitions
//!
//! # Example
//!
//! ```rust,no_run
//! use knit_cli::{error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, false, false);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, Result, ResultExt};
