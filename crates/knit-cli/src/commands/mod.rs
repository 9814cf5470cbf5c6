//! Command implementations for the knit CLI.
//!
//! - [`check`] - Load and validate a configuration
//! - [`print`] - Print the normalized configuration
//! - [`schema`] - Print the JSON Schema
//! - [`init`] - Write an example configuration
//!
//! Each command provides an `execute` function that takes the parsed command
//! arguments and returns a Result.

pub mod check;
pub mod init;
pub mod print;
pub mod schema;
pub(crate) mod utils;

// Re-export execute functions for convenience
pub use check::execute as check_execute;
pub use init::execute as init_execute;
pub use print::execute as print_execute;
pub use schema::execute as schema_execute;
