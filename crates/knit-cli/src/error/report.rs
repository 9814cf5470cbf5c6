//! Miette diagnostic conversion for CLI errors.

use knit_config::ConfigError;
use miette::Report;

use crate::error::CliError;

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Config(e) => config_error_to_miette(e),
        CliError::AlreadyExists(path) => miette::miette!(
            help = "pass --force to overwrite it",
            "{} already exists",
            path.display()
        ),
        _ => miette::miette!("{}", err),
    }
}

/// Convert knit-config ConfigError to miette Report
pub fn config_error_to_miette(err: ConfigError) -> Report {
    match err {
        ConfigError::Invalid(errors) => miette::miette!(
            help = "fix every listed field; `knit schema` prints the accepted shape",
            "{}",
            errors
        ),
        ConfigError::NotFound(path) => miette::miette!(
            help = "create one with `knit init` or pass --config <path>",
            "no configuration found at {}",
            path.display()
        ),
        ConfigError::ProfileNotFound(name) => miette::miette!(
            help = "profiles are declared under the `profiles` table",
            "profile '{}' is not defined",
            name
        ),
        other => miette::miette!("{}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use miette::Diagnostic;
    use std::path::PathBuf;

    #[test]
    fn test_not_found_has_help() {
        let report = cli_error_to_miette(CliError::Config(ConfigError::NotFound(PathBuf::from(
            "project",
        ))));
        assert!(report.to_string().contains("project"));
        assert!(report.help().is_some());
    }

    #[test]
    fn test_other_errors_keep_message() {
        let report = cli_error_to_miette(CliError::Custom("directory is not writable".into()));
        assert_eq!(report.to_string(), "directory is not writable");
    }
}
