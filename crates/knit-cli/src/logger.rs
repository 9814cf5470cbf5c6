//! Logging infrastructure for the knit CLI.
//!
//! Logs go to stderr so that `knit print` and `knit schema` output can be
//! piped. `RUST_LOG` overrides the default filter unless `--verbose` or
//! `--quiet` is given.
//!
//! # Example
//!
//! ```rust,no_run
//! use knit_cli::logger::init_logger;
//! use tracing::{debug, info};
//!
//! init_logger(false, false, false);
//!
//! info!("Checking configuration");
//! debug!("Loaded profile: {}", "development");
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str = "knit=debug,knit_config=debug,knit_cli=debug";
const QUIET_FILTER: &str = "error";
const DEFAULT_FILTER: &str = "knit=info,knit_config=info,knit_cli=info";

/// Initialize the tracing subscriber with the specified options.
///
/// Should be called once at the start of the program, before any logging
/// occurs.
///
/// # Verbosity Levels
///
/// 1. `--verbose` flag: DEBUG for knit crates
/// 2. `--quiet` flag: errors only
/// 3. `RUST_LOG` environment variable: custom filter
/// 4. Default: INFO for knit crates
///
/// Returns `false` when another global subscriber was already installed.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) -> bool {
    let filter = filter_for(verbose, quiet);

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    match tracing_subscriber::registry().with(filter).with(fmt_layer).try_init() {
        Ok(()) => true,
        Err(err) => {
            // the subscriber installed first keeps receiving events
            tracing::debug!(%err, "tracing subscriber already installed");
            false
        }
    }
}

fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_wins_over_quiet() {
        assert_eq!(filter_for(true, true).to_string(), EnvFilter::new(VERBOSE_FILTER).to_string());
    }

    #[test]
    fn quiet_filter_only_shows_errors() {
        assert_eq!(filter_for(false, true).to_string(), "error");
    }

    #[test]
    fn second_init_reports_existing_subscriber() {
        init_logger(false, true, true);
        assert!(!init_logger(true, false, true));
    }
}
