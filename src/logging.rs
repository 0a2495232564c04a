//! Logging setup.
//!
//! The crate emits [tracing] events; this module installs a subscriber that
//! prints them, for programs that do not configure one themselves.
use std::env;

use thiserror::Error;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, EnvFilter};

/// The environment variable read by [enable_logging] when no level is given
pub const LOG_ENV_VAR: &str = "RULE_LP_LOG";

/// An error raised while installing the log subscriber
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The level is not a valid filter directive
    #[error("invalid log filter `{filter}`: {reason}")]
    InvalidFilter {
        /// The rejected filter
        filter: String,
        /// Why it was rejected
        reason: String,
    },
    /// The subscriber could not be installed
    #[error("failed to initialize logging: {0}")]
    Init(String),
}

/// Parse a level (`info`, `debug`, ...) or a full filter directive such as
/// `rule_lp=debug`. `off` disables all output.
pub fn parse_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    if level.eq_ignore_ascii_case("off") {
        return Ok(EnvFilter::default().add_directive(LevelFilter::OFF.into()));
    }
    EnvFilter::try_new(level).map_err(|err| LoggingError::InvalidFilter {
        filter: level.to_string(),
        reason: err.to_string(),
    })
}

/// Print log events to stderr.
///
/// When `level` is `None`, this reads [LOG_ENV_VAR]; if it is unset too,
/// logging stays off. Returns `Ok(true)` when the subscriber was installed,
/// `Ok(false)` if one was already configured.
pub fn enable_logging(level: Option<&str>) -> Result<bool, LoggingError> {
    if tracing::dispatcher::has_been_set() {
        return Ok(false);
    }
    let level = level
        .map(str::to_string)
        .or_else(|| env::var(LOG_ENV_VAR).ok())
        .unwrap_or_else(|| "off".to_string());
    let filter = parse_filter(&level)?;
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| LoggingError::Init(err.to_string()))?;
    tracing::debug!(%level, "logging enabled");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters() {
        assert!(parse_filter("debug").is_ok());
        assert!(parse_filter("OFF").is_ok());
        assert!(parse_filter("rule_lp=trace").is_ok());
        assert!(matches!(
            parse_filter("rule_lp=loud"),
            Err(LoggingError::InvalidFilter { .. })
        ));
    }
}
