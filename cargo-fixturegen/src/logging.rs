//! Log subscriber installation.

use tracing_subscriber::EnvFilter;

use crate::error::CliError;

/// Environment variable consulted when `--log-level` is absent.
pub const LOG_ENV: &str = "FIXTUREGEN_LOG";

/// Filter used when neither `--log-level` nor [`LOG_ENV`] is set.
pub const DEFAULT_FILTER: &str = "info";

/// Builds the filter from the flag, then [`LOG_ENV`], then [`DEFAULT_FILTER`].
///
/// # Errors
///
/// Returns [`CliError::Logging`] when the flag holds an invalid directive.
pub fn filter(flag: Option<&str>) -> Result<EnvFilter, CliError> {
    if let Some(directives) = flag {
        return EnvFilter::try_new(directives).map_err(|err| CliError::Logging(err.to_string()));
    }
    Ok(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)))
}

/// Installs a `fmt` subscriber writing to stderr.
///
/// # Errors
///
/// Returns [`CliError::Logging`] when the filter is invalid or a global
/// subscriber is already installed.
pub fn init(flag: Option<&str>) -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(filter(flag)?)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| CliError::Logging(err.to_string()))
}
