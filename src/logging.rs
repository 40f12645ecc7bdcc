//! Logging setup for the command line tool

use tracing_subscriber::EnvFilter;

use crate::config::LogFormat;

/// Build the filter from `RUST_LOG`, falling back to `default_level`.
pub fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Install the global subscriber. Logs go to stderr so stdout stays parseable.
///
/// Returns `false` when another subscriber was already installed, e.g. by an
/// embedding binary or an earlier call; that subscriber stays in place.
pub fn init(default_level: &str, format: LogFormat) -> bool {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_level))
        .with_writer(std::io::stderr)
        .with_target(false);

    let result = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    if let Err(err) = result {
        tracing::debug!("Keeping existing log subscriber: {}", err);
        return false;
    }
    true
}
