//! Tracing subscriber setup for the binaries
//!
//! Logs always go to stderr so they never interleave with what the REPL and
//! the search demo print on stdout.

use crate::config::{LogConfig, LogFormat};
use crate::error::{Error, Result};
use tracing_subscriber::EnvFilter;

/// Filter used when the configured one does not parse
pub const DEFAULT_FILTER: &str = "warn,codex_memory=info";

fn build_filter(level: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(level)
        .or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))
        .map_err(|e| Error::Config(format!("Invalid log filter: {}", e)))
}

/// Install the global subscriber described by `log`
pub fn init(log: &LogConfig) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(build_filter(&log.level)?)
        .with_writer(std::io::stderr);

    let installed = match log.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.with_target(false).try_init(),
    };

    installed.map_err(|e| Error::Internal(format!("Failed to install tracing subscriber: {}", e)))
}
