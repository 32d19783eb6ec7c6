//! Log output for the `biosur` binary.
//!
//! Logs go to stderr so that tables and JSON on stdout stay machine-readable.
//! The filter comes from `--log-level` when given, otherwise from `RUST_LOG`,
//! otherwise `warn`.

use std::io::IsTerminal;
use tracing_subscriber::{EnvFilter, fmt};

pub const DEFAULT_LOG_FILTER: &str = "warn";

pub fn build_filter(log_level: Option<&str>) -> Result<EnvFilter, String> {
    match log_level {
        Some(directive) => EnvFilter::try_new(directive)
            .map_err(|error| format!("invalid --log-level '{directive}': {error}")),
        None => Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))),
    }
}

pub fn init(filter: EnvFilter) {
    // A subscriber may already be installed when running in-process tests.
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(true)
        .try_init();
}
