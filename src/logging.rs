//! Tracing subscriber setup.

use std::io;

use tracing_subscriber::{EnvFilter, fmt};

/// Initializes the global tracing subscriber.
///
/// `RUST_LOG` takes priority when set; `level` is the configured fallback.
/// The `json` format emits one object per line for log shippers, `text` is
/// human-oriented ANSI output. Logs go to stderr; stdout stays reserved
/// for command output.
pub fn init_tracing(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if format == "json" {
        fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    } else {
        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(io::stderr)
            .init();
    }
}
