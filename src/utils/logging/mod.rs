//! Tracing subscriber setup
//!
//! Log lines carry the span fields opened by the request middleware, so every
//! line emitted while serving a request includes its `correlation_id`.

use crate::config::LoggingConfig;
use crate::utils::error::{Result, TelemetryError};
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| TelemetryError::Config(format!("Invalid log level: {}", e)))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false);

    let installed = if config.json {
        builder.json().with_current_span(true).try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| TelemetryError::Internal(format!("Failed to install subscriber: {}", e)))
}
