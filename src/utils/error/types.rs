//! Error types for the telemetry service

use thiserror::Error;

/// Result type alias for the telemetry service
pub type Result<T> = std::result::Result<T, TelemetryError>;

/// Main error type for the telemetry service
///
/// Errors raised by operations wrapped with
/// [`DatabaseMonitor::timed`](crate::monitoring::database::DatabaseMonitor::timed)
/// never pass through this type; they are returned to the caller unchanged.
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Failures inside the observability code itself
    #[error("Monitoring error: {0}")]
    Monitoring(String),

    /// Alert store or notification errors
    #[error("Alert error: {0}")]
    Alert(String),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Timeout errors
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}
