//! Configuration data models
//!
//! This module defines all configuration structures used throughout the service.

#![allow(missing_docs)]

pub mod logging;
pub mod monitoring;
pub mod server;

// Re-export all configuration types
pub use logging::*;
pub use monitoring::*;
pub use server::*;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    8000
}

/// Default request timeout in seconds
pub fn default_timeout() -> u64 {
    30
}

/// Default request sample ring buffer capacity
pub fn default_sample_capacity() -> usize {
    1000
}

/// Default number of endpoints reported in a snapshot
pub fn default_top_endpoints() -> usize {
    10
}

/// Default slow database operation threshold in milliseconds
pub fn default_slow_threshold_ms() -> u64 {
    1000
}

/// Default per-operation database sample ring buffer capacity
pub fn default_db_sample_capacity() -> usize {
    100
}

/// Default bounded wait for a single health probe in milliseconds
pub fn default_probe_timeout_ms() -> u64 {
    5000
}

/// Default interval between periodic health checks in seconds
pub fn default_check_interval_secs() -> u64 {
    30
}

/// Default number of alerts kept in memory
pub fn default_max_alerts() -> usize {
    1000
}

/// Default bound on a single alert notification in milliseconds
pub fn default_notify_timeout_ms() -> u64 {
    5000
}

/// Longest accepted interval between periodic health checks (one day)
pub const MAX_CHECK_INTERVAL_SECS: u64 = 86_400;

/// Default correlation header name
pub fn default_correlation_header() -> String {
    "x-correlation-id".to_string()
}

/// Default log level
pub fn default_log_level() -> String {
    "info".to_string()
}
