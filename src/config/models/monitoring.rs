//! Monitoring configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Monitoring configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MonitoringConfig {
    /// Request metrics configuration
    #[serde(default)]
    pub metrics: MetricsConfig,
    /// Database operation monitoring configuration
    #[serde(default)]
    pub database: DatabaseMonitorConfig,
    /// Health check configuration
    #[serde(default)]
    pub health: HealthConfig,
    /// Alerting configuration
    #[serde(default)]
    pub alerting: AlertingConfig,
    /// Request correlation configuration
    #[serde(default)]
    pub correlation: CorrelationConfig,
}

/// Request metrics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Capacity of the request sample ring buffer used for percentiles
    #[serde(default = "default_sample_capacity")]
    pub sample_capacity: usize,
    /// Number of endpoints reported in a snapshot
    #[serde(default = "default_top_endpoints")]
    pub top_endpoints: usize,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            sample_capacity: default_sample_capacity(),
            top_endpoints: default_top_endpoints(),
        }
    }
}

/// Database operation monitoring configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseMonitorConfig {
    /// Operations slower than this are flagged as slow
    #[serde(default = "default_slow_threshold_ms")]
    pub slow_threshold_ms: u64,
    /// Per `collection:operation` sample ring buffer capacity
    #[serde(default = "default_db_sample_capacity")]
    pub sample_capacity: usize,
}

impl Default for DatabaseMonitorConfig {
    fn default() -> Self {
        Self {
            slow_threshold_ms: default_slow_threshold_ms(),
            sample_capacity: default_db_sample_capacity(),
        }
    }
}

impl DatabaseMonitorConfig {
    pub fn slow_threshold(&self) -> Duration {
        Duration::from_millis(self.slow_threshold_ms)
    }
}

/// Health check configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthConfig {
    /// Bounded wait for each probe; a probe exceeding it reports critical
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,
    /// Interval of the periodic health check task, 0 disables it
    #[serde(default = "default_check_interval_secs")]
    pub check_interval_secs: u64,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            probe_timeout_ms: default_probe_timeout_ms(),
            check_interval_secs: default_check_interval_secs(),
        }
    }
}

impl HealthConfig {
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    /// Interval between periodic health checks, `None` when disabled
    pub fn check_interval(&self) -> Option<Duration> {
        (self.check_interval_secs > 0).then(|| Duration::from_secs(self.check_interval_secs))
    }
}

/// Alerting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertingConfig {
    /// Suppress repeat notifications of the same alert type within this window.
    /// Alerts are still recorded. 0 notifies on every emission.
    #[serde(default)]
    pub notify_cooldown_secs: u64,
    /// Maximum number of alerts kept; oldest resolved alerts are evicted first
    #[serde(default = "default_max_alerts")]
    pub max_alerts: usize,
    /// Upper bound on a single notifier call in milliseconds
    #[serde(default = "default_notify_timeout_ms")]
    pub notify_timeout_ms: u64,
}

impl Default for AlertingConfig {
    fn default() -> Self {
        Self {
            notify_cooldown_secs: 0,
            max_alerts: default_max_alerts(),
            notify_timeout_ms: default_notify_timeout_ms(),
        }
    }
}

impl AlertingConfig {
    pub fn notify_cooldown(&self) -> Option<Duration> {
        (self.notify_cooldown_secs > 0).then(|| Duration::from_secs(self.notify_cooldown_secs))
    }

    pub fn notify_timeout(&self) -> Duration {
        Duration::from_millis(self.notify_timeout_ms)
    }
}

/// Request correlation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelationConfig {
    /// Header read from inbound requests and echoed on responses
    #[serde(default = "default_correlation_header")]
    pub header: String,
}

impl Default for CorrelationConfig {
    fn default() -> Self {
        Self {
            header: default_correlation_header(),
        }
    }
}
