//! Built-in health probes

use super::resources::ResourceReader;
use super::types::{ProbeDetails, ProbeReport};
use crate::monitoring::database::DatabaseMonitor;
use crate::monitoring::metrics::{MetricsCollector, MetricsSnapshot};
use crate::monitoring::types::HealthStatus;
use crate::utils::error::Result;
use std::sync::Arc;
use std::time::Duration;

/// Request error rate (percent) above which the metrics probe is critical
pub const METRICS_ERROR_RATE_CRITICAL: f64 = 15.0;
/// Request error rate (percent) above which the metrics probe warns
pub const METRICS_ERROR_RATE_WARNING: f64 = 8.0;
/// P95 latency (ms) above which the metrics probe warns
pub const METRICS_P95_WARNING_MS: f64 = 3000.0;
/// Uptime below which the system probe reports a recent restart
pub const RECENT_RESTART: Duration = Duration::from_secs(60);
/// One-minute load average above which the system probe warns
pub const LOAD_AVERAGE_WARNING: f64 = 4.0;
/// Memory usage (percent) above which the memory probe is critical
pub const MEMORY_CRITICAL_PERCENT: f64 = 90.0;
/// Memory usage (percent) above which the memory probe warns
pub const MEMORY_WARNING_PERCENT: f64 = 80.0;

/// One independent health check
#[async_trait::async_trait]
pub trait HealthProbe: Send + Sync + std::fmt::Debug {
    /// Service name reported in the check result
    fn name(&self) -> &str;

    /// Take a reading. Errors are reported as a critical result for this probe.
    async fn check(&self) -> Result<ProbeReport>;
}

/// Reports the database monitor's connection health
#[derive(Debug)]
pub struct DatabaseProbe {
    monitor: Arc<DatabaseMonitor>,
}

impl DatabaseProbe {
    pub fn new(monitor: Arc<DatabaseMonitor>) -> Self {
        Self { monitor }
    }
}

#[async_trait::async_trait]
impl HealthProbe for DatabaseProbe {
    fn name(&self) -> &str {
        "database"
    }

    async fn check(&self) -> Result<ProbeReport> {
        let metrics = self.monitor.get_metrics();
        let health = &metrics.connection_health;

        let message = match health.status {
            HealthStatus::Healthy => "Database operations are healthy".to_string(),
            status => format!(
                "Database error rate is {:.2}% ({})",
                health.error_rate, status
            ),
        };

        Ok(ProbeReport::new(
            health.status,
            message,
            ProbeDetails::Database {
                query_count: metrics.query_count,
                slow_query_count: metrics.slow_query_count,
                avg_query_time: metrics.avg_query_time,
                errors: metrics.errors,
                error_rate: health.error_rate,
                active_connections: metrics.active_connections,
            },
        ))
    }
}

/// Classifies request error rate and latency
#[derive(Debug)]
pub struct MetricsProbe {
    collector: Arc<MetricsCollector>,
}

impl MetricsProbe {
    pub fn new(collector: Arc<MetricsCollector>) -> Self {
        Self { collector }
    }
}

/// Status for a metrics snapshot
pub fn classify_metrics(snapshot: &MetricsSnapshot) -> (HealthStatus, String) {
    if snapshot.error_rate > METRICS_ERROR_RATE_CRITICAL {
        (
            HealthStatus::Critical,
            format!("Error rate is {:.2}%", snapshot.error_rate),
        )
    } else if snapshot.error_rate > METRICS_ERROR_RATE_WARNING {
        (
            HealthStatus::Warning,
            format!("Error rate is {:.2}%", snapshot.error_rate),
        )
    } else if snapshot.response_time_p95 > METRICS_P95_WARNING_MS {
        (
            HealthStatus::Warning,
            format!("P95 response time is {:.0}ms", snapshot.response_time_p95),
        )
    } else {
        (HealthStatus::Healthy, "Request metrics are healthy".to_string())
    }
}

#[async_trait::async_trait]
impl HealthProbe for MetricsProbe {
    fn name(&self) -> &str {
        "metrics"
    }

    async fn check(&self) -> Result<ProbeReport> {
        let snapshot = self.collector.snapshot();
        let (status, message) = classify_metrics(&snapshot);

        Ok(ProbeReport::new(
            status,
            message,
            ProbeDetails::Metrics {
                total_requests: snapshot.total_requests,
                active_requests: snapshot.active_requests,
                error_rate: snapshot.error_rate,
                response_time_p95: snapshot.response_time_p95,
                response_time_p99: snapshot.response_time_p99,
            },
        ))
    }
}

/// Uptime and load average
#[derive(Debug)]
pub struct SystemProbe {
    reader: Arc<dyn ResourceReader>,
}

impl SystemProbe {
    pub fn new(reader: Arc<dyn ResourceReader>) -> Self {
        Self { reader }
    }
}

#[async_trait::async_trait]
impl HealthProbe for SystemProbe {
    fn name(&self) -> &str {
        "system"
    }

    async fn check(&self) -> Result<ProbeReport> {
        let uptime = self.reader.uptime();
        let load_average = self.reader.load_average();

        let (status, message) = if uptime < RECENT_RESTART {
            (
                HealthStatus::Warning,
                format!("Process restarted {}s ago", uptime.as_secs()),
            )
        } else if load_average > LOAD_AVERAGE_WARNING {
            (
                HealthStatus::Warning,
                format!("Load average is {:.2}", load_average),
            )
        } else {
            (HealthStatus::Healthy, "System resources are healthy".to_string())
        };

        Ok(ProbeReport::new(
            status,
            message,
            ProbeDetails::System {
                uptime_secs: uptime.as_secs(),
                load_average,
                cpu_count: self.reader.cpu_count(),
            },
        ))
    }
}

/// Memory usage against the available total
#[derive(Debug)]
pub struct MemoryProbe {
    reader: Arc<dyn ResourceReader>,
}

impl MemoryProbe {
    pub fn new(reader: Arc<dyn ResourceReader>) -> Self {
        Self { reader }
    }
}

/// Status for a memory usage percentage
pub fn classify_memory(usage_percent: f64) -> HealthStatus {
    if usage_percent > MEMORY_CRITICAL_PERCENT {
        HealthStatus::Critical
    } else if usage_percent > MEMORY_WARNING_PERCENT {
        HealthStatus::Warning
    } else {
        HealthStatus::Healthy
    }
}

#[async_trait::async_trait]
impl HealthProbe for MemoryProbe {
    fn name(&self) -> &str {
        "memory"
    }

    async fn check(&self) -> Result<ProbeReport> {
        let reading = self.reader.memory();
        let usage_percent = reading.usage_percent();
        let status = classify_memory(usage_percent);

        Ok(ProbeReport::new(
            status,
            format!("Memory usage is {:.1}%", usage_percent),
            ProbeDetails::Memory {
                used_bytes: reading.used_bytes,
                total_bytes: reading.total_bytes,
                usage_percent,
            },
        ))
    }
}
