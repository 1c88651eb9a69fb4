//! Health checking types and data structures

use crate::monitoring::types::HealthStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Probe-specific readings attached to a check result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum ProbeDetails {
    Database {
        query_count: u64,
        slow_query_count: u64,
        avg_query_time: f64,
        errors: u64,
        error_rate: f64,
        active_connections: u64,
    },
    Metrics {
        total_requests: u64,
        active_requests: u64,
        error_rate: f64,
        response_time_p95: f64,
        response_time_p99: f64,
    },
    System {
        uptime_secs: u64,
        load_average: f64,
        cpu_count: usize,
    },
    Memory {
        used_bytes: u64,
        total_bytes: u64,
        usage_percent: f64,
    },
    /// The probe failed, timed out or panicked
    Failure { reason: String },
    /// Probes supplied outside this crate
    Custom { data: serde_json::Value },
}

/// What a probe reports before timing is attached
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeReport {
    pub status: HealthStatus,
    pub message: String,
    pub details: ProbeDetails,
}

impl ProbeReport {
    pub fn new(status: HealthStatus, message: impl Into<String>, details: ProbeDetails) -> Self {
        Self {
            status,
            message: message.into(),
            details,
        }
    }
}

/// Result of one probe during one health check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckResult {
    pub service: String,
    pub status: HealthStatus,
    pub message: String,
    pub response_time_ms: f64,
    pub details: ProbeDetails,
}

/// Count of checks per status
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthSummary {
    pub total: usize,
    pub healthy: usize,
    pub warning: usize,
    pub critical: usize,
    pub down: usize,
}

impl HealthSummary {
    pub fn from_checks(checks: &[HealthCheckResult]) -> Self {
        checks.iter().fold(
            Self {
                total: checks.len(),
                ..Default::default()
            },
            |mut summary, check| {
                match check.status {
                    HealthStatus::Healthy => summary.healthy += 1,
                    HealthStatus::Warning => summary.warning += 1,
                    HealthStatus::Critical => summary.critical += 1,
                    HealthStatus::Down => summary.down += 1,
                }
                summary
            },
        )
    }
}

/// Rollup of every probe for one health check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemHealth {
    /// Worst status among `checks`
    pub status: HealthStatus,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    /// Process uptime in seconds
    pub uptime: u64,
    pub checks: Vec<HealthCheckResult>,
    pub summary: HealthSummary,
}

impl SystemHealth {
    pub fn from_checks(version: impl Into<String>, uptime: u64, checks: Vec<HealthCheckResult>) -> Self {
        Self {
            status: HealthStatus::worst(checks.iter().map(|c| c.status)),
            timestamp: Utc::now(),
            version: version.into(),
            uptime,
            summary: HealthSummary::from_checks(&checks),
            checks,
        }
    }

    pub fn check(&self, service: &str) -> Option<&HealthCheckResult> {
        self.checks.iter().find(|c| c.service == service)
    }
}
