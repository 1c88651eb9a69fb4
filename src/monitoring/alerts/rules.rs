//! Alert rule evaluation against a health check

use super::types::{AlertDetails, AlertType};
use crate::monitoring::health::{ProbeDetails, SystemHealth};
use crate::monitoring::types::AlertSeverity;

/// Database error rate (percent) above which `database_error` fires
pub const DATABASE_ERROR_RATE_THRESHOLD: f64 = 10.0;
/// Request P95 (ms) above which `high_response_time` fires
pub const RESPONSE_TIME_P95_THRESHOLD_MS: f64 = 2000.0;
/// Memory usage (percent) above which `memory_usage` fires
pub const MEMORY_USAGE_THRESHOLD: f64 = 85.0;
/// Memory usage (percent) above which `memory_usage` escalates to critical
pub const MEMORY_USAGE_CRITICAL_THRESHOLD: f64 = 95.0;

/// An alert the rules want raised
#[derive(Debug, Clone, PartialEq)]
pub struct AlertCandidate {
    pub alert_type: AlertType,
    pub severity: AlertSeverity,
    pub message: String,
    pub details: AlertDetails,
}

/// Evaluate every rule against `health`.
///
/// Each rule fires whenever its condition holds; there is no memory of earlier checks.
pub fn evaluate_rules(health: &SystemHealth) -> Vec<AlertCandidate> {
    let mut candidates = Vec::new();

    for check in health.checks.iter().filter(|c| c.status.is_failure()) {
        candidates.push(AlertCandidate {
            alert_type: AlertType::SystemFailure,
            severity: AlertSeverity::Critical,
            message: format!(
                "{} health check is {}: {}",
                check.service, check.status, check.message
            ),
            details: AlertDetails {
                service: check.service.clone(),
                status: check.status,
                value: None,
                threshold: None,
            },
        });
    }

    for check in &health.checks {
        match &check.details {
            ProbeDetails::Database { error_rate, .. }
                if *error_rate > DATABASE_ERROR_RATE_THRESHOLD =>
            {
                candidates.push(AlertCandidate {
                    alert_type: AlertType::DatabaseError,
                    severity: AlertSeverity::High,
                    message: format!("Database error rate is {:.2}%", error_rate),
                    details: AlertDetails {
                        service: check.service.clone(),
                        status: check.status,
                        value: Some(*error_rate),
                        threshold: Some(DATABASE_ERROR_RATE_THRESHOLD),
                    },
                });
            }
            ProbeDetails::Metrics {
                response_time_p95, ..
            } if *response_time_p95 > RESPONSE_TIME_P95_THRESHOLD_MS => {
                candidates.push(AlertCandidate {
                    alert_type: AlertType::HighResponseTime,
                    severity: AlertSeverity::Medium,
                    message: format!("P95 response time is {:.0}ms", response_time_p95),
                    details: AlertDetails {
                        service: check.service.clone(),
                        status: check.status,
                        value: Some(*response_time_p95),
                        threshold: Some(RESPONSE_TIME_P95_THRESHOLD_MS),
                    },
                });
            }
            ProbeDetails::Memory { usage_percent, .. }
                if *usage_percent > MEMORY_USAGE_THRESHOLD =>
            {
                let severity = if *usage_percent > MEMORY_USAGE_CRITICAL_THRESHOLD {
                    AlertSeverity::Critical
                } else {
                    AlertSeverity::High
                };
                candidates.push(AlertCandidate {
                    alert_type: AlertType::MemoryUsage,
                    severity,
                    message: format!("Memory usage is {:.1}%", usage_percent),
                    details: AlertDetails {
                        service: check.service.clone(),
                        status: check.status,
                        value: Some(*usage_percent),
                        threshold: Some(MEMORY_USAGE_THRESHOLD),
                    },
                });
            }
            _ => {}
        }
    }

    candidates
}
