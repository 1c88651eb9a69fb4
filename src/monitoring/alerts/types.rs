//! Alert types and data structures

use crate::monitoring::types::{AlertSeverity, HealthStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, VecDeque};

/// Condition that raised an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    SystemFailure,
    DatabaseError,
    HighResponseTime,
    MemoryUsage,
}

impl AlertType {
    pub fn as_str(self) -> &'static str {
        match self {
            AlertType::SystemFailure => "system_failure",
            AlertType::DatabaseError => "database_error",
            AlertType::HighResponseTime => "high_response_time",
            AlertType::MemoryUsage => "memory_usage",
        }
    }
}

impl std::fmt::Display for AlertType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Readings behind an alert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertDetails {
    /// Probe that tripped the rule
    pub service: String,
    /// Status of that probe at check time
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
}

/// Recorded threshold breach
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    /// `{type}-{timestamp_millis}-{seq}`
    pub id: String,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub severity: AlertSeverity,
    pub message: String,
    pub details: AlertDetails,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
    pub resolved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
}

impl Alert {
    pub fn is_active(&self) -> bool {
        !self.resolved
    }
}

/// Alert statistics
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertStats {
    /// Alerts raised since startup, including evicted ones
    pub total_alerts: u64,
    pub alerts_by_severity: BTreeMap<AlertSeverity, u64>,
    pub alerts_by_type: BTreeMap<AlertType, u64>,
    pub resolved_alerts: u64,
    /// Alerts recorded without notifying because of the cooldown
    pub suppressed_notifications: u64,
    pub failed_notifications: u64,
    pub last_alert: Option<DateTime<Utc>>,
}

/// Consolidated alert storage - single lock for related data
#[derive(Debug, Default)]
pub(super) struct AlertStorage {
    pub alerts: HashMap<String, Alert>,
    /// Alert ids in creation order
    pub order: VecDeque<String>,
    pub stats: AlertStats,
}
