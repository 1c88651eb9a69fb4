//! Database monitoring types

use crate::monitoring::types::HealthStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::time::Duration;

/// One wrapped database call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DbOperationSample {
    pub collection: String,
    pub operation: String,
    pub duration_ms: f64,
    pub is_slow: bool,
    /// Display form of the error the call returned, if any
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl DbOperationSample {
    pub fn new(
        collection: impl Into<String>,
        operation: impl Into<String>,
        duration: Duration,
        slow_threshold: Duration,
        error: Option<String>,
    ) -> Self {
        Self {
            collection: collection.into(),
            operation: operation.into(),
            duration_ms: duration.as_secs_f64() * 1000.0,
            is_slow: duration > slow_threshold,
            error,
            timestamp: Utc::now(),
        }
    }

    pub fn key(&self) -> String {
        format!("{}:{}", self.collection, self.operation)
    }
}

/// Running statistics for one `collection:operation`
#[derive(Debug, Default)]
pub(super) struct OperationStorage {
    pub count: u64,
    pub slow_count: u64,
    pub error_count: u64,
    /// Recent durations for min/max/avg
    pub durations: VecDeque<f64>,
}

/// All database metrics behind a single lock
#[derive(Debug, Default)]
pub(super) struct DatabaseStorage {
    pub query_count: u64,
    pub slow_query_count: u64,
    pub errors: u64,
    pub total_duration_ms: f64,
    pub operations: HashMap<String, OperationStorage>,
}

/// Statistics reported for one `collection:operation`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationStats {
    pub count: u64,
    pub slow_count: u64,
    pub error_count: u64,
    pub min_ms: f64,
    pub max_ms: f64,
    pub avg_ms: f64,
}

/// Connection health derived from the error rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionHealth {
    pub status: HealthStatus,
    /// Percentage of recorded operations that failed
    pub error_rate: f64,
}

impl ConnectionHealth {
    /// `critical` above 10%, `warning` from 5% up to 10%, else `healthy`
    pub fn from_error_rate(error_rate: f64) -> Self {
        let status = if error_rate > 10.0 {
            HealthStatus::Critical
        } else if error_rate >= 5.0 {
            HealthStatus::Warning
        } else {
            HealthStatus::Healthy
        };

        Self { status, error_rate }
    }
}

/// Aggregate database metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseMetrics {
    pub query_count: u64,
    pub slow_query_count: u64,
    /// Mean duration over all recorded operations, in milliseconds
    pub avg_query_time: f64,
    pub errors: u64,
    pub active_connections: u64,
    pub checkout_failures: u64,
    pub connection_health: ConnectionHealth,
    pub operations: BTreeMap<String, OperationStats>,
}
