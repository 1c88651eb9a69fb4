//! Request sample and snapshot types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::time::Duration;

/// One completed HTTP request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestSample {
    pub method: String,
    /// Route pattern the request matched
    pub path: String,
    pub status_code: u16,
    pub duration_ms: f64,
    pub timestamp: DateTime<Utc>,
}

impl RequestSample {
    pub fn new(
        method: impl Into<String>,
        path: impl Into<String>,
        status_code: u16,
        duration: Duration,
    ) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            status_code,
            duration_ms: duration.as_secs_f64() * 1000.0,
            timestamp: Utc::now(),
        }
    }

    /// Build a sample with an explicit duration in milliseconds
    pub fn with_duration_ms(
        method: impl Into<String>,
        path: impl Into<String>,
        status_code: u16,
        duration_ms: f64,
    ) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            status_code,
            duration_ms,
            timestamp: Utc::now(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.status_code >= 400
    }

    pub(super) fn endpoint_key(&self) -> String {
        format!("{}:{}", self.method, self.path)
    }
}

/// Running aggregate for one `method:path`
#[derive(Debug, Clone, Default)]
pub(super) struct EndpointStat {
    pub method: String,
    pub path: String,
    pub count: u64,
    pub duration_sum: f64,
}

impl EndpointStat {
    pub fn average(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.duration_sum / self.count as f64
        }
    }
}

/// All request metrics behind a single lock
#[derive(Debug, Default)]
pub(super) struct MetricsStorage {
    pub samples: VecDeque<RequestSample>,
    pub endpoints: HashMap<String, EndpointStat>,
    pub status_codes: BTreeMap<u16, u64>,
    pub total_requests: u64,
    pub total_errors: u64,
}

/// Per-endpoint entry of a snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointSummary {
    pub method: String,
    pub path: String,
    pub count: u64,
    pub avg_response_time: f64,
}

/// Count of responses with one status code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCodeCount {
    pub status_code: u16,
    pub count: u64,
}

/// Point-in-time view of the request metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    pub total_requests: u64,
    pub active_requests: u64,
    /// Percentage of requests answered with a status >= 400
    pub error_rate: f64,
    pub response_time_p95: f64,
    pub response_time_p99: f64,
    /// Mean duration over the samples currently buffered
    pub average_response_time: f64,
    pub sample_count: usize,
    pub top_endpoints: Vec<EndpointSummary>,
    pub status_code_distribution: Vec<StatusCodeCount>,
    pub timestamp: DateTime<Utc>,
}
