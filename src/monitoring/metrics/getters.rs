//! Getter methods for retrieving aggregated metrics

use super::collector::MetricsCollector;
use super::helpers::{calculate_average, nearest_rank, percentage, sorted_finite};
use super::types::{EndpointSummary, MetricsSnapshot, StatusCodeCount};
use chrono::Utc;
use std::cmp::Ordering;

impl MetricsCollector {
    /// Compute a snapshot over the current counters and buffered samples
    pub fn snapshot(&self) -> MetricsSnapshot {
        let storage = self.storage.read();

        let durations = sorted_finite(storage.samples.iter().map(|s| s.duration_ms));

        let mut top_endpoints: Vec<EndpointSummary> = storage
            .endpoints
            .values()
            .map(|stat| EndpointSummary {
                method: stat.method.clone(),
                path: stat.path.clone(),
                count: stat.count,
                avg_response_time: stat.average(),
            })
            .collect();
        top_endpoints.sort_by(|a, b| {
            b.count.cmp(&a.count).then_with(|| {
                b.avg_response_time
                    .partial_cmp(&a.avg_response_time)
                    .unwrap_or(Ordering::Equal)
            })
        });
        top_endpoints.truncate(self.config.top_endpoints);

        let status_code_distribution = storage
            .status_codes
            .iter()
            .map(|(&status_code, &count)| StatusCodeCount { status_code, count })
            .collect();

        MetricsSnapshot {
            total_requests: storage.total_requests,
            active_requests: self.active_requests(),
            error_rate: percentage(storage.total_errors, storage.total_requests),
            response_time_p95: nearest_rank(&durations, 95),
            response_time_p99: nearest_rank(&durations, 99),
            average_response_time: calculate_average(&durations),
            sample_count: durations.len(),
            top_endpoints,
            status_code_distribution,
            timestamp: Utc::now(),
        }
    }

    /// Lifetime count of recorded requests
    pub fn total_requests(&self) -> u64 {
        self.storage.read().total_requests
    }

    /// Lifetime count of requests answered with a status >= 400
    pub fn total_errors(&self) -> u64 {
        self.storage.read().total_errors
    }
}
