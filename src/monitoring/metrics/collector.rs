//! Metrics collector implementation for recording requests

use super::bounded::BoundedPush;
use super::types::{EndpointStat, MetricsStorage, RequestSample};
use crate::config::MetricsConfig;
use parking_lot::RwLock;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// Metrics collector for gathering and aggregating request metrics
#[derive(Debug)]
pub struct MetricsCollector {
    /// Configuration
    pub(super) config: MetricsConfig,
    /// All metrics storage consolidated into a single lock
    pub(super) storage: RwLock<MetricsStorage>,
    /// Requests currently in flight, kept outside the lock
    pub(super) active_requests: AtomicU64,
}

impl MetricsCollector {
    /// Create a new metrics collector
    pub fn new(config: &MetricsConfig) -> Self {
        Self {
            config: config.clone(),
            storage: RwLock::new(MetricsStorage::default()),
            active_requests: AtomicU64::new(0),
        }
    }

    /// Entry hook: count a request as active until the returned guard drops
    pub fn begin_request(self: &Arc<Self>) -> ActiveRequestGuard {
        self.active_requests.fetch_add(1, Ordering::AcqRel);
        ActiveRequestGuard {
            collector: Arc::clone(self),
        }
    }

    /// Record a completed request
    pub fn record_request(&self, sample: RequestSample) {
        let mut storage = self.storage.write();

        storage.total_requests += 1;
        if sample.is_error() {
            storage.total_errors += 1;
        }
        *storage.status_codes.entry(sample.status_code).or_insert(0) += 1;

        let endpoint = storage
            .endpoints
            .entry(sample.endpoint_key())
            .or_insert_with(|| EndpointStat {
                method: sample.method.clone(),
                path: sample.path.clone(),
                ..Default::default()
            });
        endpoint.count += 1;
        endpoint.duration_sum += sample.duration_ms;

        let capacity = self.config.sample_capacity;
        storage.samples.push_bounded(sample, capacity);
    }

    /// Number of requests currently in flight
    #[inline]
    pub fn active_requests(&self) -> u64 {
        self.active_requests.load(Ordering::Acquire)
    }

    /// Number of samples currently buffered
    pub fn sample_count(&self) -> usize {
        self.storage.read().samples.len()
    }

    /// Clear counters, samples and endpoint aggregates.
    ///
    /// The active gauge is left alone since in-flight requests still hold guards.
    pub fn reset(&self) {
        debug!("Resetting request metrics");
        *self.storage.write() = MetricsStorage::default();
    }

    fn end_request(&self) {
        // Saturate at zero
        let _ = self
            .active_requests
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
                Some(n.saturating_sub(1))
            });
    }
}

/// Keeps a request counted as active; decrements the gauge on drop
#[derive(Debug)]
pub struct ActiveRequestGuard {
    collector: Arc<MetricsCollector>,
}

impl Drop for ActiveRequestGuard {
    fn drop(&mut self) {
        self.collector.end_request();
    }
}
