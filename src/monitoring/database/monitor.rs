//! Database monitor implementation

use super::types::{
    ConnectionHealth, DatabaseMetrics, DatabaseStorage, DbOperationSample, OperationStats,
};
use crate::config::DatabaseMonitorConfig;
use crate::monitoring::metrics::{BoundedPush, PrometheusText, percentage};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::{debug, error, warn};

/// Error recorded for an operation whose future was dropped before it completed
const CANCELLED_OPERATION: &str = "operation cancelled before completion";
/// Error recorded for an operation that panicked
const PANICKED_OPERATION: &str = "operation panicked";

/// Tracks the performance of wrapped database operations and the connection pool
#[derive(Debug)]
pub struct DatabaseMonitor {
    pub(super) config: DatabaseMonitorConfig,
    pub(super) storage: RwLock<DatabaseStorage>,
    pub(super) active_connections: AtomicU64,
    pub(super) checkout_failures: AtomicU64,
}

impl DatabaseMonitor {
    pub fn new(config: &DatabaseMonitorConfig) -> Self {
        Self {
            config: config.clone(),
            storage: RwLock::new(DatabaseStorage::default()),
            active_connections: AtomicU64::new(0),
            checkout_failures: AtomicU64::new(0),
        }
    }

    /// Run `operation` against `collection`, recording its duration and outcome.
    ///
    /// The operation's result is returned unchanged. A failure is recorded once and
    /// then handed back to the caller as-is.
    /// Dropping the returned future before it completes, or a panic inside the
    /// operation, still records one failed sample.
    pub async fn timed<F, Fut, T, E>(
        &self,
        collection: &str,
        operation: &str,
        f: F,
    ) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let pending = PendingOperation {
            monitor: self,
            collection,
            operation,
            start: Instant::now(),
            finished: false,
        };
        let result = f().await;
        pending.finish(result.as_ref().err().map(ToString::to_string));
        result
    }

    /// Record a database operation sample
    pub fn record(&self, sample: DbOperationSample) {
        if sample.is_slow {
            warn!(
                collection = %sample.collection,
                operation = %sample.operation,
                duration_ms = sample.duration_ms,
                threshold_ms = self.config.slow_threshold_ms,
                "Slow database operation"
            );
        }
        if let Some(err) = &sample.error {
            error!(
                collection = %sample.collection,
                operation = %sample.operation,
                duration_ms = sample.duration_ms,
                error = %err,
                "Database operation failed"
            );
        } else {
            debug!(
                collection = %sample.collection,
                operation = %sample.operation,
                duration_ms = sample.duration_ms,
                "Database operation completed"
            );
        }

        let capacity = self.config.sample_capacity;
        let mut storage = self.storage.write();

        storage.query_count += 1;
        storage.total_duration_ms += sample.duration_ms;
        if sample.is_slow {
            storage.slow_query_count += 1;
        }
        if sample.error.is_some() {
            storage.errors += 1;
        }

        let op = storage.operations.entry(sample.key()).or_default();
        op.count += 1;
        if sample.is_slow {
            op.slow_count += 1;
        }
        if sample.error.is_some() {
            op.error_count += 1;
        }
        op.durations.push_bounded(sample.duration_ms, capacity);
    }

    /// Aggregate metrics across all recorded operations
    pub fn get_metrics(&self) -> DatabaseMetrics {
        let storage = self.storage.read();

        let avg_query_time = if storage.query_count == 0 {
            0.0
        } else {
            storage.total_duration_ms / storage.query_count as f64
        };

        DatabaseMetrics {
            query_count: storage.query_count,
            slow_query_count: storage.slow_query_count,
            avg_query_time,
            errors: storage.errors,
            active_connections: self.active_connections(),
            checkout_failures: self.checkout_failures.load(Ordering::Acquire),
            connection_health: ConnectionHealth::from_error_rate(percentage(
                storage.errors,
                storage.query_count,
            )),
            operations: Self::collect_operation_stats(&storage),
        }
    }

    /// Per `collection:operation` statistics
    pub fn operation_stats(&self) -> BTreeMap<String, OperationStats> {
        Self::collect_operation_stats(&self.storage.read())
    }

    fn collect_operation_stats(
        storage: &DatabaseStorage,
    ) -> BTreeMap<String, OperationStats> {
        storage
            .operations
            .iter()
            .map(|(key, op)| {
                let (min_ms, max_ms, sum) = op.durations.iter().fold(
                    (f64::INFINITY, f64::NEG_INFINITY, 0.0),
                    |(min, max, sum), &d| (min.min(d), max.max(d), sum + d),
                );
                let n = op.durations.len();
                let (min_ms, max_ms, avg_ms) = if n == 0 {
                    (0.0, 0.0, 0.0)
                } else {
                    (min_ms, max_ms, sum / n as f64)
                };
                let stats = OperationStats {
                    count: op.count,
                    slow_count: op.slow_count,
                    error_count: op.error_count,
                    min_ms,
                    max_ms,
                    avg_ms,
                };
                (key.clone(), stats)
            })
            .collect()
    }

    /// Connections currently open in the pool
    #[inline]
    pub fn active_connections(&self) -> u64 {
        self.active_connections.load(Ordering::Acquire)
    }

    pub fn reset(&self) {
        debug!("Resetting database metrics");
        *self.storage.write() = DatabaseStorage::default();
        self.checkout_failures.store(0, Ordering::Release);
    }

    pub(crate) fn write_prometheus(&self, out: &mut PrometheusText) {
        let metrics = self.get_metrics();

        out.single(
            "db_queries_total",
            "Total number of monitored database operations",
            "counter",
            metrics.query_count as f64,
        )
        .single(
            "db_slow_queries_total",
            "Database operations slower than the slow threshold",
            "counter",
            metrics.slow_query_count as f64,
        )
        .single(
            "db_query_errors_total",
            "Database operations that returned an error",
            "counter",
            metrics.errors as f64,
        )
        .single(
            "db_avg_query_time_ms",
            "Mean database operation duration",
            "gauge",
            metrics.avg_query_time,
        )
        .single(
            "db_active_connections",
            "Connections currently open in the pool",
            "gauge",
            metrics.active_connections as f64,
        );
    }
}

/// In-flight operation started by [`DatabaseMonitor::timed`].
///
/// Records exactly one sample: the outcome on `finish`, or a failed sample on drop
/// when the future was cancelled or the operation panicked.
struct PendingOperation<'a> {
    monitor: &'a DatabaseMonitor,
    collection: &'a str,
    operation: &'a str,
    start: Instant,
    finished: bool,
}

impl PendingOperation<'_> {
    fn finish(mut self, error: Option<String>) {
        self.finished = true;
        self.record(error);
    }

    fn record(&self, error: Option<String>) {
        self.monitor.record(DbOperationSample::new(
            self.collection,
            self.operation,
            self.start.elapsed(),
            self.monitor.config.slow_threshold(),
            error,
        ));
    }
}

impl Drop for PendingOperation<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        let error = if std::thread::panicking() {
            PANICKED_OPERATION
        } else {
            CANCELLED_OPERATION
        };
        self.record(Some(error.to_string()));
    }
}
