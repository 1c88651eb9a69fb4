//! Test fixtures
//!
//! Deterministic resource readings and a notifier that records what it was given.

use async_trait::async_trait;
use inventory_telemetry::config::MonitoringConfig;
use inventory_telemetry::monitoring::MonitoringSystem;
use inventory_telemetry::monitoring::alerts::{Alert, Notifier};
use inventory_telemetry::monitoring::health::{MemoryReading, ResourceReader};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

/// Resource reader with fixed values
#[derive(Debug, Clone)]
pub struct FixedReader {
    pub uptime: Duration,
    pub load_average: f64,
    pub memory_percent: u64,
}

impl FixedReader {
    /// A host with comfortable headroom
    pub fn idle() -> Self {
        Self {
            uptime: Duration::from_secs(7200),
            load_average: 0.5,
            memory_percent: 40,
        }
    }

    pub fn with_memory(memory_percent: u64) -> Self {
        Self {
            memory_percent,
            ..Self::idle()
        }
    }
}

impl ResourceReader for FixedReader {
    fn uptime(&self) -> Duration {
        self.uptime
    }

    fn load_average(&self) -> f64 {
        self.load_average
    }

    fn memory(&self) -> MemoryReading {
        MemoryReading {
            used_bytes: self.memory_percent,
            total_bytes: 100,
        }
    }

    fn cpu_count(&self) -> usize {
        4
    }
}

/// Notifier that keeps every alert it receives, optionally taking its time
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub received: Mutex<Vec<Alert>>,
    pub delay: Option<Duration>,
}

impl RecordingNotifier {
    /// A notifier that sleeps for `delay` after recording each alert
    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn count(&self) -> usize {
        self.received.lock().len()
    }

    /// Wait for `expected` notifications to arrive, which happens on spawned tasks
    pub async fn wait_for(&self, expected: usize) -> bool {
        for _ in 0..200 {
            if self.count() >= expected {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        self.count() >= expected
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, alert: &Alert) -> inventory_telemetry::Result<()> {
        self.received.lock().push(alert.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "recording"
    }
}

/// Monitoring system over a fixed reader, returning the notifier for inspection
pub fn monitoring_with(
    config: &MonitoringConfig,
    reader: FixedReader,
) -> (MonitoringSystem, Arc<RecordingNotifier>) {
    monitoring_with_notifier(config, reader, RecordingNotifier::default())
}

/// Like [`monitoring_with`], with a caller-supplied notifier
pub fn monitoring_with_notifier(
    config: &MonitoringConfig,
    reader: FixedReader,
    notifier: RecordingNotifier,
) -> (MonitoringSystem, Arc<RecordingNotifier>) {
    let notifier = Arc::new(notifier);
    let monitoring =
        MonitoringSystem::with_components(config, Arc::new(reader), notifier.clone());
    (monitoring, notifier)
}
