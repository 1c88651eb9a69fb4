//! Core MonitoringSystem implementation

use crate::config::MonitoringConfig;
use crate::monitoring::alerts::{AlertManager, LogNotifier, Notifier};
use crate::monitoring::database::DatabaseMonitor;
use crate::monitoring::health::{HealthMonitor, ResourceReader, SysinfoReader, SystemHealth};
use crate::monitoring::metrics::{MetricsCollector, MetricsSnapshot, PrometheusText};
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::task::JoinHandle;
use tracing::info;

/// Process-wide observability service.
///
/// Constructed once at startup and shared by handle; every clone refers to the same
/// collectors, monitors and alert store.
#[derive(Debug, Clone)]
pub struct MonitoringSystem {
    /// Monitoring configuration
    pub(super) config: Arc<MonitoringConfig>,
    /// Request metrics collector
    pub(super) metrics: Arc<MetricsCollector>,
    /// Database operation monitor
    pub(super) database: Arc<DatabaseMonitor>,
    /// Health monitor
    pub(super) health: Arc<HealthMonitor>,
    /// Alert manager
    pub(super) alerts: Arc<AlertManager>,
    /// Whether background tasks are running - using AtomicBool for lock-free access
    pub(super) active: Arc<AtomicBool>,
    /// Periodic health check task
    pub(super) background: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl MonitoringSystem {
    /// Create a monitoring system reading host resources through `sysinfo`
    pub fn new(config: &MonitoringConfig) -> Self {
        Self::with_components(config, Arc::new(SysinfoReader::new()), Arc::new(LogNotifier))
    }

    /// Create a monitoring system with explicit resource reader and notifier
    pub fn with_components(
        config: &MonitoringConfig,
        resources: Arc<dyn ResourceReader>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        info!("Initializing monitoring system");

        let config = Arc::new(config.clone());
        let metrics = Arc::new(MetricsCollector::new(&config.metrics));
        let database = Arc::new(DatabaseMonitor::new(&config.database));
        let alerts = Arc::new(AlertManager::with_notifier(&config.alerting, notifier));
        let health = Arc::new(HealthMonitor::with_default_probes(
            &config.health,
            Arc::clone(&database),
            Arc::clone(&metrics),
            resources,
            Arc::clone(&alerts),
        ));

        Self {
            config,
            metrics,
            database,
            health,
            alerts,
            active: Arc::new(AtomicBool::new(false)),
            background: Arc::new(Mutex::new(None)),
        }
    }

    /// Start background tasks
    pub fn start(&self) {
        if self.active.swap(true, Ordering::AcqRel) {
            return;
        }
        info!("Starting monitoring system");
        self.start_background_tasks();
    }

    /// Stop background tasks
    pub fn stop(&self) {
        if !self.active.swap(false, Ordering::AcqRel) {
            return;
        }
        info!("Stopping monitoring system");
        if let Some(handle) = self.background.lock().take() {
            handle.abort();
        }
    }

    /// Check if background tasks are running
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    pub fn config(&self) -> &MonitoringConfig {
        &self.config
    }

    pub fn metrics(&self) -> &Arc<MetricsCollector> {
        &self.metrics
    }

    pub fn database(&self) -> &Arc<DatabaseMonitor> {
        &self.database
    }

    pub fn health(&self) -> &Arc<HealthMonitor> {
        &self.health
    }

    pub fn alerts(&self) -> &Arc<AlertManager> {
        &self.alerts
    }

    /// Request metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Run the probes and evaluate alert rules
    pub async fn perform_health_check(&self, correlation_id: Option<&str>) -> SystemHealth {
        self.health.perform_health_check(correlation_id).await
    }

    /// Request, database and alert metrics in Prometheus text format
    pub fn to_prometheus_text(&self) -> String {
        let mut out = PrometheusText::new();
        self.metrics.write_prometheus(&mut out);
        self.database.write_prometheus(&mut out);
        out.single(
            "alerts_active",
            "Number of unresolved alerts",
            "gauge",
            self.alerts.active_count() as f64,
        );
        out.finish()
    }
}
