//! Health monitor: runs the probes, rolls them up and feeds the alert rules

use super::probes::{DatabaseProbe, HealthProbe, MemoryProbe, MetricsProbe, SystemProbe};
use super::resources::ResourceReader;
use super::types::{HealthCheckResult, ProbeDetails, ProbeReport, SystemHealth};
use crate::config::HealthConfig;
use crate::monitoring::alerts::AlertManager;
use crate::monitoring::database::DatabaseMonitor;
use crate::monitoring::metrics::MetricsCollector;
use crate::monitoring::types::HealthStatus;
use futures::future::join_all;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{Instrument, debug, error, info, warn};

/// Runs health probes and evaluates alert rules against the result
#[derive(Debug)]
pub struct HealthMonitor {
    probes: Vec<Arc<dyn HealthProbe>>,
    alerts: Arc<AlertManager>,
    probe_timeout: Duration,
    version: String,
    started_at: Instant,
    /// Result of the most recent check
    last: RwLock<Option<SystemHealth>>,
}

impl HealthMonitor {
    /// Create a health monitor over an explicit probe list
    pub fn new(
        config: &HealthConfig,
        probes: Vec<Arc<dyn HealthProbe>>,
        alerts: Arc<AlertManager>,
    ) -> Self {
        Self {
            probes,
            alerts,
            probe_timeout: config.probe_timeout(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            started_at: Instant::now(),
            last: RwLock::new(None),
        }
    }

    /// Create a health monitor with the database, metrics, system and memory probes
    pub fn with_default_probes(
        config: &HealthConfig,
        database: Arc<DatabaseMonitor>,
        metrics: Arc<MetricsCollector>,
        resources: Arc<dyn ResourceReader>,
        alerts: Arc<AlertManager>,
    ) -> Self {
        let probes: Vec<Arc<dyn HealthProbe>> = vec![
            Arc::new(DatabaseProbe::new(database)),
            Arc::new(MetricsProbe::new(metrics)),
            Arc::new(SystemProbe::new(Arc::clone(&resources))),
            Arc::new(MemoryProbe::new(resources)),
        ];
        Self::new(config, probes, alerts)
    }

    /// Run every probe, roll up the results and evaluate the alert rules.
    ///
    /// Probes run concurrently, each on its own task with a bounded wait. A probe
    /// that errors, panics or times out is reported as critical; the check itself
    /// always completes.
    pub async fn perform_health_check(&self, correlation_id: Option<&str>) -> SystemHealth {
        debug!("Running health check");

        let checks = join_all(
            self.probes
                .iter()
                .map(|probe| run_probe(Arc::clone(probe), self.probe_timeout)),
        )
        .await;

        let health = SystemHealth::from_checks(
            self.version.clone(),
            self.started_at.elapsed().as_secs(),
            checks,
        );

        match health.status {
            HealthStatus::Healthy => debug!(status = %health.status, "Health check completed"),
            HealthStatus::Warning => info!(status = %health.status, "Health check completed"),
            HealthStatus::Critical | HealthStatus::Down => {
                warn!(status = %health.status, "Health check completed")
            }
        }

        *self.last.write() = Some(health.clone());

        self.alerts.process(&health, correlation_id).await;

        health
    }

    /// Result of the most recent health check, if any ran
    pub fn last_health(&self) -> Option<SystemHealth> {
        self.last.read().clone()
    }

    pub fn alerts(&self) -> &Arc<AlertManager> {
        &self.alerts
    }

    pub fn probe_names(&self) -> Vec<String> {
        self.probes.iter().map(|p| p.name().to_string()).collect()
    }
}

async fn run_probe(probe: Arc<dyn HealthProbe>, timeout: Duration) -> HealthCheckResult {
    let service = probe.name().to_string();
    let start = Instant::now();

    let task = tokio::spawn(
        {
            let probe = Arc::clone(&probe);
            async move { probe.check().await }
        }
        .in_current_span(),
    );
    let abort = task.abort_handle();

    let report = match tokio::time::timeout(timeout, task).await {
        Ok(Ok(Ok(report))) => report,
        Ok(Ok(Err(e))) => {
            error!(probe = %service, "Health probe failed: {}", e);
            failure(format!("Health check failed: {}", e))
        }
        Ok(Err(join_error)) => {
            let reason = if join_error.is_panic() {
                "Health check panicked"
            } else {
                "Health check was cancelled"
            };
            error!(probe = %service, "{}", reason);
            failure(reason.to_string())
        }
        Err(_) => {
            abort.abort();
            warn!(probe = %service, timeout_ms = timeout.as_millis() as u64, "Health probe timed out");
            failure(format!(
                "Health check timed out after {}ms",
                timeout.as_millis()
            ))
        }
    };

    HealthCheckResult {
        service,
        status: report.status,
        message: report.message,
        response_time_ms: start.elapsed().as_secs_f64() * 1000.0,
        details: report.details,
    }
}

fn failure(reason: String) -> ProbeReport {
    ProbeReport::new(
        HealthStatus::Critical,
        reason.clone(),
        ProbeDetails::Failure { reason },
    )
}
