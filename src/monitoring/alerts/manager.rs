//! Alert manager implementation

use super::notifier::{LogNotifier, Notifier};
use super::rules::{AlertCandidate, evaluate_rules};
use super::types::{Alert, AlertStats, AlertStorage, AlertType};
use crate::config::AlertingConfig;
use crate::monitoring::health::SystemHealth;
use chrono::Utc;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::{Instrument, debug, info, warn};

/// Records, notifies and resolves alerts
#[derive(Debug)]
pub struct AlertManager {
    /// Configuration
    config: AlertingConfig,
    /// Consolidated storage for all alert-related data
    pub(super) storage: Arc<RwLock<AlertStorage>>,
    notifier: Arc<dyn Notifier>,
    /// Disambiguates ids created within the same millisecond
    sequence: AtomicU64,
    /// Last notification per alert type, for the cooldown
    last_notified: Mutex<HashMap<AlertType, Instant>>,
}

impl AlertManager {
    /// Create an alert manager that notifies through the log
    pub fn new(config: &AlertingConfig) -> Self {
        Self::with_notifier(config, Arc::new(LogNotifier))
    }

    pub fn with_notifier(config: &AlertingConfig, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            config: config.clone(),
            storage: Arc::new(RwLock::new(AlertStorage::default())),
            notifier,
            sequence: AtomicU64::new(0),
            last_notified: Mutex::new(HashMap::new()),
        }
    }

    /// Evaluate the alert rules against `health` and raise whatever fires
    pub async fn process(&self, health: &SystemHealth, correlation_id: Option<&str>) -> Vec<Alert> {
        let candidates = evaluate_rules(health);
        if !candidates.is_empty() {
            debug!(count = candidates.len(), "Alert rules fired");
        }

        let mut raised = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            raised.push(self.raise(candidate, correlation_id).await);
        }
        raised
    }

    /// Record a new alert and notify unless its type is cooling down.
    ///
    /// Notification runs on its own task, so a slow notifier never delays the caller.
    pub async fn raise(&self, candidate: AlertCandidate, correlation_id: Option<&str>) -> Alert {
        let now = Utc::now();
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);

        let alert = Alert {
            id: format!("{}-{}-{}", candidate.alert_type, now.timestamp_millis(), seq),
            alert_type: candidate.alert_type,
            severity: candidate.severity,
            message: candidate.message,
            details: candidate.details,
            timestamp: now,
            correlation_id: correlation_id.map(String::from),
            resolved: false,
            resolved_at: None,
        };

        {
            let mut storage = self.storage.write();

            storage.stats.total_alerts += 1;
            *storage
                .stats
                .alerts_by_severity
                .entry(alert.severity)
                .or_insert(0) += 1;
            *storage
                .stats
                .alerts_by_type
                .entry(alert.alert_type)
                .or_insert(0) += 1;
            storage.stats.last_alert = Some(alert.timestamp);

            storage.order.push_back(alert.id.clone());
            storage.alerts.insert(alert.id.clone(), alert.clone());

            Self::evict_resolved(&mut storage, self.config.max_alerts);
        }

        if self.should_notify(alert.alert_type) {
            self.spawn_notification(alert.clone());
        } else {
            debug!(alert_id = %alert.id, "Alert notification suppressed by cooldown");
            self.storage.write().stats.suppressed_notifications += 1;
        }

        alert
    }

    /// Deliver `alert` off the caller's path, bounded by the notify timeout
    fn spawn_notification(&self, alert: Alert) {
        let notifier = Arc::clone(&self.notifier);
        let storage = Arc::clone(&self.storage);
        let limit = self.config.notify_timeout();

        tokio::spawn(
            async move {
                let failure = match tokio::time::timeout(limit, notifier.notify(&alert)).await {
                    Ok(Ok(())) => return,
                    Ok(Err(e)) => e.to_string(),
                    Err(_) => format!("timed out after {}ms", limit.as_millis()),
                };
                warn!(
                    notifier = notifier.name(),
                    alert_id = %alert.id,
                    "Failed to send alert notification: {}",
                    failure
                );
                storage.write().stats.failed_notifications += 1;
            }
            .in_current_span(),
        );
    }

    /// Mark an active alert resolved. Returns whether anything changed.
    pub fn resolve_alert(&self, id: &str) -> bool {
        let mut storage = self.storage.write();
        let resolved = match storage.alerts.get_mut(id) {
            Some(alert) if !alert.resolved => {
                alert.resolved = true;
                alert.resolved_at = Some(Utc::now());
                true
            }
            _ => false,
        };

        if resolved {
            storage.stats.resolved_alerts += 1;
            info!(alert_id = %id, "Alert resolved");
        }
        resolved
    }

    /// Active alerts, newest first
    pub fn get_alerts(&self) -> Vec<Alert> {
        self.collect(Alert::is_active)
    }

    /// All retained alerts including resolved ones, newest first
    pub fn get_all_alerts(&self) -> Vec<Alert> {
        self.collect(|_| true)
    }

    pub fn get_alert(&self, id: &str) -> Option<Alert> {
        self.storage.read().alerts.get(id).cloned()
    }

    pub fn active_count(&self) -> usize {
        self.storage
            .read()
            .alerts
            .values()
            .filter(|a| a.is_active())
            .count()
    }

    pub fn stats(&self) -> AlertStats {
        self.storage.read().stats.clone()
    }

    fn collect<F>(&self, keep: F) -> Vec<Alert>
    where
        F: Fn(&Alert) -> bool,
    {
        let storage = self.storage.read();
        storage
            .order
            .iter()
            .rev()
            .filter_map(|id| storage.alerts.get(id))
            .filter(|alert| keep(*alert))
            .cloned()
            .collect()
    }

    fn should_notify(&self, alert_type: AlertType) -> bool {
        let Some(cooldown) = self.config.notify_cooldown() else {
            return true;
        };

        let mut last_notified = self.last_notified.lock();
        let now = Instant::now();
        match last_notified.get(&alert_type) {
            Some(last) if now.duration_since(*last) < cooldown => false,
            _ => {
                last_notified.insert(alert_type, now);
                true
            }
        }
    }

    /// Drop the oldest resolved alerts until the store fits `max_alerts`
    fn evict_resolved(storage: &mut AlertStorage, max_alerts: usize) {
        while storage.alerts.len() > max_alerts {
            let Some(position) = storage
                .order
                .iter()
                .position(|id| storage.alerts.get(id).is_some_and(|a| a.resolved))
            else {
                break;
            };

            if let Some(id) = storage.order.remove(position) {
                storage.alerts.remove(&id);
                debug!(alert_id = %id, "Evicted resolved alert");
            }
        }
    }
}
