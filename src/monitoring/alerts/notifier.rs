//! Alert notification strategy

use super::types::Alert;
use crate::monitoring::types::AlertSeverity;
use crate::utils::error::Result;
use tracing::{error, warn};

/// Side effect run for every alert that passes the cooldown
#[async_trait::async_trait]
pub trait Notifier: Send + Sync + std::fmt::Debug {
    /// Deliver a notification for `alert`
    async fn notify(&self, alert: &Alert) -> Result<()>;

    /// Notifier name, used in logs
    fn name(&self) -> &str;
}

/// Writes each alert as a structured log line
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

#[async_trait::async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, alert: &Alert) -> Result<()> {
        let correlation_id = alert.correlation_id.as_deref().unwrap_or("-");
        match alert.severity {
            AlertSeverity::High | AlertSeverity::Critical => error!(
                alert_id = %alert.id,
                alert_type = %alert.alert_type,
                severity = %alert.severity,
                correlation_id,
                "ALERT: {}",
                alert.message
            ),
            AlertSeverity::Low | AlertSeverity::Medium => warn!(
                alert_id = %alert.id,
                alert_type = %alert.alert_type,
                severity = %alert.severity,
                correlation_id,
                "ALERT: {}",
                alert.message
            ),
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "log"
    }
}
