//! Background task implementations for MonitoringSystem

use super::system::MonitoringSystem;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{debug, info, warn};

impl MonitoringSystem {
    /// Start the periodic health check, unless disabled by configuration
    pub(super) fn start_background_tasks(&self) {
        let Some(period) = self.config.health.check_interval() else {
            info!("Periodic health checks disabled");
            return;
        };

        let Some(first_tick) = Instant::now().checked_add(period) else {
            warn!(
                interval_secs = period.as_secs(),
                "Health check interval out of range, periodic health checks disabled"
            );
            return;
        };

        let monitoring = self.clone();
        let handle = tokio::spawn(async move {
            let mut interval = interval_at(first_tick, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if !monitoring.is_active() {
                    break;
                }
                debug!("Running periodic health check");
                monitoring.perform_health_check(None).await;
            }
        });

        info!(interval_secs = period.as_secs(), "Periodic health checks started");
        *self.background.lock() = Some(handle);
    }
}
