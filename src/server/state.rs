//! Application state shared across HTTP handlers

use crate::config::Config;
use crate::monitoring::MonitoringSystem;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// Cloning is cheap; all clones share the same monitoring system.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Service configuration (shared read-only)
    pub config: Arc<Config>,
    /// Observability core
    pub monitoring: MonitoringSystem,
}

impl AppState {
    /// Create a new AppState with shared resources
    pub fn new(config: Config, monitoring: MonitoringSystem) -> Self {
        Self {
            config: Arc::new(config),
            monitoring,
        }
    }

    /// Build state with a monitoring system created from `config`
    pub fn from_config(config: Config) -> Self {
        let monitoring = MonitoringSystem::new(&config.monitoring);
        Self::new(config, monitoring)
    }

    /// Get service configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
