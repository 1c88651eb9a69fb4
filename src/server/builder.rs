//! Server builder and run_server function

use crate::config::Config;
use crate::monitoring::MonitoringSystem;
use crate::server::server::HttpServer;
use crate::server::state::AppState;
use crate::utils::error::{Result, TelemetryError};
use tracing::info;

/// Server builder for easier configuration
#[derive(Default)]
pub struct ServerBuilder {
    config: Option<Config>,
    monitoring: Option<MonitoringSystem>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Use an existing monitoring system instead of creating one
    pub fn with_monitoring(mut self, monitoring: MonitoringSystem) -> Self {
        self.monitoring = Some(monitoring);
        self
    }

    /// Build the HTTP server
    pub fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| TelemetryError::Config("Configuration is required".to_string()))?;
        config.validate()?;

        let state = match self.monitoring {
            Some(monitoring) => AppState::new(config, monitoring),
            None => AppState::from_config(config),
        };
        Ok(HttpServer::with_state(state))
    }
}

/// Run the server with the given configuration
pub async fn run_server(config: Config) -> Result<()> {
    let server = ServerBuilder::new().with_config(config).build()?;

    info!("Server starting at: http://{}", server.config().address());
    info!("Endpoints:");
    info!("   GET  /health - Health check");
    info!("   GET  /metrics - Request metrics snapshot");
    info!("   GET  /metrics/prometheus - Prometheus exposition");
    info!("   GET  /alerts - Active alerts");
    info!("   GET  /alerts/all - All alerts");
    info!("   POST /alerts/{{id}}/resolve - Resolve an alert");

    server.start().await
}
