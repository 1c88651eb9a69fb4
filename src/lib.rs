//! # Inventory Telemetry
//!
//! Observability core for the inventory service.
//!
//! ## Features
//!
//! - **Request Correlation**: Every request carries an `x-correlation-id`, echoed on the
//!   response and attached to every log line emitted while serving it
//! - **Request Metrics**: Bounded sample window with nearest-rank P95/P99, per-route
//!   counters and a Prometheus text rendering
//! - **Database Monitoring**: Timing wrapper for data-store calls with slow-operation
//!   detection and connection pool event accounting
//! - **Health Checks**: Database, metrics, system and memory probes rolled up into one
//!   status, each probe isolated by a timeout
//! - **Alerting**: Threshold rules evaluated after each health check, with in-memory
//!   alert history and manual resolution
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use inventory_telemetry::{Config, MonitoringSystem};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let monitoring = MonitoringSystem::new(&config.monitoring);
//!
//!     let devices = monitoring
//!         .database()
//!         .timed("devices", "find", || async { Ok::<_, std::io::Error>(vec!["d-1"]) })
//!         .await?;
//!     println!("found {} devices", devices.len());
//!
//!     let health = monitoring.perform_health_check(None).await;
//!     println!("status: {}", health.status);
//!     Ok(())
//! }
//! ```
//!
//! ## Server Mode
//!
//! ```rust,no_run
//! use inventory_telemetry::{Config, TelemetryService};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let service = TelemetryService::new(Config::default())?;
//!     service.run().await?;
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod monitoring;
pub mod server;
pub mod utils;

pub use config::Config;
pub use monitoring::{AlertSeverity, CorrelationId, HealthStatus, MonitoringSystem};
pub use utils::error::{Result, TelemetryError};

use tracing::info;

/// Telemetry HTTP service: the monitoring system behind its HTTP endpoints
pub struct TelemetryService {
    server: server::HttpServer,
}

impl TelemetryService {
    /// Create a new service instance from validated configuration
    pub fn new(config: Config) -> Result<Self> {
        info!("Creating telemetry service");
        let server = server::builder::ServerBuilder::new()
            .with_config(config)
            .build()?;
        Ok(Self { server })
    }

    /// Monitoring system shared with the HTTP handlers
    pub fn monitoring(&self) -> &MonitoringSystem {
        &self.server.state().monitoring
    }

    /// Run until the server shuts down
    pub async fn run(self) -> Result<()> {
        info!("Starting telemetry service");
        self.server.start().await
    }
}

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
