//! Monitoring and observability system
//!
//! Request correlation, request metrics, database operation monitoring, health
//! probes and alerting, wired together by [`MonitoringSystem`].

// Public submodules
pub mod alerts;
pub mod correlation;
pub mod database;
pub mod health;
pub mod metrics;

// Internal submodules
mod background;
mod system;
mod types;

// Re-export public types
pub use correlation::CorrelationId;
pub use system::MonitoringSystem;
pub use types::{AlertSeverity, HealthStatus};
