//! Health checking system
//!
//! Each check runs the probes from scratch; no per-probe state carries over between
//! invocations.

mod monitor;
mod probes;
mod resources;
mod types;


pub use monitor::HealthMonitor;
pub use probes::{
    DatabaseProbe, HealthProbe, MemoryProbe, MetricsProbe, SystemProbe, classify_memory,
    classify_metrics,
};
pub use resources::{MemoryReading, ResourceReader, SysinfoReader};
pub use types::{HealthCheckResult, HealthSummary, ProbeDetails, ProbeReport, SystemHealth};
