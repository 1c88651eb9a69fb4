//! Utility modules for the telemetry service
//!
//! - **error**: Error type, result alias and HTTP error rendering
//! - **logging**: Tracing subscriber setup

pub mod error;
pub mod logging;

pub use error::{Result, TelemetryError};
