//! Error handling for the telemetry service
//!
//! This module defines the crate error type and its HTTP rendering.

mod helpers;
mod response;
mod types;

pub use response::{ErrorDetail, ErrorResponse};
pub use types::{Result, TelemetryError};
