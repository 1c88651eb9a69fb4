//! Integration tests for inventory-telemetry
//!
//! These tests verify the interaction between the monitoring components through the
//! public API.

pub mod config_validation_tests;
pub mod health_alert_tests;
pub mod http_tests;
pub mod metrics_tests;
