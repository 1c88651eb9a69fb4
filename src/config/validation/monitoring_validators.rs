//! Monitoring configuration validators
//!
//! This module provides validation implementations for monitoring-related
//! configuration structures including MonitoringConfig, MetricsConfig,
//! DatabaseMonitorConfig, HealthConfig, AlertingConfig, and CorrelationConfig.

use super::trait_def::Validate;
use crate::config::models::*;
use actix_web::http::header::HeaderName;
use tracing::debug;

impl Validate for MonitoringConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating monitoring configuration");

        self.metrics.validate()?;
        self.database.validate()?;
        self.health.validate()?;
        self.alerting.validate()?;
        self.correlation.validate()?;

        Ok(())
    }
}

impl Validate for MetricsConfig {
    fn validate(&self) -> Result<(), String> {
        if self.sample_capacity == 0 {
            return Err("Metrics sample capacity must be greater than 0".to_string());
        }

        if self.top_endpoints == 0 {
            return Err("Top endpoint count must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl Validate for DatabaseMonitorConfig {
    fn validate(&self) -> Result<(), String> {
        if self.slow_threshold_ms == 0 {
            return Err("Slow query threshold must be greater than 0".to_string());
        }

        if self.sample_capacity == 0 {
            return Err("Database sample capacity must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl Validate for HealthConfig {
    fn validate(&self) -> Result<(), String> {
        if self.probe_timeout_ms == 0 {
            return Err("Probe timeout must be greater than 0".to_string());
        }

        if self.check_interval_secs > MAX_CHECK_INTERVAL_SECS {
            return Err(format!(
                "Health check interval must be at most {} seconds",
                MAX_CHECK_INTERVAL_SECS
            ));
        }

        Ok(())
    }
}

impl Validate for AlertingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_alerts == 0 {
            return Err("Maximum alert count must be greater than 0".to_string());
        }

        if self.notify_timeout_ms == 0 {
            return Err("Notification timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl Validate for CorrelationConfig {
    fn validate(&self) -> Result<(), String> {
        if self.header.is_empty() {
            return Err("Correlation header cannot be empty".to_string());
        }

        HeaderName::from_bytes(self.header.as_bytes())
            .map_err(|_| format!("Invalid correlation header name: {}", self.header))?;

        Ok(())
    }
}
