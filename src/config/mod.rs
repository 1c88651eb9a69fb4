//! Configuration management for the telemetry service
//!
//! This module handles loading, validation, and management of all service configuration.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{Result, TelemetryError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

/// Main configuration struct for the telemetry service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Metrics, database, health and alerting configuration
    #[serde(default)]
    pub monitoring: MonitoringConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| TelemetryError::Config(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_yaml(&content)?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Parse and validate configuration from a YAML document
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| TelemetryError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let mut config = Self::default();
        config.apply_env_overrides(|key| std::env::var(key).ok())?;

        config.validate()?;
        Ok(config)
    }

    /// Apply `TELEMETRY_*` overrides using the given variable lookup
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("TELEMETRY_HOST") {
            self.server.host = host;
        }
        if let Some(port) = parse_var(&lookup, "TELEMETRY_PORT")? {
            self.server.port = port;
        }
        if let Some(workers) = parse_var(&lookup, "TELEMETRY_WORKERS")? {
            self.server.workers = Some(workers);
        }
        if let Some(level) = lookup("TELEMETRY_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(ms) = parse_var(&lookup, "TELEMETRY_SLOW_QUERY_MS")? {
            self.monitoring.database.slow_threshold_ms = ms;
        }
        if let Some(secs) = parse_var(&lookup, "TELEMETRY_HEALTH_INTERVAL_SECS")? {
            self.monitoring.health.check_interval_secs = secs;
        }

        Ok(())
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.server
    }

    /// Get monitoring configuration
    pub fn monitoring(&self) -> &MonitoringConfig {
        &self.monitoring
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.server
            .validate()
            .map_err(|e| TelemetryError::Config(format!("Server config error: {}", e)))?;

        self.monitoring
            .validate()
            .map_err(|e| TelemetryError::Config(format!("Monitoring config error: {}", e)))?;

        self.logging
            .validate()
            .map_err(|e| TelemetryError::Config(format!("Logging config error: {}", e)))?;

        debug!("Configuration validation completed");
        Ok(())
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| TelemetryError::Config(format!("Invalid {}: {}", key, e)))
        })
        .transpose()
}
