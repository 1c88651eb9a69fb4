//! Helper functions for creating specific error types

use super::types::TelemetryError;

impl TelemetryError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn monitoring<S: Into<String>>(message: S) -> Self {
        Self::Monitoring(message.into())
    }

    pub fn alert<S: Into<String>>(message: S) -> Self {
        Self::Alert(message.into())
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound(message.into())
    }

    pub fn timeout<S: Into<String>>(message: S) -> Self {
        Self::Timeout(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    pub fn server<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Stable machine-readable code for the error envelope
    pub fn code(&self) -> &'static str {
        match self {
            TelemetryError::Config(_) => "CONFIG_ERROR",
            TelemetryError::Io(_) => "IO_ERROR",
            TelemetryError::Yaml(_) => "CONFIG_PARSE_ERROR",
            TelemetryError::Serialization(_) => "SERIALIZATION_ERROR",
            TelemetryError::Monitoring(_) => "MONITORING_ERROR",
            TelemetryError::Alert(_) => "ALERT_ERROR",
            TelemetryError::NotFound(_) => "NOT_FOUND",
            TelemetryError::Timeout(_) => "TIMEOUT",
            TelemetryError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}
