//! HTTP response handling for errors
//!
//! Every error leaving an endpoint is rendered as the standard JSON envelope,
//! never as a raw actix error page.

use super::types::TelemetryError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

impl ResponseError for TelemetryError {
    fn status_code(&self) -> StatusCode {
        match self {
            TelemetryError::NotFound(_) => StatusCode::NOT_FOUND,
            TelemetryError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Internal details stay in the logs
        let message = match self {
            TelemetryError::NotFound(_) | TelemetryError::Timeout(_) => self.to_string(),
            TelemetryError::Serialization(_) => "Failed to serialize response".to_string(),
            _ => "An internal error occurred".to_string(),
        };

        tracing::error!(code = self.code(), error = %self, "Request failed");

        let body = ErrorResponse {
            success: false,
            error: message,
            meta: ErrorDetail {
                code: self.code().to_string(),
                timestamp: chrono::Utc::now(),
            },
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

/// Standard error response format
#[derive(Debug, serde::Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub meta: ErrorDetail,
}

/// Error metadata attached to every error envelope
#[derive(Debug, serde::Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}
