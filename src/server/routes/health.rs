//! Health check endpoint

use super::{ApiResponse, json_response};
use crate::monitoring::{CorrelationId, HealthStatus};
use crate::server::state::AppState;
use crate::utils::error::Result;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use tracing::debug;

/// Configure health check routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}

/// HTTP status for an overall health status
pub fn status_code_for(status: HealthStatus) -> StatusCode {
    match status {
        HealthStatus::Healthy | HealthStatus::Warning => StatusCode::OK,
        HealthStatus::Critical => StatusCode::INTERNAL_SERVER_ERROR,
        HealthStatus::Down => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Run a full health check.
///
/// Always answers with a JSON body; probe failures only change the status code.
pub async fn health_check(
    state: web::Data<AppState>,
    correlation_id: CorrelationId,
) -> Result<HttpResponse> {
    debug!("Health check requested");

    let health = state
        .monitoring
        .perform_health_check(Some(correlation_id.as_str()))
        .await;
    let status = status_code_for(health.status);

    let meta = serde_json::json!({
        "timestamp": chrono::Utc::now(),
        "correlationId": correlation_id,
    });

    json_response(status, &ApiResponse::success_with_meta(health, meta))
}
