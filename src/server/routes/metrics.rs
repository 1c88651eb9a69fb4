//! Metrics endpoints

use super::json_response;
use crate::server::state::AppState;
use crate::utils::error::Result;
use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, web};

/// Configure metrics routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/metrics")
            .route("", web::get().to(metrics_snapshot))
            .route("/prometheus", web::get().to(prometheus_metrics)),
    );
}

/// Request metrics snapshot as JSON
pub async fn metrics_snapshot(state: web::Data<AppState>) -> Result<HttpResponse> {
    json_response(StatusCode::OK, &state.monitoring.snapshot())
}

/// Request, database and alert metrics in Prometheus text format
pub async fn prometheus_metrics(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body(state.monitoring.to_prometheus_text())
}
