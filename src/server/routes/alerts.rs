//! Alert endpoints

use super::{ApiResponse, json_response};
use crate::server::state::AppState;
use crate::utils::error::Result;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Configure alert routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/alerts")
            .route("", web::get().to(active_alerts))
            .route("/all", web::get().to(all_alerts))
            .route("/{id}/resolve", web::post().to(resolve_alert)),
    );
}

/// Outcome of a resolve request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveOutcome {
    pub resolved: bool,
}

/// Unresolved alerts
pub async fn active_alerts(state: web::Data<AppState>) -> Result<HttpResponse> {
    let alerts = state.monitoring.alerts().get_alerts();
    let meta = serde_json::json!({
        "count": alerts.len(),
        "timestamp": chrono::Utc::now(),
    });
    json_response(StatusCode::OK, &ApiResponse::success_with_meta(alerts, meta))
}

/// Every retained alert, resolved or not
pub async fn all_alerts(state: web::Data<AppState>) -> Result<HttpResponse> {
    let alerts = state.monitoring.alerts().get_all_alerts();
    let meta = serde_json::json!({
        "count": alerts.len(),
        "timestamp": chrono::Utc::now(),
    });
    json_response(StatusCode::OK, &ApiResponse::success_with_meta(alerts, meta))
}

/// Resolve an alert. Unknown or already resolved ids report `resolved: false`.
pub async fn resolve_alert(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let resolved = state.monitoring.alerts().resolve_alert(&id);
    if !resolved {
        info!(alert_id = %id, "Resolve request changed nothing");
    }
    json_response(
        StatusCode::OK,
        &ApiResponse::success(ResolveOutcome { resolved }),
    )
}
