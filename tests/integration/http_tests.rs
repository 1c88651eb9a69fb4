//! HTTP surface integration tests
//!
//! Run the full application (middleware and routes) in-process, with an extra
//! inventory route standing in for the host service's own handlers.

#[cfg(test)]
mod tests {
    use crate::common::assertions::assert_has_sample;
    use crate::common::{FixedReader, RecordingNotifier};
    use actix_web::http::StatusCode;
    use actix_web::{HttpResponse, test, web};
    use inventory_telemetry::config::Config;
    use inventory_telemetry::monitoring::MonitoringSystem;
    use inventory_telemetry::server::{AppState, HttpServer};
    use inventory_telemetry::{CorrelationId, TelemetryError};
    use serde_json::Value;
    use std::sync::Arc;

    fn state(config: Config, reader: FixedReader) -> web::Data<AppState> {
        let monitoring = MonitoringSystem::with_components(
            &config.monitoring,
            Arc::new(reader),
            Arc::new(RecordingNotifier::default()),
        );
        web::Data::new(AppState::new(config, monitoring))
    }

    async fn list_items(
        state: web::Data<AppState>,
        correlation_id: CorrelationId,
    ) -> Result<HttpResponse, TelemetryError> {
        let items = state
            .monitoring
            .database()
            .timed("items", "find", || async {
                Ok::<_, TelemetryError>(vec!["pallet-1", "pallet-2"])
            })
            .await?;
        Ok(HttpResponse::Ok().json(serde_json::json!({
            "items": items,
            "correlationId": correlation_id,
        })))
    }

    async fn lookup_item(path: web::Path<String>) -> Result<HttpResponse, TelemetryError> {
        Err(TelemetryError::not_found(format!("item {}", path.into_inner())))
    }

    #[actix_web::test]
    async fn test_handler_sees_inbound_correlation_id() {
        let app = test::init_service(
            HttpServer::create_app(state(Config::default(), FixedReader::idle()))
                .route("/items", web::get().to(list_items)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/items")
            .insert_header(("x-correlation-id", "scan-42"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers().get("x-correlation-id").unwrap(), "scan-42");
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["correlationId"], "scan-42");
        assert_eq!(body["items"].as_array().unwrap().len(), 2);
    }

    #[actix_web::test]
    async fn test_error_envelope_keeps_correlation_header() {
        let app = test::init_service(
            HttpServer::create_app(state(Config::default(), FixedReader::idle()))
                .route("/items/{id}", web::get().to(lookup_item)),
        )
        .await;

        let resp =
            test::call_service(&app, test::TestRequest::get().uri("/items/x9").to_request()).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert!(resp.headers().contains_key("x-correlation-id"));
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["meta"]["code"], "NOT_FOUND");
        assert!(body["error"].as_str().unwrap().contains("x9"));
    }

    #[actix_web::test]
    async fn test_traffic_shows_up_in_prometheus() {
        let data = state(Config::default(), FixedReader::idle());
        let app = test::init_service(
            HttpServer::create_app(data.clone())
                .route("/items", web::get().to(list_items))
                .route("/items/{id}", web::get().to(lookup_item)),
        )
        .await;

        test::call_service(&app, test::TestRequest::get().uri("/items").to_request()).await;
        test::call_service(&app, test::TestRequest::get().uri("/items/a").to_request()).await;
        test::call_service(&app, test::TestRequest::get().uri("/items/b").to_request()).await;
        test::call_service(&app, test::TestRequest::get().uri("/missing").to_request()).await;

        let resp = test::call_service(
            &app,
            test::TestRequest::get().uri("/metrics/prometheus").to_request(),
        )
        .await;
        let text = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();

        assert_has_sample(&text, "http_requests_total 4");
        assert_has_sample(&text, "http_request_errors_total 3");
        assert_has_sample(
            &text,
            "http_requests_by_route_total{method=\"GET\",route=\"/items/{id}\"} 2",
        );
        assert_has_sample(
            &text,
            "http_requests_by_route_total{method=\"GET\",route=\"unmatched\"} 1",
        );
        assert_has_sample(&text, "db_queries_total 1");
        assert_eq!(data.monitoring.metrics().active_requests(), 0);
    }

    #[actix_web::test]
    async fn test_custom_correlation_header() {
        let mut config = Config::default();
        config.monitoring.correlation.header = "x-trace-token".to_string();
        let app =
            test::init_service(HttpServer::create_app(state(config, FixedReader::idle()))).await;

        let req = test::TestRequest::get()
            .uri("/alerts")
            .insert_header(("x-trace-token", "tok-7"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.headers().get("x-trace-token").unwrap(), "tok-7");
        assert!(!resp.headers().contains_key("x-correlation-id"));
    }

    #[actix_web::test]
    async fn test_health_alerts_resolve_flow() {
        let app = test::init_service(HttpServer::create_app(state(
            Config::default(),
            FixedReader::with_memory(97),
        )))
        .await;

        let req = test::TestRequest::get()
            .uri("/health")
            .insert_header(("x-correlation-id", "ops-check"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["checks"][3]["service"], "memory");
        assert_eq!(body["data"]["checks"][3]["details"]["kind"], "memory");

        let resp = test::call_service(&app, test::TestRequest::get().uri("/alerts").to_request()).await;
        let body: Value = test::read_body_json(resp).await;
        let alerts = body["data"].as_array().unwrap().clone();
        assert_eq!(alerts.len(), 2);
        assert!(alerts.iter().all(|a| a["correlationId"] == "ops-check"));

        for alert in &alerts {
            let uri = format!("/alerts/{}/resolve", alert["id"].as_str().unwrap());
            let resp = test::call_service(&app, test::TestRequest::post().uri(&uri).to_request()).await;
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["data"]["resolved"], true);
        }

        let resp = test::call_service(&app, test::TestRequest::get().uri("/alerts").to_request()).await;
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["meta"]["count"], 0);

        let resp =
            test::call_service(&app, test::TestRequest::get().uri("/alerts/all").to_request()).await;
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 2);
    }
}
