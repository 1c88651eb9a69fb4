//! HTTP server core implementation

use crate::config::{Config, ServerConfig};
use crate::server::middleware::{CorrelationIdMiddleware, MetricsMiddleware};
use crate::server::routes;
use crate::server::state::AppState;
use crate::utils::error::{Result, TelemetryError};
use actix_web::{App, HttpServer as ActixHttpServer, web};
use std::time::Duration;
use tracing::info;

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server
    pub fn new(config: &Config) -> Self {
        info!("Creating HTTP server");
        Self::with_state(AppState::from_config(config.clone()))
    }

    /// Create a server around existing state
    pub fn with_state(state: AppState) -> Self {
        Self {
            config: state.config.server.clone(),
            state,
        }
    }

    /// Create the Actix-web application
    pub fn create_app(
        state: web::Data<AppState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let metrics = MetricsMiddleware::new(state.monitoring.metrics().clone());
        let correlation = CorrelationIdMiddleware::from_config(&state.config.monitoring.correlation);

        // Correlation is registered last so it runs first
        App::new()
            .app_data(state)
            .wrap(metrics)
            .wrap(correlation)
            .configure(routes::configure_routes)
    }

    /// Start the HTTP server and run until it shuts down
    pub async fn start(self) -> Result<()> {
        let bind_addr = self.config.address();

        info!("Starting HTTP server on {}", bind_addr);

        self.state.monitoring.start();
        let monitoring = self.state.monitoring.clone();
        let state = web::Data::new(self.state);

        let server = ActixHttpServer::new(move || Self::create_app(state.clone()))
            .workers(self.config.worker_count())
            .client_request_timeout(Duration::from_secs(self.config.timeout))
            .bind(&bind_addr)
            .map_err(|e| TelemetryError::server(format!("Failed to bind {}: {}", bind_addr, e)))?
            .run();

        info!("HTTP server listening on {}", bind_addr);

        let result = server
            .await
            .map_err(|e| TelemetryError::server(format!("Server error: {}", e)));

        monitoring.stop();
        info!("HTTP server stopped");
        result
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}
