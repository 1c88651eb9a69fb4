//! Metrics middleware for request monitoring

use crate::monitoring::metrics::{MetricsCollector, RequestSample};
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use futures::future::{Ready, ready};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Route key for requests that matched no registered resource
pub const UNMATCHED_ROUTE: &str = "unmatched";

/// Records every request with the metrics collector.
///
/// The active gauge rises on entry and falls when the request finishes or is
/// dropped. Requests are keyed by their matched route pattern.
#[derive(Debug, Clone)]
pub struct MetricsMiddleware {
    collector: Arc<MetricsCollector>,
}

impl MetricsMiddleware {
    pub fn new(collector: Arc<MetricsCollector>) -> Self {
        Self { collector }
    }
}

impl<S, B> Transform<S, ServiceRequest> for MetricsMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = MetricsMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(MetricsMiddlewareService {
            service,
            collector: Arc::clone(&self.collector),
        }))
    }
}

/// Service implementation for metrics middleware
pub struct MetricsMiddlewareService<S> {
    service: S,
    collector: Arc<MetricsCollector>,
}

impl<S, B> Service<ServiceRequest> for MetricsMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let guard = self.collector.begin_request();
        let start_time = Instant::now();
        let method = req.method().to_string();
        let route = req
            .match_pattern()
            .unwrap_or_else(|| UNMATCHED_ROUTE.to_string());

        let collector = Arc::clone(&self.collector);
        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;

            let response_time = start_time.elapsed();
            let status_code = match &result {
                Ok(res) => res.status().as_u16(),
                Err(err) => err.as_response_error().status_code().as_u16(),
            };

            info!(
                "{} {} -> {} in {:?}",
                method, route, status_code, response_time
            );
            collector.record_request(RequestSample::new(method, route, status_code, response_time));
            drop(guard);

            result
        })
    }
}
