//! Correlation ID middleware

use crate::config::CorrelationConfig;
use crate::monitoring::CorrelationId;
use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::http::header::HeaderName;
use actix_web::HttpMessage;
use futures::future::{Ready, ready};
use std::future::Future;
use std::pin::Pin;
use tracing::{Instrument, info_span, warn};

/// Default header carrying the correlation id
pub const CORRELATION_HEADER: &str = "x-correlation-id";

/// Assigns a [`CorrelationId`] to every request before any handler runs.
///
/// The id is stored in the request extensions, opens the `http_request` span for
/// the rest of the request, and is echoed on the response.
#[derive(Debug, Clone)]
pub struct CorrelationIdMiddleware {
    header: HeaderName,
}

impl CorrelationIdMiddleware {
    pub fn new(header: HeaderName) -> Self {
        Self { header }
    }

    /// Use the configured header, falling back to `x-correlation-id` if it is invalid
    pub fn from_config(config: &CorrelationConfig) -> Self {
        let header = HeaderName::from_bytes(config.header.as_bytes()).unwrap_or_else(|_| {
            warn!(header = %config.header, "Invalid correlation header, using default");
            HeaderName::from_static(CORRELATION_HEADER)
        });
        Self::new(header)
    }

    pub fn header(&self) -> &HeaderName {
        &self.header
    }
}

impl Default for CorrelationIdMiddleware {
    fn default() -> Self {
        Self::new(HeaderName::from_static(CORRELATION_HEADER))
    }
}

impl<S, B> Transform<S, ServiceRequest> for CorrelationIdMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = CorrelationIdMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(CorrelationIdMiddlewareService {
            service,
            header: self.header.clone(),
        }))
    }
}

/// Service implementation for correlation ID middleware
pub struct CorrelationIdMiddlewareService<S> {
    service: S,
    header: HeaderName,
}

impl<S, B> Service<ServiceRequest> for CorrelationIdMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let correlation_id = CorrelationId::from_inbound(req.headers().get(&self.header));
        req.extensions_mut().insert(correlation_id.clone());

        let span = info_span!(
            "http_request",
            correlation_id = %correlation_id,
            method = %req.method(),
            path = %req.path(),
        );

        let http_req = req.request().clone();
        let header = self.header.clone();
        let fut = {
            let _entered = span.enter();
            self.service.call(req)
        };

        Box::pin(
            async move {
                // Errors become responses here so they carry the header too
                let mut res = match fut.await {
                    Ok(res) => res.map_into_boxed_body(),
                    Err(err) => ServiceResponse::from_err(err, http_req),
                };
                res.headers_mut()
                    .insert(header, correlation_id.header_value());
                Ok(res)
            }
            .instrument(span),
        )
    }
}
