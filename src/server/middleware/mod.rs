//! HTTP middleware implementations
//!
//! - Correlation ID assignment and propagation
//! - Request metrics collection

mod correlation;
mod metrics;


pub use correlation::{CORRELATION_HEADER, CorrelationIdMiddleware, CorrelationIdMiddlewareService};
pub use metrics::{MetricsMiddleware, MetricsMiddlewareService, UNMATCHED_ROUTE};
