//! Request metrics collection and aggregation
//!
//! Every completed HTTP request is recorded as a [`RequestSample`]. Samples are kept
//! in a bounded ring buffer for percentile computation while lifetime counters and
//! per-endpoint aggregates grow independently of it.

mod bounded;
mod collector;
mod getters;
mod helpers;
mod prometheus;
mod types;


pub(crate) use bounded::BoundedPush;
pub(crate) use helpers::percentage;
pub use collector::{ActiveRequestGuard, MetricsCollector};
pub(crate) use prometheus::PrometheusText;
pub use types::{EndpointSummary, MetricsSnapshot, RequestSample, StatusCodeCount};
