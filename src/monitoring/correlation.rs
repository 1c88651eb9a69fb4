//! Per-request correlation identifiers
//!
//! A [`CorrelationId`] is assigned once when a request enters the service, either
//! propagated from the caller's header or freshly generated, and stays read-only
//! for the lifetime of that request. It lives in the request's extensions, never
//! in shared state.

use actix_web::dev::Payload;
use actix_web::http::header::HeaderValue;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures::future::{Ready, ready};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use uuid::Uuid;

/// Placeholder used when an identifier cannot be produced or encoded
pub const UNKNOWN_CORRELATION_ID: &str = "unknown-correlation-id";

/// Longest inbound identifier that is propagated as-is
pub const MAX_CORRELATION_ID_LEN: usize = 128;

/// Opaque identifier tying together the logs, metrics and alerts of one request
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrelationId(String);

impl CorrelationId {
    /// Generate a fresh UUID v4 identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Reuse an inbound value when acceptable, otherwise generate a new id
    pub fn from_inbound(value: Option<&HeaderValue>) -> Self {
        value
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| Self::is_acceptable(v))
            .map(|v| Self(v.to_string()))
            .unwrap_or_else(Self::generate)
    }

    pub fn unknown() -> Self {
        Self(UNKNOWN_CORRELATION_ID.to_string())
    }

    /// 1..=128 visible ASCII characters
    pub fn is_acceptable(value: &str) -> bool {
        !value.is_empty()
            && value.len() <= MAX_CORRELATION_ID_LEN
            && value.bytes().all(|b| b.is_ascii_graphic())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Encode for a response header, falling back to the placeholder
    pub fn header_value(&self) -> HeaderValue {
        HeaderValue::from_str(&self.0)
            .unwrap_or_else(|_| HeaderValue::from_static(UNKNOWN_CORRELATION_ID))
    }

    /// Read the id assigned to `req`, if the correlation middleware ran
    pub fn of(req: &HttpRequest) -> Option<Self> {
        req.extensions().get::<CorrelationId>().cloned()
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CorrelationId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromRequest for CorrelationId {
    type Error = Infallible;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Ok(Self::of(req).unwrap_or_else(Self::unknown)))
    }
}
