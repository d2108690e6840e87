//! Request-scoped trace context.
//!
//! # Responsibilities
//! - Mint or adopt the request identifier for an inbound request
//! - Propagate it to every outbound call via the x-request-id header
//! - Open child spans for the stages of a chain
//!
//! # Design Decisions
//! - The context is created once per inbound request and passed by
//!   reference; it is never mutated downstream
//! - Span nesting follows await scope: a stage span opened inside a chain
//!   span becomes its child

use axum::http::HeaderMap;
use tracing::Span;
use uuid::Uuid;

/// Header carrying the propagated request identifier.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Propagated causal identifier linking the operations of one inbound
/// request across services and outbound calls.
#[derive(Debug, Clone)]
pub struct TraceContext {
    request_id: String,
}

impl TraceContext {
    /// Fresh context with a newly minted request ID.
    pub fn new() -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
        }
    }

    /// Adopt the inbound request's ID when present, otherwise mint one.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get(X_REQUEST_ID)
            .and_then(|value| value.to_str().ok())
            .map(|id| Self {
                request_id: id.to_string(),
            })
            .unwrap_or_else(Self::new)
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Span for one stage of an operation; nests under whatever span the
    /// caller is currently inside.
    pub fn span(&self, stage: &'static str) -> Span {
        tracing::info_span!("stage", name = stage, request_id = %self.request_id)
    }
}

impl Default for TraceContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn adopts_inbound_request_id() {
        let mut headers = HeaderMap::new();
        headers.insert(X_REQUEST_ID, HeaderValue::from_static("abc-123"));
        let trace = TraceContext::from_headers(&headers);
        assert_eq!(trace.request_id(), "abc-123");
    }

    #[test]
    fn mints_an_id_when_header_is_absent() {
        let trace = TraceContext::from_headers(&HeaderMap::new());
        assert!(!trace.request_id().is_empty());
    }
}
