//! Gateway service: validating relay in front of the weather chain.
//!
//! Validates the postal code at the edge (a malformed code never crosses
//! the wire), then relays the request body downstream and proxies the
//! downstream status code and raw body back unchanged.

use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request, Response, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use serde::{Deserialize, Serialize};

use crate::config::GatewayConfig;
use crate::observability::{metrics, TraceContext, X_REQUEST_ID};
use crate::postal::PostalCode;
use crate::resilience::bounded::{self, CallResult};
use crate::resilience::budget::Deadline;

/// Inbound (and relayed) request body.
#[derive(Debug, Serialize, Deserialize)]
pub struct CepRequest {
    pub cep: String,
}

/// State injected into the relay handler.
#[derive(Clone)]
pub struct GatewayState {
    client: Client<HttpConnector, Body>,
    downstream_url: String,
    forward_budget: Duration,
}

/// Build the gateway router.
pub fn router(config: &GatewayConfig) -> Router {
    let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
    let state = GatewayState {
        client,
        downstream_url: config.downstream_url.clone(),
        forward_budget: Duration::from_millis(config.forward_timeout_ms),
    };
    Router::new().route("/", post(relay_handler)).with_state(state)
}

async fn relay_handler(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    Json(body): Json<CepRequest>,
) -> axum::response::Response {
    let start = Instant::now();
    let trace = TraceContext::from_headers(&headers);

    if PostalCode::parse(&body.cep).is_none() {
        tracing::debug!(request_id = %trace.request_id(), cep = %body.cep, "rejected malformed zipcode");
        metrics::record_request("gateway", "POST", 422, start);
        return (StatusCode::UNPROCESSABLE_ENTITY, "invalid zipcode").into_response();
    }

    let payload = match serde_json::to_vec(&body) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!(request_id = %trace.request_id(), error = %e, "failed to encode relay body");
            metrics::record_request("gateway", "POST", 500, start);
            return (StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response();
        }
    };

    let request = match Request::builder()
        .method("POST")
        .uri(state.downstream_url.as_str())
        .header(header::CONTENT_TYPE, "application/json")
        .header(X_REQUEST_ID, trace.request_id())
        .body(Body::from(payload))
    {
        Ok(request) => request,
        Err(e) => {
            tracing::error!(request_id = %trace.request_id(), error = %e, "failed to build relay request");
            metrics::record_request("gateway", "POST", 500, start);
            return (StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response();
        }
    };

    let deadline = Deadline::derive(None, state.forward_budget);
    match bounded::execute(deadline, state.client.request(request)).await {
        CallResult::Success(response) => {
            let status = response.status();
            metrics::record_upstream("weather-hop", "success", start);
            metrics::record_request("gateway", "POST", status.as_u16(), start);
            // Relay the downstream response as-is: status, headers, raw body.
            let (parts, body) = response.into_parts();
            Response::from_parts(parts, Body::new(body)).into_response()
        }
        CallResult::TimedOut => {
            tracing::warn!(request_id = %trace.request_id(), "downstream hop exceeded the forward budget");
            metrics::record_upstream("weather-hop", "timeout", start);
            metrics::record_request("gateway", "POST", 500, start);
            (StatusCode::INTERNAL_SERVER_ERROR, "downstream request timed out").into_response()
        }
        CallResult::Failed(e) => {
            tracing::error!(request_id = %trace.request_id(), error = %e, "downstream hop unreachable");
            metrics::record_upstream("weather-hop", "error", start);
            metrics::record_request("gateway", "POST", 500, start);
            (StatusCode::INTERNAL_SERVER_ERROR, "downstream request failed").into_response()
        }
    }
}
