//! Rate lookup service.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tracing::Instrument;

use crate::config::RatesConfig;
use crate::observability::{metrics, TraceContext};
use crate::rates::RateService;
use crate::storage::{RateStore, StoreError};
use crate::upstream::{self, RatesClient};

/// State injected into the quote handler.
#[derive(Clone)]
pub struct RatesState {
    service: Arc<RateService>,
}

/// Build the rates router. Opening the store creates the history schema
/// when it does not exist yet.
pub fn router(config: &RatesConfig) -> Result<Router, StoreError> {
    let store = Arc::new(RateStore::open(&config.db_path)?);
    let client = RatesClient::new(upstream::http_client(), config.upstream_url.clone());
    let state = RatesState {
        service: Arc::new(RateService::new(client, store)),
    };
    Ok(Router::new()
        .route("/cotacao", get(quote_handler))
        .with_state(state))
}

async fn quote_handler(
    State(state): State<RatesState>,
    headers: HeaderMap,
) -> axum::response::Response {
    let start = Instant::now();
    let trace = TraceContext::from_headers(&headers);

    let outcome = state
        .service
        .latest(&trace)
        .instrument(trace.span("rate-quote"))
        .await;

    match outcome {
        Ok(rate) => {
            metrics::record_request("rates", "GET", 200, start);
            (StatusCode::OK, Json(rate)).into_response()
        }
        Err(err) => {
            // The nested sub-budget firing is the caller's signal to stop
            // waiting; everything else is a plain upstream failure.
            let status = if err.is_timeout() {
                StatusCode::REQUEST_TIMEOUT
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            tracing::warn!(
                request_id = %trace.request_id(),
                status = status.as_u16(),
                error = %err,
                "quote lookup failed"
            );
            metrics::record_request("rates", "GET", status.as_u16(), start);
            (status, err.to_string()).into_response()
        }
    }
}
