//! Weather chain service: postal code in, temperature report out.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use tracing::Instrument;

use crate::config::WeatherConfig;
use crate::error::LookupError;
use crate::http::gateway::CepRequest;
use crate::observability::{metrics, TraceContext};
use crate::upstream::{self, ViaCepClient, WeatherClient};
use crate::weather::chain::{ChainBudgets, WeatherChain};

/// State injected into the chain handler.
#[derive(Clone)]
pub struct WeatherState {
    chain: Arc<WeatherChain>,
}

/// Build the weather service router.
pub fn router(config: &WeatherConfig) -> Router {
    let http = upstream::http_client();
    let chain = WeatherChain::new(
        ViaCepClient::new(http.clone(), config.viacep_url.clone()),
        WeatherClient::new(http, config.weather_url.clone(), config.api_key.clone()),
        ChainBudgets {
            chain: std::time::Duration::from_millis(config.chain_timeout_ms),
            stage: std::time::Duration::from_millis(config.stage_timeout_ms),
        },
    );
    let state = WeatherState {
        chain: Arc::new(chain),
    };
    Router::new().route("/", post(weather_handler)).with_state(state)
}

async fn weather_handler(
    State(state): State<WeatherState>,
    headers: HeaderMap,
    Json(body): Json<CepRequest>,
) -> axum::response::Response {
    let start = Instant::now();
    let trace = TraceContext::from_headers(&headers);

    let outcome = state
        .chain
        .lookup(&trace, &body.cep)
        .instrument(trace.span("weather-chain"))
        .await;

    match outcome {
        Ok(report) => {
            metrics::record_request("weather", "POST", 200, start);
            (StatusCode::OK, Json(report)).into_response()
        }
        Err(err) => {
            let status = status_for(&err);
            tracing::warn!(
                request_id = %trace.request_id(),
                cep = %body.cep,
                status = status.as_u16(),
                error = %err,
                "chain lookup failed"
            );
            metrics::record_request("weather", "POST", status.as_u16(), start);
            (status, err.to_string()).into_response()
        }
    }
}

fn status_for(err: &LookupError) -> StatusCode {
    match err {
        LookupError::InvalidInput => StatusCode::UNPROCESSABLE_ENTITY,
        LookupError::NotFound => StatusCode::NOT_FOUND,
        // Stage timeouts and upstream failures are both this service
        // failing to answer, not the caller's fault.
        LookupError::UpstreamTimeout { .. }
        | LookupError::Upstream { .. }
        | LookupError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
