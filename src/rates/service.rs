//! Server-side quote orchestration.

use std::sync::Arc;
use std::time::Instant;

use tracing::Instrument;

use crate::error::{LookupError, Stage};
use crate::observability::{metrics, TraceContext};
use crate::rates::{Rate, UPSTREAM_BUDGET, WRITE_BUDGET};
use crate::resilience::bounded::{self, CallResult};
use crate::resilience::budget::Deadline;
use crate::resilience::gate;
use crate::storage::{RateStore, StoreError};
use crate::upstream::RatesClient;

/// Fetches the upstream quote under its sub-budget and appends it to the
/// local history as a shielded side effect.
pub struct RateService {
    client: RatesClient,
    store: Arc<RateStore>,
}

impl RateService {
    pub fn new(client: RatesClient, store: Arc<RateStore>) -> Self {
        Self { client, store }
    }

    /// Latest quote. The upstream call is essential; the history append is
    /// not: its failure or expiry is logged and the quote still returned.
    pub async fn latest(&self, trace: &TraceContext) -> Result<Rate, LookupError> {
        let started = Instant::now();
        let deadline = Deadline::derive(None, UPSTREAM_BUDGET);
        let outcome = bounded::execute(deadline, self.client.usd_brl(trace))
            .instrument(trace.span("fetch-rate"))
            .await;

        let rate = match outcome {
            CallResult::Success(rate) => {
                metrics::record_upstream("rates", "success", started);
                rate
            }
            CallResult::TimedOut => {
                metrics::record_upstream("rates", "timeout", started);
                return Err(LookupError::UpstreamTimeout {
                    stage: Stage::FetchRate,
                });
            }
            CallResult::Failed(source) => {
                metrics::record_upstream("rates", "error", started);
                return Err(LookupError::Upstream {
                    stage: Stage::FetchRate,
                    source,
                });
            }
        };

        let store = self.store.clone();
        let bid = rate.bid.clone();
        let append = async move {
            // The blocking write is handed off; if the budget fires first it
            // finishes in the background and only the result is discarded.
            match tokio::task::spawn_blocking(move || store.append(&bid)).await {
                Ok(result) => result,
                Err(join_err) => Err(StoreError::Task(join_err)),
            }
        };

        Ok(gate::guard(rate, "rate-history-append", WRITE_BUDGET, append).await)
    }
}
