//! The two-hop lookup chain: postal code → city → temperature.

use std::time::Duration;
use std::time::Instant;

use tracing::Instrument;

use crate::error::{LookupError, Stage};
use crate::observability::{metrics, TraceContext};
use crate::postal::PostalCode;
use crate::resilience::bounded::{self, CallResult};
use crate::resilience::budget::Deadline;
use crate::upstream::{ViaCepClient, WeatherClient};
use crate::weather::WeatherReport;

/// Per-chain time budgets. Stage deadlines derive from the chain deadline,
/// so a slow first stage narrows what the second may spend.
#[derive(Debug, Clone, Copy)]
pub struct ChainBudgets {
    pub chain: Duration,
    pub stage: Duration,
}

impl Default for ChainBudgets {
    fn default() -> Self {
        Self {
            chain: Duration::from_millis(4000),
            stage: Duration::from_millis(2000),
        }
    }
}

/// Orchestrates the two dependent lookups.
///
/// Stage 2 never starts unless stage 1 succeeded; a stage's timeout or
/// failure aborts the remainder of the chain. Both stages observe the same
/// trace context, each inside its own child span.
pub struct WeatherChain {
    postal: ViaCepClient,
    weather: WeatherClient,
    budgets: ChainBudgets,
}

impl WeatherChain {
    pub fn new(postal: ViaCepClient, weather: WeatherClient, budgets: ChainBudgets) -> Self {
        Self {
            postal,
            weather,
            budgets,
        }
    }

    /// Resolve a raw postal-code string to a full weather report.
    pub async fn lookup(
        &self,
        trace: &TraceContext,
        raw_cep: &str,
    ) -> Result<WeatherReport, LookupError> {
        // Structural validation comes first; a malformed code never costs a
        // network round trip.
        let cep = PostalCode::parse(raw_cep).ok_or(LookupError::InvalidInput)?;

        let chain_deadline = Deadline::derive(None, self.budgets.chain);

        let city = self.resolve_city(trace, chain_deadline, &cep).await?;
        let temp_c = self
            .fetch_temperature(trace, chain_deadline, &city)
            .await?;

        Ok(WeatherReport::from_celsius(city, temp_c))
    }

    async fn resolve_city(
        &self,
        trace: &TraceContext,
        chain_deadline: Deadline,
        cep: &PostalCode,
    ) -> Result<String, LookupError> {
        let started = Instant::now();
        let deadline = Deadline::derive(Some(chain_deadline), self.budgets.stage);
        let outcome = bounded::execute(deadline, self.postal.city(trace, cep.as_str()))
            .instrument(trace.span("resolve-city"))
            .await;

        match outcome {
            CallResult::Success(Some(city)) => {
                metrics::record_upstream("viacep", "success", started);
                Ok(city)
            }
            CallResult::Success(None) => {
                metrics::record_upstream("viacep", "not-found", started);
                Err(LookupError::NotFound)
            }
            CallResult::TimedOut => {
                metrics::record_upstream("viacep", "timeout", started);
                Err(LookupError::UpstreamTimeout {
                    stage: Stage::ResolveCity,
                })
            }
            CallResult::Failed(source) => {
                metrics::record_upstream("viacep", "error", started);
                Err(LookupError::Upstream {
                    stage: Stage::ResolveCity,
                    source,
                })
            }
        }
    }

    async fn fetch_temperature(
        &self,
        trace: &TraceContext,
        chain_deadline: Deadline,
        city: &str,
    ) -> Result<f64, LookupError> {
        let started = Instant::now();
        let deadline = Deadline::derive(Some(chain_deadline), self.budgets.stage);
        let outcome = bounded::execute(deadline, self.weather.current_celsius(trace, city))
            .instrument(trace.span("fetch-temperature"))
            .await;

        match outcome {
            CallResult::Success(temp_c) => {
                metrics::record_upstream("weather", "success", started);
                Ok(temp_c)
            }
            CallResult::TimedOut => {
                metrics::record_upstream("weather", "timeout", started);
                Err(LookupError::UpstreamTimeout {
                    stage: Stage::FetchTemperature,
                })
            }
            CallResult::Failed(source) => {
                metrics::record_upstream("weather", "error", started);
                Err(LookupError::Upstream {
                    stage: Stage::FetchTemperature,
                    source,
                })
            }
        }
    }
}
