//! Racing the two postal-code resolvers.

use std::time::Duration;

use crate::observability::TraceContext;
use crate::postal::Address;
use crate::resilience::race::{self, ProviderFuture, RaceOutcome};
use crate::upstream::{BrasilApiClient, UpstreamError, ViaCepClient};

/// Overall bound on the race; fixed, not configured.
pub const RACE_BUDGET: Duration = Duration::from_millis(1000);

/// Which resolver answered first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    BrasilApi,
    ViaCep,
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provider::BrasilApi => f.write_str("BrasilAPI"),
            Provider::ViaCep => f.write_str("ViaCEP"),
        }
    }
}

/// Race both resolvers for the same code and keep the first success.
///
/// A resolver that errors or reports the code unknown simply loses; the
/// race only fails once both have. Which provider wins between two
/// near-simultaneous successes is not deterministic and not retried.
pub async fn fastest_address(
    brasilapi: BrasilApiClient,
    viacep: ViaCepClient,
    trace: TraceContext,
    cep: String,
    overall: Duration,
) -> RaceOutcome<(Provider, Address)> {
    let providers: Vec<ProviderFuture<(Provider, Address), UpstreamError>> = vec![
        {
            let trace = trace.clone();
            let cep = cep.clone();
            Box::pin(async move {
                brasilapi
                    .address(&trace, &cep)
                    .await
                    .map(|address| (Provider::BrasilApi, address))
            })
        },
        Box::pin(async move {
            viacep
                .address(&trace, &cep)
                .await
                .map(|address| (Provider::ViaCep, address))
        }),
    ];

    race::first_success(providers, overall).await
}
