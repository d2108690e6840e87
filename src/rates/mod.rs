//! Currency-rate domain.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{LookupError, Stage};
use crate::resilience::bounded::{self, CallResult};
use crate::resilience::budget::Deadline;

pub mod service;

pub use service::RateService;

/// Budget for the outer client call, covering the whole quote round trip.
pub const CLIENT_BUDGET: Duration = Duration::from_millis(300);

/// Budget for the server-side upstream rate call, nested inside the
/// client's 300 ms.
pub const UPSTREAM_BUDGET: Duration = Duration::from_millis(200);

/// Budget for the persistence write. Independent of the request budget:
/// the write gets this much and no more, whatever is left upstream.
pub const WRITE_BUDGET: Duration = Duration::from_millis(10);

/// A USD/BRL quote as served to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rate {
    pub bid: String,
}

/// Client-side quote fetch under its own budget.
///
/// A server-side 408 (the upstream sub-budget fired) and a locally elapsed
/// deadline both classify as a timeout: the caller never sees a late
/// success either way.
pub async fn fetch_quote(
    http: &reqwest::Client,
    url: &str,
    budget: Duration,
) -> Result<Rate, LookupError> {
    let deadline = Deadline::derive(None, budget);
    match bounded::execute(deadline, request_quote(http, url)).await {
        CallResult::Success(rate) => Ok(rate),
        CallResult::TimedOut => Err(LookupError::UpstreamTimeout {
            stage: Stage::FetchRate,
        }),
        CallResult::Failed(err) => Err(err),
    }
}

async fn request_quote(http: &reqwest::Client, url: &str) -> Result<Rate, LookupError> {
    let response = http.get(url).send().await.map_err(|e| LookupError::Upstream {
        stage: Stage::FetchRate,
        source: e.into(),
    })?;

    let status = response.status();
    if status == reqwest::StatusCode::REQUEST_TIMEOUT {
        return Err(LookupError::UpstreamTimeout {
            stage: Stage::FetchRate,
        });
    }
    if !status.is_success() {
        return Err(LookupError::Upstream {
            stage: Stage::FetchRate,
            source: crate::upstream::UpstreamError::Status(status),
        });
    }

    response.json().await.map_err(|e| LookupError::Upstream {
        stage: Stage::FetchRate,
        source: e.into(),
    })
}
