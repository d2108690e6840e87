//! Currency-rate provider client.

use serde::Deserialize;

use crate::observability::{TraceContext, X_REQUEST_ID};
use crate::rates::Rate;
use crate::upstream::UpstreamError;

#[derive(Debug, Deserialize)]
struct RateBody {
    #[serde(rename = "USDBRL")]
    usd_brl: RateQuote,
}

#[derive(Debug, Deserialize)]
struct RateQuote {
    bid: String,
}

/// Client for the USD/BRL quote endpoint.
#[derive(Debug, Clone)]
pub struct RatesClient {
    http: reqwest::Client,
    base_url: String,
}

impl RatesClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Latest USD/BRL bid.
    pub async fn usd_brl(&self, trace: &TraceContext) -> Result<Rate, UpstreamError> {
        let url = format!("{}/json/last/USD-BRL", self.base_url);
        let response = self
            .http
            .get(&url)
            .header(X_REQUEST_ID, trace.request_id())
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(UpstreamError::Status(response.status()));
        }
        let body: RateBody = response.json().await?;
        Ok(Rate {
            bid: body.usd_brl.bid,
        })
    }
}
