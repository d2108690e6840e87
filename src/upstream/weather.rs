//! Weather provider client.

use serde::Deserialize;

use crate::observability::{TraceContext, X_REQUEST_ID};
use crate::upstream::UpstreamError;

#[derive(Debug, Deserialize)]
struct WeatherBody {
    current: CurrentConditions,
}

#[derive(Debug, Deserialize)]
struct CurrentConditions {
    temp_c: f64,
}

/// Client for the current-conditions endpoint.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl WeatherClient {
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Current temperature for a city, in Celsius. The city name is
    /// query-encoded by the client; accented names pass through intact.
    pub async fn current_celsius(
        &self,
        trace: &TraceContext,
        city: &str,
    ) -> Result<f64, UpstreamError> {
        let url = format!("{}/v1/current.json", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.as_str()), ("q", city)])
            .header(X_REQUEST_ID, trace.request_id())
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(UpstreamError::Status(response.status()));
        }
        let body: WeatherBody = response.json().await?;
        Ok(body.current.temp_c)
    }
}
