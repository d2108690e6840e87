//! Postal-code resolver clients.

use serde::Deserialize;

use crate::observability::{TraceContext, X_REQUEST_ID};
use crate::postal::Address;
use crate::upstream::UpstreamError;

/// ViaCEP response. Only the consumed fields are modeled; the upstream may
/// send more.
#[derive(Debug, Deserialize)]
struct ViaCepBody {
    #[serde(default)]
    cep: String,
    #[serde(default)]
    logradouro: String,
    #[serde(default)]
    bairro: String,
    #[serde(default)]
    localidade: String,
    #[serde(default)]
    uf: String,
    #[serde(default)]
    erro: bool,
}

/// BrasilAPI response shape for `GET /api/cep/v1/{cep}`.
#[derive(Debug, Deserialize)]
struct BrasilApiBody {
    #[serde(default)]
    cep: String,
    #[serde(default)]
    state: String,
    #[serde(default)]
    city: String,
    #[serde(default)]
    neighborhood: String,
    #[serde(default)]
    street: String,
}

/// Client for the ViaCEP resolver.
#[derive(Debug, Clone)]
pub struct ViaCepClient {
    http: reqwest::Client,
    base_url: String,
}

impl ViaCepClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    async fn fetch(&self, trace: &TraceContext, cep: &str) -> Result<ViaCepBody, UpstreamError> {
        let url = format!("{}/ws/{}/json/", self.base_url, cep);
        let response = self
            .http
            .get(&url)
            .header(X_REQUEST_ID, trace.request_id())
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(UpstreamError::Status(response.status()));
        }
        Ok(response.json().await?)
    }

    /// Resolve a postal code to its city name. `Ok(None)` when the upstream
    /// resolves but reports no locality for the code.
    pub async fn city(
        &self,
        trace: &TraceContext,
        cep: &str,
    ) -> Result<Option<String>, UpstreamError> {
        let body = self.fetch(trace, cep).await?;
        if body.erro || body.localidade.is_empty() {
            Ok(None)
        } else {
            Ok(Some(body.localidade))
        }
    }

    /// Full address lookup, normalized. An unknown code is an error here:
    /// race callers treat it as this provider having lost.
    pub async fn address(&self, trace: &TraceContext, cep: &str) -> Result<Address, UpstreamError> {
        let body = self.fetch(trace, cep).await?;
        if body.erro || body.localidade.is_empty() {
            return Err(UpstreamError::NotFound);
        }
        Ok(Address {
            cep: body.cep,
            street: body.logradouro,
            neighborhood: body.bairro,
            city: body.localidade,
            state: body.uf,
        })
    }
}

/// Client for the BrasilAPI resolver.
#[derive(Debug, Clone)]
pub struct BrasilApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl BrasilApiClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Full address lookup, normalized.
    pub async fn address(&self, trace: &TraceContext, cep: &str) -> Result<Address, UpstreamError> {
        let url = format!("{}/api/cep/v1/{}", self.base_url, cep);
        let response = self
            .http
            .get(&url)
            .header(X_REQUEST_ID, trace.request_id())
            .send()
            .await?;
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(UpstreamError::NotFound);
        }
        if !status.is_success() {
            return Err(UpstreamError::Status(status));
        }
        let body: BrasilApiBody = response.json().await?;
        if body.cep.is_empty() {
            return Err(UpstreamError::NotFound);
        }
        Ok(Address {
            cep: body.cep,
            street: body.street,
            neighborhood: body.neighborhood,
            city: body.city,
            state: body.state,
        })
    }
}
