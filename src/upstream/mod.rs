//! Outbound collaborator clients.
//!
//! # Data Flow
//! ```text
//! domain service
//!     → postal.rs (postal-code resolvers: ViaCEP, BrasilAPI)
//!     → weather.rs (current temperature by city)
//!     → rates.rs (USD/BRL exchange rate)
//! ```
//!
//! # Design Decisions
//! - One shared reqwest client per process; connections are pooled
//! - Clients carry no timeouts of their own; deadlines are enforced
//!   exclusively by the bounded calls wrapping them
//! - Each client attaches the propagated request ID to its outbound request
//! - Upstream response bodies are opaque contracts; only the consumed
//!   fields are modeled

use axum::http::StatusCode;
use thiserror::Error;

pub mod postal;
pub mod rates;
pub mod weather;

pub use postal::{BrasilApiClient, ViaCepClient};
pub use rates::RatesClient;
pub use weather::WeatherClient;

/// Failure of a single outbound call, before deadline classification.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Connection, protocol, or body-decode failure.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The upstream answered with an unexpected status.
    #[error("unexpected upstream status {0}")]
    Status(StatusCode),

    /// The upstream explicitly reported the resource absent.
    #[error("not found upstream")]
    NotFound,
}

/// Shared outbound HTTP client.
///
/// No request timeout is set here: a client-level timeout would race the
/// per-call deadline and blur which bound actually fired.
pub fn http_client() -> reqwest::Client {
    reqwest::Client::new()
}
