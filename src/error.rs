//! Caller-visible error taxonomy.
//!
//! # Design Decisions
//! - InvalidInput and NotFound are terminal: reported immediately, no
//!   outbound call is attempted (InvalidInput) or repeated (NotFound)
//! - An essential stage's timeout or failure aborts the remaining chain
//! - Non-essential stage failures never reach this type; the gate swallows
//!   them (see `resilience::gate`)
//! - Callers see a classification plus the underlying cause text, never a
//!   stack trace

use thiserror::Error;

use crate::upstream::UpstreamError;

/// Which essential stage of an operation produced the failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ResolveCity,
    FetchTemperature,
    FetchRate,
    ForwardRequest,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::ResolveCity => "resolve-city",
            Stage::FetchTemperature => "fetch-temperature",
            Stage::FetchRate => "fetch-rate",
            Stage::ForwardRequest => "forward-request",
        };
        f.write_str(name)
    }
}

/// Classification of a failed lookup, as surfaced to the caller.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The identifier failed structural validation; no network I/O happened.
    #[error("invalid zipcode")]
    InvalidInput,

    /// The upstream explicitly reported absence.
    #[error("can not find zipcode")]
    NotFound,

    /// An essential stage's deadline elapsed before it completed.
    #[error("{stage} timed out")]
    UpstreamTimeout { stage: Stage },

    /// An essential stage failed for any other upstream reason.
    #[error("{stage} failed: {source}")]
    Upstream {
        stage: Stage,
        #[source]
        source: UpstreamError,
    },

    /// Local failure unrelated to any upstream.
    #[error("internal error: {0}")]
    Internal(String),
}

impl LookupError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, LookupError::UpstreamTimeout { .. })
    }
}
