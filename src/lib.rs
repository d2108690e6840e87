//! Deadline-bounded lookup relay library.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod postal;
pub mod rates;
pub mod resilience;
pub mod storage;
pub mod upstream;
pub mod weather;

pub use config::RelayConfig;
pub use error::{LookupError, Stage};
pub use lifecycle::Shutdown;
pub use observability::TraceContext;
pub use resilience::{CallResult, Deadline, RaceOutcome};
