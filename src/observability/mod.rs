//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!     → trace.rs (request-scoped trace context, span nesting)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - The trace context is an explicit value handed to every component; no
//!   ambient global tracer handle
//! - Request ID flows through all services via the x-request-id header
//! - Metrics are cheap (atomic increments)

pub mod logging;
pub mod metrics;
pub mod trace;

pub use trace::{TraceContext, X_REQUEST_ID};
