//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Outbound call:
//!     → budget.rs (derive a deadline from the caller's remaining budget)
//!     → bounded.rs (race the work against the deadline, tag the outcome)
//!     → race.rs (fan out equivalent calls, keep the first success)
//!     → gate.rs (shield the caller from a non-essential call's failure)
//! ```
//!
//! # Design Decisions
//! - Every external call has a deadline; budgets are computed once at the
//!   start of the owning operation and never extended
//! - A deadline only narrows when rederived from a parent
//! - Outcomes are tagged (Success/TimedOut/Failed), never inferred by
//!   comparing error values against a transport-specific sentinel
//! - Nothing here retries; a single attempt per bounded call is final

pub mod bounded;
pub mod budget;
pub mod gate;
pub mod race;

pub use bounded::CallResult;
pub use budget::Deadline;
pub use race::RaceOutcome;
