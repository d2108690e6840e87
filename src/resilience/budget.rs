//! Hierarchical time budgets.

use std::time::Duration;
use tokio::time::Instant;

/// Absolute wall-clock bound after which a pending operation is abandoned.
///
/// A deadline is computed once, at the start of the operation that owns it,
/// and only ever narrows when rederived for a sub-operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Deadline(Instant);

impl Deadline {
    /// Deadline `want` from now, with no parent bound.
    pub fn after(want: Duration) -> Self {
        Self::derive(None, want)
    }

    /// Derive a child deadline: `now + want`, clamped to the parent when one
    /// exists. The child is never later than its parent; an already-elapsed
    /// parent yields an already-elapsed child, so the dependent call fails
    /// immediately instead of attempting work.
    pub fn derive(parent: Option<Deadline>, want: Duration) -> Self {
        let requested = Instant::now() + want;
        match parent {
            Some(Deadline(bound)) => Deadline(bound.min(requested)),
            None => Deadline(requested),
        }
    }

    pub fn instant(self) -> Instant {
        self.0
    }

    /// Time left before expiry; zero once elapsed.
    pub fn remaining(self) -> Duration {
        self.0.saturating_duration_since(Instant::now())
    }

    pub fn is_elapsed(self) -> bool {
        self.0 <= Instant::now()
    }
}
