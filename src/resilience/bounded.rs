//! A single unit of work raced against a deadline.

use std::future::Future;

use crate::resilience::budget::Deadline;

/// Tagged outcome of a bounded call. Exactly one variant holds at
/// completion; a timed-out call never also carries a value or an error.
#[derive(Debug)]
pub enum CallResult<T, E> {
    Success(T),
    TimedOut,
    Failed(E),
}

impl<T, E> CallResult<T, E> {
    pub fn is_success(&self) -> bool {
        matches!(self, CallResult::Success(_))
    }
}

/// Run `work` under `deadline`.
///
/// If the deadline elapses first the result is [`CallResult::TimedOut`]
/// regardless of what the work would eventually have produced; the work
/// future is dropped and the caller never waits past the deadline. Work
/// handed off elsewhere (e.g. a `spawn_blocking` write) is left to finish in
/// the background. An already-elapsed deadline short-circuits before the
/// work is polled at all.
pub async fn execute<T, E, F>(deadline: Deadline, work: F) -> CallResult<T, E>
where
    F: Future<Output = Result<T, E>>,
{
    if deadline.is_elapsed() {
        return CallResult::TimedOut;
    }

    match tokio::time::timeout_at(deadline.instant(), work).await {
        Ok(Ok(value)) => CallResult::Success(value),
        Ok(Err(err)) => CallResult::Failed(err),
        Err(_) => CallResult::TimedOut,
    }
}
