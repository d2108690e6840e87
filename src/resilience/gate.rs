//! Shielding a primary result from a non-essential side effect.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use crate::observability::metrics;
use crate::resilience::bounded::{self, CallResult};
use crate::resilience::budget::Deadline;

/// Run a non-essential `secondary` call under its own `budget`, then return
/// `primary` unchanged.
///
/// The secondary's deadline is derived from no parent: it gets a fresh
/// budget independent of whatever remains of the caller's. Its outcome is
/// logged and counted, never surfaced. A failed or slow side effect must
/// not turn a successful primary operation into a failure, nor hold the
/// primary response past the secondary's own short bound.
pub async fn guard<T, U, E, S>(primary: T, label: &'static str, budget: Duration, secondary: S) -> T
where
    S: Future<Output = Result<U, E>>,
    E: Display,
{
    let deadline = Deadline::derive(None, budget);
    match bounded::execute(deadline, secondary).await {
        CallResult::Success(_) => {
            metrics::record_secondary(label, "success");
            tracing::debug!(task = label, "secondary call completed");
        }
        CallResult::TimedOut => {
            metrics::record_secondary(label, "timeout");
            tracing::warn!(
                task = label,
                budget_ms = budget.as_millis() as u64,
                "secondary call exceeded its budget; primary result unaffected"
            );
        }
        CallResult::Failed(err) => {
            metrics::record_secondary(label, "error");
            tracing::warn!(
                task = label,
                error = %err,
                "secondary call failed; primary result unaffected"
            );
        }
    }
    primary
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time::Instant;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn primary_survives_secondary_success() {
        let out = guard(41, "noop", Duration::from_millis(10), async {
            Ok::<_, &str>(())
        })
        .await;
        assert_eq!(out, 41);
    }

    #[tokio::test(start_paused = true)]
    async fn primary_survives_secondary_failure() {
        let out = guard("bid", "broken", Duration::from_millis(10), async {
            Err::<(), _>("disk on fire")
        })
        .await;
        assert_eq!(out, "bid");
    }

    #[tokio::test(start_paused = true)]
    async fn slow_secondary_is_cut_off_at_its_own_budget() {
        let started = Instant::now();
        let out = guard(7, "slow", Duration::from_millis(10), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, &str>(())
        })
        .await;
        assert_eq!(out, 7);
        assert!(started.elapsed() < Duration::from_secs(1));
    }
}
