//! First-success fan-out over equivalent providers.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use tokio::task::JoinSet;

use crate::resilience::bounded::{self, CallResult};
use crate::resilience::budget::Deadline;

/// A provider attempt, boxed so heterogeneous client futures can race.
pub type ProviderFuture<T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send>>;

/// Outcome of a fan-out race.
#[derive(Debug)]
pub enum RaceOutcome<T> {
    /// First provider to be observed succeeding.
    Won(T),
    /// Every provider reported a failure before the bound elapsed.
    AllFailed,
    /// The bound elapsed with no success and at least one provider still
    /// pending.
    TimedOut,
}

/// Launch all providers concurrently and resolve with the first success.
///
/// Every provider runs under its own bounded call sharing the single
/// `overall` deadline; none gets a narrower individual budget. Selection is
/// first-to-be-observed, which is nondeterministic under true concurrency:
/// two providers succeeding near-simultaneously may resolve either way, and
/// the loser's result is discarded. Individual failures are ignored unless
/// every provider fails. Losing tasks are aborted when the race resolves.
pub async fn first_success<T, E>(
    providers: Vec<ProviderFuture<T, E>>,
    overall: Duration,
) -> RaceOutcome<T>
where
    T: Send + 'static,
    E: Send + 'static,
{
    if providers.is_empty() {
        return RaceOutcome::AllFailed;
    }

    let deadline = Deadline::after(overall);
    let mut inflight = JoinSet::new();
    for work in providers {
        inflight.spawn(bounded::execute(deadline, work));
    }

    let mut saw_timeout = false;
    while let Some(joined) = inflight.join_next().await {
        match joined {
            // Dropping the set aborts the losers on return.
            Ok(CallResult::Success(value)) => return RaceOutcome::Won(value),
            Ok(CallResult::TimedOut) => saw_timeout = true,
            Ok(CallResult::Failed(_)) => {}
            // A panicked provider counts as a failed one.
            Err(join_err) => {
                tracing::warn!(error = %join_err, "race provider task died");
            }
        }
    }

    if saw_timeout {
        RaceOutcome::TimedOut
    } else {
        RaceOutcome::AllFailed
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn provider(
        delay_ms: u64,
        result: Result<&'static str, &'static str>,
    ) -> ProviderFuture<&'static str, &'static str> {
        Box::pin(async move {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            result
        })
    }

    #[tokio::test(start_paused = true)]
    async fn earliest_success_wins_regardless_of_listing_order() {
        let outcome = first_success(
            vec![provider(900, Ok("slow")), provider(100, Ok("fast"))],
            Duration::from_millis(1000),
        )
        .await;
        assert!(matches!(outcome, RaceOutcome::Won("fast")));

        let outcome = first_success(
            vec![provider(100, Ok("fast")), provider(900, Ok("slow"))],
            Duration::from_millis(1000),
        )
        .await;
        assert!(matches!(outcome, RaceOutcome::Won("fast")));
    }

    #[tokio::test(start_paused = true)]
    async fn failures_are_ignored_while_another_provider_can_still_win() {
        let outcome = first_success(
            vec![provider(10, Err("down")), provider(400, Ok("late"))],
            Duration::from_millis(1000),
        )
        .await;
        assert!(matches!(outcome, RaceOutcome::Won("late")));
    }

    #[tokio::test(start_paused = true)]
    async fn all_failures_resolve_failed_not_timed_out() {
        let outcome = first_success(
            vec![provider(10, Err("a")), provider(20, Err("b"))],
            Duration::from_millis(1000),
        )
        .await;
        assert!(matches!(outcome, RaceOutcome::AllFailed));
    }

    #[tokio::test(start_paused = true)]
    async fn bound_expiry_with_pending_providers_times_out() {
        let outcome = first_success(
            vec![provider(5000, Ok("never")), provider(10, Err("down"))],
            Duration::from_millis(1000),
        )
        .await;
        assert!(matches!(outcome, RaceOutcome::TimedOut));
    }

    #[tokio::test(start_paused = true)]
    async fn empty_provider_list_is_a_failure() {
        let outcome: RaceOutcome<&str> =
            first_success(Vec::<ProviderFuture<&str, &str>>::new(), Duration::from_millis(100))
                .await;
        assert!(matches!(outcome, RaceOutcome::AllFailed));
    }
}
