//! "Count errors and then stop" policy.

use std::fmt;
use std::marker::PhantomData;

use super::classify::RetryableStatus;
use super::policy::RetryPolicy;

/// Tolerates up to `max_failures` transient failures.
///
/// Permanent failures (as reported by `R`) stop the loop immediately and do
/// not count against the budget. With `max_failures = 2` three transient
/// failures in a row yield `true, true, false`; with `0` the first one is
/// already `false`.
pub struct LimitedErrorCountRetryPolicy<S: ?Sized, R> {
    failure_count: u32,
    max_failures: u32,
    // `fn(&S) -> R` keeps the policy Send + Sync whatever S and R are.
    _classifier: PhantomData<fn(&S) -> R>,
}

impl<S: ?Sized, R> LimitedErrorCountRetryPolicy<S, R>
where
    R: RetryableStatus<S>,
{
    pub fn new(max_failures: u32) -> Self {
        Self {
            failure_count: 0,
            max_failures,
            _classifier: PhantomData,
        }
    }

    pub fn max_failures(&self) -> u32 {
        self.max_failures
    }

    /// Transient failures seen so far, including the one that exhausted the
    /// budget.
    pub fn failure_count(&self) -> u32 {
        self.failure_count
    }
}

impl<S: ?Sized, R> fmt::Debug for LimitedErrorCountRetryPolicy<S, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LimitedErrorCountRetryPolicy")
            .field("failure_count", &self.failure_count)
            .field("max_failures", &self.max_failures)
            .finish()
    }
}

impl<S, R> RetryPolicy<S> for LimitedErrorCountRetryPolicy<S, R>
where
    S: ?Sized + 'static,
    R: RetryableStatus<S> + 'static,
{
    fn clone_policy(&self) -> Box<dyn RetryPolicy<S>> {
        Box::new(Self::new(self.max_failures))
    }

    fn on_failure(&mut self, status: &S) -> bool {
        if R::is_permanent_failure(status) {
            tracing::debug!(
                failure_count = self.failure_count,
                "permanent failure, not retrying"
            );
            return false;
        }
        // Compare before incrementing: exactly `max_failures` transient
        // failures are retried.
        let retry = self.failure_count < self.max_failures;
        self.failure_count = self.failure_count.saturating_add(1);
        if !retry {
            tracing::debug!(
                failure_count = self.failure_count,
                max_failures = self.max_failures,
                "error budget exhausted"
            );
        }
        retry
    }
}
