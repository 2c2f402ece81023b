//! "Keep trying for this long" policy.

use std::fmt;
use std::marker::PhantomData;
use std::time::{Duration, Instant};

use super::classify::RetryableStatus;
use super::clock::{Clock, SteadyClock};
use super::policy::RetryPolicy;

/// Retries transient failures until a deadline passes.
///
/// The deadline is fixed when the policy is built: `clock.now() +
/// max_duration`. A clone computes its own deadline from the clock at clone
/// time, so every logical operation gets the full `max_duration`.
///
/// A deadline that does not fit in an [`Instant`] is treated as unbounded.
pub struct LimitedDurationRetryPolicy<S: ?Sized, R, C = SteadyClock> {
    max_duration: Duration,
    deadline: Option<Instant>,
    clock: C,
    // `fn(&S) -> R` keeps the policy Send + Sync whatever S and R are.
    _classifier: PhantomData<fn(&S) -> R>,
}

impl<S: ?Sized, R> LimitedDurationRetryPolicy<S, R, SteadyClock>
where
    R: RetryableStatus<S>,
{
    pub fn new(max_duration: Duration) -> Self {
        Self::with_clock(max_duration, SteadyClock)
    }
}

impl<S: ?Sized, R, C> LimitedDurationRetryPolicy<S, R, C>
where
    R: RetryableStatus<S>,
    C: Clock,
{
    pub fn with_clock(max_duration: Duration, clock: C) -> Self {
        let deadline = clock.now().checked_add(max_duration);
        Self {
            max_duration,
            deadline,
            clock,
            _classifier: PhantomData,
        }
    }

    pub fn max_duration(&self) -> Duration {
        self.max_duration
    }

    /// `None` when the deadline is too far out to represent.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    fn expired_at(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|deadline| now >= deadline)
    }
}

impl<S: ?Sized, R, C: fmt::Debug> fmt::Debug for LimitedDurationRetryPolicy<S, R, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LimitedDurationRetryPolicy")
            .field("max_duration", &self.max_duration)
            .field("deadline", &self.deadline)
            .field("clock", &self.clock)
            .finish()
    }
}

impl<S, R, C> RetryPolicy<S> for LimitedDurationRetryPolicy<S, R, C>
where
    S: ?Sized + 'static,
    R: RetryableStatus<S> + 'static,
    C: Clock,
{
    fn clone_policy(&self) -> Box<dyn RetryPolicy<S>> {
        Box::new(Self::with_clock(self.max_duration, self.clock.clone()))
    }

    fn on_failure(&mut self, status: &S) -> bool {
        if R::is_permanent_failure(status) {
            tracing::debug!("permanent failure, not retrying");
            return false;
        }
        if self.expired_at(self.clock.now()) {
            tracing::debug!(
                max_duration_ms = self.max_duration.as_millis() as u64,
                "retry deadline passed"
            );
            return false;
        }
        true
    }

    fn remaining_time(&self) -> Option<Duration> {
        match self.deadline {
            Some(deadline) => Some(deadline.saturating_duration_since(self.clock.now())),
            None => Some(Duration::MAX),
        }
    }
}
