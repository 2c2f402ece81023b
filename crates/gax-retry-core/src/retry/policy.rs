use std::time::Duration;

/// Decides whether a failed RPC should be attempted again.
///
/// The application supplies a prototype when the client is created. Each
/// logical operation takes its own copy via [`RetryPolicy::clone_policy`] (or
/// `.clone()` on the boxed prototype) and consults it after every failed
/// attempt. Once `on_failure` returns `false` the caller stops.
///
/// One instance is used by one retry loop at a time; clones share no progress
/// state and may be moved to other threads.
pub trait RetryPolicy<S: ?Sized>: Send + Sync {
    /// A new policy with the same limits as `self` and fresh progress state.
    ///
    /// Error counts restart at zero and deadlines are measured from the
    /// moment of the clone.
    fn clone_policy(&self) -> Box<dyn RetryPolicy<S>>;

    /// Record a failed attempt.
    ///
    /// Returns `true` if the operation should be retried: the failure is not
    /// permanent and the policy's budget is not yet exhausted.
    fn on_failure(&mut self, status: &S) -> bool;

    /// Time left before a time based policy gives up.
    ///
    /// `None` for policies that are not time based. The retry loop may use this
    /// to cap the timeout of the next attempt.
    fn remaining_time(&self) -> Option<Duration> {
        None
    }
}

impl<S: ?Sized + 'static> Clone for Box<dyn RetryPolicy<S>> {
    fn clone(&self) -> Self {
        self.clone_policy()
    }
}

impl<S: ?Sized> std::fmt::Debug for dyn RetryPolicy<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetryPolicy")
            .field("remaining_time", &self.remaining_time())
            .finish_non_exhaustive()
    }
}
