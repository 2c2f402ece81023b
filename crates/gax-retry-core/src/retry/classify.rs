//! Classify failure statuses as permanent or transient.

use crate::status::{Status, StatusCode};

/// Decides whether a failure status is permanent.
///
/// A permanent failure is never retried, whatever budget a policy has left
/// (e.g. `INVALID_ARGUMENT`, `PERMISSION_DENIED`). Anything else is transient
/// and may be retried (e.g. `UNAVAILABLE`).
///
/// The classifier is bound as a type parameter of each policy and has no
/// receiver: it must be a pure function of the status.
pub trait RetryableStatus<S: ?Sized> {
    fn is_permanent_failure(status: &S) -> bool;
}

/// Classifier for the canonical [`Status`] type.
///
/// Only `UNAVAILABLE`, `DEADLINE_EXCEEDED` and `ABORTED` are transient. `OK`
/// is not a failure at all and is not reported as permanent either.
#[derive(Debug, Clone, Copy, Default)]
pub struct CanonicalRetryable;

impl RetryableStatus<StatusCode> for CanonicalRetryable {
    fn is_permanent_failure(code: &StatusCode) -> bool {
        *code != StatusCode::Ok && !code.is_transient()
    }
}

impl RetryableStatus<Status> for CanonicalRetryable {
    fn is_permanent_failure(status: &Status) -> bool {
        <Self as RetryableStatus<StatusCode>>::is_permanent_failure(&status.code())
    }
}

/// Classifier that treats every failure as transient.
///
/// Only suitable when the operation is known to be safe to repeat; the
/// policy's own limit is then the only thing that stops the retry loop.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysRetry;

impl<S: ?Sized> RetryableStatus<S> for AlwaysRetry {
    fn is_permanent_failure(_status: &S) -> bool {
        false
    }
}
