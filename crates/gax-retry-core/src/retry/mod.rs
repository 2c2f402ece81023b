//! Retry policies.
//!
//! A policy answers one question after each failed RPC attempt: should the
//! caller try again? It does not sleep, back off or re-issue the call; that is
//! left to the retry loop that owns it.
//!
//! Two stop criteria are provided, error count and elapsed time, both behind
//! the [`RetryPolicy`] trait. Which failures are worth retrying at all is
//! decided by a [`RetryableStatus`] classifier bound into the policy type.

mod classify;
mod clock;
mod limited_duration;
mod limited_error_count;
mod policy;

pub use classify::{AlwaysRetry, CanonicalRetryable, RetryableStatus};
pub use clock::{Clock, ManualClock, SteadyClock};
pub use limited_duration::LimitedDurationRetryPolicy;
pub use limited_error_count::LimitedErrorCountRetryPolicy;
pub use policy::RetryPolicy;
