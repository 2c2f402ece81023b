//! Retry policies for RPC clients.
//!
//! See [`retry`] for the policy trait and the stock implementations.

pub mod config;
pub mod logging;
pub mod retry;
pub mod status;

pub use retry::{
    AlwaysRetry, CanonicalRetryable, Clock, LimitedDurationRetryPolicy,
    LimitedErrorCountRetryPolicy, ManualClock, RetryPolicy, RetryableStatus, SteadyClock,
};
pub use status::{Status, StatusCode};
