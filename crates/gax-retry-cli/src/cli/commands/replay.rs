//! Replay command: drive fresh policy clones through a failure sequence.

use anyhow::Result;
use gax_retry_core::config::RetryConfig;
use gax_retry_core::{CanonicalRetryable, RetryPolicy, Status, StatusCode};

/// One consulted failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// 1-based attempt number that failed.
    pub attempt: usize,
    pub code: StatusCode,
    /// What the policy answered.
    pub retry: bool,
}

/// Run one logical operation: clone the prototype and report the decision for
/// each status until the policy says stop or the statuses run out.
pub fn replay(prototype: &dyn RetryPolicy<Status>, statuses: &[StatusCode]) -> Vec<Step> {
    let mut policy = prototype.clone_policy();
    let mut steps = Vec::with_capacity(statuses.len());
    for (idx, &code) in statuses.iter().enumerate() {
        let retry = policy.on_failure(&Status::from(code));
        steps.push(Step {
            attempt: idx + 1,
            code,
            retry,
        });
        if !retry {
            break;
        }
    }
    steps
}

/// Replay `statuses` `repeat` times against the policy described by `policy`.
pub fn run_replay(policy: &RetryConfig, repeat: usize, statuses: &[StatusCode]) -> Result<()> {
    let prototype = policy.into_policy::<Status, CanonicalRetryable>();
    tracing::info!(?policy, repeat, attempts = statuses.len(), "replaying");

    for operation in 1..=repeat {
        println!("operation {operation}:");
        let steps = replay(prototype.as_ref(), statuses);
        for step in &steps {
            let verdict = if step.retry { "retry" } else { "stop" };
            println!("  attempt {}: {} -> {}", step.attempt, step.code, verdict);
        }
        if steps.last().is_some_and(|s| s.retry) {
            println!("  statuses exhausted, policy would still retry");
        }
    }
    Ok(())
}
