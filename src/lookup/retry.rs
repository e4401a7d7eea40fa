//! Bounded retry policy for node lookups.

use crate::error::{is_fatal, LookupError};
use async_trait::async_trait;
use std::time::Duration;

/// Total attempts made for one lookup, including the first.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Delay between attempts.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay: DEFAULT_RETRY_DELAY,
        }
    }
}

impl RetryPolicy {
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::default()
        }
    }
}

/// Waits out the delay between attempts.
#[async_trait]
pub trait RetryDelay: Send + Sync {
    async fn wait(&self, duration: Duration);
}

/// Production delay backed by the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioDelay;

#[async_trait]
impl RetryDelay for TokioDelay {
    async fn wait(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Delay that returns immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

#[async_trait]
impl RetryDelay for NoDelay {
    async fn wait(&self, _duration: Duration) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Authorization failure; retrying cannot change the outcome.
    Fatal,
    /// The attempt budget is spent.
    Exhausted,
}

/// What to do after a failed attempt.
#[derive(Debug)]
pub enum RetryDecision {
    Retry { delay: Duration },
    Stop { reason: StopReason, error: LookupError },
}

/// Per-call attempt bookkeeping.
#[derive(Debug)]
pub struct LookupAttempt {
    attempt_number: u32,
    max_attempts: u32,
    delay: Duration,
    last_error: Option<LookupError>,
}

impl LookupAttempt {
    pub fn start(policy: &RetryPolicy) -> Self {
        Self {
            attempt_number: 1,
            max_attempts: policy.max_attempts.max(1),
            delay: policy.delay,
            last_error: None,
        }
    }

    pub fn attempt_number(&self) -> u32 {
        self.attempt_number
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Most recent retryable failure, if any attempt has failed and been retried.
    pub fn last_error(&self) -> Option<&LookupError> {
        self.last_error.as_ref()
    }

    /// Record a failure for the current attempt.
    ///
    /// On `Retry` the attempt number has already moved on to the next attempt.
    /// On `Stop` the error is handed back unchanged.
    pub fn record_failure(&mut self, error: LookupError) -> RetryDecision {
        if is_fatal(&error) {
            return RetryDecision::Stop {
                reason: StopReason::Fatal,
                error,
            };
        }
        if self.attempt_number >= self.max_attempts {
            return RetryDecision::Stop {
                reason: StopReason::Exhausted,
                error,
            };
        }

        self.last_error = Some(error);
        self.attempt_number += 1;
        RetryDecision::Retry { delay: self.delay }
    }
}
