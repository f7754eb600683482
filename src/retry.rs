//! Retry policy for the reconnection supervisor.
//!
//! The policy is a fixed-delay schedule: a cap on attempts (or none) and one
//! delay applied before every attempt. Backoff shaping is deliberately not
//! part of the policy.

use std::time::Duration;
use tokio::time::sleep;

use crate::types::constants::DEFAULT_RETRY_DELAY;

/// Cap on reconnection attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryLimit {
    /// Keep retrying until `disconnect()` is called
    Unbounded,
    /// Give up after this many attempts
    Limited(u32),
}

impl RetryLimit {
    /// Whether the 1-based `attempt` is still within the cap.
    pub fn allows(&self, attempt: u32) -> bool {
        match self {
            Self::Unbounded => true,
            Self::Limited(max) => attempt <= *max,
        }
    }
}

/// Reconnection schedule: attempt cap plus the fixed delay between attempts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub retries: RetryLimit,
    pub delay: Duration,
}

impl RetryPolicy {
    /// A bounded schedule with the given attempt cap and delay.
    pub fn limited(retries: u32, delay: Duration) -> Self {
        Self {
            retries: RetryLimit::Limited(retries),
            delay,
        }
    }

    /// A schedule that never reconnects.
    pub fn no_retry() -> Self {
        Self::limited(0, Duration::ZERO)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: RetryLimit::Unbounded,
            delay: Duration::from_millis(DEFAULT_RETRY_DELAY),
        }
    }
}

/// Drives a [`RetryPolicy`]: hands out attempt numbers until the policy is
/// exhausted and sleeps the configured delay between them.
pub(crate) struct RetryTimer {
    policy: RetryPolicy,
    attempts: u32,
}

impl RetryTimer {
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            attempts: 0,
        }
    }

    /// Advance to the next attempt, or `None` once the cap is reached.
    pub fn next_attempt(&mut self) -> Option<u32> {
        let next = self.attempts + 1;
        if self.policy.retries.allows(next) {
            self.attempts = next;
            Some(next)
        } else {
            None
        }
    }

    /// Sleep the fixed inter-attempt delay.
    pub async fn wait(&self) {
        sleep(self.policy.delay).await;
    }
}
