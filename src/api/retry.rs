//! Bounded retry policy for API requests

use backoff::backoff::Backoff;
use std::time::Duration;

use crate::config::ApiConfig;
use crate::error::Error;

/// How many times a request is attempted and how long to wait in between
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
    /// When false, 4xx responses are not retried
    pub retry_client_errors: bool,
}

impl RetryPolicy {
    pub fn from_config(config: &ApiConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            delay: config.retry_delay(),
            retry_client_errors: config.retry_client_errors,
        }
    }

    /// Fresh backoff state for one request
    pub fn backoff(&self) -> FixedAttempts {
        FixedAttempts::new(self.max_attempts, self.delay)
    }

    pub fn should_retry(&self, error: &Error) -> bool {
        if !self.retry_client_errors && error.is_client_error() {
            return false;
        }
        error.is_retryable()
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&ApiConfig::default())
    }
}

/// Constant delay, capped by attempt count rather than elapsed time
///
/// The delay is only handed out between attempts: after the last failure
/// `next_backoff` returns `None` and the request gives up immediately.
#[derive(Debug, Clone)]
pub struct FixedAttempts {
    max_attempts: u32,
    delay: Duration,
    failures: u32,
}

impl FixedAttempts {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
            failures: 0,
        }
    }
}

impl Backoff for FixedAttempts {
    fn reset(&mut self) {
        self.failures = 0;
    }

    fn next_backoff(&mut self) -> Option<Duration> {
        self.failures += 1;
        if self.failures >= self.max_attempts {
            None
        } else {
            Some(self.delay)
        }
    }
}
