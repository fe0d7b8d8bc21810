//! Retry policy for fetch requests.

use botkit_core::FetchConfig;
use std::time::Duration;

use crate::error::FetchError;

/// Default number of attempts per request.
pub const DEFAULT_RETRY_COUNT: u32 = 3;

/// Default per-attempt timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);

/// How many attempts to make and how long each may take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts (1 means no retries).
    pub max_attempts: u32,
    /// Deadline for a single attempt, response body included.
    pub timeout: Duration,
    /// Pause between attempts. Zero retries immediately.
    pub backoff: Duration,
}

impl RetryPolicy {
    /// Creates a policy with `max_attempts` and the default timeout.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            timeout: DEFAULT_TIMEOUT,
            backoff: Duration::ZERO,
        }
    }

    /// Disables retries.
    pub fn no_retry() -> Self {
        Self::new(1)
    }

    /// Sets the per-attempt timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets a fixed pause between attempts.
    #[must_use]
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    /// Returns true if `attempt` (1-indexed) is not the last one.
    pub fn has_attempts_left(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }

    /// Returns the timeout in whole milliseconds.
    pub fn timeout_ms(&self) -> u64 {
        u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX)
    }

    /// Rejects policies that could never make a request.
    pub fn validate(&self) -> Result<(), FetchError> {
        if self.max_attempts == 0 {
            return Err(FetchError::InvalidRequest(
                "retry count must be at least 1".to_string(),
            ));
        }
        if self.timeout.is_zero() {
            return Err(FetchError::InvalidRequest(
                "timeout must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_RETRY_COUNT)
    }
}

impl From<&FetchConfig> for RetryPolicy {
    fn from(config: &FetchConfig) -> Self {
        Self::new(config.retry_count).with_timeout(config.timeout())
    }
}
