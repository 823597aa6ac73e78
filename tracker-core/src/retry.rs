//! Bounded retry around outbound calls.
//!
//! A [`RetryPolicy`] is built from config and injected into transports. Only transient
//! errors ([`TrackerError::is_transient`]) are retried; everything else returns at once.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::error::{Result, TrackerError};

/// Retry configuration: total attempts (including the first) and the fixed delay between them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    /// Three attempts, three seconds apart.
    pub const DEFAULT: Self = Self {
        max_attempts: 3,
        delay: Duration::from_secs(3),
    };

    /// Single attempt.
    pub const NONE: Self = Self {
        max_attempts: 1,
        delay: Duration::ZERO,
    };

    pub fn fixed(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    /// Runs `op` until it succeeds, fails with a non-transient error, or attempts run out.
    pub async fn run<T, F, Fut>(&self, label: &str, mut op: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let attempts = self.max_attempts.max(1);
        let mut last_error: Option<TrackerError> = None;
        for attempt in 0..attempts {
            if attempt > 0 {
                warn!(
                    operation = label,
                    attempt = attempt + 1,
                    max_attempts = attempts,
                    delay_ms = self.delay.as_millis() as u64,
                    "Retrying after transient failure"
                );
                tokio::time::sleep(self.delay).await;
            }
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_transient() => last_error = Some(e),
                Err(e) => return Err(e),
            }
        }
        Err(last_error.unwrap_or_else(|| TrackerError::Network(format!("{label}: no attempts made"))))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::DEFAULT
    }
}
