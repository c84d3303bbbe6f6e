//! Bounded retry for acquiring the document backend

use std::fmt::Display;
use std::time::Duration;
use tracing::{error, warn};

use super::{ReportError, Result};
use crate::constants::retry::{BACKOFF_MS, MAX_ATTEMPTS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one
    pub max_attempts: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS,
            backoff: Duration::from_millis(BACKOFF_MS),
        }
    }
}

#[cfg(test)]
impl RetryPolicy {
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            backoff: Duration::ZERO,
        }
    }
}

/// Run `acquire` until it succeeds or the policy is exhausted, sleeping
/// `backoff` between attempts. The last failure becomes terminal.
pub async fn acquire_with_retry<T, E, F>(policy: &RetryPolicy, mut acquire: F) -> Result<T>
where
    E: Display,
    F: FnMut() -> std::result::Result<T, E>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0;
    loop {
        attempt += 1;
        match acquire() {
            Ok(backend) => return Ok(backend),
            Err(e) if attempt < max_attempts => {
                warn!(attempt, max_attempts, error = %e, "Document backend unavailable, retrying");
                tokio::time::sleep(policy.backoff).await;
            }
            Err(e) => {
                error!(attempt, error = %e, "Document backend unavailable, giving up");
                return Err(ReportError::BackendUnavailable {
                    attempts: attempt,
                    reason: e.to_string(),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 2,
            backoff: Duration::from_millis(1),
        }
    }

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 2);
        assert_eq!(policy.backoff, Duration::from_millis(500));
    }

    #[tokio::test]
    async fn test_first_attempt_succeeds() {
        let mut calls = 0;
        let value = acquire_with_retry(&policy(), || {
            calls += 1;
            Ok::<_, String>(7)
        })
        .await
        .unwrap();
        assert_eq!(value, 7);
        assert_eq!(calls, 1);
    }

    #[tokio::test]
    async fn test_second_attempt_succeeds() {
        let mut calls = 0;
        let value = acquire_with_retry(&policy(), || {
            calls += 1;
            if calls == 1 { Err("not loaded yet") } else { Ok("backend") }
        })
        .await
        .unwrap();
        assert_eq!(value, "backend");
        assert_eq!(calls, 2);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts() {
        let mut calls = 0;
        let result: Result<()> = acquire_with_retry(&policy(), || {
            calls += 1;
            Err("missing")
        })
        .await;

        assert_eq!(calls, 2);
        match result {
            Err(ReportError::BackendUnavailable { attempts, reason }) => {
                assert_eq!(attempts, 2);
                assert_eq!(reason, "missing");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_zero_attempts_still_tries_once() {
        let mut calls = 0;
        let result: Result<()> = acquire_with_retry(&RetryPolicy::immediate(0), || {
            calls += 1;
            Err("missing")
        })
        .await;
        assert!(result.is_err());
        assert_eq!(calls, 1);
    }
}
