//! Retry/backoff policy, operation hook contracts, and the rotating dispatch loop.

use std::future::Future;
use std::time::Duration;

use crate::{CredentialLease, CredentialPool, ProviderError};

pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
    pub backoff_multiplier: f64,
    /// Retry 5xx-class failures on the credential that saw them instead of
    /// rotating. Off by default, so every transient failure rotates.
    pub keep_credential_on_server_error: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 1,
            initial_backoff: DEFAULT_RETRY_DELAY,
            max_backoff: Duration::from_secs(5),
            backoff_multiplier: 1.0,
            keep_credential_on_server_error: false,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            ..Self::default()
        }
    }

    /// One attempt per credential in the pool.
    pub fn for_pool(pool: &CredentialPool) -> Self {
        Self::new(u32::try_from(pool.len()).unwrap_or(u32::MAX))
    }

    /// Also lifts `max_backoff` so the delay is never capped below itself.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.initial_backoff = delay;
        self.max_backoff = self.max_backoff.max(delay);
        self
    }

    pub fn with_backoff_multiplier(mut self, multiplier: f64) -> Self {
        self.backoff_multiplier = multiplier.max(1.0);
        self
    }

    pub fn with_server_errors_on_same_credential(mut self, enabled: bool) -> Self {
        self.keep_credential_on_server_error = enabled;
        self
    }

    /// Whether the cursor moves past the credential that produced `error`.
    pub fn rotates_after(&self, error: &ProviderError) -> bool {
        if self.keep_credential_on_server_error && error.kind.is_server_error() {
            return false;
        }

        error.rotates_credential()
    }

    pub fn should_retry(&self, attempt: u32, error: &ProviderError) -> bool {
        error.retryable && attempt < self.max_attempts
    }

    pub fn backoff_for_attempt(&self, attempt: u32) -> Duration {
        let exponent = (attempt.saturating_sub(1)) as i32;
        let unbounded = self.initial_backoff.as_secs_f64() * self.backoff_multiplier.powi(exponent);
        Duration::from_secs_f64(unbounded.min(self.max_backoff.as_secs_f64()))
    }
}

pub trait ProviderOperationHooks: Send + Sync {
    fn on_attempt_start(&self, _operation: &str, _attempt: u32, _credential: usize) {}

    fn on_retry_scheduled(
        &self,
        _operation: &str,
        _attempt: u32,
        _delay: Duration,
        _error: &ProviderError,
    ) {
    }

    fn on_credential_rotated(&self, _operation: &str, _from: usize, _to: usize) {}

    fn on_blocked(&self, _operation: &str, _reason: &str) {}

    fn on_success(&self, _operation: &str, _attempts: u32) {}

    fn on_failure(&self, _operation: &str, _attempts: u32, _error: &ProviderError) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopOperationHooks;

impl ProviderOperationHooks for NoopOperationHooks {}

/// Runs `execute` against the pool's current credential until it succeeds,
/// fails with a non-retryable error, or the attempt budget runs out.
///
/// Transient failures advance the pool cursor before the next attempt (see
/// [`RetryPolicy::rotates_after`]), including on the last attempt, so a full
/// failed sweep leaves the cursor wrapped. The delay is only taken between
/// attempts: nothing is awaited after the final one. A retryable failure on
/// the last attempt is reported as
/// [`ProviderErrorKind::Exhausted`](crate::ProviderErrorKind::Exhausted).
pub async fn execute_with_rotation<T, Op, OpFuture, Sleep, SleepFuture>(
    operation: &str,
    pool: &CredentialPool,
    policy: &RetryPolicy,
    hooks: &dyn ProviderOperationHooks,
    mut execute: Op,
    mut sleep: Sleep,
) -> Result<T, ProviderError>
where
    Op: FnMut(CredentialLease) -> OpFuture,
    OpFuture: Future<Output = Result<T, ProviderError>>,
    Sleep: FnMut(Duration) -> SleepFuture,
    SleepFuture: Future<Output = ()>,
{
    let mut attempt = 1;

    loop {
        let lease = pool.current();
        let credential = lease.index;
        hooks.on_attempt_start(operation, attempt, credential);

        match execute(lease).await {
            Ok(value) => {
                hooks.on_success(operation, attempt);
                return Ok(value);
            }
            Err(error) => {
                if policy.rotates_after(&error) {
                    let next = pool.rotate_past(credential);
                    if next != credential {
                        hooks.on_credential_rotated(operation, credential, next);
                    }
                }

                if policy.should_retry(attempt, &error) {
                    let delay = policy.backoff_for_attempt(attempt);
                    hooks.on_retry_scheduled(operation, attempt, delay, &error);
                    sleep(delay).await;
                    attempt += 1;
                    continue;
                }

                let error = if error.retryable {
                    ProviderError::exhausted(attempt, &error)
                } else {
                    error
                };
                hooks.on_failure(operation, attempt, &error);
                return Err(error);
            }
        }
    }
}
