//! Tracing-based observability hooks for dispatch attempts and rotation.
//!
//! ```rust
//! use mobserve::TracingObservabilityHooks;
//! use mprovider::ProviderOperationHooks;
//!
//! fn accepts_provider_hooks(_hooks: &dyn ProviderOperationHooks) {}
//!
//! let hooks = TracingObservabilityHooks;
//! accepts_provider_hooks(&hooks);
//! ```

use std::time::Duration;

use mprovider::{ProviderError, ProviderOperationHooks};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObservabilityHooks;

impl ProviderOperationHooks for TracingObservabilityHooks {
    fn on_attempt_start(&self, operation: &str, attempt: u32, credential: usize) {
        tracing::debug!(
            phase = "dispatch",
            event = "attempt_start",
            operation,
            attempt,
            credential
        );
    }

    fn on_retry_scheduled(
        &self,
        operation: &str,
        attempt: u32,
        delay: Duration,
        error: &ProviderError,
    ) {
        tracing::warn!(
            phase = "dispatch",
            event = "retry_scheduled",
            operation,
            attempt,
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            status = error.status,
            error_kind = ?error.kind,
            error = %error
        );
    }

    fn on_credential_rotated(&self, operation: &str, from: usize, to: usize) {
        tracing::info!(
            phase = "dispatch",
            event = "credential_rotated",
            operation,
            from,
            to
        );
    }

    fn on_blocked(&self, operation: &str, reason: &str) {
        tracing::warn!(
            phase = "dispatch",
            event = "blocked",
            operation,
            reason
        );
    }

    fn on_success(&self, operation: &str, attempts: u32) {
        tracing::info!(
            phase = "dispatch",
            event = "success",
            operation,
            attempts
        );
    }

    fn on_failure(&self, operation: &str, attempts: u32, error: &ProviderError) {
        tracing::error!(
            phase = "dispatch",
            event = "failure",
            operation,
            attempts,
            status = error.status,
            error_kind = ?error.kind,
            retryable = error.retryable,
            error = %error
        );
    }
}
