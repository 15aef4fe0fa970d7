//! Metrics-based observability hooks for dispatch attempts and rotation.
//!
//! ```rust
//! use mobserve::MetricsObservabilityHooks;
//! use mprovider::ProviderOperationHooks;
//!
//! fn accepts_provider_hooks(_hooks: &dyn ProviderOperationHooks) {}
//!
//! let hooks = MetricsObservabilityHooks;
//! accepts_provider_hooks(&hooks);
//! ```

use std::time::Duration;

use mprovider::{ProviderError, ProviderOperationHooks};

#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsObservabilityHooks;

impl ProviderOperationHooks for MetricsObservabilityHooks {
    fn on_attempt_start(&self, operation: &str, _attempt: u32, credential: usize) {
        metrics::counter!(
            "mentor_dispatch_attempt_start_total",
            "operation" => operation.to_string(),
            "credential" => credential.to_string()
        )
        .increment(1);
    }

    fn on_retry_scheduled(
        &self,
        operation: &str,
        _attempt: u32,
        delay: Duration,
        error: &ProviderError,
    ) {
        metrics::counter!(
            "mentor_dispatch_retry_scheduled_total",
            "operation" => operation.to_string(),
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
        metrics::histogram!(
            "mentor_dispatch_retry_delay_seconds",
            "operation" => operation.to_string()
        )
        .record(delay.as_secs_f64());
    }

    fn on_credential_rotated(&self, operation: &str, _from: usize, _to: usize) {
        metrics::counter!(
            "mentor_dispatch_credential_rotated_total",
            "operation" => operation.to_string()
        )
        .increment(1);
    }

    fn on_blocked(&self, operation: &str, reason: &str) {
        metrics::counter!(
            "mentor_dispatch_blocked_total",
            "operation" => operation.to_string(),
            "reason" => reason.to_string()
        )
        .increment(1);
    }

    fn on_success(&self, operation: &str, attempts: u32) {
        metrics::counter!(
            "mentor_dispatch_success_total",
            "operation" => operation.to_string()
        )
        .increment(1);
        metrics::histogram!(
            "mentor_dispatch_attempts_per_success",
            "operation" => operation.to_string()
        )
        .record(attempts as f64);
    }

    fn on_failure(&self, operation: &str, attempts: u32, error: &ProviderError) {
        metrics::counter!(
            "mentor_dispatch_failure_total",
            "operation" => operation.to_string(),
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
        metrics::histogram!(
            "mentor_dispatch_attempts_per_failure",
            "operation" => operation.to_string()
        )
        .record(attempts as f64);
    }
}
