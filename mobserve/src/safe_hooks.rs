use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::time::Duration;

use mprovider::{ProviderError, ProviderOperationHooks};

/// Swallows panics raised by the wrapped hooks.
pub struct SafeProviderHooks<H> {
    inner: H,
}

impl<H> SafeProviderHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H> ProviderOperationHooks for SafeProviderHooks<H>
where
    H: ProviderOperationHooks,
{
    fn on_attempt_start(&self, operation: &str, attempt: u32, credential: usize) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_attempt_start(operation, attempt, credential)
        }));
    }

    fn on_retry_scheduled(
        &self,
        operation: &str,
        attempt: u32,
        delay: Duration,
        error: &ProviderError,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner
                .on_retry_scheduled(operation, attempt, delay, error)
        }));
    }

    fn on_credential_rotated(&self, operation: &str, from: usize, to: usize) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_credential_rotated(operation, from, to)
        }));
    }

    fn on_blocked(&self, operation: &str, reason: &str) {
        let _ = catch_unwind(AssertUnwindSafe(|| self.inner.on_blocked(operation, reason)));
    }

    fn on_success(&self, operation: &str, attempts: u32) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_success(operation, attempts)
        }));
    }

    fn on_failure(&self, operation: &str, attempts: u32, error: &ProviderError) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_failure(operation, attempts, error)
        }));
    }
}

/// Forwards every callback to each registered hook, in registration order.
#[derive(Default, Clone)]
pub struct FanoutProviderHooks {
    hooks: Vec<Arc<dyn ProviderOperationHooks>>,
}

impl FanoutProviderHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, hooks: Arc<dyn ProviderOperationHooks>) -> Self {
        self.hooks.push(hooks);
        self
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl ProviderOperationHooks for FanoutProviderHooks {
    fn on_attempt_start(&self, operation: &str, attempt: u32, credential: usize) {
        for hooks in &self.hooks {
            hooks.on_attempt_start(operation, attempt, credential);
        }
    }

    fn on_retry_scheduled(
        &self,
        operation: &str,
        attempt: u32,
        delay: Duration,
        error: &ProviderError,
    ) {
        for hooks in &self.hooks {
            hooks.on_retry_scheduled(operation, attempt, delay, error);
        }
    }

    fn on_credential_rotated(&self, operation: &str, from: usize, to: usize) {
        for hooks in &self.hooks {
            hooks.on_credential_rotated(operation, from, to);
        }
    }

    fn on_blocked(&self, operation: &str, reason: &str) {
        for hooks in &self.hooks {
            hooks.on_blocked(operation, reason);
        }
    }

    fn on_success(&self, operation: &str, attempts: u32) {
        for hooks in &self.hooks {
            hooks.on_success(operation, attempts);
        }
    }

    fn on_failure(&self, operation: &str, attempts: u32, error: &ProviderError) {
        for hooks in &self.hooks {
            hooks.on_failure(operation, attempts, error);
        }
    }
}
