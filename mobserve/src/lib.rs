//! Production-friendly observability hooks for the dispatch loop.
//!
//! ```rust
//! use mobserve::{MetricsObservabilityHooks, SafeProviderHooks, TracingObservabilityHooks};
//!
//! let _provider_hooks = SafeProviderHooks::new(TracingObservabilityHooks);
//! let _metrics = MetricsObservabilityHooks;
//! ```

mod metrics_hooks;
mod safe_hooks;
mod tracing_hooks;

pub use metrics_hooks::MetricsObservabilityHooks;
pub use safe_hooks::{FanoutProviderHooks, SafeProviderHooks};
pub use tracing_hooks::TracingObservabilityHooks;

pub mod prelude {
    pub use crate::{
        FanoutProviderHooks, MetricsObservabilityHooks, SafeProviderHooks,
        TracingObservabilityHooks,
    };
}
