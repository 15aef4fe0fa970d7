//! Unified facade over the mentor workspace crates.
//!
//! Most applications only need this crate: load a [`MentorConfig`], build a
//! [`MentorService`], and call its two entry points.
//!
//! ```rust,no_run
//! # async fn run() -> Result<(), mentor::ConfigError> {
//! mentor::init_tracing();
//! let service = mentor::mentor_service_from_env()?;
//!
//! let reply = service.send_message("How do I stop procrastinating?", None).await;
//! println!("{reply}");
//!
//! if let Some(map) = service.generate_outline("shipping my first app").await {
//!     println!("{map}");
//! }
//! # Ok(())
//! # }
//! ```

mod config;
mod logging;

pub mod prelude;
pub mod runtime;

pub use mchat;
pub use mcommon;
pub use mobserve;
pub use mprovider;

pub use config::{
    ConfigError, ConfigErrorKind, DEFAULT_TIMEOUT, ENV_API_KEYS, ENV_BASE_URL,
    ENV_MAX_OUTPUT_TOKENS, ENV_MODEL, ENV_RETRY_DELAY_MS, ENV_SERVER_ERRORS_SAME_KEY, ENV_TEMPERATURE,
    ENV_TIMEOUT_SECS,
    MentorConfig,
};
pub use logging::{DEFAULT_LOG_FILTER, init_tracing};
pub use mchat::{ChatError, ChatErrorKind, MentorService, MentorServiceBuilder, Notices, PromptTemplates};
pub use mcommon::{BoxFuture, GenerationOptions};
pub use mobserve::{
    FanoutProviderHooks, MetricsObservabilityHooks, SafeProviderHooks, TracingObservabilityHooks,
};
pub use mprovider::adapters::gemini::{GeminiDispatcher, GeminiHttpTransport, GeminiTransport};
pub use mprovider::{
    Attachment, CredentialPool, DispatchReply, DispatchRequest, NoopOperationHooks, ProviderError,
    ProviderErrorKind, ProviderFuture, ProviderOperationHooks, RetryPolicy, SecretString,
    TextDispatcher,
};
pub use runtime::{
    build_dispatcher, build_dispatcher_with_hooks, build_mentor_service, default_hooks,
    mentor_service_from_env,
};

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::{MentorConfig, RetryPolicy, build_dispatcher, build_mentor_service};

    #[test]
    fn dispatcher_reflects_config() {
        let config = MentorConfig::new(["a", "b", "c"])
            .expect("config")
            .with_model("gemini-2.0-flash")
            .with_retry_delay(Duration::from_millis(10));

        let dispatcher = build_dispatcher(&config).expect("dispatcher");

        assert_eq!(dispatcher.model(), "gemini-2.0-flash");
        assert_eq!(dispatcher.pool().len(), 3);
        assert_eq!(dispatcher.pool().current_index(), 0);
        assert_eq!(
            *dispatcher.retry_policy(),
            RetryPolicy::new(3).with_delay(Duration::from_millis(10))
        );
    }

    #[test]
    fn server_error_switch_reaches_the_retry_policy() {
        let config = MentorConfig::new(["a", "b"])
            .expect("config")
            .with_server_errors_on_same_credential(true);

        let dispatcher = build_dispatcher(&config).expect("dispatcher");

        assert!(dispatcher.retry_policy().keep_credential_on_server_error);
    }

    #[test]
    fn each_built_dispatcher_gets_its_own_cursor() {
        let config = MentorConfig::new(["a", "b"]).expect("config");
        let first = build_dispatcher(&config).expect("first");
        let second = build_dispatcher(&config).expect("second");

        first.pool().rotate();

        assert_eq!(first.pool().current_index(), 1);
        assert_eq!(second.pool().current_index(), 0);
    }

    #[test]
    fn mentor_service_uses_default_notices() {
        let config = MentorConfig::new(["a"]).expect("config");
        let service = build_mentor_service(&config).expect("service");

        assert_eq!(*service.notices(), crate::Notices::default());
    }

    #[test]
    fn init_tracing_is_idempotent() {
        crate::init_tracing();
        assert!(!crate::init_tracing());
    }
}
