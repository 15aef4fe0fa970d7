//! Runtime wiring from [`MentorConfig`] to a ready-to-use service.

use std::sync::Arc;

use mchat::MentorService;
use mobserve::{
    FanoutProviderHooks, MetricsObservabilityHooks, SafeProviderHooks, TracingObservabilityHooks,
};
use mprovider::ProviderOperationHooks;
use mprovider::adapters::gemini::{GeminiDispatcher, GeminiHttpTransport};
use reqwest::Client;

use crate::{ConfigError, MentorConfig};

/// Tracing and metrics hooks, isolated from panics.
pub fn default_hooks() -> Arc<dyn ProviderOperationHooks> {
    let fanout = FanoutProviderHooks::new()
        .with(Arc::new(TracingObservabilityHooks))
        .with(Arc::new(MetricsObservabilityHooks));
    Arc::new(SafeProviderHooks::new(fanout))
}

pub fn build_dispatcher(config: &MentorConfig) -> Result<GeminiDispatcher, ConfigError> {
    build_dispatcher_with_hooks(config, default_hooks())
}

pub fn build_dispatcher_with_hooks(
    config: &MentorConfig,
    hooks: Arc<dyn ProviderOperationHooks>,
) -> Result<GeminiDispatcher, ConfigError> {
    config.validate()?;

    let http = Client::builder()
        .timeout(config.timeout)
        .build()
        .map_err(|err| ConfigError::client(err.to_string()))?;
    let transport = GeminiHttpTransport::new(http).with_base_url(config.base_url.clone());

    let dispatcher = GeminiDispatcher::new(config.credential_pool()?, Arc::new(transport))
        .with_model(config.model.clone())
        .with_generation_options(config.generation)
        .with_retry_delay(config.retry_delay)
        .with_server_errors_on_same_credential(config.server_errors_on_same_credential)
        .with_hooks(hooks);

    tracing::info!(
        model = dispatcher.model(),
        credentials = dispatcher.pool().len(),
        max_attempts = dispatcher.retry_policy().max_attempts,
        "dispatcher ready"
    );

    Ok(dispatcher)
}

pub fn build_mentor_service(config: &MentorConfig) -> Result<MentorService, ConfigError> {
    Ok(MentorService::new(Arc::new(build_dispatcher(config)?)))
}

/// Loads configuration from the environment and builds the service.
pub fn mentor_service_from_env() -> Result<MentorService, ConfigError> {
    build_mentor_service(&MentorConfig::from_env()?)
}
