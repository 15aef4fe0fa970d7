//! Gemini dispatcher: payload construction and the rotating retry loop.

use std::sync::Arc;
use std::time::Duration;

use mcommon::GenerationOptions;

use crate::{
    CredentialPool, DispatchReply, DispatchRequest, NoopOperationHooks, ProviderError,
    ProviderFuture, ProviderOperationHooks, RetryPolicy, TextDispatcher, execute_with_rotation,
};

use super::transport::GeminiTransport;
use super::types::{GEMINI_DEFAULT_MODEL, GeminiPart, GeminiRequest};

pub const GENERATE_OPERATION: &str = "generate_content";

#[derive(Clone)]
pub struct GeminiDispatcher {
    pool: CredentialPool,
    transport: Arc<dyn GeminiTransport>,
    hooks: Arc<dyn ProviderOperationHooks>,
    retry_policy: RetryPolicy,
    generation: GenerationOptions,
    model: String,
}

impl GeminiDispatcher {
    pub fn new(pool: CredentialPool, transport: Arc<dyn GeminiTransport>) -> Self {
        Self {
            retry_policy: RetryPolicy::for_pool(&pool),
            pool,
            transport,
            hooks: Arc::new(NoopOperationHooks),
            generation: GenerationOptions::default(),
            model: GEMINI_DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_generation_options(mut self, generation: GenerationOptions) -> Self {
        self.generation = generation;
        self
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn ProviderOperationHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn with_retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_policy = self.retry_policy.with_delay(delay);
        self
    }

    pub fn with_server_errors_on_same_credential(mut self, enabled: bool) -> Self {
        self.retry_policy = self
            .retry_policy
            .with_server_errors_on_same_credential(enabled);
        self
    }

    pub fn pool(&self) -> &CredentialPool {
        &self.pool
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    /// Text part first, then the attachment as inline data when present.
    pub fn build_payload(&self, request: DispatchRequest) -> GeminiRequest {
        let mut parts = vec![GeminiPart::Text(request.prompt)];
        if let Some(attachment) = request.attachment {
            parts.push(GeminiPart::from(attachment));
        }

        GeminiRequest {
            model: self.model.clone(),
            parts,
            generation: self.generation,
        }
    }
}

impl std::fmt::Debug for GeminiDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiDispatcher")
            .field("pool", &self.pool)
            .field("transport", &self.transport)
            .field("retry_policy", &self.retry_policy)
            .field("generation", &self.generation)
            .field("model", &self.model)
            .finish()
    }
}

impl TextDispatcher for GeminiDispatcher {
    fn dispatch<'a>(
        &'a self,
        request: DispatchRequest,
    ) -> ProviderFuture<'a, Result<DispatchReply, ProviderError>> {
        Box::pin(async move {
            request.validate()?;
            self.generation
                .check()
                .map_err(ProviderError::invalid_request)?;

            let payload = self.build_payload(request);
            let reply = execute_with_rotation(
                GENERATE_OPERATION,
                &self.pool,
                &self.retry_policy,
                self.hooks.as_ref(),
                |lease| {
                    let payload = payload.clone();
                    async move {
                        self.transport
                            .generate(payload, lease.key)
                            .await?
                            .into_reply()
                    }
                },
                tokio::time::sleep,
            )
            .await?;

            if let DispatchReply::Blocked { reason } = &reply {
                self.hooks.on_blocked(GENERATE_OPERATION, reason);
            }

            Ok(reply)
        })
    }
}
