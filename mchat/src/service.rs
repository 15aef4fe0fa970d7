//! Mentor service: prompt assembly plus outcome normalization.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use mchat::{MentorService, Notices};
//! use mprovider::{DispatchReply, DispatchRequest, ProviderError, ProviderFuture, TextDispatcher};
//!
//! struct Offline;
//!
//! impl TextDispatcher for Offline {
//!     fn dispatch<'a>(
//!         &'a self,
//!         _request: DispatchRequest,
//!     ) -> ProviderFuture<'a, Result<DispatchReply, ProviderError>> {
//!         Box::pin(async { Err(ProviderError::transport("offline")) })
//!     }
//! }
//!
//! let service = MentorService::new(Arc::new(Offline));
//! let runtime = tokio::runtime::Builder::new_current_thread().build().expect("runtime");
//!
//! let reply = runtime.block_on(service.send_message("hello", None));
//! assert_eq!(reply, Notices::default().connectivity_failure);
//! assert_eq!(runtime.block_on(service.generate_outline("focus")), None);
//! ```

use std::sync::Arc;

use mprovider::{Attachment, DispatchReply, DispatchRequest, TextDispatcher};

use crate::{ChatError, Notices, PromptTemplates};

pub const CHAT_OPERATION: &str = "send_message";
pub const OUTLINE_OPERATION: &str = "generate_outline";

#[derive(Clone)]
pub struct MentorService {
    dispatcher: Arc<dyn TextDispatcher>,
    templates: PromptTemplates,
    notices: Notices,
}

impl MentorService {
    pub fn new(dispatcher: Arc<dyn TextDispatcher>) -> Self {
        MentorServiceBuilder::new(dispatcher).build()
    }

    pub fn builder(dispatcher: Arc<dyn TextDispatcher>) -> MentorServiceBuilder {
        MentorServiceBuilder::new(dispatcher)
    }

    pub fn templates(&self) -> &PromptTemplates {
        &self.templates
    }

    pub fn notices(&self) -> &Notices {
        &self.notices
    }

    /// Sends a chat message and always returns displayable text.
    ///
    /// Dispatch failures are logged and replaced by the connectivity notice.
    pub async fn send_message(&self, message: &str, attachment: Option<Attachment>) -> String {
        match self.try_send_message(message, attachment).await {
            Ok(text) => text,
            Err(error) => {
                tracing::error!(
                    operation = CHAT_OPERATION,
                    error_kind = ?error.kind,
                    provider_kind = ?error.provider_kind,
                    error = %error,
                    "chat dispatch failed; returning connectivity notice"
                );
                self.notices.connectivity_failure.clone()
            }
        }
    }

    /// Asks for a hierarchical outline of `topic`; `None` when dispatch fails.
    pub async fn generate_outline(&self, topic: &str) -> Option<String> {
        match self.try_generate_outline(topic).await {
            Ok(text) => Some(text),
            Err(error) => {
                tracing::warn!(
                    operation = OUTLINE_OPERATION,
                    error_kind = ?error.kind,
                    provider_kind = ?error.provider_kind,
                    error = %error,
                    "outline dispatch failed"
                );
                None
            }
        }
    }

    /// Like [`send_message`](Self::send_message) but surfaces the failure.
    ///
    /// A safety block is not a failure; it resolves to the safety notice.
    pub async fn try_send_message(
        &self,
        message: &str,
        attachment: Option<Attachment>,
    ) -> Result<String, ChatError> {
        let request = DispatchRequest::new(self.templates.chat_prompt(message))
            .with_optional_attachment(attachment);
        self.run(request).await
    }

    pub async fn try_generate_outline(&self, topic: &str) -> Result<String, ChatError> {
        let request = DispatchRequest::new(self.templates.outline_prompt(topic));
        self.run(request).await
    }

    async fn run(&self, request: DispatchRequest) -> Result<String, ChatError> {
        match self.dispatcher.dispatch(request).await? {
            DispatchReply::Text(text) => Ok(text),
            DispatchReply::Blocked { .. } => Ok(self.notices.safety_block.clone()),
        }
    }
}

impl std::fmt::Debug for MentorService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MentorService")
            .field("templates", &self.templates)
            .field("notices", &self.notices)
            .finish_non_exhaustive()
    }
}

pub struct MentorServiceBuilder {
    dispatcher: Arc<dyn TextDispatcher>,
    templates: PromptTemplates,
    notices: Notices,
}

impl MentorServiceBuilder {
    pub fn new(dispatcher: Arc<dyn TextDispatcher>) -> Self {
        Self {
            dispatcher,
            templates: PromptTemplates::default(),
            notices: Notices::default(),
        }
    }

    pub fn templates(mut self, templates: PromptTemplates) -> Self {
        self.templates = templates;
        self
    }

    pub fn notices(mut self, notices: Notices) -> Self {
        self.notices = notices;
        self
    }

    pub fn build(self) -> MentorService {
        MentorService {
            dispatcher: self.dispatcher,
            templates: self.templates,
            notices: self.notices,
        }
    }
}
