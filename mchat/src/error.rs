//! Chat-layer errors and classification.

use mprovider::{ProviderError, ProviderErrorKind};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatErrorKind {
    InvalidRequest,
    Provider,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind:?}: {message}")]
pub struct ChatError {
    pub kind: ChatErrorKind,
    pub message: String,
    /// Kind of the underlying dispatch failure, when there was one.
    pub provider_kind: Option<ProviderErrorKind>,
}

impl ChatError {
    pub fn new(kind: ChatErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            provider_kind: None,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::InvalidRequest, message)
    }

    pub fn provider(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::Provider, message)
    }

    pub fn is_exhausted(&self) -> bool {
        self.provider_kind == Some(ProviderErrorKind::Exhausted)
    }
}

impl From<ProviderError> for ChatError {
    fn from(value: ProviderError) -> Self {
        let mut error = match value.kind {
            ProviderErrorKind::InvalidRequest => Self::invalid_request(value.to_string()),
            _ => Self::provider(value.to_string()),
        };
        error.provider_kind = Some(value.kind);
        error
    }
}
