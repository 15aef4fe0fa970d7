//! Provider-agnostic dispatch request and reply types.
//!
//! ```rust
//! use mprovider::{Attachment, DispatchRequest, ProviderErrorKind};
//!
//! let request = DispatchRequest::new("Summarize this photo")
//!     .with_attachment(Attachment::from_bytes("image/png", b"\x89PNG"));
//! assert!(request.validate().is_ok());
//!
//! let err = DispatchRequest::new("   ").validate().expect_err("empty prompt");
//! assert_eq!(err.kind, ProviderErrorKind::InvalidRequest);
//! ```

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::ProviderError;

/// Inline binary payload sent next to the prompt text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub mime_type: String,
    /// Base64-encoded bytes.
    pub data: String,
}

impl Attachment {
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    pub fn from_bytes(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self::new(mime_type, STANDARD.encode(bytes))
    }

    pub fn validate(&self) -> Result<(), ProviderError> {
        if self.mime_type.trim().is_empty() {
            return Err(ProviderError::invalid_request(
                "attachment mime_type must not be empty",
            ));
        }

        if self.data.is_empty() {
            return Err(ProviderError::invalid_request(
                "attachment data must not be empty",
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchRequest {
    pub prompt: String,
    pub attachment: Option<Attachment>,
}

impl DispatchRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            attachment: None,
        }
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachment = Some(attachment);
        self
    }

    pub fn with_optional_attachment(mut self, attachment: Option<Attachment>) -> Self {
        self.attachment = attachment;
        self
    }

    pub fn validate(&self) -> Result<(), ProviderError> {
        if self.prompt.trim().is_empty() {
            return Err(ProviderError::invalid_request("prompt must not be empty"));
        }

        if let Some(attachment) = &self.attachment {
            attachment.validate()?;
        }

        Ok(())
    }
}

/// Non-error outcome of a dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchReply {
    Text(String),
    /// The upstream refused the prompt on content-safety grounds.
    Blocked { reason: String },
}

impl DispatchReply {
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_str()),
            Self::Blocked { .. } => None,
        }
    }

    pub fn is_blocked(&self) -> bool {
        matches!(self, Self::Blocked { .. })
    }
}
