//! Gemini adapter types and conversion into provider-agnostic replies.

use mcommon::GenerationOptions;

use crate::{Attachment, DispatchReply, ProviderError};

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const GEMINI_DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// One `generateContent` call: a single content entry plus generation settings.
#[derive(Debug, Clone, PartialEq)]
pub struct GeminiRequest {
    pub model: String,
    pub parts: Vec<GeminiPart>,
    pub generation: GenerationOptions,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeminiPart {
    Text(String),
    InlineData { mime_type: String, data: String },
}

impl From<Attachment> for GeminiPart {
    fn from(value: Attachment) -> Self {
        Self::InlineData {
            mime_type: value.mime_type,
            data: value.data,
        }
    }
}

/// The parts of a successful response body the dispatcher cares about.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GeminiResponse {
    pub block_reason: Option<String>,
    pub text: Option<String>,
}

impl GeminiResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            block_reason: None,
            text: Some(text.into()),
        }
    }

    pub fn blocked(reason: impl Into<String>) -> Self {
        Self {
            block_reason: Some(reason.into()),
            text: None,
        }
    }

    /// A block reason wins over any text; a body without text is an
    /// [`EmptyResponse`](crate::ProviderErrorKind::EmptyResponse) failure.
    pub(crate) fn into_reply(self) -> Result<DispatchReply, ProviderError> {
        if let Some(reason) = self.block_reason {
            return Ok(DispatchReply::Blocked { reason });
        }

        match self.text {
            Some(text) if !text.is_empty() => Ok(DispatchReply::Text(text)),
            _ => Err(ProviderError::empty_response(
                "Gemini response did not include generated text",
            )),
        }
    }
}
