//! Gemini HTTP payload serde models and conversion helpers.

use serde::{Deserialize, Serialize};

use super::types::{GeminiPart, GeminiRequest, GeminiResponse};

pub(crate) fn build_api_request(request: GeminiRequest) -> GeminiApiRequest {
    let parts = request
        .parts
        .into_iter()
        .map(GeminiApiPart::from)
        .collect::<Vec<_>>();

    GeminiApiRequest {
        contents: vec![GeminiApiContent { parts }],
        generation_config: GeminiApiGenerationConfig {
            temperature: request.generation.temperature,
            max_output_tokens: request.generation.max_output_tokens,
        },
    }
}

/// Pulls a human-readable message out of a Gemini error envelope.
pub(crate) fn extract_error_message(body: &str) -> Option<String> {
    let parsed = serde_json::from_str::<GeminiApiErrorEnvelope>(body).ok()?;
    match parsed.error.status {
        Some(status) if !status.is_empty() => Some(format!("{status}: {}", parsed.error.message)),
        _ => Some(parsed.error.message),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeminiApiErrorEnvelope {
    pub error: GeminiApiError,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeminiApiError {
    pub message: String,
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct GeminiApiRequest {
    pub contents: Vec<GeminiApiContent>,
    #[serde(rename = "generationConfig")]
    pub generation_config: GeminiApiGenerationConfig,
}

#[derive(Debug, Serialize)]
pub(crate) struct GeminiApiContent {
    pub parts: Vec<GeminiApiPart>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub(crate) enum GeminiApiPart {
    Text { text: String },
    InlineData { inline_data: GeminiApiInlineData },
}

impl From<GeminiPart> for GeminiApiPart {
    fn from(value: GeminiPart) -> Self {
        match value {
            GeminiPart::Text(text) => Self::Text { text },
            GeminiPart::InlineData { mime_type, data } => Self::InlineData {
                inline_data: GeminiApiInlineData { mime_type, data },
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct GeminiApiInlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GeminiApiGenerationConfig {
    pub temperature: f64,
    pub max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GeminiApiResponse {
    pub candidates: Option<Vec<GeminiApiCandidate>>,
    pub prompt_feedback: Option<GeminiApiPromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GeminiApiPromptFeedback {
    pub block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeminiApiCandidate {
    pub content: Option<GeminiApiCandidateContent>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeminiApiCandidateContent {
    pub parts: Option<Vec<GeminiApiCandidatePart>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeminiApiCandidatePart {
    pub text: Option<String>,
}

impl From<GeminiApiResponse> for GeminiResponse {
    fn from(value: GeminiApiResponse) -> Self {
        let block_reason = value
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason)
            .filter(|reason| !reason.is_empty());

        // Text may be split across several parts of the first candidate.
        let text = value
            .candidates
            .and_then(|candidates| candidates.into_iter().next())
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts)
            .map(|parts| {
                parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<String>()
            })
            .filter(|text| !text.is_empty());

        Self { block_reason, text }
    }
}
