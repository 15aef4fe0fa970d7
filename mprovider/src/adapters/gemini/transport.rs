//! Gemini transport trait and reqwest-based HTTP implementation.

use reqwest::{Client, Request, StatusCode};

use crate::{ProviderError, ProviderFuture, SecretString};

use super::serde_api::{GeminiApiResponse, build_api_request, extract_error_message};
use super::types::{GEMINI_BASE_URL, GeminiRequest, GeminiResponse};

pub trait GeminiTransport: Send + Sync + std::fmt::Debug {
    fn generate<'a>(
        &'a self,
        request: GeminiRequest,
        api_key: SecretString,
    ) -> ProviderFuture<'a, Result<GeminiResponse, ProviderError>>;
}

#[derive(Debug, Clone)]
pub struct GeminiHttpTransport {
    client: Client,
    base_url: String,
}

impl GeminiHttpTransport {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: GEMINI_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub(crate) fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            model
        )
    }

    /// JSON `POST` to the model endpoint with the key in the `key` query.
    pub(crate) fn build_request(
        &self,
        request: GeminiRequest,
        api_key: &SecretString,
    ) -> Result<Request, ProviderError> {
        let url = self.endpoint(&request.model);
        self.client
            .post(url)
            .query(&[("key", api_key.expose())])
            .json(&build_api_request(request))
            .build()
            .map_err(send_error)
    }
}

/// Maps a reqwest failure without echoing the URL, which carries the key.
pub(crate) fn send_error(err: reqwest::Error) -> ProviderError {
    let err = err.without_url();
    if err.is_timeout() {
        ProviderError::timeout(err.to_string())
    } else {
        ProviderError::transport(err.to_string())
    }
}

/// Turns a status and raw body into a parsed response or a classified error.
///
/// A successful status with an unreadable body counts as an empty response.
pub(crate) fn read_response(status: StatusCode, body: &str) -> Result<GeminiResponse, ProviderError> {
    if !status.is_success() {
        let detail =
            extract_error_message(body).unwrap_or_else(|| "Gemini request failed".to_string());
        return Err(error_for_status(
            status,
            format!("HTTP {}: {detail}", status.as_u16()),
        ));
    }

    let parsed = serde_json::from_str::<GeminiApiResponse>(body).map_err(|err| {
        ProviderError::empty_response(format!("Gemini response body was not valid: {err}"))
            .with_status(status.as_u16())
    })?;

    Ok(GeminiResponse::from(parsed))
}

pub(crate) fn error_for_status(status: StatusCode, message: String) -> ProviderError {
    let error = match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProviderError::authentication(message),
        StatusCode::TOO_MANY_REQUESTS => ProviderError::rate_limited(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => ProviderError::timeout(message),
        StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND | StatusCode::UNPROCESSABLE_ENTITY => {
            ProviderError::invalid_request(message)
        }
        StatusCode::INTERNAL_SERVER_ERROR
        | StatusCode::BAD_GATEWAY
        | StatusCode::SERVICE_UNAVAILABLE => ProviderError::unavailable(message),
        _ => ProviderError::transport(message),
    };

    error.with_status(status.as_u16())
}

impl GeminiTransport for GeminiHttpTransport {
    fn generate<'a>(
        &'a self,
        request: GeminiRequest,
        api_key: SecretString,
    ) -> ProviderFuture<'a, Result<GeminiResponse, ProviderError>> {
        Box::pin(async move {
            let http_request = self.build_request(request, &api_key)?;
            let response = self.client.execute(http_request).await.map_err(send_error)?;

            let status = response.status();
            let body = if status.is_success() {
                response
                    .text()
                    .await
                    .map_err(|err| send_error(err).with_status(status.as_u16()))?
            } else {
                response.text().await.unwrap_or_default()
            };

            read_response(status, &body)
        })
    }
}
