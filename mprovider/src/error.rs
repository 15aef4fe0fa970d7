//! Shared provider error kinds and error value helpers.
//!
//! ```rust
//! use mprovider::ProviderError;
//!
//! let auth = ProviderError::authentication("bad key");
//! assert!(auth.retryable);
//! assert!(auth.rotates_credential());
//!
//! let malformed = ProviderError::invalid_request("bad payload");
//! assert!(!malformed.retryable);
//! ```

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    Authentication,
    RateLimited,
    InvalidRequest,
    EmptyResponse,
    Timeout,
    Transport,
    Unavailable,
    Configuration,
    Exhausted,
    Other,
}

impl ProviderErrorKind {
    /// Every transient failure moves on to the next credential; request,
    /// configuration and exhaustion errors never do.
    pub fn rotates_credential(self) -> bool {
        matches!(
            self,
            Self::Authentication
                | Self::RateLimited
                | Self::EmptyResponse
                | Self::Timeout
                | Self::Transport
                | Self::Unavailable
        )
    }

    /// Upstream 5xx-class failure, which a policy may retry on the same key.
    pub fn is_server_error(self) -> bool {
        self == Self::Unavailable
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind:?}: {message}")]
pub struct ProviderError {
    pub kind: ProviderErrorKind,
    pub message: String,
    pub retryable: bool,
    pub status: Option<u16>,
}

impl ProviderError {
    pub fn new(kind: ProviderErrorKind, message: impl Into<String>, retryable: bool) -> Self {
        Self {
            kind,
            message: message.into(),
            retryable,
            status: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn rotates_credential(&self) -> bool {
        self.kind.rotates_credential()
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Authentication, message, true)
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::RateLimited, message, true)
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::InvalidRequest, message, false)
    }

    pub fn empty_response(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::EmptyResponse, message, true)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Timeout, message, true)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Transport, message, true)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Unavailable, message, true)
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Configuration, message, false)
    }

    /// Terminal error raised once every attempt in the budget has failed.
    pub fn exhausted(attempts: u32, last: &ProviderError) -> Self {
        let mut error = Self::new(
            ProviderErrorKind::Exhausted,
            format!("all credentials were tried and failed after {attempts} attempt(s); last error: {last}"),
            false,
        );
        error.status = last.status;
        error
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Other, message, false)
    }
}
