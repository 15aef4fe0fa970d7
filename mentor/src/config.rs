//! Environment-driven configuration for the dispatcher runtime.
//!
//! ```rust
//! use mentor::MentorConfig;
//!
//! let config = MentorConfig::from_lookup(|name| match name {
//!     "MENTOR_API_KEYS" => Some("key-a,key-b".to_string()),
//!     "MENTOR_TEMPERATURE" => Some("0.2".to_string()),
//!     _ => None,
//! })
//! .expect("valid config");
//!
//! assert_eq!(config.api_keys.len(), 2);
//! assert_eq!(config.generation.temperature, 0.2);
//! assert_eq!(config.model, "gemini-1.5-flash");
//! ```

use std::str::FromStr;
use std::time::Duration;

use mcommon::GenerationOptions;
use mprovider::adapters::gemini::{GEMINI_BASE_URL, GEMINI_DEFAULT_MODEL};
use mprovider::{CredentialPool, DEFAULT_RETRY_DELAY, SecretString};
use thiserror::Error;

pub const ENV_API_KEYS: &str = "MENTOR_API_KEYS";
pub const ENV_MODEL: &str = "MENTOR_MODEL";
pub const ENV_BASE_URL: &str = "MENTOR_BASE_URL";
pub const ENV_TEMPERATURE: &str = "MENTOR_TEMPERATURE";
pub const ENV_MAX_OUTPUT_TOKENS: &str = "MENTOR_MAX_OUTPUT_TOKENS";
pub const ENV_RETRY_DELAY_MS: &str = "MENTOR_RETRY_DELAY_MS";
pub const ENV_TIMEOUT_SECS: &str = "MENTOR_TIMEOUT_SECS";
pub const ENV_SERVER_ERRORS_SAME_KEY: &str = "MENTOR_SERVER_ERRORS_SAME_KEY";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(90);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigErrorKind {
    MissingApiKeys,
    InvalidValue,
    Client,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind:?}: {message}")]
pub struct ConfigError {
    pub kind: ConfigErrorKind,
    pub message: String,
}

impl ConfigError {
    pub fn new(kind: ConfigErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn missing_api_keys() -> Self {
        Self::new(
            ConfigErrorKind::MissingApiKeys,
            format!("{ENV_API_KEYS} must list at least one non-empty API key"),
        )
    }

    pub fn invalid_value(variable: &str, detail: impl std::fmt::Display) -> Self {
        Self::new(
            ConfigErrorKind::InvalidValue,
            format!("{variable} is invalid: {detail}"),
        )
    }

    pub fn client(message: impl Into<String>) -> Self {
        Self::new(ConfigErrorKind::Client, message)
    }
}

#[derive(Debug, Clone)]
pub struct MentorConfig {
    pub api_keys: Vec<SecretString>,
    pub model: String,
    pub base_url: String,
    pub generation: GenerationOptions,
    pub retry_delay: Duration,
    pub timeout: Duration,
    /// Retry 5xx replies on the same key instead of rotating.
    pub server_errors_on_same_credential: bool,
}

impl MentorConfig {
    /// Blank keys are dropped; at least one must remain.
    pub fn new<I, S>(api_keys: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let api_keys = api_keys
            .into_iter()
            .map(Into::<String>::into)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .map(SecretString::new)
            .collect::<Vec<_>>();

        if api_keys.is_empty() {
            return Err(ConfigError::missing_api_keys());
        }

        Ok(Self {
            api_keys,
            model: GEMINI_DEFAULT_MODEL.to_string(),
            base_url: GEMINI_BASE_URL.to_string(),
            generation: GenerationOptions::default(),
            retry_delay: DEFAULT_RETRY_DELAY,
            timeout: DEFAULT_TIMEOUT,
            server_errors_on_same_credential: false,
        })
    }

    /// Loads `.env` when present, then reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            return Err(ConfigError::invalid_value(".env", err));
        }

        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let keys = read(ENV_API_KEYS).ok_or_else(ConfigError::missing_api_keys)?;
        let mut config = Self::new(keys.split([',', '\n']))?;

        if let Some(model) = read(ENV_MODEL) {
            config.model = model;
        }

        if let Some(base_url) = read(ENV_BASE_URL) {
            config.base_url = base_url;
        }

        if let Some(temperature) = parse::<f64>(ENV_TEMPERATURE, read(ENV_TEMPERATURE))? {
            config.generation = config.generation.with_temperature(temperature);
        }

        if let Some(max_tokens) = parse::<u32>(ENV_MAX_OUTPUT_TOKENS, read(ENV_MAX_OUTPUT_TOKENS))? {
            config.generation = config.generation.with_max_output_tokens(max_tokens);
        }

        if let Some(millis) = parse::<u64>(ENV_RETRY_DELAY_MS, read(ENV_RETRY_DELAY_MS))? {
            config.retry_delay = Duration::from_millis(millis);
        }

        if let Some(secs) = parse::<u64>(ENV_TIMEOUT_SECS, read(ENV_TIMEOUT_SECS))? {
            config.timeout = Duration::from_secs(secs);
        }

        if let Some(enabled) =
            parse::<bool>(ENV_SERVER_ERRORS_SAME_KEY, read(ENV_SERVER_ERRORS_SAME_KEY))?
        {
            config.server_errors_on_same_credential = enabled;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_generation_options(mut self, generation: GenerationOptions) -> Self {
        self.generation = generation;
        self
    }

    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_server_errors_on_same_credential(mut self, enabled: bool) -> Self {
        self.server_errors_on_same_credential = enabled;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.generation
            .check()
            .map_err(|detail| ConfigError::invalid_value("generation options", detail))?;

        if self.model.trim().is_empty() {
            return Err(ConfigError::invalid_value(ENV_MODEL, "must not be empty"));
        }

        if self.timeout.is_zero() {
            return Err(ConfigError::invalid_value(ENV_TIMEOUT_SECS, "must be above zero"));
        }

        Ok(())
    }

    /// Builds a fresh pool with its cursor at zero.
    pub fn credential_pool(&self) -> Result<CredentialPool, ConfigError> {
        CredentialPool::new(self.api_keys.iter().map(|key| key.expose().to_string()))
            .map_err(|_| ConfigError::missing_api_keys())
    }
}

fn parse<T>(variable: &str, value: Option<String>) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|err| ConfigError::invalid_value(variable, format!("{raw:?}: {err}")))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars = vars
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect::<HashMap<_, _>>();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_only_keys_are_set() {
        let config = MentorConfig::from_lookup(lookup(&[(ENV_API_KEYS, "a")])).expect("config");

        assert_eq!(config.model, GEMINI_DEFAULT_MODEL);
        assert_eq!(config.base_url, GEMINI_BASE_URL);
        assert_eq!(config.generation, GenerationOptions::default());
        assert_eq!(config.retry_delay, Duration::from_millis(500));
        assert_eq!(config.timeout, Duration::from_secs(90));
        assert!(!config.server_errors_on_same_credential);
    }

    #[test]
    fn keys_split_on_commas_and_newlines_and_drop_blanks() {
        let config =
            MentorConfig::from_lookup(lookup(&[(ENV_API_KEYS, " a ,\nb,, \n c ")])).expect("config");

        let keys = config
            .api_keys
            .iter()
            .map(|key| key.expose().to_string())
            .collect::<Vec<_>>();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }

    #[test]
    fn missing_or_blank_keys_are_rejected() {
        for vars in [vec![], vec![(ENV_API_KEYS, "  ")], vec![(ENV_API_KEYS, ", ,\n")]] {
            let error = MentorConfig::from_lookup(lookup(&vars)).expect_err("no keys");
            assert_eq!(error.kind, ConfigErrorKind::MissingApiKeys);
        }
    }

    #[test]
    fn overrides_are_parsed() {
        let config = MentorConfig::from_lookup(lookup(&[
            (ENV_API_KEYS, "a,b"),
            (ENV_MODEL, "gemini-2.0-flash"),
            (ENV_BASE_URL, "http://localhost:9000/v1beta"),
            (ENV_TEMPERATURE, "1.1"),
            (ENV_MAX_OUTPUT_TOKENS, "256"),
            (ENV_RETRY_DELAY_MS, "0"),
            (ENV_TIMEOUT_SECS, "5"),
            (ENV_SERVER_ERRORS_SAME_KEY, "true"),
        ]))
        .expect("config");

        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.base_url, "http://localhost:9000/v1beta");
        assert_eq!(config.generation.temperature, 1.1);
        assert_eq!(config.generation.max_output_tokens, 256);
        assert_eq!(config.retry_delay, Duration::ZERO);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(config.server_errors_on_same_credential);
    }

    #[test]
    fn unparsable_values_name_the_variable() {
        let error = MentorConfig::from_lookup(lookup(&[
            (ENV_API_KEYS, "a"),
            (ENV_MAX_OUTPUT_TOKENS, "lots"),
        ]))
        .expect_err("bad number");

        assert_eq!(error.kind, ConfigErrorKind::InvalidValue);
        assert!(error.message.contains(ENV_MAX_OUTPUT_TOKENS));
    }

    #[test]
    fn out_of_range_generation_options_are_rejected() {
        let error = MentorConfig::from_lookup(lookup(&[
            (ENV_API_KEYS, "a"),
            (ENV_TEMPERATURE, "3.5"),
        ]))
        .expect_err("temperature out of range");

        assert_eq!(error.kind, ConfigErrorKind::InvalidValue);
    }

    #[test]
    fn debug_output_redacts_keys() {
        let config = MentorConfig::new(["super-secret"]).expect("config");
        let rendered = format!("{config:?}");

        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
