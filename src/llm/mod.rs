//! LLM client abstraction.
//!
//! Every AI feature goes through [`LlmProvider`]. The only production
//! provider is [`AnthropicClient`]; tests substitute mocks.

mod anthropic;

pub use anthropic::AnthropicClient;

use crate::{Error, Result};
use secrecy::SecretString;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

/// Value shipped in `.env.example`; treated as unset.
const PLACEHOLDER_API_KEY: &str = "your_api_key_here";

/// Default completion budget.
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

/// Per-request options.
#[derive(Debug, Clone, Default)]
pub struct CompletionOptions {
    /// Response token budget; `None` uses the provider default.
    pub max_tokens: Option<u32>,
    /// Optional system prompt.
    pub system: Option<String>,
}

impl CompletionOptions {
    /// Options with a token budget.
    #[must_use]
    pub const fn with_max_tokens(max_tokens: u32) -> Self {
        Self {
            max_tokens: Some(max_tokens),
            system: None,
        }
    }

    /// Sets the system prompt.
    #[must_use]
    pub fn system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }
}

/// Trait for LLM providers.
pub trait LlmProvider: Send + Sync {
    /// The provider name.
    fn name(&self) -> &'static str;

    /// Generates a completion for the given prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if the completion fails.
    fn complete(&self, prompt: &str, options: &CompletionOptions) -> Result<String>;
}

/// Runs a completion and parses the JSON object or array in the reply.
///
/// # Errors
///
/// Returns an error if the completion fails or the reply is not valid JSON
/// for `T`.
pub fn complete_json<T: DeserializeOwned>(
    provider: &dyn LlmProvider,
    prompt: &str,
    options: &CompletionOptions,
) -> Result<T> {
    let response = provider.complete(prompt, options)?;
    parse_json_response(&response)
}

/// Parses a JSON payload out of model output.
///
/// # Errors
///
/// Returns an error if no valid JSON for `T` is found.
pub fn parse_json_response<T: DeserializeOwned>(response: &str) -> Result<T> {
    let json_str = extract_json_from_response(response);
    serde_json::from_str(json_str).map_err(|e| Error::OperationFailed {
        operation: "parse_llm_json".to_string(),
        cause: format!("Invalid JSON: {e}. Response: {response}"),
    })
}

/// Returns true when `key` is present, non-blank and not the placeholder.
#[must_use]
pub fn is_api_key_usable(key: Option<&str>) -> bool {
    key.is_some_and(|k| {
        let k = k.trim();
        !k.is_empty() && k != PLACEHOLDER_API_KEY
    })
}

/// Reads a usable API key from the environment.
#[must_use]
pub fn api_key_from_env() -> Option<SecretString> {
    std::env::var(API_KEY_ENV)
        .ok()
        .filter(|k| is_api_key_usable(Some(k)))
        .map(|k| SecretString::from(k.trim().to_string()))
}

/// Returns true when AI features can be used.
#[must_use]
pub fn is_ai_available() -> bool {
    api_key_from_env().is_some()
}

/// HTTP client configuration for LLM providers.
#[derive(Debug, Clone, Copy)]
pub struct LlmHttpConfig {
    /// Request timeout in milliseconds (0 to disable).
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds (0 to disable).
    pub connect_timeout_ms: u64,
}

impl Default for LlmHttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 60_000,
            connect_timeout_ms: 5_000,
        }
    }
}

impl LlmHttpConfig {
    /// Loads HTTP configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Loads HTTP configuration from config file settings.
    #[must_use]
    pub fn from_config(config: &crate::config::LlmConfig) -> Self {
        let mut settings = Self::default();
        if let Some(timeout_ms) = config.timeout_ms {
            settings.timeout_ms = timeout_ms;
        }
        if let Some(connect_timeout_ms) = config.connect_timeout_ms {
            settings.connect_timeout_ms = connect_timeout_ms;
        }
        settings
    }

    /// Applies environment variable overrides.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(timeout_ms) = env_millis("QUOTES_LLM_TIMEOUT_MS") {
            self.timeout_ms = timeout_ms;
        }
        if let Some(connect_timeout_ms) = env_millis("QUOTES_LLM_CONNECT_TIMEOUT_MS") {
            self.connect_timeout_ms = connect_timeout_ms;
        }
        self
    }
}

fn env_millis(name: &str) -> Option<u64> {
    std::env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

/// Builds a blocking HTTP client for LLM requests with configured timeouts.
#[must_use]
pub fn build_http_client(config: LlmHttpConfig) -> reqwest::blocking::Client {
    let mut builder = reqwest::blocking::Client::builder();
    if config.timeout_ms > 0 {
        builder = builder.timeout(Duration::from_millis(config.timeout_ms));
    }
    if config.connect_timeout_ms > 0 {
        builder = builder.connect_timeout(Duration::from_millis(config.connect_timeout_ms));
    }

    builder.build().unwrap_or_else(|err| {
        tracing::warn!("Failed to build LLM HTTP client: {err}");
        reqwest::blocking::Client::new()
    })
}

/// Extracts JSON from LLM response, handling markdown code blocks.
#[must_use]
pub fn extract_json_from_response(response: &str) -> &str {
    let trimmed = response.trim();

    // ```json ... ```
    if let Some(start) = trimmed.find("```json") {
        let json_start = start + 7;
        if let Some(end) = trimmed[json_start..].find("```") {
            return trimmed[json_start..json_start + end].trim();
        }
    }

    // ``` ... ``` with an optional language tag
    if let Some(start) = trimmed.find("```") {
        let content_start = start + 3;
        let after_marker = &trimmed[content_start..];
        let json_start = after_marker
            .find(['{', '['])
            .map_or(content_start, |pos| content_start + pos);
        if let Some(end) = trimmed[json_start..].find("```") {
            return trimmed[json_start..json_start + end].trim();
        }
    }

    let object = trimmed.find('{').zip(trimmed.rfind('}'));
    let array = trimmed.find('[').zip(trimmed.rfind(']'));
    match (object, array) {
        (Some((obj_start, obj_end)), Some((arr_start, arr_end)))
            if arr_start < obj_start && arr_end > obj_end =>
        {
            &trimmed[arr_start..=arr_end]
        },
        (Some((start, end)), _) if start < end => &trimmed[start..=end],
        (_, Some((start, end))) if start < end => &trimmed[start..=end],
        _ => trimmed,
    }
}
