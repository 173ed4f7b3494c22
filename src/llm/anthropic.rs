//! Anthropic Claude client.

use super::{
    CompletionOptions, DEFAULT_MAX_TOKENS, LlmHttpConfig, LlmProvider, api_key_from_env,
    build_http_client, is_api_key_usable,
};
use crate::{Error, Result};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Anthropic Claude LLM client.
pub struct AnthropicClient {
    /// API key.
    api_key: Option<SecretString>,
    /// API endpoint.
    endpoint: String,
    /// Model to use.
    model: String,
    /// Token budget when the request does not set one.
    max_tokens: u32,
    /// Timeouts the HTTP client was built with.
    http_config: LlmHttpConfig,
    /// HTTP client.
    client: reqwest::blocking::Client,
}

impl AnthropicClient {
    /// Default API endpoint.
    pub const DEFAULT_ENDPOINT: &'static str = "https://api.anthropic.com/v1";

    /// Default model.
    pub const DEFAULT_MODEL: &'static str = "claude-sonnet-4-20250514";

    /// Creates a new Anthropic client with timeouts from the environment.
    #[must_use]
    pub fn new() -> Self {
        Self::with_http_config(LlmHttpConfig::from_env())
    }

    /// Creates a new Anthropic client whose HTTP client uses `http_config`.
    #[must_use]
    pub fn with_http_config(http_config: LlmHttpConfig) -> Self {
        Self {
            api_key: api_key_from_env(),
            endpoint: Self::DEFAULT_ENDPOINT.to_string(),
            model: Self::DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            http_config,
            client: build_http_client(http_config),
        }
    }

    /// Sets the API key.
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::from(key.into()));
        self
    }

    /// Sets the API endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the default token budget.
    #[must_use]
    pub const fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Returns the configured model.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Returns the timeouts the HTTP client was built with.
    #[must_use]
    pub const fn http_config(&self) -> LlmHttpConfig {
        self.http_config
    }

    /// Returns true when a usable API key is configured.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|k| is_api_key_usable(Some(k.expose_secret())))
    }

    fn api_key(&self) -> Result<&SecretString> {
        self.api_key
            .as_ref()
            .filter(|k| is_api_key_usable(Some(k.expose_secret())))
            .ok_or_else(|| Error::AiUnavailable("ANTHROPIC_API_KEY not set".to_string()))
    }

    fn build_request(&self, prompt: &str, options: &CompletionOptions) -> MessagesRequest {
        MessagesRequest {
            model: self.model.clone(),
            max_tokens: options.max_tokens.unwrap_or(self.max_tokens),
            system: options.system.clone(),
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        }
    }

    /// Makes a request to the Anthropic API.
    fn request(&self, request: &MessagesRequest) -> Result<String> {
        let api_key = self.api_key()?;

        tracing::info!(
            provider = "anthropic",
            model = %self.model,
            max_tokens = request.max_tokens,
            "Making LLM request"
        );

        let response = self
            .client
            .post(format!("{}/messages", self.endpoint))
            .header("x-api-key", api_key.expose_secret())
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(request)
            .send()
            .map_err(|e| {
                let error_kind = if e.is_timeout() {
                    "timeout"
                } else if e.is_connect() {
                    "connect"
                } else if e.is_request() {
                    "request"
                } else {
                    "unknown"
                };
                tracing::error!(
                    provider = "anthropic",
                    model = %self.model,
                    error = %e,
                    error_kind = error_kind,
                    "LLM request failed"
                );
                Error::OperationFailed {
                    operation: "anthropic_request".to_string(),
                    cause: format!("{error_kind} error: {e}"),
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            tracing::error!(
                provider = "anthropic",
                model = %self.model,
                status = %status,
                body = %body,
                "LLM API returned error status"
            );
            return Err(Error::OperationFailed {
                operation: "anthropic_request".to_string(),
                cause: format!("API returned status: {status} - {body}"),
            });
        }

        let response: MessagesResponse = response.json().map_err(|e| {
            tracing::error!(
                provider = "anthropic",
                model = %self.model,
                error = %e,
                "Failed to parse LLM response"
            );
            Error::OperationFailed {
                operation: "anthropic_response".to_string(),
                cause: e.to_string(),
            }
        })?;

        response.first_text().ok_or_else(|| Error::OperationFailed {
            operation: "anthropic_response".to_string(),
            cause: "No text content in response".to_string(),
        })
    }
}

impl Default for AnthropicClient {
    fn default() -> Self {
        Self::new()
    }
}

impl LlmProvider for AnthropicClient {
    fn name(&self) -> &'static str {
        "anthropic"
    }

    fn complete(&self, prompt: &str, options: &CompletionOptions) -> Result<String> {
        let request = self.build_request(prompt, options);
        self.request(&request)
    }
}

/// Request to the Messages API.
#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<Message>,
}

/// A message in the conversation.
#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

/// Response from the Messages API.
#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

impl MessagesResponse {
    fn first_text(self) -> Option<String> {
        self.content
            .into_iter()
            .find(|block| block.block_type == "text")
            .map(|block| block.text)
    }
}

/// A content block in the response.
#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    #[serde(default)]
    text: String,
}
