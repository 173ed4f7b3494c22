//! Builds the AI helpers from configuration.

use std::sync::Arc;

use crate::config::{LlmConfig, QuotesConfig};
use crate::llm::{AnthropicClient, LlmHttpConfig, api_key_from_env};
use crate::services::AiAssistant;
use crate::web::DuckDuckGoSearch;

/// Builds HTTP configuration from LLM config with environment overrides.
#[must_use]
pub fn build_http_config(llm_config: &LlmConfig) -> LlmHttpConfig {
    LlmHttpConfig::from_config(llm_config).with_env_overrides()
}

/// Builds an Anthropic client from configuration.
///
/// The API key comes from the environment. The HTTP client is built once,
/// from the resolved timeouts.
#[must_use]
pub fn build_anthropic_client(llm_config: &LlmConfig) -> AnthropicClient {
    let mut client = AnthropicClient::with_http_config(build_http_config(llm_config));
    if let Some(ref model) = llm_config.model {
        client = client.with_model(model);
    }
    if let Some(ref endpoint) = llm_config.endpoint {
        client = client.with_endpoint(endpoint);
    }
    if let Some(max_tokens) = llm_config.max_tokens {
        client = client.with_max_tokens(max_tokens);
    }
    client
}

/// Builds the AI assistant, or an unavailable one when no API key is set.
#[must_use]
pub fn build_ai_assistant(config: &QuotesConfig) -> AiAssistant {
    if api_key_from_env().is_none() {
        tracing::debug!("No API key configured, AI features disabled");
        return AiAssistant::unavailable();
    }

    let client = build_anthropic_client(&config.llm);
    tracing::debug!(model = client.model(), "AI features enabled");
    AiAssistant::new(Arc::new(client)).with_web_search(Arc::new(DuckDuckGoSearch::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_anthropic_client_applies_config() {
        let config = LlmConfig {
            model: Some("claude-test".to_string()),
            endpoint: Some("http://localhost:9/v1/".to_string()),
            max_tokens: Some(256),
            timeout_ms: Some(1_000),
            connect_timeout_ms: Some(500),
        };
        let client = build_anthropic_client(&config);
        assert_eq!(client.model(), "claude-test");

        let expected = build_http_config(&config);
        assert_eq!(client.http_config().timeout_ms, expected.timeout_ms);
        assert_eq!(client.http_config().connect_timeout_ms, expected.connect_timeout_ms);
    }

    #[test]
    fn test_http_config_from_llm_config() {
        let config = LlmConfig {
            timeout_ms: Some(1_234),
            connect_timeout_ms: Some(321),
            ..LlmConfig::default()
        };
        let http = LlmHttpConfig::from_config(&config);
        assert_eq!(http.timeout_ms, 1_234);
        assert_eq!(http.connect_timeout_ms, 321);
    }
}
