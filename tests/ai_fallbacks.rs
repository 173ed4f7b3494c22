//! AI Glue Integration Tests
//!
//! Every AI feature must degrade to its static default:
//! - Author lookup falls back to `Anonymous` with zero confidence
//! - Category suggestion yields nothing
//! - Duplicate detection yields no warnings
//! - Explanation reports why it is unavailable
//!
//! These tests do NOT require actual API keys and use mock providers.

// Integration tests use expect/unwrap for simplicity - panics are acceptable in tests
#![allow(clippy::expect_used, clippy::unwrap_used)]

use quotes::Error;
use quotes::llm::{AnthropicClient, CompletionOptions, LlmProvider};
use quotes::models::{ANONYMOUS, Quote, Settings};
use quotes::services::{AiAssistant, AuthorMethod, ExplanationService, failure_message};
use quotes::web::{AuthorSearch, WebAuthorResult, parse_results};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Provider that always answers with the same text.
struct FixedProvider {
    reply: String,
    calls: AtomicUsize,
}

impl FixedProvider {
    fn new(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.to_string(),
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl LlmProvider for FixedProvider {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn complete(&self, _prompt: &str, _options: &CompletionOptions) -> quotes::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.reply.clone())
    }
}

/// Provider that always fails like an unreachable API.
struct DownProvider;

impl LlmProvider for DownProvider {
    fn name(&self) -> &'static str {
        "down"
    }

    fn complete(&self, _prompt: &str, _options: &CompletionOptions) -> quotes::Result<String> {
        Err(Error::OperationFailed {
            operation: "anthropic_request".to_string(),
            cause: "connection refused".to_string(),
        })
    }
}

/// Web search that returns a fixed attribution.
struct KnownAuthor(&'static str);

impl AuthorSearch for KnownAuthor {
    fn search_author(&self, _quote_text: &str) -> quotes::Result<WebAuthorResult> {
        Ok(WebAuthorResult {
            author: self.0.to_string(),
            confidence: 0.65,
            source: "Found via web search".to_string(),
            found: true,
        })
    }
}

fn existing() -> Vec<Quote> {
    vec![
        Quote::new("The only way to do great work is to love what you do"),
        Quote::new("Simplicity is the ultimate sophistication"),
    ]
}

mod unavailable {
    use super::*;

    #[test]
    fn test_everything_falls_back_without_provider() {
        let ai = AiAssistant::unavailable();
        let settings = Settings::default();

        assert!(!ai.is_available());
        assert!(ai.identify_author("Carpe diem", &settings).is_none());
        assert!(ai.suggest_categories("Carpe diem", &settings).is_none());
        assert!(
            ai.find_duplicates("The only way to do great work is to love it", &existing(), &settings)
                .is_empty()
        );
        assert!(matches!(
            ai.explain(&Quote::new("Carpe diem"), &settings),
            Err(Error::AiUnavailable(_))
        ));
    }

    #[test]
    fn test_anthropic_without_key_errors() {
        let client = AnthropicClient::new()
            .with_api_key("")
            .with_endpoint("http://127.0.0.1:9");
        let result = client.complete("hello", &CompletionOptions::default());
        assert!(result.is_err());
    }
}

mod failing_provider {
    use super::*;

    #[test]
    fn test_author_becomes_anonymous() {
        let ai = AiAssistant::new(Arc::new(DownProvider));
        let lookup = ai
            .identify_author("Carpe diem", &Settings::default())
            .expect("lookup enabled by default");
        assert_eq!(lookup.author, ANONYMOUS);
        assert!(lookup.confidence.abs() < f32::EPSILON);
        assert_eq!(lookup.method, AuthorMethod::Unknown);
        assert!(!lookup.is_known());
    }

    #[test]
    fn test_no_categories_and_no_duplicates() {
        let ai = AiAssistant::new(Arc::new(DownProvider));
        let settings = Settings::default();
        assert!(ai.suggest_categories("Carpe diem", &settings).is_none());
        assert!(
            ai.find_duplicates("The only way to do great work is to love it", &existing(), &settings)
                .is_empty()
        );
    }

    #[test]
    fn test_explanation_message() {
        let service = ExplanationService::new(Arc::new(DownProvider));
        let err = service.explain(&Quote::new("Carpe diem")).unwrap_err();
        let message = failure_message(&err);
        assert!(message.starts_with("Unable to generate explanation:"));
        assert!(message.ends_with("connection refused"));
    }

    #[test]
    fn test_web_search_rescues_author() {
        let ai = AiAssistant::new(Arc::new(DownProvider)).with_web_search(Arc::new(KnownAuthor("Horace")));
        let mut settings = Settings::default();
        settings.preferences.enable_web_search_author = true;

        let lookup = ai.identify_author("Carpe diem", &settings).unwrap();
        assert_eq!(lookup.author, "Horace");
        assert_eq!(lookup.method, AuthorMethod::WebSearch);
    }
}

mod malformed_replies {
    use super::*;

    #[test]
    fn test_prose_reply_is_treated_as_failure() {
        let provider = FixedProvider::new("I think this is probably by Steve Jobs.");
        let ai = AiAssistant::new(provider.clone());
        let settings = Settings::default();

        let lookup = ai.identify_author("Stay hungry", &settings).unwrap();
        assert_eq!(lookup.author, ANONYMOUS);
        assert!(ai.suggest_categories("Stay hungry", &settings).is_none());
        assert!(provider.calls() >= 2);
    }

    #[test]
    fn test_unrelated_quotes_skip_the_model() {
        let provider = FixedProvider::new(r#"{"similarity": 0.99, "reason": "same"}"#);
        let ai = AiAssistant::new(provider.clone());

        let found = ai.find_duplicates("Carpe diem", &existing(), &Settings::default());
        assert!(found.is_empty());
        assert_eq!(provider.calls(), 0);
    }

    #[test]
    fn test_fenced_json_is_accepted() {
        let provider = FixedProvider::new(
            "```json\n{\"suggested\": [\"wisdom\", \"astrology\"], \"confidence\": 0.8, \"reasoning\": \"reflective\"}\n```",
        );
        let ai = AiAssistant::new(provider);

        let suggestion = ai.suggest_categories("Know thyself", &Settings::default()).unwrap();
        assert_eq!(suggestion.categories, vec!["wisdom"]);
    }

    #[test]
    fn test_disabled_features_do_not_call_the_model() {
        let provider = FixedProvider::new(r#"{"author": "Horace", "confidence": 0.9}"#);
        let ai = AiAssistant::new(provider.clone());
        let mut settings = Settings::default();
        settings.ai.enable_author_lookup = false;
        settings.ai.enable_categorization = false;
        settings.ai.enable_duplicate_detection = false;
        settings.ai.enable_explanations = false;

        assert!(ai.identify_author("Carpe diem", &settings).is_none());
        assert!(ai.suggest_categories("Carpe diem", &settings).is_none());
        assert!(ai.find_duplicates("The only way to do great work", &existing(), &settings).is_empty());
        assert!(!ai.can_explain(&settings));
        assert_eq!(provider.calls(), 0);
    }
}

mod web_parsing {
    use super::*;

    #[test]
    fn test_attribution_in_result_title() {
        let html = r#"
            <div class="result">
              <a class="result__a" href="https://example.org/horace">Carpe diem, a line by horace</a>
              <a class="result__snippet">Seize the day, put very little trust in tomorrow.</a>
            </div>
        "#;
        let result = parse_results(html);
        assert!(result.found);
        assert_eq!(result.author, "Horace");
    }

    #[test]
    fn test_no_results_is_not_found() {
        let result = parse_results("<html><body>No results.</body></html>");
        assert!(!result.found);
        assert_eq!(result.author, ANONYMOUS);
    }
}
