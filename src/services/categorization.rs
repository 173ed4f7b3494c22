//! Category suggestions.

use crate::Result;
use crate::llm::{CompletionOptions, LlmProvider, complete_json};
use serde::Deserialize;
use std::sync::Arc;

/// Categories offered to every user.
pub const PREDEFINED_CATEGORIES: &[&str] = &[
    "inspiration",
    "wisdom",
    "creativity",
    "leadership",
    "relationships",
    "growth",
    "resilience",
    "humor",
    "reflection",
    "action",
];

/// Used when the model suggests nothing usable.
pub const FALLBACK_CATEGORY: &str = "inspiration";

const MAX_SUGGESTIONS: usize = 4;
const MAX_TOKENS: u32 = 500;

/// A category suggestion.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CategorySuggestion {
    /// Suggested categories, all from the allowed list.
    pub categories: Vec<String>,
    /// Overall confidence (0.0 to 1.0).
    pub confidence: f32,
    /// Short rationale from the model.
    pub reasoning: String,
}

#[derive(Debug, Deserialize)]
struct SuggestionResponse {
    suggested: Vec<String>,
    confidence: f32,
    #[serde(default)]
    reasoning: String,
}

/// Suggests categories for a quote.
pub struct CategorizationService {
    llm: Arc<dyn LlmProvider>,
}

impl CategorizationService {
    /// Creates a categorization service.
    #[must_use]
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }

    /// Asks the model for 2 to 4 categories.
    ///
    /// Suggestions outside the predefined and `custom` lists are dropped. If
    /// nothing survives, [`FALLBACK_CATEGORY`] is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the reply is malformed.
    pub fn suggest(&self, text: &str, custom: &[String]) -> Result<CategorySuggestion> {
        let allowed = allowed_categories(custom);
        let prompt = build_prompt(text, &allowed);
        let response: SuggestionResponse = complete_json(
            self.llm.as_ref(),
            &prompt,
            &CompletionOptions::with_max_tokens(MAX_TOKENS),
        )?;

        let mut categories = filter_suggestions(&response.suggested, &allowed);
        if categories.is_empty() {
            categories.push(FALLBACK_CATEGORY.to_string());
        }

        Ok(CategorySuggestion {
            categories,
            confidence: response.confidence.clamp(0.0, 1.0),
            reasoning: response.reasoning,
        })
    }
}

/// Predefined categories followed by new custom ones.
#[must_use]
pub fn allowed_categories(custom: &[String]) -> Vec<String> {
    let mut allowed: Vec<String> = PREDEFINED_CATEGORIES.iter().map(ToString::to_string).collect();
    for category in custom {
        let tag = category.trim().to_lowercase();
        if !tag.is_empty() && !allowed.contains(&tag) {
            allowed.push(tag);
        }
    }
    allowed
}

fn filter_suggestions(suggested: &[String], allowed: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for raw in suggested {
        let tag = raw.trim().to_lowercase();
        if allowed.contains(&tag) && !out.contains(&tag) {
            out.push(tag);
        }
        if out.len() == MAX_SUGGESTIONS {
            break;
        }
    }
    out
}

fn build_prompt(text: &str, allowed: &[String]) -> String {
    format!(
        r#"Analyze this quote and suggest 2-4 categories from the following list:

Categories: {categories}

Quote: "{text}"

Respond with ONLY a JSON object in this exact format:
{{
    "suggested": ["category1", "category2"],
    "confidence": 0.85,
    "reasoning": "brief explanation of why these categories fit"
}}

DO NOT include any text outside the JSON object.
ONLY use categories from the list provided above.
Suggest between 2 and 4 categories that best fit the quote's themes and message."#,
        categories = allowed.join(", "),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::ScriptedLlm;

    fn service(reply: &str) -> CategorizationService {
        CategorizationService::new(Arc::new(ScriptedLlm::replying(reply)))
    }

    #[test]
    fn test_filters_unknown_and_caps() {
        let svc = service(
            r#"{"suggested": ["Wisdom", "cooking", "growth", "action", "humor", "reflection"],
                "confidence": 0.9, "reasoning": "fits"}"#,
        );
        let suggestion = svc.suggest("Know thyself", &[]).unwrap();
        assert_eq!(suggestion.categories, vec!["wisdom", "growth", "action", "humor"]);
        assert!((suggestion.confidence - 0.9).abs() < f32::EPSILON);
        assert_eq!(suggestion.reasoning, "fits");
    }

    #[test]
    fn test_custom_categories_allowed() {
        let svc = service(r#"{"suggested": ["stoicism"], "confidence": 0.7}"#);
        let suggestion = svc
            .suggest("Amor fati", &["Stoicism".to_string()])
            .unwrap();
        assert_eq!(suggestion.categories, vec!["stoicism"]);
    }

    #[test]
    fn test_empty_after_filter_falls_back() {
        let svc = service("```json\n{\"suggested\": [\"cooking\"], \"confidence\": 0.4}\n```");
        let suggestion = svc.suggest("Recipe", &[]).unwrap();
        assert_eq!(suggestion.categories, vec![FALLBACK_CATEGORY]);
    }

    #[test]
    fn test_malformed_reply_is_error() {
        let svc = service("I think it's about wisdom.");
        assert!(svc.suggest("Know thyself", &[]).is_err());
    }

    #[test]
    fn test_prompt_lists_custom() {
        let allowed = allowed_categories(&["stoicism".to_string(), "wisdom".to_string()]);
        assert_eq!(allowed.len(), PREDEFINED_CATEGORIES.len() + 1);
        let prompt = build_prompt("text", &allowed);
        assert!(prompt.contains("action, stoicism"));
    }
}
