//! AI helpers bundled behind the user's settings.

use super::{
    AuthorIdentifier, AuthorLookup, CategorizationService, CategorySuggestion, DuplicateDetector,
    ExplanationService, SimilarQuote,
};
use crate::llm::LlmProvider;
use crate::models::{Quote, Settings};
use crate::web::AuthorSearch;
use crate::{Error, Result};
use std::sync::Arc;

/// Front door to every AI feature.
///
/// Without a provider every call returns its fallback, so callers never need
/// to branch on availability except to decide what to show.
#[derive(Clone, Default)]
pub struct AiAssistant {
    llm: Option<Arc<dyn LlmProvider>>,
    web: Option<Arc<dyn AuthorSearch>>,
}

impl AiAssistant {
    /// Creates an assistant backed by `llm`.
    #[must_use]
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self {
            llm: Some(llm),
            web: None,
        }
    }

    /// Creates an assistant with no provider.
    #[must_use]
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Adds the web search fallback for author lookup.
    #[must_use]
    pub fn with_web_search(mut self, web: Arc<dyn AuthorSearch>) -> Self {
        self.web = Some(web);
        self
    }

    /// Returns true when a provider is configured.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.llm.is_some()
    }

    /// Suggests categories, or `None` when disabled or failing.
    pub fn suggest_categories(&self, text: &str, settings: &Settings) -> Option<CategorySuggestion> {
        let llm = self.llm.as_ref().filter(|_| settings.ai.enable_categorization)?;
        CategorizationService::new(Arc::clone(llm))
            .suggest(text, &settings.custom_categories)
            .inspect_err(|e| tracing::warn!(error = %e, "Category suggestion failed"))
            .ok()
    }

    /// Finds stored quotes resembling `text` above the configured threshold.
    pub fn find_duplicates(&self, text: &str, existing: &[Quote], settings: &Settings) -> Vec<SimilarQuote> {
        let Some(llm) = self.llm.as_ref().filter(|_| settings.ai.enable_duplicate_detection) else {
            return Vec::new();
        };
        DuplicateDetector::new(Arc::clone(llm)).find_similar(
            text,
            existing,
            settings.ai.duplicate_threshold_ratio(),
        )
    }

    /// Looks up the author, or `None` when disabled.
    pub fn identify_author(&self, text: &str, settings: &Settings) -> Option<AuthorLookup> {
        let llm = self.llm.as_ref().filter(|_| settings.ai.enable_author_lookup)?;
        let mut identifier = AuthorIdentifier::new(Arc::clone(llm));
        if let Some(web) = &self.web {
            identifier = identifier.with_web_search(Arc::clone(web));
        }
        Some(identifier.identify(text, settings.preferences.enable_web_search_author))
    }

    /// Returns true when explanations can be offered.
    #[must_use]
    pub const fn can_explain(&self, settings: &Settings) -> bool {
        self.llm.is_some() && settings.ai.enable_explanations
    }

    /// Explains a quote.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AiUnavailable`] when no provider is configured or
    /// explanations are turned off, or the provider's error.
    pub fn explain(&self, quote: &Quote, settings: &Settings) -> Result<String> {
        let llm = self
            .llm
            .as_ref()
            .ok_or_else(|| Error::AiUnavailable("set ANTHROPIC_API_KEY to enable explanations".to_string()))?;
        if !settings.ai.enable_explanations {
            return Err(Error::AiUnavailable("explanations are turned off in settings".to_string()));
        }
        ExplanationService::new(Arc::clone(llm)).explain(quote)
    }
}
