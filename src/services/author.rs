//! Author identification.
//!
//! The model is asked first. When it is unsure, the optional web search is
//! consulted before settling on the model's best guess or `Anonymous`.

use crate::Result;
use crate::llm::{CompletionOptions, LlmProvider, complete_json};
use crate::models::ANONYMOUS;
use crate::web::AuthorSearch;
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;

/// Model confidence accepted without a web search.
pub const CONFIDENT_THRESHOLD: f32 = 0.7;

/// Web confidence needed to override the model.
pub const WEB_ACCEPT_THRESHOLD: f32 = 0.5;

const MAX_TOKENS: u32 = 500;

/// Where an attribution came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorMethod {
    /// The language model.
    Model,
    /// The web search fallback.
    WebSearch,
    /// Nobody could tell.
    Unknown,
}

impl fmt::Display for AuthorMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Model => "model",
            Self::WebSearch => "web search",
            Self::Unknown => "unknown",
        })
    }
}

/// Outcome of an author lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorLookup {
    /// Attributed author, or `Anonymous`.
    pub author: String,
    /// Confidence (0.0 to 1.0).
    pub confidence: f32,
    /// Work or URL the attribution came from, if any.
    pub source: String,
    /// How the attribution was made.
    pub method: AuthorMethod,
}

impl AuthorLookup {
    /// The "nobody knows" result.
    #[must_use]
    pub fn unknown() -> Self {
        Self {
            author: ANONYMOUS.to_string(),
            confidence: 0.0,
            source: String::new(),
            method: AuthorMethod::Unknown,
        }
    }

    /// Returns true when a named author was found.
    #[must_use]
    pub fn is_known(&self) -> bool {
        self.author != ANONYMOUS && self.confidence > 0.0
    }
}

#[derive(Debug, Deserialize)]
struct AuthorResponse {
    author: String,
    confidence: f32,
    #[serde(default)]
    source: String,
}

/// Identifies who said a quote.
pub struct AuthorIdentifier {
    llm: Arc<dyn LlmProvider>,
    web: Option<Arc<dyn AuthorSearch>>,
}

impl AuthorIdentifier {
    /// Creates an identifier without web search.
    #[must_use]
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm, web: None }
    }

    /// Adds the web search fallback.
    #[must_use]
    pub fn with_web_search(mut self, web: Arc<dyn AuthorSearch>) -> Self {
        self.web = Some(web);
        self
    }

    /// Asks the model only.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the reply is malformed.
    pub fn ask_model(&self, text: &str) -> Result<AuthorLookup> {
        let response: AuthorResponse = complete_json(
            self.llm.as_ref(),
            &build_prompt(text),
            &CompletionOptions::with_max_tokens(MAX_TOKENS),
        )?;
        let author = response.author.trim();
        Ok(AuthorLookup {
            author: if author.is_empty() { ANONYMOUS } else { author }.to_string(),
            confidence: response.confidence.clamp(0.0, 1.0),
            source: response.source.trim().to_string(),
            method: AuthorMethod::Model,
        })
    }

    /// Runs the full lookup. Never fails.
    ///
    /// `use_web` gates the web fallback in addition to whether one is
    /// configured.
    pub fn identify(&self, text: &str, use_web: bool) -> AuthorLookup {
        let guess = self.ask_model(text).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Author identification failed");
            AuthorLookup {
                method: AuthorMethod::Model,
                ..AuthorLookup::unknown()
            }
        });

        if guess.confidence >= CONFIDENT_THRESHOLD {
            tracing::info!(author = %guess.author, confidence = guess.confidence, "Author identified");
            return guess;
        }

        if let Some(web) = self.web.as_ref().filter(|_| use_web) {
            match web.search_author(text) {
                Ok(found) if found.found && found.confidence >= WEB_ACCEPT_THRESHOLD => {
                    tracing::info!(author = %found.author, "Author found on the web");
                    return AuthorLookup {
                        author: found.author,
                        confidence: found.confidence,
                        source: found.source,
                        method: AuthorMethod::WebSearch,
                    };
                },
                Ok(_) => tracing::debug!("Web search found no attribution"),
                Err(e) => tracing::warn!(error = %e, "Web search failed"),
            }
        }

        if guess.confidence > 0.0 {
            guess
        } else {
            AuthorLookup::unknown()
        }
    }
}

fn build_prompt(text: &str) -> String {
    format!(
        r#"Who said this quote? If you're confident (>70% sure), provide the author's name.
If you're unsure or don't know, respond with "Anonymous".

Quote: """{text}"""

Respond with ONLY a JSON object in this exact format:
{{
    "author": "Author Name or Anonymous",
    "confidence": 0.95,
    "source": "Where it was said (if known), or empty string"
}}

DO NOT include any text outside the JSON object.
Be honest about your confidence level - if you're not sure, use "Anonymous" and a low confidence score."#
    )
}
