//! Duplicate detection.
//!
//! Candidate quotes are pre-filtered by shared vocabulary so only plausible
//! matches cost a model call. Each surviving pair is scored by the model.

use crate::Result;
use crate::llm::{CompletionOptions, LlmProvider, complete_json};
use crate::models::Quote;
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Distinct shared words required before a pair is scored.
pub const MIN_SHARED_WORDS: usize = 3;

const MAX_TOKENS: u32 = 300;

/// Model verdict for one pair of quotes.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityScore {
    /// Similarity (0.0 to 1.0).
    pub similarity: f32,
    /// Why the model thinks so.
    pub reason: String,
}

/// An existing quote that resembles the new one.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarQuote {
    /// The stored quote.
    pub quote: Quote,
    /// Similarity (0.0 to 1.0).
    pub similarity: f32,
    /// Why the model thinks so.
    pub reason: String,
}

impl SimilarQuote {
    /// Human-readable band for the score.
    #[must_use]
    pub fn level(&self) -> SimilarityLevel {
        SimilarityLevel::from_score(self.similarity)
    }
}

/// Similarity bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimilarityLevel {
    /// 0.95 and above.
    ExactMatch,
    /// 0.85 and above.
    High,
    /// 0.70 and above.
    Medium,
    /// Below 0.70.
    Different,
}

impl SimilarityLevel {
    /// Bands a similarity score.
    #[must_use]
    pub fn from_score(similarity: f32) -> Self {
        if similarity >= 0.95 {
            Self::ExactMatch
        } else if similarity >= 0.85 {
            Self::High
        } else if similarity >= 0.70 {
            Self::Medium
        } else {
            Self::Different
        }
    }

    /// Label shown to the user.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ExactMatch => "exact match",
            Self::High => "high similarity",
            Self::Medium => "medium similarity",
            Self::Different => "different",
        }
    }
}

impl fmt::Display for SimilarityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Deserialize)]
struct SimilarityResponse {
    similarity: f32,
    #[serde(default)]
    reason: String,
}

/// Returns true when both texts share at least [`MIN_SHARED_WORDS`] distinct
/// lowercase words.
#[must_use]
pub fn shares_enough_words(a: &str, b: &str) -> bool {
    let a_lower = a.to_lowercase();
    let b_lower = b.to_lowercase();
    let left: HashSet<&str> = a_lower.split_whitespace().collect();
    let right: HashSet<&str> = b_lower.split_whitespace().collect();
    left.intersection(&right).count() >= MIN_SHARED_WORDS
}

/// Finds existing quotes that resemble a new one.
pub struct DuplicateDetector {
    llm: Arc<dyn LlmProvider>,
}

impl DuplicateDetector {
    /// Creates a detector.
    #[must_use]
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }

    /// Scores one pair.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the reply is malformed.
    pub fn check_similarity(&self, new_text: &str, existing_text: &str) -> Result<SimilarityScore> {
        let prompt = build_prompt(new_text, existing_text);
        let response: SimilarityResponse = complete_json(
            self.llm.as_ref(),
            &prompt,
            &CompletionOptions::with_max_tokens(MAX_TOKENS),
        )?;
        Ok(SimilarityScore {
            similarity: response.similarity.clamp(0.0, 1.0),
            reason: response.reason,
        })
    }

    /// Returns quotes scoring at least `threshold`, most similar first.
    ///
    /// A failed check skips that candidate.
    pub fn find_similar(&self, new_text: &str, existing: &[Quote], threshold: f32) -> Vec<SimilarQuote> {
        let mut similar: Vec<SimilarQuote> = existing
            .iter()
            .filter(|quote| shares_enough_words(new_text, &quote.text))
            .filter_map(|quote| match self.check_similarity(new_text, &quote.text) {
                Ok(score) => Some((quote, score)),
                Err(e) => {
                    tracing::warn!(id = %quote.id, error = %e, "Skipping similarity check");
                    None
                },
            })
            .filter(|(_, score)| score.similarity >= threshold)
            .map(|(quote, score)| SimilarQuote {
                quote: quote.clone(),
                similarity: score.similarity,
                reason: score.reason,
            })
            .collect();

        similar.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
        similar
    }
}

fn build_prompt(first: &str, second: &str) -> String {
    format!(
        r#"Compare these two quotes for semantic similarity.
Consider:
- Same core message/meaning (high weight)
- Similar wording or phrasing
- Minor differences like punctuation, capitalization don't matter much

Quote 1: """{first}"""
Quote 2: """{second}"""

Respond with ONLY a JSON object in this exact format:
{{
    "similarity": 0.85,
    "reason": "brief explanation of similarity or difference"
}}

Similarity scale:
- 0.95-1.0: Essentially identical (maybe minor punctuation differences)
- 0.85-0.94: High similarity (same core message, slightly different wording)
- 0.70-0.84: Medium similarity (related themes but different expression)
- 0.0-0.69: Different quotes

DO NOT include any text outside the JSON object."#
    )
}
