//! Quote explanations.

use crate::{Error, Result};
use crate::llm::{CompletionOptions, LlmProvider};
use crate::models::Quote;
use std::fmt::Write as _;
use std::sync::Arc;

const MAX_TOKENS: u32 = 800;

/// Generates explanations of quotes.
pub struct ExplanationService {
    llm: Arc<dyn LlmProvider>,
}

impl ExplanationService {
    /// Creates an explanation service.
    #[must_use]
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }

    /// Generates a 200 to 400 word explanation.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub fn explain(&self, quote: &Quote) -> Result<String> {
        let response = self.llm.complete(
            &build_prompt(quote),
            &CompletionOptions::with_max_tokens(MAX_TOKENS),
        )?;
        Ok(response.trim().to_string())
    }

}

/// Message shown in place of an explanation that could not be generated.
#[must_use]
pub fn failure_message(error: &Error) -> String {
    format!("Unable to generate explanation: {error}")
}

fn build_prompt(quote: &Quote) -> String {
    let mut prompt = format!(
        "Provide a thoughtful, insightful explanation of this quote.\n\n\
         Quote: \"\"\"{}\"\"\"\nAuthor: {}",
        quote.text, quote.author
    );
    if !quote.source.is_empty() {
        let _ = write!(prompt, "\nSource: \"\"\"{}\"\"\"", quote.source);
    }
    if !quote.personal_note.is_empty() {
        let _ = write!(prompt, "\nContext: \"\"\"{}\"\"\"", quote.personal_note);
    }
    prompt.push_str(
        "

In 200-400 words, provide a deep, meaningful explanation that covers:

1. **Core Meaning**: What is the author really saying? What's the deeper message beyond the literal words?

2. **Context & Background**: Who said this and why? What circumstances or philosophy led to this insight?

3. **Practical Application**: How can someone apply this wisdom to their life? What specific situations does this apply to?

4. **Why It Matters**: Why is this quote significant or worth remembering?

Write in a conversational, accessible style. Be insightful and thought-provoking, not just descriptive. Help the reader gain a deeper understanding and appreciation of the quote's wisdom.

Do NOT just summarize or paraphrase the quote. Provide genuine insight and practical value.",
    );
    prompt
}
