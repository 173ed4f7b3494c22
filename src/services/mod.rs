//! Business logic services.
//!
//! [`QuoteService`] owns the loaded document and persists every change.
//! [`DailyService`] runs the daily rotation on top of it. The AI helpers are
//! stateless wrappers around an [`LlmProvider`](crate::llm::LlmProvider),
//! bundled by [`AiAssistant`].

mod assistant;
mod author;
mod categorization;
mod daily;
mod deduplication;
mod explanation;
mod quotes;

pub use assistant::AiAssistant;
pub use author::{
    AuthorIdentifier, AuthorLookup, AuthorMethod, CONFIDENT_THRESHOLD, WEB_ACCEPT_THRESHOLD,
};
pub use categorization::{
    CategorizationService, CategorySuggestion, FALLBACK_CATEGORY, PREDEFINED_CATEGORIES,
    allowed_categories,
};
pub use daily::{DailyPick, DailyService, pick_daily};
pub use deduplication::{
    DuplicateDetector, MIN_SHARED_WORDS, SimilarQuote, SimilarityLevel, SimilarityScore,
    shares_enough_words,
};
pub use explanation::{ExplanationService, failure_message};
pub use quotes::QuoteService;

#[cfg(test)]
pub(crate) mod testing {
    //! Canned providers for service tests.

    use crate::llm::{CompletionOptions, LlmProvider};
    use crate::web::{AuthorSearch, WebAuthorResult};
    use crate::{Error, Result};
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Replies from a script; the last reply repeats.
    pub struct ScriptedLlm {
        replies: Mutex<VecDeque<Option<String>>>,
        calls: AtomicUsize,
    }

    impl ScriptedLlm {
        pub fn sequence<I, S>(replies: I) -> Self
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            Self {
                replies: Mutex::new(replies.into_iter().map(|r| Some(r.into())).collect()),
                calls: AtomicUsize::new(0),
            }
        }

        pub fn replying(reply: &str) -> Self {
            Self::sequence([reply])
        }

        pub fn failing() -> Self {
            Self {
                replies: Mutex::new(VecDeque::from([None])),
                calls: AtomicUsize::new(0),
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl LlmProvider for ScriptedLlm {
        fn name(&self) -> &'static str {
            "scripted"
        }

        fn complete(&self, _prompt: &str, _options: &CompletionOptions) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut replies = self.replies.lock().unwrap();
            let reply = if replies.len() > 1 {
                replies.pop_front().flatten()
            } else {
                replies.front().cloned().flatten()
            };
            reply.ok_or_else(|| Error::OperationFailed {
                operation: "llm_complete".to_string(),
                cause: "scripted failure".to_string(),
            })
        }
    }

    /// Returns a fixed web result, or fails.
    pub struct StaticSearch {
        result: Option<WebAuthorResult>,
        calls: AtomicUsize,
    }

    impl StaticSearch {
        pub const fn returning(result: WebAuthorResult) -> Self {
            Self {
                result: Some(result),
                calls: AtomicUsize::new(0),
            }
        }

        pub const fn failing() -> Self {
            Self {
                result: None,
                calls: AtomicUsize::new(0),
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl AuthorSearch for StaticSearch {
        fn search_author(&self, _quote_text: &str) -> Result<WebAuthorResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone().ok_or_else(|| Error::OperationFailed {
                operation: "web_search".to_string(),
                cause: "offline".to_string(),
            })
        }
    }
}
