//! # Quotes Manager
//!
//! A personal command-line tool for saving, browsing and annotating quotations.
//!
//! Quotes live in a single JSON document under the user's data directory. The
//! document is read in full, mutated in memory and written back wholesale on
//! every change. Optional language-model features (author lookup, duplicate
//! detection, category suggestions and explanations) sit on top of the local
//! CRUD flow and always degrade to static defaults when the API is missing or
//! misbehaves.
//!
//! ## Example
//!
//! ```rust,ignore
//! use quotes::storage::JsonFileStore;
//! use quotes::services::QuoteService;
//! use quotes::models::NewQuote;
//!
//! let mut service = QuoteService::open(JsonFileStore::new(data_dir))?;
//! let quote = service.add(NewQuote::new("Stay hungry, stay foolish."))?;
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

pub mod cli;
pub mod config;
pub mod llm;
pub mod models;
pub mod observability;
pub mod rendering;
pub mod services;
pub mod storage;
pub mod web;

pub use config::QuotesConfig;
pub use llm::LlmProvider;
pub use models::{AiMetadata, DisplayHistory, NewQuote, Quote, QuoteFilter, QuoteId, Settings};
pub use services::{AiAssistant, DailyService, QuoteService};
pub use storage::{JsonFileStore, MemoryStore, QuoteStore};

/// Error type for quotes operations.
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `InvalidInput` | Empty quote text, unknown theme name, malformed flag values |
/// | `QuoteNotFound` | No quote matches an id or id prefix |
/// | `AmbiguousId` | An id prefix matches more than one quote |
/// | `CorruptStore` | The JSON store exists but cannot be read or parsed |
/// | `OperationFailed` | I/O, serialization or HTTP failures |
/// | `AiUnavailable` | An AI feature is requested without a usable API key |
/// | `Cancelled` | The user backed out of an interactive flow |
#[derive(Debug, ThisError)]
pub enum Error {
    /// Invalid input was provided.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// No quote matches the given id or prefix.
    #[error("no quote found with ID '{0}'")]
    QuoteNotFound(String),

    /// An id prefix matched several quotes.
    #[error("multiple quotes match '{prefix}': {}", .matches.join(", "))]
    AmbiguousId {
        /// The prefix that was looked up.
        prefix: String,
        /// Short ids of every matching quote.
        matches: Vec<String>,
    },

    /// The store file exists but could not be loaded.
    ///
    /// The file is left untouched so the user can repair or move it.
    #[error("quote store at {path} is unreadable: {cause}")]
    CorruptStore {
        /// Path of the store file.
        path: String,
        /// The underlying cause.
        cause: String,
    },

    /// An operation failed.
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },

    /// An AI feature was requested but the API is not configured.
    #[error("AI unavailable: {0}")]
    AiUnavailable(String),

    /// The user cancelled an interactive flow.
    #[error("cancelled")]
    Cancelled,
}

/// Result type alias for quotes operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidInput("quote text cannot be empty".to_string());
        assert_eq!(err.to_string(), "invalid input: quote text cannot be empty");

        let err = Error::OperationFailed {
            operation: "write_store".to_string(),
            cause: "disk full".to_string(),
        };
        assert_eq!(err.to_string(), "operation 'write_store' failed: disk full");

        let err = Error::QuoteNotFound("abc".to_string());
        assert_eq!(err.to_string(), "no quote found with ID 'abc'");
    }

    #[test]
    fn test_ambiguous_id_lists_matches() {
        let err = Error::AmbiguousId {
            prefix: "a1".to_string(),
            matches: vec!["a1b2c3d4".to_string(), "a1ffee00".to_string()],
        };
        let display = err.to_string();
        assert!(display.contains("'a1'"));
        assert!(display.contains("a1b2c3d4, a1ffee00"));
    }
}
