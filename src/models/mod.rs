//! Data models for the quotes manager.
//!
//! This module contains all the core data structures used throughout the system.

mod document;
mod history;
mod quote;
mod search;
mod settings;
pub mod timestamp;

pub use document::{DOCUMENT_VERSION, StoreDocument, StoreStats};
pub use history::{DisplayEntry, DisplayHistory, ROTATION_WINDOW_DAYS};
pub use quote::{
    ANONYMOUS, AiMetadata, NewQuote, Quote, QuoteId, SHORT_ID_LEN, normalize_categories,
    parse_category_list, sanitize_text,
};
pub use search::{QuoteFilter, matches_keyword};
pub use settings::{
    AiSettings, DEFAULT_DUPLICATE_THRESHOLD, DisplayStyle, Preferences, SETTINGS_VERSION,
    Settings, ThemeName,
};
