//! Quote types and identifiers.

use super::timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Author recorded when nobody is known.
pub const ANONYMOUS: &str = "Anonymous";

/// Number of id characters shown in listings.
pub const SHORT_ID_LEN: usize = 8;

/// Unique identifier for a quote.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuoteId(String);

impl QuoteId {
    /// Creates a quote ID from an existing string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh random ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the leading characters used in listings.
    #[must_use]
    pub fn short(&self) -> &str {
        self.0
            .char_indices()
            .nth(SHORT_ID_LEN)
            .map_or(self.0.as_str(), |(idx, _)| &self.0[..idx])
    }
}

impl Default for QuoteId {
    fn default() -> Self {
        Self::generate()
    }
}

impl fmt::Display for QuoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for QuoteId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for QuoteId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Metadata recorded by the AI helpers when a quote was added.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiMetadata {
    /// Confidence of the author lookup (0.0 to 1.0).
    pub author_confidence: f32,
    /// Categories the model suggested.
    pub suggested_categories: Vec<String>,
    /// Confidence of the category suggestion (0.0 to 1.0).
    pub category_confidence: f32,
    /// When the duplicate check ran.
    #[serde(with = "timestamp::option")]
    pub duplicate_check_date: Option<DateTime<Utc>>,
}

fn default_author() -> String {
    ANONYMOUS.to_string()
}

fn default_now() -> DateTime<Utc> {
    Utc::now()
}

/// A stored quotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Unique identifier.
    #[serde(default)]
    pub id: QuoteId,
    /// The quotation itself.
    pub text: String,
    /// Who said it.
    #[serde(default = "default_author")]
    pub author: String,
    /// Where it was seen (empty when unknown).
    #[serde(default)]
    pub source: String,
    /// Why it resonated (empty when unset).
    #[serde(default)]
    pub personal_note: String,
    /// Lowercase category tags.
    #[serde(default)]
    pub categories: Vec<String>,
    /// When the quote was added.
    #[serde(default = "default_now", with = "timestamp")]
    pub date_added: DateTime<Utc>,
    /// When the quote was last edited.
    #[serde(default, with = "timestamp::option")]
    pub date_modified: Option<DateTime<Utc>>,
    /// When the quote was last picked as the daily quote.
    #[serde(default, with = "timestamp::option")]
    pub last_shown: Option<DateTime<Utc>>,
    /// How often the quote was picked as the daily quote.
    #[serde(default)]
    pub times_shown: u32,
    /// AI bookkeeping.
    #[serde(default)]
    pub ai_metadata: AiMetadata,
}

impl Quote {
    /// Creates a quote with defaults for everything but the text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: QuoteId::generate(),
            text: text.into(),
            author: default_author(),
            source: String::new(),
            personal_note: String::new(),
            categories: Vec::new(),
            date_added: Utc::now(),
            date_modified: None,
            last_shown: None,
            times_shown: 0,
            ai_metadata: AiMetadata::default(),
        }
    }

    /// Records that the quote was displayed as the daily quote.
    pub fn mark_shown(&mut self, at: DateTime<Utc>) {
        self.last_shown = Some(at);
        self.times_shown = self.times_shown.saturating_add(1);
    }

    /// Returns the short id used in listings.
    #[must_use]
    pub fn short_id(&self) -> &str {
        self.id.short()
    }

    /// Returns true when any category equals `category`, ignoring case.
    #[must_use]
    pub fn has_category(&self, category: &str) -> bool {
        let wanted = category.trim().to_lowercase();
        self.categories.iter().any(|c| c.to_lowercase() == wanted)
    }

    /// Concatenates every searchable field.
    #[must_use]
    pub fn searchable_text(&self) -> String {
        [
            self.text.as_str(),
            self.author.as_str(),
            self.source.as_str(),
            self.personal_note.as_str(),
            &self.categories.join(" "),
        ]
        .join(" ")
    }
}

/// Input for creating a quote.
#[derive(Debug, Clone, Default)]
pub struct NewQuote {
    /// The quotation text.
    pub text: String,
    /// Author, if known.
    pub author: Option<String>,
    /// Source, if known.
    pub source: Option<String>,
    /// Personal note.
    pub personal_note: Option<String>,
    /// Category tags.
    pub categories: Vec<String>,
    /// AI bookkeeping gathered while adding.
    pub ai_metadata: AiMetadata,
}

impl NewQuote {
    /// Creates a request with only the text set.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Sets the author.
    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Sets the source.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the personal note.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.personal_note = Some(note.into());
        self
    }

    /// Sets the categories.
    #[must_use]
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }
}

/// Normalizes category tags: trims, lowercases, drops blanks and duplicates.
///
/// Order of first appearance is kept.
#[must_use]
pub fn normalize_categories<I, S>(categories: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for raw in categories {
        let tag = raw.as_ref().trim().to_lowercase();
        if !tag.is_empty() && !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}

/// Splits a comma-separated category list.
#[must_use]
pub fn parse_category_list(raw: &str) -> Vec<String> {
    normalize_categories(raw.split(','))
}

/// Strips control and zero-width characters and normalizes line endings.
///
/// Newlines and tabs survive so multi-line quotes keep their shape.
#[must_use]
pub fn sanitize_text(raw: &str) -> String {
    raw.replace("\r\n", "\n")
        .replace('\r', "\n")
        .chars()
        .filter(|c| {
            matches!(c, '\n' | '\t')
                || !(c.is_control() || matches!(c, '\u{200B}'..='\u{200D}' | '\u{FEFF}'))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_id() {
        let id = QuoteId::new("a1b2c3d4-e5f6-0000-0000-000000000000");
        assert_eq!(id.short(), "a1b2c3d4");

        let tiny = QuoteId::new("abc");
        assert_eq!(tiny.short(), "abc");
    }

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(QuoteId::generate(), QuoteId::generate());
    }

    #[test]
    fn test_mark_shown() {
        let mut quote = Quote::new("Less is more.");
        let now = Utc::now();
        quote.mark_shown(now);
        quote.mark_shown(now);
        assert_eq!(quote.times_shown, 2);
        assert_eq!(quote.last_shown, Some(now));
    }

    #[test]
    fn test_has_category_ignores_case() {
        let mut quote = Quote::new("Act.");
        quote.categories = vec!["action".to_string()];
        assert!(quote.has_category("Action"));
        assert!(!quote.has_category("act"));
    }

    #[test]
    fn test_deserialize_minimal_quote_uses_defaults() {
        let quote: Quote = serde_json::from_str(r#"{"text": "Hello"}"#).unwrap();
        assert_eq!(quote.author, ANONYMOUS);
        assert!(!quote.id.as_str().is_empty());
        assert!(quote.categories.is_empty());
        assert_eq!(quote.times_shown, 0);
    }

    #[test]
    fn test_deserialize_naive_timestamps() {
        let json = r#"{
            "id": "legacy",
            "text": "Old quote",
            "author": "Someone",
            "date_added": "2025-10-11T08:00:00.123456",
            "date_modified": null,
            "last_shown": "garbage",
            "ai_metadata": {"author_confidence": 0.9}
        }"#;
        let quote: Quote = serde_json::from_str(json).unwrap();
        assert_eq!(quote.date_added.to_rfc3339(), "2025-10-11T08:00:00.123456+00:00");
        assert!(quote.last_shown.is_none());
        assert!((quote.ai_metadata.author_confidence - 0.9).abs() < f32::EPSILON);
    }

    #[test]
    fn test_normalize_categories() {
        let tags = normalize_categories(["  Wisdom", "wisdom", "", "Growth "]);
        assert_eq!(tags, vec!["wisdom", "growth"]);
    }

    #[test]
    fn test_parse_category_list() {
        assert_eq!(parse_category_list("work, Life,,work"), vec!["work", "life"]);
        assert!(parse_category_list("").is_empty());
    }

    #[test]
    fn test_sanitize_text() {
        assert_eq!(sanitize_text("a\r\nb\u{200B}c\u{7}"), "a\nbc");
        assert_eq!(sanitize_text("tab\there"), "tab\there");
    }

    #[test]
    fn test_searchable_text_covers_all_fields() {
        let mut quote = Quote::new("text");
        quote.author = "author".to_string();
        quote.source = "source".to_string();
        quote.personal_note = "note".to_string();
        quote.categories = vec!["cat".to_string()];
        let haystack = quote.searchable_text();
        for needle in ["text", "author", "source", "note", "cat"] {
            assert!(haystack.contains(needle));
        }
    }
}
