//! The on-disk store document.

use super::{DisplayHistory, Quote, QuoteId, Settings, timestamp};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Current document schema version.
pub const DOCUMENT_VERSION: &str = "1.0";

/// Summary numbers written with every save.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreStats {
    /// Number of stored quotes.
    pub total_quotes: usize,
    /// Quote picked most often as the daily quote.
    pub most_shown_quote_id: Option<QuoteId>,
}

impl StoreStats {
    /// Computes stats for a set of quotes.
    #[must_use]
    pub fn compute(quotes: &[Quote]) -> Self {
        let most_shown_quote_id = quotes
            .iter()
            .filter(|q| q.times_shown > 0)
            .max_by_key(|q| q.times_shown)
            .map(|q| q.id.clone());
        Self {
            total_quotes: quotes.len(),
            most_shown_quote_id,
        }
    }
}

/// Everything persisted in `quotes.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreDocument {
    /// Schema version.
    pub version: String,
    /// All quotes in insertion order.
    pub quotes: Vec<Quote>,
    /// Daily rotation history.
    pub display_history: DisplayHistory,
    /// When the daily quote was last picked.
    #[serde(with = "timestamp::option")]
    pub last_daily_display: Option<DateTime<Utc>>,
    /// User settings.
    pub settings: Settings,
    /// Derived statistics.
    pub stats: StoreStats,
}

impl Default for StoreDocument {
    fn default() -> Self {
        Self {
            version: DOCUMENT_VERSION.to_string(),
            quotes: Vec::new(),
            display_history: DisplayHistory::new(),
            last_daily_display: None,
            settings: Settings::default(),
            stats: StoreStats::default(),
        }
    }
}

impl StoreDocument {
    /// Finds a quote by exact id.
    #[must_use]
    pub fn find(&self, id: &QuoteId) -> Option<&Quote> {
        self.quotes.iter().find(|q| &q.id == id)
    }

    /// Finds a quote by exact id, mutably.
    pub fn find_mut(&mut self, id: &QuoteId) -> Option<&mut Quote> {
        self.quotes.iter_mut().find(|q| &q.id == id)
    }

    /// Recomputes [`StoreStats`] from the quotes.
    pub fn refresh_stats(&mut self) {
        self.stats = StoreStats::compute(&self.quotes);
    }

    /// Drops history entries whose quote no longer exists.
    ///
    /// Returns the number of entries dropped.
    pub fn drop_dangling_history(&mut self) -> usize {
        let known: HashSet<&QuoteId> = self.quotes.iter().map(|q| &q.id).collect();
        self.display_history.retain_known(&known)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_object_is_default_document() {
        let doc: StoreDocument = serde_json::from_str("{}").unwrap();
        assert_eq!(doc, StoreDocument::default());
    }

    #[test]
    fn test_refresh_stats() {
        let mut doc = StoreDocument::default();
        let mut a = Quote::new("a");
        a.times_shown = 3;
        let b = Quote::new("b");
        let a_id = a.id.clone();
        doc.quotes = vec![a, b];

        doc.refresh_stats();
        assert_eq!(doc.stats.total_quotes, 2);
        assert_eq!(doc.stats.most_shown_quote_id, Some(a_id));
    }

    #[test]
    fn test_refresh_stats_nothing_shown() {
        let mut doc = StoreDocument::default();
        doc.quotes.push(Quote::new("a"));
        doc.refresh_stats();
        assert!(doc.stats.most_shown_quote_id.is_none());
    }

    #[test]
    fn test_drop_dangling_history() {
        let mut doc = StoreDocument::default();
        let quote = Quote::new("kept");
        doc.display_history.record(quote.id.clone(), Utc::now());
        doc.display_history.record(QuoteId::new("gone"), Utc::now());
        doc.quotes.push(quote);

        assert_eq!(doc.drop_dangling_history(), 1);
        assert_eq!(doc.display_history.len(), 1);
    }
}
