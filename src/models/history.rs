//! Daily-quote display history.

use super::QuoteId;
use super::timestamp;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Days a daily quote stays excluded from re-selection.
pub const ROTATION_WINDOW_DAYS: i64 = 21;

/// One daily-quote display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayEntry {
    /// The quote that was shown.
    pub quote_id: QuoteId,
    /// When it was shown.
    #[serde(with = "timestamp")]
    pub shown_at: DateTime<Utc>,
}

/// Ordered record of daily displays, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayHistory {
    entries: Vec<DisplayEntry>,
}

impl DisplayHistory {
    /// Creates an empty history.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Returns the entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[DisplayEntry] {
        &self.entries
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when nothing has been shown.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the most recent entry.
    #[must_use]
    pub fn last(&self) -> Option<&DisplayEntry> {
        self.entries.last()
    }

    /// Appends a display and prunes entries outside the window.
    pub fn record(&mut self, quote_id: QuoteId, shown_at: DateTime<Utc>) {
        self.entries.push(DisplayEntry { quote_id, shown_at });
        self.prune(shown_at.date_naive());
    }

    /// Drops entries shown more than [`ROTATION_WINDOW_DAYS`] days before `today`.
    pub fn prune(&mut self, today: NaiveDate) {
        self.entries
            .retain(|entry| within_window(entry.shown_at.date_naive(), today));
    }

    /// Ids shown within the window ending at `today`.
    #[must_use]
    pub fn recent_ids(&self, today: NaiveDate) -> HashSet<&QuoteId> {
        self.entries
            .iter()
            .filter(|entry| within_window(entry.shown_at.date_naive(), today))
            .map(|entry| &entry.quote_id)
            .collect()
    }

    /// Removes every entry for `quote_id`.
    pub fn remove_quote(&mut self, quote_id: &QuoteId) {
        self.entries.retain(|entry| &entry.quote_id != quote_id);
    }

    /// Keeps only entries whose quote still exists.
    ///
    /// Returns the number of entries dropped.
    pub fn retain_known(&mut self, known: &HashSet<&QuoteId>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| known.contains(&entry.quote_id));
        before - self.entries.len()
    }
}

fn within_window(shown_on: NaiveDate, today: NaiveDate) -> bool {
    (today - shown_on).num_days() <= ROTATION_WINDOW_DAYS
}
