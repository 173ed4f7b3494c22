//! Daily quote rotation.
//!
//! One quote per UTC day, chosen at random from the quotes that were not
//! shown in the trailing [`ROTATION_WINDOW_DAYS`] days. When every quote was
//! shown inside the window the whole collection is eligible again.

use crate::Result;
use crate::models::{Quote, QuoteId, ROTATION_WINDOW_DAYS, StoreDocument};
use crate::services::QuoteService;
use crate::storage::QuoteStore;
use chrono::{DateTime, Utc};
use rand::Rng;
use std::collections::HashSet;

/// What the rotation decided.
#[derive(Debug, Clone, PartialEq)]
pub enum DailyPick {
    /// The collection is empty.
    Empty,
    /// Today's quote was already chosen; nothing changed.
    AlreadyShown(Quote),
    /// A new quote was chosen and recorded.
    Fresh(Quote),
}

impl DailyPick {
    /// The chosen quote, if any.
    #[must_use]
    pub fn into_quote(self) -> Option<Quote> {
        match self {
            Self::Empty => None,
            Self::AlreadyShown(quote) | Self::Fresh(quote) => Some(quote),
        }
    }
}

/// Daily rotation over a [`QuoteService`].
pub struct DailyService<'a, S: QuoteStore> {
    quotes: &'a mut QuoteService<S>,
}

impl<'a, S: QuoteStore> DailyService<'a, S> {
    /// Creates a rotation over `quotes`.
    pub const fn new(quotes: &'a mut QuoteService<S>) -> Self {
        Self { quotes }
    }

    /// Returns today's quote, choosing one when needed.
    ///
    /// With `force` a new quote is chosen even if one was already shown today.
    ///
    /// # Errors
    ///
    /// Returns an error if saving the updated history fails.
    pub fn select<R: Rng + ?Sized>(
        &mut self,
        force: bool,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<Option<Quote>> {
        let mut candidate = self.quotes.document().clone();
        let pick = pick_daily(&mut candidate, force, now, rng);
        if let DailyPick::Fresh(quote) = &pick {
            self.quotes.commit(|document| {
                *document = candidate;
                Ok(())
            })?;
            tracing::debug!(id = %quote.id, "Picked daily quote");
        }
        Ok(pick.into_quote())
    }
}

/// Applies the rotation to `document` in memory.
///
/// On [`DailyPick::Fresh`] the quote is marked shown, a history entry is
/// appended and pruned, and `last_daily_display` is set; the caller saves.
pub fn pick_daily<R: Rng + ?Sized>(
    document: &mut StoreDocument,
    force: bool,
    now: DateTime<Utc>,
    rng: &mut R,
) -> DailyPick {
    if document.quotes.is_empty() {
        return DailyPick::Empty;
    }

    let today = now.date_naive();
    let shown_today = document
        .last_daily_display
        .is_some_and(|last| last.date_naive() == today);

    if shown_today && !force {
        let repeat = document
            .display_history
            .last()
            .and_then(|entry| document.find(&entry.quote_id))
            .cloned();
        if let Some(quote) = repeat {
            return DailyPick::AlreadyShown(quote);
        }
    }

    let index = choose_index(document, today, rng);
    let quote = &mut document.quotes[index];
    quote.mark_shown(now);
    let chosen = quote.clone();

    document.display_history.record(chosen.id.clone(), now);
    document.last_daily_display = Some(now);

    DailyPick::Fresh(chosen)
}

/// Picks an index among quotes outside the window, or among all quotes.
fn choose_index<R: Rng + ?Sized>(
    document: &StoreDocument,
    today: chrono::NaiveDate,
    rng: &mut R,
) -> usize {
    let recent: HashSet<&QuoteId> = document.display_history.recent_ids(today);
    let eligible: Vec<usize> = document
        .quotes
        .iter()
        .enumerate()
        .filter(|(_, q)| !recent.contains(&q.id))
        .map(|(i, _)| i)
        .collect();

    if eligible.is_empty() {
        tracing::debug!(
            window_days = ROTATION_WINDOW_DAYS,
            "Every quote shown within the window, reopening the full set"
        );
        rng.random_range(0..document.quotes.len())
    } else {
        eligible[rng.random_range(0..eligible.len())]
    }
}
