//! Quote CRUD service.

use crate::models::{
    ANONYMOUS, NewQuote, Quote, QuoteFilter, QuoteId, Settings, StoreDocument, matches_keyword,
    normalize_categories, sanitize_text,
};
use crate::storage::QuoteStore;
use crate::{Error, Result};
use chrono::Utc;

/// Service for creating, finding and changing quotes.
///
/// Holds the loaded document. Every mutation is applied to a copy, saved, and
/// only then swapped in, so a failed save leaves memory matching disk.
pub struct QuoteService<S: QuoteStore> {
    store: S,
    document: StoreDocument,
}

impl<S: QuoteStore> QuoteService<S> {
    /// Loads the store and creates the service.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CorruptStore`] if the store cannot be read.
    pub fn open(store: S) -> Result<Self> {
        let document = store.load()?;
        Ok(Self { store, document })
    }

    /// Returns the underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Returns the loaded document.
    pub const fn document(&self) -> &StoreDocument {
        &self.document
    }

    #[cfg(test)]
    pub(crate) fn document_mut(&mut self) -> &mut StoreDocument {
        &mut self.document
    }

    /// Returns the persisted settings.
    pub const fn settings(&self) -> &Settings {
        &self.document.settings
    }

    /// All quotes in insertion order.
    pub fn all(&self) -> &[Quote] {
        &self.document.quotes
    }

    /// Number of stored quotes.
    pub fn count(&self) -> usize {
        self.document.quotes.len()
    }

    /// Applies `change` to a copy of the document and saves it.
    ///
    /// The copy replaces the loaded document only after the store accepts it.
    ///
    /// # Errors
    ///
    /// Returns the error from `change` or from the store; the loaded
    /// document is then unchanged.
    pub fn commit<T, F>(&mut self, change: F) -> Result<T>
    where
        F: FnOnce(&mut StoreDocument) -> Result<T>,
    {
        let mut candidate = self.document.clone();
        let value = change(&mut candidate)?;
        candidate.refresh_stats();
        self.store.save(&candidate)?;
        self.document = candidate;
        Ok(value)
    }

    /// Adds a quote.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for empty text, or a storage error.
    pub fn add(&mut self, request: NewQuote) -> Result<Quote> {
        let text = sanitize_text(&request.text).trim().to_string();
        if text.is_empty() {
            return Err(Error::InvalidInput("quote text cannot be empty".to_string()));
        }

        let mut quote = Quote::new(text);
        quote.author = clean_author(request.author.as_deref());
        quote.source = clean_optional(request.source.as_deref());
        quote.personal_note = clean_optional(request.personal_note.as_deref());
        quote.categories = normalize_categories(&request.categories);
        quote.ai_metadata = request.ai_metadata;

        self.commit(|document| {
            document.quotes.push(quote.clone());
            Ok(())
        })?;

        tracing::debug!(id = %quote.id, "Added quote");
        Ok(quote)
    }

    /// Looks up a quote by exact id.
    pub fn get(&self, id: &QuoteId) -> Option<&Quote> {
        self.document.find(id)
    }

    /// Resolves a full id or a unique id prefix.
    ///
    /// # Errors
    ///
    /// Returns [`Error::QuoteNotFound`] when nothing matches and
    /// [`Error::AmbiguousId`] when the prefix matches several quotes.
    pub fn resolve(&self, id_or_prefix: &str) -> Result<&Quote> {
        let wanted = id_or_prefix.trim();
        if wanted.is_empty() {
            return Err(Error::QuoteNotFound(String::new()));
        }

        if let Some(quote) = self.document.quotes.iter().find(|q| q.id.as_str() == wanted) {
            return Ok(quote);
        }

        let matches: Vec<&Quote> = self
            .document
            .quotes
            .iter()
            .filter(|q| q.id.as_str().starts_with(wanted))
            .collect();

        match matches.as_slice() {
            [] => Err(Error::QuoteNotFound(wanted.to_string())),
            [only] => Ok(only),
            many => Err(Error::AmbiguousId {
                prefix: wanted.to_string(),
                matches: many.iter().map(|q| q.short_id().to_string()).collect(),
            }),
        }
    }

    /// Replaces a quote by id and stamps `date_modified`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::QuoteNotFound`] for an unknown id, [`Error::InvalidInput`]
    /// for empty text, or a storage error.
    pub fn update(&mut self, mut quote: Quote) -> Result<Quote> {
        quote.text = sanitize_text(&quote.text).trim().to_string();
        if quote.text.is_empty() {
            return Err(Error::InvalidInput("quote text cannot be empty".to_string()));
        }
        quote.author = clean_author(Some(quote.author.as_str()));
        quote.categories = normalize_categories(&quote.categories);
        quote.date_modified = Some(Utc::now());

        self.commit(|document| {
            let slot = document
                .find_mut(&quote.id)
                .ok_or_else(|| Error::QuoteNotFound(quote.id.to_string()))?;
            *slot = quote.clone();
            Ok(())
        })?;

        tracing::debug!(id = %quote.id, "Updated quote");
        Ok(quote)
    }

    /// Deletes a quote and its display history.
    ///
    /// # Errors
    ///
    /// Returns [`Error::QuoteNotFound`] for an unknown id, or a storage error.
    pub fn delete(&mut self, id: &QuoteId) -> Result<Quote> {
        let removed = self.commit(|document| {
            let index = document
                .quotes
                .iter()
                .position(|q| &q.id == id)
                .ok_or_else(|| Error::QuoteNotFound(id.to_string()))?;
            document.display_history.remove_quote(id);
            Ok(document.quotes.remove(index))
        })?;

        tracing::debug!(id = %removed.id, "Deleted quote");
        Ok(removed)
    }

    /// Lists quotes matching `filter`, newest first.
    pub fn list(&self, filter: &QuoteFilter) -> Vec<&Quote> {
        let mut quotes: Vec<&Quote> = self
            .document
            .quotes
            .iter()
            .filter(|q| filter.matches(q))
            .collect();
        quotes.sort_by(|a, b| b.date_added.cmp(&a.date_added));
        if let Some(limit) = filter.limit {
            quotes.truncate(limit);
        }
        quotes
    }

    /// Finds quotes containing `query` in any field, newest first.
    pub fn search(&self, query: &str, case_sensitive: bool) -> Vec<&Quote> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }
        let mut quotes: Vec<&Quote> = self
            .document
            .quotes
            .iter()
            .filter(|q| matches_keyword(q, query, case_sensitive))
            .collect();
        quotes.sort_by(|a, b| b.date_added.cmp(&a.date_added));
        quotes
    }

    /// Folds a new submission into an existing quote.
    ///
    /// Text and author are replaced; source and note only when provided.
    /// Categories from the submission are added to the existing ones.
    ///
    /// # Errors
    ///
    /// Returns [`Error::QuoteNotFound`] for an unknown id, or a storage error.
    pub fn merge_into(&mut self, existing: &QuoteId, request: NewQuote) -> Result<Quote> {
        let mut quote = self
            .get(existing)
            .cloned()
            .ok_or_else(|| Error::QuoteNotFound(existing.to_string()))?;

        quote.text = request.text;
        quote.author = clean_author(request.author.as_deref());
        if let Some(source) = request.source.filter(|s| !s.trim().is_empty()) {
            quote.source = source.trim().to_string();
        }
        if let Some(note) = request.personal_note.filter(|n| !n.trim().is_empty()) {
            quote.personal_note = note.trim().to_string();
        }
        quote.categories.extend(request.categories);

        self.update(quote)
    }

    /// Applies `change` to the settings and saves.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the save fails; the settings in memory are
    /// then unchanged.
    pub fn update_settings<F>(&mut self, change: F) -> Result<()>
    where
        F: FnOnce(&mut Settings),
    {
        self.commit(|document| {
            change(&mut document.settings);
            Ok(())
        })
    }
}

fn clean_author(author: Option<&str>) -> String {
    author
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map_or_else(|| ANONYMOUS.to_string(), ToString::to_string)
}

fn clean_optional(value: Option<&str>) -> String {
    value.map(str::trim).unwrap_or_default().to_string()
}
