//! Listing filters and keyword matching.

use super::Quote;

/// Filter criteria for listing quotes.
#[derive(Debug, Clone, Default)]
pub struct QuoteFilter {
    /// Category tag (case-insensitive exact match).
    pub category: Option<String>,
    /// Author fragment (case-insensitive substring).
    pub author: Option<String>,
    /// Maximum number of results.
    pub limit: Option<usize>,
}

impl QuoteFilter {
    /// Creates an empty filter (matches all).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            category: None,
            author: None,
            limit: None,
        }
    }

    /// Adds a category filter.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Adds an author filter.
    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Caps the number of results.
    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Returns true if the filter is empty (matches all).
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.category.is_none() && self.author.is_none() && self.limit.is_none()
    }

    /// Returns true when `quote` passes the category and author criteria.
    #[must_use]
    pub fn matches(&self, quote: &Quote) -> bool {
        let category_ok = self
            .category
            .as_deref()
            .is_none_or(|category| quote.has_category(category));
        let author_ok = self.author.as_deref().is_none_or(|author| {
            quote
                .author
                .to_lowercase()
                .contains(&author.trim().to_lowercase())
        });
        category_ok && author_ok
    }
}

/// Returns true when `query` occurs in any searchable field of `quote`.
#[must_use]
pub fn matches_keyword(quote: &Quote, query: &str, case_sensitive: bool) -> bool {
    let haystack = quote.searchable_text();
    if case_sensitive {
        haystack.contains(query)
    } else {
        haystack.to_lowercase().contains(&query.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(text: &str, author: &str, categories: &[&str]) -> Quote {
        let mut q = Quote::new(text);
        q.author = author.to_string();
        q.categories = categories.iter().map(ToString::to_string).collect();
        q
    }

    #[test]
    fn test_empty_filter_matches_all() {
        let filter = QuoteFilter::new();
        assert!(filter.is_empty());
        assert!(filter.matches(&quote("x", "y", &[])));
    }

    #[test]
    fn test_category_filter_is_exact() {
        let q = quote("x", "y", &["wisdom"]);
        assert!(QuoteFilter::new().with_category("WISDOM").matches(&q));
        assert!(!QuoteFilter::new().with_category("wis").matches(&q));
    }

    #[test]
    fn test_author_filter_is_substring() {
        let q = quote("x", "Marcus Aurelius", &[]);
        assert!(QuoteFilter::new().with_author("aurel").matches(&q));
        assert!(!QuoteFilter::new().with_author("seneca").matches(&q));
    }

    #[test]
    fn test_keyword_case_handling() {
        let q = quote("The Obstacle is the Way", "Ryan Holiday", &["resilience"]);
        assert!(matches_keyword(&q, "obstacle", false));
        assert!(!matches_keyword(&q, "obstacle", true));
        assert!(matches_keyword(&q, "Obstacle", true));
        assert!(matches_keyword(&q, "resilience", false));
        assert!(matches_keyword(&q, "holiday", false));
    }
}
