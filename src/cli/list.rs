//! `quotes list` and `quotes search`.

use super::Session;
use crate::Result;
use crate::models::QuoteFilter;
use crate::rendering::{Role, display};
use crate::storage::QuoteStore;
use chrono::Utc;
use std::io::{BufRead, Write};

/// Arguments for `list`.
#[derive(Debug, Clone)]
pub struct ListArgs {
    /// Category filter.
    pub category: Option<String>,
    /// Author filter.
    pub author: Option<String>,
    /// Rows to show.
    pub limit: usize,
    /// Show every match regardless of `limit`.
    pub all: bool,
}

impl Default for ListArgs {
    fn default() -> Self {
        Self {
            category: None,
            author: None,
            limit: display::DEFAULT_LIST_LIMIT,
            all: false,
        }
    }
}

/// Runs `list`.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn run<S, R, W>(session: &mut Session<S, R, W>, args: &ListArgs) -> Result<()>
where
    S: QuoteStore,
    R: BufRead,
    W: Write,
{
    if session.quotes.count() == 0 {
        return session.warning("No quotes found. Add your first quote with 'quotes add'");
    }

    let mut filter = QuoteFilter::new();
    if let Some(category) = args.category.as_deref().filter(|c| !c.trim().is_empty()) {
        filter = filter.with_category(category.trim());
    }
    if let Some(author) = args.author.as_deref().filter(|a| !a.trim().is_empty()) {
        filter = filter.with_author(author.trim());
    }

    let quotes = session.quotes.list(&filter);
    if quotes.is_empty() {
        let message = match (&filter.category, &filter.author) {
            (Some(category), _) => format!("No quotes found in category '{category}'"),
            (None, Some(author)) => format!("No quotes found by author '{author}'"),
            (None, None) => "No quotes found.".to_string(),
        };
        return session.warning(&message);
    }

    let heading = match (&filter.category, &filter.author) {
        (Some(category), _) => format!("{} quote(s) in '{category}':", quotes.len()),
        (None, Some(author)) => format!("{} quote(s) by {author}:", quotes.len()),
        (None, None) => format!("All quotes ({} total):", quotes.len()),
    };
    let limit = if args.all { quotes.len() } else { args.limit };
    let out = format!(
        "\n{}\n\n{}",
        session.theme.bold(Role::Primary, &heading),
        display::list(&quotes, &session.theme, limit, Utc::now())
    );
    session.term.write(&out)
}

/// Runs `search`.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn search<S, R, W>(session: &mut Session<S, R, W>, query: &str, case_sensitive: bool) -> Result<()>
where
    S: QuoteStore,
    R: BufRead,
    W: Write,
{
    if query.trim().is_empty() {
        return session.warning("Enter something to search for");
    }
    if session.quotes.count() == 0 {
        return session.warning("No quotes found. Add your first quote with 'quotes add'");
    }

    let results = session.quotes.search(query, case_sensitive);
    let out = display::search_results(&results, query.trim(), &session.theme, Utc::now());
    session.term.write(&out)
}
