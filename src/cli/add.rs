//! `quotes add`.
//!
//! With `--text` the quote is saved directly; the only AI step is author
//! lookup when no author was given. Without `--text` the user is walked
//! through every field, then through author lookup, duplicate review and
//! category suggestions before picking categories.

use super::{Session, select_categories};
use crate::models::{ANONYMOUS, NewQuote, Quote, parse_category_list};
use crate::rendering::{Role, display};
use crate::services::{AuthorLookup, CategorySuggestion, SimilarQuote};
use crate::storage::QuoteStore;
use crate::{Error, Result};
use chrono::Utc;
use std::io::{BufRead, Write};

/// Similar quotes listed during review.
const MAX_REVIEWED_DUPLICATES: usize = 3;

/// Arguments for `add`.
#[derive(Debug, Clone, Default)]
pub struct AddArgs {
    /// Quote text; interactive when `None`.
    pub text: Option<String>,
    /// Author.
    pub author: Option<String>,
    /// Source.
    pub source: Option<String>,
    /// Personal note.
    pub note: Option<String>,
    /// Comma-separated categories.
    pub categories: Option<String>,
    /// Skip every AI step.
    pub skip_ai: bool,
}

/// What the duplicate review decided.
enum Review {
    AddNew,
    Merged(Quote),
    Cancelled,
}

/// Runs `add`.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] for empty text, or an I/O or storage error.
pub fn run<S, R, W>(session: &mut Session<S, R, W>, args: AddArgs) -> Result<()>
where
    S: QuoteStore,
    R: BufRead,
    W: Write,
{
    match args.text.clone() {
        Some(text) => add_direct(session, text, args),
        None => add_interactive(session, args.skip_ai),
    }
}

fn add_direct<S, R, W>(session: &mut Session<S, R, W>, text: String, args: AddArgs) -> Result<()>
where
    S: QuoteStore,
    R: BufRead,
    W: Write,
{
    if text.trim().is_empty() {
        return Err(Error::InvalidInput("quote text cannot be empty".to_string()));
    }

    let mut request = NewQuote::new(text.trim());
    request.source = args.source;
    request.personal_note = args.note;
    request.categories = args
        .categories
        .as_deref()
        .map(parse_category_list)
        .unwrap_or_default();

    let given_author = args.author.filter(|a| !a.trim().is_empty() && a.trim() != ANONYMOUS);
    match given_author {
        Some(author) => request.author = Some(author),
        None if !args.skip_ai => {
            if let Some(lookup) = session.ai.identify_author(&request.text, session.settings()) {
                if lookup.is_known() {
                    request.ai_metadata.author_confidence = lookup.confidence;
                    request.author = Some(lookup.author);
                }
            }
        },
        None => {},
    }

    let quote = session.quotes.add(request)?;
    report_saved(session, &quote)
}

fn add_interactive<S, R, W>(session: &mut Session<S, R, W>, skip_ai: bool) -> Result<()>
where
    S: QuoteStore,
    R: BufRead,
    W: Write,
{
    let heading = session.theme.bold(Role::Primary, "Add a New Quote");
    session.term.line(&format!("\n{heading}\n"))?;

    let text = match session
        .term
        .multiline("Quote text (finish with a line containing only END, or Ctrl-D):")
    {
        Ok(text) => text,
        Err(Error::Cancelled) => {
            return Err(Error::InvalidInput("quote text cannot be empty".to_string()));
        },
        Err(e) => return Err(e),
    };
    let author_input = session.term.prompt("Author (or press Enter if unknown)", None)?;
    let source = session.term.prompt("Where did you see this? (optional)", None)?;
    let note = session.term.prompt("Why did this resonate with you? (optional)", None)?;

    let mut request = NewQuote::new(text.clone()).with_source(source).with_note(note);
    if !author_input.is_empty() {
        request.author = Some(author_input);
    }

    let use_ai = !skip_ai && session.ai.is_available();
    let mut suggested = Vec::new();

    if use_ai {
        session.term.blank()?;
        session.info("🤔 Analyzing quote...")?;

        if request.author.is_none() {
            let lookup = session.ai.identify_author(&text, session.settings());
            if let Some(lookup) = lookup {
                show_author(session, &lookup)?;
                request.ai_metadata.author_confidence = lookup.confidence;
                if lookup.is_known() {
                    request.author = Some(lookup.author);
                }
            }
        }

        let similar = session
            .ai
            .find_duplicates(&text, session.quotes.all(), session.settings());
        request.ai_metadata.duplicate_check_date = Some(Utc::now());

        match review_duplicates(session, &similar, &request)? {
            Review::AddNew => {},
            Review::Merged(quote) => {
                session.term.blank()?;
                return session.success(&format!("Quote updated! (ID: {})", quote.short_id()));
            },
            Review::Cancelled => {
                return session.warning("Cancelled");
            },
        }

        if let Some(suggestion) = session.ai.suggest_categories(&text, session.settings()) {
            show_suggestion(session, &suggestion)?;
            request.ai_metadata.suggested_categories.clone_from(&suggestion.categories);
            request.ai_metadata.category_confidence = suggestion.confidence;
            suggested = suggestion.categories;
        }
    } else if !skip_ai {
        session.term.blank()?;
        session.warning("AI features unavailable (no API key configured)")?;
    }

    let categories = select_categories(session, &suggested, use_ai && !suggested.is_empty())?;
    request.categories = categories.unwrap_or_default();

    let quote = session.quotes.add(request)?;
    report_saved(session, &quote)
}

fn show_author<S, R, W>(session: &mut Session<S, R, W>, lookup: &AuthorLookup) -> Result<()>
where
    S: QuoteStore,
    R: BufRead,
    W: Write,
{
    if lookup.is_known() {
        let percent = (lookup.confidence * 100.0).round();
        session.success(&format!(
            "Author identified: {} (confidence: {percent:.0}%, via {})",
            lookup.author, lookup.method
        ))?;
        if !lookup.source.is_empty() {
            let line = session
                .theme
                .paint(Role::Dim, &format!("  Source info: {}", lookup.source));
            session.term.line(&line)?;
        }
        Ok(())
    } else {
        session.warning("Could not identify author (using Anonymous)")
    }
}

fn show_suggestion<S, R, W>(session: &mut Session<S, R, W>, suggestion: &CategorySuggestion) -> Result<()>
where
    S: QuoteStore,
    R: BufRead,
    W: Write,
{
    let text = display::category_suggestion(suggestion, &session.theme);
    session.term.blank()?;
    session.term.write(&text)
}

fn review_duplicates<S, R, W>(
    session: &mut Session<S, R, W>,
    similar: &[SimilarQuote],
    request: &NewQuote,
) -> Result<Review>
where
    S: QuoteStore,
    R: BufRead,
    W: Write,
{
    let Some(closest) = similar.first() else {
        session.success("No duplicates found")?;
        return Ok(Review::AddNew);
    };

    for other in similar.iter().skip(1).take(MAX_REVIEWED_DUPLICATES - 1) {
        let line = format!(
            "  Also similar: \"{}\" ({:.0}%)",
            display::truncate(&other.quote.text, 50),
            other.similarity * 100.0
        );
        let line = session.theme.paint(Role::Dim, &line);
        session.term.line(&line)?;
    }
    let panel = display::similar_quote(closest, &request.text, &session.theme);
    session.term.write(&panel)?;
    session.term.line("\nOptions:")?;
    session.term.line("  u - Update existing quote")?;
    session.term.line("  n - Add as new quote anyway")?;
    session.term.line("  c - Cancel")?;

    match session.term.choice("Choice", &["u", "n", "c"], "n")?.as_str() {
        "u" => {
            let merged = session.quotes.merge_into(&closest.quote.id, request.clone())?;
            Ok(Review::Merged(merged))
        },
        "c" => Ok(Review::Cancelled),
        _ => Ok(Review::AddNew),
    }
}

fn report_saved<S, R, W>(session: &mut Session<S, R, W>, quote: &Quote) -> Result<()>
where
    S: QuoteStore,
    R: BufRead,
    W: Write,
{
    session.term.blank()?;
    session.success(&format!("Quote saved! (ID: {})", quote.short_id()))?;
    let theme = &session.theme;
    let mut summary = format!(
        "\n{}\n{}\n",
        theme.paint(Role::Primary, &format!("\"{}\"", quote.text)),
        theme.paint(Role::Dim, &format!("— {}", quote.author)),
    );
    if !quote.categories.is_empty() {
        summary.push_str(&theme.paint(
            Role::Border,
            &format!("Categories: {}", quote.categories.join(", ")),
        ));
        summary.push('\n');
    }
    session.term.write(&summary)
}
