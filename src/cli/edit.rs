//! `quotes edit`.

use super::{Session, select_categories};
use crate::models::{Quote, sanitize_text};
use crate::rendering::{Role, Theme, display};
use crate::storage::QuoteStore;
use crate::{Error, Result};
use chrono::Utc;
use std::io::{BufRead, Write};

/// Editable fields, as offered to the user.
const FIELD_CHOICES: [&str; 6] = ["t", "a", "s", "n", "c", "x"];

/// Runs `edit` for one field chosen by the user.
///
/// Blank input keeps the text and author; blank source or note clears them.
/// In the category picker, finishing with nothing selected clears the
/// categories and cancelling keeps them. Returns the updated quote, or `None` when cancelled.
///
/// # Errors
///
/// Returns [`Error::QuoteNotFound`] or [`Error::AmbiguousId`] for a bad id,
/// or an I/O or storage error.
pub fn run<S, R, W>(session: &mut Session<S, R, W>, id: &str) -> Result<Option<Quote>>
where
    S: QuoteStore,
    R: BufRead,
    W: Write,
{
    let mut quote = session.quotes.resolve(id)?.clone();

    let current = format!(
        "\n{}\n\n{}",
        session.theme.bold(Role::Primary, "Current quote:"),
        display::detailed(&quote, &session.theme, Utc::now())
    );
    session.term.write(&current)?;
    let menu = format!(
        "\n{}\n[T] Text\n[A] Author\n[S] Source\n[N] Personal note\n[C] Categories\n[X] Cancel\n",
        session.theme.bold(Role::Primary, "What would you like to edit?")
    );
    session.term.write(&menu)?;

    let choice = session.term.choice("Choice", &FIELD_CHOICES, "x")?;
    match choice.as_str() {
        "t" => {
            let shown = format!("\n{}\n{}\n", session.theme.paint(Role::Dim, "Current text:"), quote.text);
            session.term.write(&shown)?;
            match session.term.multiline("Enter new text (END on its own line to finish):") {
                Ok(text) => quote.text = sanitize_text(&text).trim().to_string(),
                Err(Error::Cancelled) => {},
                Err(e) => return Err(e),
            }
        },
        "a" => {
            let shown = current_value(&session.theme, "Current author:", &quote.author);
            session.term.line(&shown)?;
            let author = session
                .term
                .prompt("New author (or press Enter to keep current)", None)?;
            if !author.is_empty() {
                quote.author = sanitize_text(&author).trim().to_string();
            }
        },
        "s" => {
            let shown = current_value(&session.theme, "Current source:", &quote.source);
            session.term.line(&shown)?;
            let source = session.term.prompt("New source (or press Enter to clear)", None)?;
            quote.source = sanitize_text(&source).trim().to_string();
        },
        "n" => {
            let shown = current_value(&session.theme, "Current note:", &quote.personal_note);
            session.term.line(&shown)?;
            let note = session.term.prompt("New note (or press Enter to clear)", None)?;
            quote.personal_note = sanitize_text(&note).trim().to_string();
        },
        "c" => {
            let current = quote.categories.clone();
            if let Some(picked) = select_categories(session, &current, false)? {
                quote.categories = picked;
            }
        },
        _ => {
            session.term.line("\nEdit cancelled")?;
            return Ok(None);
        },
    }

    let updated = session.quotes.update(quote)?;
    session.term.blank()?;
    session.success("Quote updated!")?;
    let shown = format!("\n{}", display::detailed(&updated, &session.theme, Utc::now()));
    session.term.write(&shown)?;
    Ok(Some(updated))
}

fn current_value(theme: &Theme, label: &str, value: &str) -> String {
    let value = if value.is_empty() { "(none)" } else { value };
    format!("\n{} {value}", theme.paint(Role::Dim, label))
}
