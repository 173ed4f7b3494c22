//! `quotes view`.

use super::{Session, delete, edit};
use crate::Result;
use crate::models::Quote;
use crate::rendering::{Role, display};
use crate::services::failure_message;
use crate::storage::QuoteStore;
use chrono::Utc;
use std::io::{BufRead, Write};

/// Shows a quote in detail.
///
/// With `explain` the AI explanation is shown straight away and the command
/// ends. Otherwise the user may explain, edit or delete the quote until they
/// go back.
///
/// # Errors
///
/// Returns [`crate::Error::QuoteNotFound`] or [`crate::Error::AmbiguousId`]
/// for a bad id, or an I/O or storage error.
pub fn run<S, R, W>(session: &mut Session<S, R, W>, id: &str, explain: bool) -> Result<()>
where
    S: QuoteStore,
    R: BufRead,
    W: Write,
{
    let mut quote = session.quotes.resolve(id)?.clone();
    show(session, &quote)?;

    if explain {
        if session.ai.can_explain(session.settings()) {
            show_explanation(session, &quote)?;
        } else {
            session.term.blank()?;
            session.warning("AI explanation unavailable (no API key configured)")?;
        }
        return Ok(());
    }

    loop {
        let can_explain = session.ai.can_explain(session.settings());
        let theme = session.theme.clone();
        let explain_line = if can_explain {
            format!("  {} - Explain this quote (AI)", theme.paint(Role::Warning, "e"))
        } else {
            theme.paint(Role::Dim, "  e - Explain (AI unavailable)")
        };
        let options = format!(
            "\n{explain_line}\n  {} - Edit this quote\n  {} - Delete this quote\n  {} - Back to menu\n",
            theme.paint(Role::Warning, "ed"),
            theme.paint(Role::Warning, "d"),
            theme.paint(Role::Warning, "b"),
        );
        session.term.write(&options)?;

        let choices: &[&str] = if can_explain {
            &["e", "ed", "d", "b"]
        } else {
            &["ed", "d", "b"]
        };
        match session.term.choice("Choice", choices, "b")?.as_str() {
            "e" => {
                if let Some(text) = show_explanation(session, &quote)? {
                    quote = offer_to_save(session, quote, &text)?;
                }
            },
            "ed" => {
                session.term.blank()?;
                if let Some(updated) = edit::run(session, quote.id.as_str())? {
                    quote = updated;
                }
            },
            "d" => {
                if delete::run(session, quote.id.as_str(), false)? {
                    return Ok(());
                }
            },
            _ => return Ok(()),
        }
    }
}

fn show<S, R, W>(session: &mut Session<S, R, W>, quote: &Quote) -> Result<()>
where
    S: QuoteStore,
    R: BufRead,
    W: Write,
{
    let out = format!("\n{}", display::detailed(quote, &session.theme, Utc::now()));
    session.term.write(&out)
}

fn show_explanation<S, R, W>(session: &mut Session<S, R, W>, quote: &Quote) -> Result<Option<String>>
where
    S: QuoteStore,
    R: BufRead,
    W: Write,
{
    session.term.blank()?;
    session.info("🤔 Generating explanation...")?;
    match session.ai.explain(quote, session.settings()) {
        Ok(text) => {
            let panel = display::explanation(&text, &session.theme);
            session.term.write(&format!("\n{panel}"))?;
            Ok(Some(text))
        },
        Err(e) => {
            tracing::warn!(id = %quote.id, error = %e, "Quote explanation failed");
            session.warning(&failure_message(&e))?;
            Ok(None)
        },
    }
}

fn offer_to_save<S, R, W>(session: &mut Session<S, R, W>, mut quote: Quote, explanation: &str) -> Result<Quote>
where
    S: QuoteStore,
    R: BufRead,
    W: Write,
{
    session.term.blank()?;
    if !session
        .term
        .confirm("Would you like to save this explanation to the quote's notes?", false)?
    {
        return Ok(quote);
    }

    quote.personal_note = append_explanation(&quote.personal_note, explanation);
    let updated = session.quotes.update(quote)?;
    session.term.blank()?;
    session.success("Explanation saved to quote notes")?;
    Ok(updated)
}

/// Appends an explanation block to a personal note.
#[must_use]
pub fn append_explanation(note: &str, explanation: &str) -> String {
    if note.trim().is_empty() {
        format!("AI Explanation:\n{explanation}")
    } else {
        format!("{note}\n\nAI Explanation:\n{explanation}")
    }
}
