//! `quotes delete`.

use super::Session;
use crate::Result;
use crate::rendering::Role;
use crate::storage::QuoteStore;
use std::io::{BufRead, Write};

/// Runs `delete`. Asks first unless `force` is set.
///
/// Returns whether the quote was deleted.
///
/// # Errors
///
/// Returns [`crate::Error::QuoteNotFound`] or [`crate::Error::AmbiguousId`]
/// for a bad id, or an I/O or storage error.
pub fn run<S, R, W>(session: &mut Session<S, R, W>, id: &str, force: bool) -> Result<bool>
where
    S: QuoteStore,
    R: BufRead,
    W: Write,
{
    let quote = session.quotes.resolve(id)?.clone();

    session.term.blank()?;
    session.warning("Are you sure you want to delete this quote?")?;
    let preview = format!(
        "\n  {}\n  {}\n\n{}\n",
        session.theme.paint(Role::Primary, &format!("\"{}\"", quote.text)),
        session.theme.paint(Role::Dim, &format!("— {}", quote.author)),
        session.theme.paint(Role::Error, "This cannot be undone!"),
    );
    session.term.write(&preview)?;

    if !force && !session.term.confirm("Delete this quote?", false)? {
        session.term.line("\nDeletion cancelled")?;
        return Ok(false);
    }

    session.quotes.delete(&quote.id)?;
    session.success("Quote deleted")?;
    Ok(true)
}
