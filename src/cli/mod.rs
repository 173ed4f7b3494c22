//! CLI command implementations.
//!
//! Each submodule implements one command over a [`Session`], which owns the
//! quote collection, the AI helpers, the active theme and a [`Terminal`].
//! Commands never print directly, so every flow can be driven from a script.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `add` | Add a quote, interactively or from flags |
//! | `list` | List quotes, optionally by category or author |
//! | `search` | Keyword search across every field |
//! | `view` | Show one quote, explain, edit or delete it |
//! | `edit` | Change one field of a quote |
//! | `delete` | Remove a quote |
//! | `daily` | Show today's quote from the rotation |
//! | `setup` | Print shell startup instructions |
//! | `theme` | Pick and save a color theme |
//!
//! With no subcommand the numbered [`menu`] runs instead.
//!
//! # Example Usage
//!
//! ```bash
//! # Save a quote without prompts
//! quotes add --text "Stay hungry, stay foolish" --author "Steve Jobs" --categories motivation
//!
//! # Show today's quote when a shell starts
//! quotes daily --quiet
//!
//! # Explain a quote by id prefix
//! quotes view a1b2 --explain
//! ```

pub mod add;
mod categories;
pub mod daily;
pub mod delete;
pub mod edit;
pub mod list;
mod llm_factory;
pub mod menu;
mod session;
pub mod setup;
mod terminal;
pub mod theme;
pub mod view;

pub use add::AddArgs;
pub use categories::select_categories;
pub use daily::DailyArgs;
pub use list::ListArgs;
pub use llm_factory::{build_ai_assistant, build_anthropic_client, build_http_config};
pub use menu::{GOODBYE, ShellContext};
pub use session::Session;
pub use setup::{ShellKind, detect_shell};
pub use terminal::{MULTILINE_TERMINATOR, Terminal};

use crate::rendering::{Role, display};
use crate::storage::QuoteStore;
use crate::{Error, Result};
use std::io::{BufRead, Write};

/// Prints an error with a hint for id lookups.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn report_error<S, R, W>(session: &mut Session<S, R, W>, error: &Error) -> Result<()>
where
    S: QuoteStore,
    R: BufRead,
    W: Write,
{
    match error {
        Error::QuoteNotFound(_) => {
            session.error(&error.to_string())?;
            let hint = session
                .theme
                .paint(Role::Dim, "Use 'quotes list' to see all quotes and their IDs");
            session.term.line(&format!("\n{hint}"))
        },
        Error::AmbiguousId { prefix, matches } => {
            session.error(&format!("Multiple quotes match '{prefix}'. Please be more specific:"))?;
            for id in matches {
                let text = session
                    .quotes
                    .resolve(id)
                    .map(|q| display::truncate(&q.text, 50))
                    .unwrap_or_default();
                session.term.line(&format!("  - {id}: \"{text}\""))?;
            }
            Ok(())
        },
        Error::Cancelled => session.term.line("Cancelled"),
        other => session.error(&other.to_string()),
    }
}
