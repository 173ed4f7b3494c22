//! Interactive numbered menu, shown when no subcommand is given.

use super::{AddArgs, DailyArgs, ListArgs, Session, report_error};
use crate::Result;
use crate::rendering::Role;
use crate::storage::QuoteStore;
use chrono::Utc;
use std::fmt::Write as _;
use std::io::{BufRead, Write};
use std::path::Path;

/// Farewell printed on exit and on Ctrl-C.
pub const GOODBYE: &str = "Goodbye! 📖✨";

const ITEMS: [(&str, &str); 10] = [
    ("1", "Add new quote"),
    ("2", "View daily quote"),
    ("3", "List all quotes"),
    ("4", "Search quotes"),
    ("5", "View quote details"),
    ("6", "Edit quote"),
    ("7", "Delete quote"),
    ("8", "Setup shell integration"),
    ("9", "Change theme"),
    ("0", "Exit"),
];

/// Where `setup` looks for shell profiles.
#[derive(Debug, Clone, Copy)]
pub struct ShellContext<'a> {
    /// Value of `$SHELL`.
    pub shell: Option<&'a str>,
    /// Home directory.
    pub home: &'a Path,
}

/// Runs the menu until the user exits or input ends.
///
/// Errors from an action are printed and the menu continues.
///
/// # Errors
///
/// Returns an error only when the terminal itself fails.
pub fn run<S, R, W>(session: &mut Session<S, R, W>, shell: ShellContext<'_>) -> Result<()>
where
    S: QuoteStore,
    R: BufRead,
    W: Write,
{
    let choices: Vec<&str> = ITEMS.iter().map(|(key, _)| *key).collect();
    loop {
        render(session)?;
        let choice = session.term.choice("Select an option", &choices, "0")?;
        if choice == "0" {
            let farewell = session.theme.paint(Role::Primary, GOODBYE);
            return session.term.line(&format!("\n{farewell}\n"));
        }

        if let Err(e) = dispatch(session, &choice, shell) {
            tracing::debug!(error = %e, "Menu action failed");
            report_error(session, &e)?;
        }
        let hint = session.theme.paint(Role::Dim, "Press Enter to continue");
        session.term.prompt(&format!("\n{hint}"), None)?;
    }
}

fn dispatch<S, R, W>(session: &mut Session<S, R, W>, choice: &str, shell: ShellContext<'_>) -> Result<()>
where
    S: QuoteStore,
    R: BufRead,
    W: Write,
{
    match choice {
        "1" => super::add::run(session, AddArgs::default()),
        "2" => super::daily::run(session, DailyArgs::default(), Utc::now(), &mut rand::rng()),
        "3" => {
            let args = ListArgs {
                all: true,
                ..ListArgs::default()
            };
            super::list::run(session, &args)
        },
        "4" => {
            let query = ask(session, "Search query")?;
            if query.is_empty() {
                return Ok(());
            }
            super::list::search(session, &query, false)
        },
        "5" => {
            let id = ask(session, "Quote ID")?;
            super::view::run(session, &id, false)
        },
        "6" => {
            let id = ask(session, "Quote ID to edit")?;
            super::edit::run(session, &id).map(|_| ())
        },
        "7" => {
            let id = ask(session, "Quote ID to delete")?;
            super::delete::run(session, &id, false).map(|_| ())
        },
        "8" => super::setup::run(session, shell.shell, shell.home),
        "9" => super::theme::run(session, None).map(|_| ()),
        _ => Ok(()),
    }
}

fn ask<S, R, W>(session: &mut Session<S, R, W>, label: &str) -> Result<String>
where
    S: QuoteStore,
    R: BufRead,
    W: Write,
{
    let label = session.theme.bold(Role::Primary, label);
    session.term.prompt(&label, None)
}

fn render<S, R, W>(session: &mut Session<S, R, W>) -> Result<()>
where
    S: QuoteStore,
    R: BufRead,
    W: Write,
{
    let theme = session.theme.clone();
    let mut out = format!(
        "\n{}{}\n\n",
        theme.bold(Role::Primary, "Quotes Manager"),
        theme.paint(Role::Dim, " - Interactive Menu")
    );
    for (key, label) in ITEMS {
        let _ = writeln!(
            out,
            "  {}  {}",
            theme.paint(Role::Warning, key),
            theme.paint(Role::Primary, label)
        );
    }
    session.term.write(&out)
}
