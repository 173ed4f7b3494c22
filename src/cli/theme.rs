//! `quotes theme`.

use super::Session;
use crate::models::ThemeName;
use crate::rendering::Role;
use crate::storage::QuoteStore;
use crate::{Error, Result};
use std::fmt::Write as _;
use std::io::{BufRead, Write};

/// Sets the theme by name, or asks for one when `name` is `None`.
///
/// The choice is saved in the settings and applied to the session.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] for an unknown theme name, or an I/O or
/// storage error.
pub fn run<S, R, W>(session: &mut Session<S, R, W>, name: Option<&str>) -> Result<ThemeName>
where
    S: QuoteStore,
    R: BufRead,
    W: Write,
{
    let chosen = match name {
        Some(name) => ThemeName::parse(name).ok_or_else(|| {
            Error::InvalidInput(format!(
                "unknown theme '{name}'. Available themes: {}",
                ThemeName::available()
            ))
        })?,
        None => pick(session)?,
    };

    session
        .quotes
        .update_settings(|settings| settings.preferences.theme = Some(chosen))?;
    session.set_theme(chosen);
    tracing::debug!(theme = %chosen, "Theme changed");

    let theme = session.theme.clone();
    let mut out = format!(
        "\n{} Theme changed to {}\n",
        theme.paint(Role::Success, "✓"),
        theme.bold(Role::Primary, chosen.as_str())
    );
    if !theme.is_plain() {
        let _ = writeln!(out, "\n{}", theme.paint(Role::Dim, "Preview of colors:"));
        for (label, role) in [
            ("Primary: ", Role::Primary),
            ("Success: ", Role::Success),
            ("Warning: ", Role::Warning),
            ("Error:   ", Role::Error),
        ] {
            let _ = writeln!(out, "  {label} {}", theme.paint(role, &"█".repeat(26)));
        }
    }
    session.term.write(&out)?;
    Ok(chosen)
}

fn pick<S, R, W>(session: &mut Session<S, R, W>) -> Result<ThemeName>
where
    S: QuoteStore,
    R: BufRead,
    W: Write,
{
    let current = session.theme.name();
    let theme = session.theme.clone();
    let mut out = format!("\n{}\n\n", theme.bold(Role::Primary, "Available Themes:"));
    for (i, name) in ThemeName::all().iter().enumerate() {
        let mark = if *name == current { " ✓" } else { "" };
        let _ = writeln!(
            out,
            "  {}  {:<15} {}{}",
            theme.paint(Role::Warning, &(i + 1).to_string()),
            name.as_str(),
            theme.paint(Role::Dim, name.description()),
            theme.paint(Role::Success, mark)
        );
    }
    session.term.write(&out)?;

    let numbers: Vec<String> = (1..=ThemeName::all().len()).map(|n| n.to_string()).collect();
    let choices: Vec<&str> = numbers.iter().map(String::as_str).collect();
    let answer = session.term.choice("Select theme", &choices, "1")?;
    let index = answer.parse::<usize>().unwrap_or(1).saturating_sub(1);
    Ok(ThemeName::all().get(index).copied().unwrap_or_default())
}
