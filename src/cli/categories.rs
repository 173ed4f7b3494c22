//! Interactive category picker.

use super::Session;
use crate::Result;
use crate::models::normalize_categories;
use crate::rendering::Role;
use crate::services::PREDEFINED_CATEGORIES;
use crate::storage::QuoteStore;
use std::collections::BTreeSet;
use std::io::{BufRead, Write};

/// Lets the user toggle categories by number.
///
/// `preselected` starts checked. New custom categories are saved to the
/// settings so they are offered next time. Returns the sorted selection when
/// the user is done, which may be empty, or `None` when they cancel.
///
/// # Errors
///
/// Returns an error on I/O or storage failure.
pub fn select_categories<S, R, W>(
    session: &mut Session<S, R, W>,
    preselected: &[String],
    ai_suggested: bool,
) -> Result<Option<Vec<String>>>
where
    S: QuoteStore,
    R: BufRead,
    W: Write,
{
    let mut options: Vec<String> = PREDEFINED_CATEGORIES.iter().map(ToString::to_string).collect();
    for custom in &session.settings().custom_categories {
        if !options.contains(custom) {
            options.push(custom.clone());
        }
    }
    let mut selected: BTreeSet<String> = normalize_categories(preselected).into_iter().collect();
    for tag in &selected {
        if !options.contains(tag) {
            options.push(tag.clone());
        }
    }

    loop {
        render(session, &options, &selected, preselected, ai_suggested)?;
        let choice = session.term.prompt("Choice", Some("d"))?.to_lowercase();

        match choice.as_str() {
            "d" => return Ok(Some(selected.into_iter().collect())),
            "x" => return Ok(None),
            "c" => {
                let custom = session.term.prompt("Enter custom category name", None)?;
                let tag = custom.trim().to_lowercase();
                if tag.is_empty() {
                    continue;
                }
                if options.contains(&tag) {
                    session.warning(&format!("Category '{tag}' already exists"))?;
                } else {
                    options.push(tag.clone());
                    selected.insert(tag.clone());
                    session.quotes.update_settings(|s| {
                        s.add_custom_category(&tag);
                    })?;
                    session.success(&format!("Added '{tag}'"))?;
                }
            },
            number => match number.parse::<usize>() {
                Ok(n) if (1..=options.len()).contains(&n) => {
                    let tag = &options[n - 1];
                    if !selected.remove(tag) {
                        selected.insert(tag.clone());
                    }
                },
                _ => session.warning("Enter a number, c, d or x")?,
            },
        }
    }
}

fn render<S, R, W>(
    session: &mut Session<S, R, W>,
    options: &[String],
    selected: &BTreeSet<String>,
    preselected: &[String],
    ai_suggested: bool,
) -> Result<()>
where
    S: QuoteStore,
    R: BufRead,
    W: Write,
{
    let theme = session.theme.clone();
    let mut out = format!("\n{}\n\n", theme.bold(Role::Primary, "Select Categories"));
    if ai_suggested && !preselected.is_empty() {
        out.push_str(&format!(
            "{} {}\n\n",
            theme.paint(Role::Success, "✓ AI suggested:"),
            theme.paint(Role::Primary, &preselected.join(", "))
        ));
    }
    for (i, tag) in options.iter().enumerate() {
        let mark = if selected.contains(tag) { "✓" } else { " " };
        let custom = if PREDEFINED_CATEGORIES.contains(&tag.as_str()) {
            String::new()
        } else {
            format!(" {}", theme.paint(Role::Dim, "(custom)"))
        };
        out.push_str(&format!(
            "  {}  [{mark}] {}{custom}\n",
            theme.paint(Role::Warning, &format!("{:>3}", i + 1)),
            theme.paint(Role::Primary, tag)
        ));
    }
    if selected.is_empty() {
        out.push_str(&format!("\n{}\n", theme.paint(Role::Dim, "No categories selected")));
    } else {
        let list: Vec<&str> = selected.iter().map(String::as_str).collect();
        out.push_str(&format!(
            "\n{} {}\n",
            theme.bold(Role::Success, "Selected:"),
            theme.paint(Role::Success, &list.join(", "))
        ));
    }
    out.push_str(&format!(
        "\n{} number = toggle | c = add custom | d = done | x = cancel\n",
        theme.paint(Role::Warning, "Options:")
    ));
    session.term.write(&out)
}
