//! Quote formatting.
//!
//! Every function returns the rendered text; callers decide where it goes.

use super::theme::{Role, Theme};
use super::time::{format_date, format_relative_opt, format_relative_time};
use crate::models::{DisplayStyle, Quote};
use crate::services::{CategorySuggestion, SimilarQuote};
use chrono::{DateTime, Utc};
use std::fmt::Write as _;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Inner width of panels, in terminal columns.
pub const PANEL_WIDTH: usize = 68;

/// Quotes shown by a list before the "showing N of M" footer.
pub const DEFAULT_LIST_LIMIT: usize = 10;

/// List rows truncate quote text to this many columns.
const LIST_TEXT_WIDTH: usize = 80;

/// Renders `"text" — author` on one line, followed by the short id when
/// `show_id` is set.
#[must_use]
pub fn minimal(quote: &Quote, theme: &Theme, show_id: bool) -> String {
    let mut out = format!(
        "{}{}",
        theme.paint(Role::Primary, &format!("\"{}\"", quote.text)),
        theme.paint(Role::Secondary, &format!(" — {}", quote.author)),
    );
    if show_id {
        out.push_str(&theme.paint(Role::Dim, &format!(" ({})", quote.short_id())));
    }
    out.push('\n');
    out
}

/// Renders the two-line quote printed at shell startup.
#[must_use]
pub fn quiet_daily(quote: &Quote, theme: &Theme) -> String {
    format!(
        "\n  {}\n  {}\n\n",
        theme.paint(Role::Primary, &format!("\"{}\"", quote.text)),
        theme.paint(Role::Dim, &format!("— {}", quote.author)),
    )
}

/// Renders today's quote in the user's preferred style.
#[must_use]
pub fn daily(quote: &Quote, theme: &Theme, style: DisplayStyle, show_id: bool) -> String {
    match style {
        DisplayStyle::Boxed => daily_panel(quote, theme, show_id),
        DisplayStyle::Minimal => format!(
            "\n{}\n{}\n",
            theme.bold(Role::Primary, "✨ Quote of the Day ✨"),
            minimal(quote, theme, show_id)
        ),
    }
}

fn daily_panel(quote: &Quote, theme: &Theme, show_id: bool) -> String {
    let mut body = wrap_quoted(&quote.text, theme, false);
    body.push(String::new());
    body.push(theme.paint(Role::Dim, &format!("— {}", quote.author)));

    let mut out = String::from("\n");
    out.push_str(&panel(Some("✨ Quote of the Day ✨"), &body, theme));
    out.push('\n');
    if !quote.categories.is_empty() {
        let _ = writeln!(
            out,
            "  {} {}",
            theme.paint(Role::Dim, "Categories:"),
            theme.paint(Role::Border, &quote.categories.join(", "))
        );
    }
    if !quote.source.is_empty() {
        let _ = writeln!(out, "  {} {}", theme.paint(Role::Dim, "Source:"), quote.source);
    }
    let times = if quote.times_shown == 1 { "time" } else { "times" };
    let mut meta = format!("Shown {} {times}", quote.times_shown);
    if show_id {
        meta = format!("Quote #{} | {meta}", quote.short_id());
    }
    let _ = writeln!(out, "  {}\n", theme.paint(Role::Dim, &meta));
    out
}

/// Renders every field of a quote.
#[must_use]
pub fn detailed(quote: &Quote, theme: &Theme, now: DateTime<Utc>) -> String {
    let label = |text: &str| theme.bold(Role::Secondary, text);

    let mut body = wrap_quoted(&quote.text, theme, true);
    body.push(String::new());
    body.push(theme.paint(Role::Secondary, &format!("— {}", quote.author)));

    if !quote.source.is_empty() {
        body.push(String::new());
        body.push(format!("{} {}", label("Source:"), quote.source));
    }
    if !quote.personal_note.is_empty() {
        body.push(String::new());
        body.push(label("Your note:"));
        for paragraph in quote.personal_note.lines() {
            body.extend(wrap(paragraph, PANEL_WIDTH));
        }
    }
    if !quote.categories.is_empty() {
        body.push(String::new());
        body.push(format!(
            "{} {}",
            label("Categories:"),
            theme.paint(Role::Emphasis, &quote.categories.join(", "))
        ));
    }

    body.push(String::new());
    body.push(format!("{} {}", label("Added:"), format_date(quote.date_added)));
    if let Some(modified) = quote.date_modified {
        body.push(format!("{} {}", label("Last modified:"), format_date(modified)));
    }
    if quote.last_shown.is_some() {
        body.push(format!(
            "{} {}",
            label("Last shown:"),
            format_relative_opt(quote.last_shown, now)
        ));
    }
    body.push(format!("{} {}", label("Times shown:"), quote.times_shown));

    panel(None, &body, theme)
}

/// Renders a summary list, at most `limit` rows.
#[must_use]
pub fn list(quotes: &[&Quote], theme: &Theme, limit: usize, now: DateTime<Utc>) -> String {
    if quotes.is_empty() {
        return format!("{}\n", theme.paint(Role::Warning, "No quotes found."));
    }

    let mut out = String::new();
    for quote in quotes.iter().take(limit) {
        let text = truncate(&quote.text, LIST_TEXT_WIDTH);
        let _ = writeln!(
            out,
            "{} {}",
            theme.paint(Role::Warning, &format!("({})", quote.short_id())),
            theme.paint(Role::Primary, &format!("\"{text}\"")),
        );
        let mut line = theme.paint(Role::Secondary, &format!("   — {}", quote.author));
        if !quote.categories.is_empty() {
            line.push_str(&theme.paint(Role::Emphasis, &format!(" | {}", quote.categories.join(", "))));
        }
        line.push_str(&theme.paint(
            Role::Dim,
            &format!(" | Added: {}", format_relative_time(quote.date_added, now)),
        ));
        out.push_str(&line);
        out.push('\n');
    }

    if quotes.len() > limit {
        let _ = writeln!(
            out,
            "\n{}",
            theme.paint(Role::Warning, &format!("Showing {limit} of {} quotes", quotes.len()))
        );
    }
    out
}

/// Renders search results with a count header.
#[must_use]
pub fn search_results(quotes: &[&Quote], query: &str, theme: &Theme, now: DateTime<Utc>) -> String {
    if quotes.is_empty() {
        return format!(
            "{}\n",
            theme.paint(Role::Warning, &format!("No quotes found matching '{query}'"))
        );
    }
    let mut out = format!(
        "\n{}\n\n",
        theme.bold(Role::Success, &format!("Found {} quote(s):", quotes.len()))
    );
    out.push_str(&list(quotes, theme, DEFAULT_LIST_LIMIT, now));
    out
}

/// Renders a duplicate warning comparing a stored quote with new text.
#[must_use]
pub fn similar_quote(similar: &SimilarQuote, new_text: &str, theme: &Theme) -> String {
    let percent = (similar.similarity * 100.0).round();
    let mut out = format!(
        "\n{}\n",
        theme.bold(
            Role::Warning,
            &format!("⚠️  Similar quote found ({percent:.0}% match, {}):", similar.level())
        )
    );
    if !similar.reason.is_empty() {
        let _ = writeln!(out, "{}", theme.paint(Role::Dim, &similar.reason));
    }
    let _ = writeln!(out, "\n{}", theme.bold(Role::Secondary, "Existing quote:"));
    let _ = writeln!(out, "  {}", theme.paint(Role::Primary, &format!("\"{}\"", similar.quote.text)));
    let _ = writeln!(out, "  {}", theme.paint(Role::Secondary, &format!("— {}", similar.quote.author)));
    let _ = writeln!(
        out,
        "  {}",
        theme.paint(Role::Dim, &format!("Added: {}", format_date(similar.quote.date_added)))
    );
    let _ = writeln!(out, "\n{}", theme.bold(Role::Secondary, "Your new quote:"));
    let _ = writeln!(out, "  {}", theme.paint(Role::Primary, &format!("\"{new_text}\"")));
    out
}

/// Renders a category suggestion.
#[must_use]
pub fn category_suggestion(suggestion: &CategorySuggestion, theme: &Theme) -> String {
    let mut out = format!(
        "{} {}\n",
        theme.paint(Role::Success, "Suggested categories:"),
        theme.paint(Role::Emphasis, &suggestion.categories.join(", "))
    );
    if !suggestion.reasoning.is_empty() {
        let _ = writeln!(out, "{}", theme.paint(Role::Dim, &suggestion.reasoning));
    }
    out
}

/// Renders an explanation panel.
#[must_use]
pub fn explanation(text: &str, theme: &Theme) -> String {
    let body: Vec<String> = text
        .lines()
        .flat_map(|line| {
            if line.trim().is_empty() {
                vec![String::new()]
            } else {
                wrap(line, PANEL_WIDTH)
            }
        })
        .collect();
    panel(Some("💡 AI Explanation"), &body, theme)
}

/// `✅ message`
#[must_use]
pub fn success(message: &str, theme: &Theme) -> String {
    theme.bold(Role::Success, &format!("✅ {message}"))
}

/// `❌ message`
#[must_use]
pub fn error(message: &str, theme: &Theme) -> String {
    theme.bold(Role::Error, &format!("❌ {message}"))
}

/// `⚠️ message`
#[must_use]
pub fn warning(message: &str, theme: &Theme) -> String {
    theme.bold(Role::Warning, &format!("⚠️  {message}"))
}

/// Informational line.
#[must_use]
pub fn info(message: &str, theme: &Theme) -> String {
    theme.paint(Role::Border, message)
}

/// Quote text wrapped inside quotation marks.
fn wrap_quoted(text: &str, theme: &Theme, bold: bool) -> Vec<String> {
    wrap(&format!("\"{text}\""), PANEL_WIDTH)
        .into_iter()
        .map(|line| {
            if bold {
                theme.bold(Role::Primary, &line)
            } else {
                theme.paint(Role::Primary, &line)
            }
        })
        .collect()
}

/// Draws a box around already-styled lines.
///
/// Widths are measured on the visible text, so styled lines are padded by
/// their unstyled width.
fn panel(title: Option<&str>, lines: &[String], theme: &Theme) -> String {
    let inner = PANEL_WIDTH + 4;
    let top = match title {
        Some(title) => {
            let label = format!(" {title} ");
            let fill = inner.saturating_sub(label.width() + 1);
            format!("╭─{}{}╮", theme.bold(Role::Primary, &label), theme.paint(Role::Border, &"─".repeat(fill)))
        },
        None => format!("╭{}╮", "─".repeat(inner)),
    };
    let bar = theme.paint(Role::Border, "│");
    let blank = format!("{bar}{}{bar}", " ".repeat(inner));

    let mut out = String::new();
    if title.is_some() {
        out.push_str(&top);
    } else {
        out.push_str(&theme.paint(Role::Border, &top));
    }
    out.push('\n');
    out.push_str(&blank);
    out.push('\n');
    for line in lines {
        let pad = PANEL_WIDTH.saturating_sub(visible_width(line));
        let _ = writeln!(out, "{bar}  {line}{}  {bar}", " ".repeat(pad));
    }
    out.push_str(&blank);
    out.push('\n');
    out.push_str(&theme.paint(Role::Border, &format!("╰{}╯", "─".repeat(inner))));
    out.push('\n');
    out
}

/// Display width ignoring ANSI escape sequences.
fn visible_width(s: &str) -> usize {
    let mut width = 0;
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            for end in chars.by_ref() {
                if end.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            width += c.width().unwrap_or(0);
        }
    }
    width
}

/// Greedy word wrap by display width; overlong words are split.
#[must_use]
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for source_line in text.lines() {
        let mut current = String::new();
        let mut current_width = 0;
        for word in source_line.split_whitespace() {
            let word_width = word.width();
            if current_width > 0 && current_width + 1 + word_width > width {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            if word_width > width {
                for c in word.chars() {
                    let w = c.width().unwrap_or(0);
                    if current_width + w > width {
                        lines.push(std::mem::take(&mut current));
                        current_width = 0;
                    }
                    current.push(c);
                    current_width += w;
                }
                continue;
            }
            if current_width > 0 {
                current.push(' ');
                current_width += 1;
            }
            current.push_str(word);
            current_width += word_width;
        }
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Cuts `text` to `max` columns, ending in `...` when shortened.
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    let budget = max.saturating_sub(3);
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ThemeName;

    fn plain() -> Theme {
        Theme::new(ThemeName::None)
    }

    fn sample() -> Quote {
        let mut quote = Quote::new("The only way out is through.");
        quote.author = "Robert Frost".to_string();
        quote.categories = vec!["resilience".to_string(), "growth".to_string()];
        quote
    }

    #[test]
    fn test_wrap_by_width() {
        let lines = wrap("one two three four five", 9);
        assert_eq!(lines, vec!["one two", "three", "four five"]);
        assert!(lines.iter().all(|l| l.width() <= 9));
    }

    #[test]
    fn test_wrap_splits_long_words_and_wide_chars() {
        assert_eq!(wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        let cjk = wrap("千里之行始于足下", 6);
        assert!(cjk.iter().all(|l| l.width() <= 6));
        assert_eq!(cjk.concat(), "千里之行始于足下");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 80), "short");
        let long = "x".repeat(100);
        let cut = truncate(&long, 80);
        assert_eq!(cut.width(), 80);
        assert!(cut.ends_with("..."));
    }

    #[test]
    fn test_visible_width_skips_escapes() {
        assert_eq!(visible_width("\u{1b}[1;36mhello\u{1b}[0m"), 5);
    }

    #[test]
    fn test_daily_panel_lines_align() {
        let quote = sample();
        let out = daily(&quote, &plain(), DisplayStyle::Boxed, true);
        let widths: Vec<usize> = out
            .lines()
            .filter(|l| l.starts_with('╭') || l.starts_with('│') || l.starts_with('╰'))
            .map(UnicodeWidthStr::width)
            .collect();
        assert!(widths.len() > 4);
        assert!(widths.windows(2).all(|w| w[0] == w[1]), "{out}");
        assert!(out.contains("— Robert Frost"));
        assert!(out.contains("Categories: resilience, growth"));
        assert!(out.contains(&format!("Quote #{} | Shown 0 times", quote.short_id())));
    }

    #[test]
    fn test_daily_hides_id_unless_asked() {
        let quote = sample();
        let boxed = daily(&quote, &plain(), DisplayStyle::Boxed, false);
        assert!(!boxed.contains(quote.short_id()));
        assert!(boxed.contains("Shown 0 times"));

        let minimal_out = daily(&quote, &plain(), DisplayStyle::Minimal, true);
        assert!(!minimal_out.contains('╭'));
        assert!(minimal_out.contains(&format!(
            "\"The only way out is through.\" — Robert Frost ({})",
            quote.short_id()
        )));
    }

    #[test]
    fn test_minimal_and_quiet() {
        let quote = sample();
        assert_eq!(
            minimal(&quote, &plain(), false),
            "\"The only way out is through.\" — Robert Frost\n"
        );
        let quiet = quiet_daily(&quote, &plain());
        let lines: Vec<&str> = quiet.lines().filter(|l| !l.is_empty()).collect();
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_detailed_optional_fields() {
        let mut quote = sample();
        let now = Utc::now();
        let out = detailed(&quote, &plain(), now);
        assert!(!out.contains("Source:"));
        assert!(!out.contains("Last shown:"));
        assert!(out.contains("Times shown: 0"));

        quote.source = "A Servant to Servants".to_string();
        quote.personal_note = "Keep going.".to_string();
        quote.mark_shown(now);
        let out = detailed(&quote, &plain(), now);
        assert!(out.contains("Source: A Servant to Servants"));
        assert!(out.contains("Your note:"));
        assert!(out.contains("Last shown: just now"));
    }

    #[test]
    fn test_list_limit_footer() {
        let quotes: Vec<Quote> = (0..12).map(|i| Quote::new(format!("q{i}"))).collect();
        let refs: Vec<&Quote> = quotes.iter().collect();
        let out = list(&refs, &plain(), 10, Utc::now());
        assert!(out.contains("Showing 10 of 12 quotes"));
        assert!(!out.contains("\"q11\""));
        assert_eq!(list(&[], &plain(), 10, Utc::now()), "No quotes found.\n");
    }

    #[test]
    fn test_search_results_header() {
        let quote = sample();
        let out = search_results(&[&quote], "way", &plain(), Utc::now());
        assert!(out.contains("Found 1 quote(s):"));
        assert!(search_results(&[], "zzz", &plain(), Utc::now()).contains("matching 'zzz'"));
    }

    #[test]
    fn test_similar_quote_panel() {
        let similar = SimilarQuote {
            quote: sample(),
            similarity: 0.91,
            reason: "Same wording".to_string(),
        };
        let out = similar_quote(&similar, "The only way out is thru", &plain());
        assert!(out.contains("91% match, high similarity"));
        assert!(out.contains("Your new quote:"));
    }
}
