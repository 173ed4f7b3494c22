//! Human-friendly dates.

use chrono::{DateTime, Utc};

/// Formats `at` relative to `now`, e.g. `"3 days ago"`.
#[must_use]
pub fn format_relative_time(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = now - at;
    let days = delta.num_days();

    if days <= 0 {
        let seconds = delta.num_seconds().max(0);
        return if seconds < 60 {
            "just now".to_string()
        } else if seconds < 3600 {
            plural(seconds / 60, "minute")
        } else {
            plural(seconds / 3600, "hour")
        };
    }

    match days {
        1 => "yesterday".to_string(),
        2..7 => format!("{days} days ago"),
        7..30 => plural(days / 7, "week"),
        30..365 => plural(days / 30, "month"),
        _ => plural(days / 365, "year"),
    }
}

/// Formats an optional timestamp, `"never"` when unset.
#[must_use]
pub fn format_relative_opt(at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    at.map_or_else(|| "never".to_string(), |at| format_relative_time(at, now))
}

/// Formats a date like `"March 15, 2024"`.
#[must_use]
pub fn format_date(at: DateTime<Utc>) -> String {
    at.format("%B %d, %Y").to_string()
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}
