//! `quotes daily`.

use super::Session;
use crate::Result;
use crate::rendering::display;
use crate::services::DailyService;
use crate::storage::QuoteStore;
use chrono::{DateTime, Utc};
use rand::Rng;
use std::io::{BufRead, Write};

/// Arguments for `daily`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DailyArgs {
    /// Two-line output for shell startup; silent when empty.
    pub quiet: bool,
    /// Pick a new quote even if one was shown today.
    pub force: bool,
}

/// Runs `daily` at `now`.
///
/// The quiet form prints nothing when the daily quote is turned off in
/// settings, and then does not advance the rotation.
///
/// # Errors
///
/// Returns an error if saving the rotation or writing fails.
pub fn run<S, R, W, G>(
    session: &mut Session<S, R, W>,
    args: DailyArgs,
    now: DateTime<Utc>,
    rng: &mut G,
) -> Result<()>
where
    S: QuoteStore,
    R: BufRead,
    W: Write,
    G: Rng + ?Sized,
{
    if args.quiet && !session.settings().preferences.daily_quote_enabled {
        tracing::debug!("Daily quote disabled, skipping");
        return Ok(());
    }

    let picked = DailyService::new(&mut session.quotes).select(args.force, now, rng)?;

    match picked {
        Some(quote) if args.quiet => {
            let out = display::quiet_daily(&quote, &session.theme);
            session.term.write(&out)
        },
        Some(quote) => {
            let prefs = &session.settings().preferences;
            let out = display::daily(&quote, &session.theme, prefs.display_style, prefs.show_quote_id);
            session.term.write(&out)
        },
        None if args.quiet => Ok(()),
        None => session.warning("No quotes found. Add your first quote with 'quotes add'"),
    }
}
