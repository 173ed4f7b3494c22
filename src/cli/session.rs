//! State shared by every command.

use super::Terminal;
use crate::Result;
use crate::models::{Settings, ThemeName};
use crate::rendering::{Theme, display};
use crate::services::{AiAssistant, QuoteService};
use crate::storage::QuoteStore;
use std::io::{BufRead, Write};

/// A running CLI session: the loaded collection, the AI helpers, the active
/// theme and the terminal.
pub struct Session<S: QuoteStore, R: BufRead, W: Write> {
    /// Quote collection.
    pub quotes: QuoteService<S>,
    /// AI helpers.
    pub ai: AiAssistant,
    /// Active theme.
    pub theme: Theme,
    /// Terminal I/O.
    pub term: Terminal<R, W>,
}

impl<S: QuoteStore, R: BufRead, W: Write> Session<S, R, W> {
    /// Creates a session.
    pub const fn new(quotes: QuoteService<S>, ai: AiAssistant, theme: Theme, term: Terminal<R, W>) -> Self {
        Self {
            quotes,
            ai,
            theme,
            term,
        }
    }

    /// Persisted settings.
    pub const fn settings(&self) -> &Settings {
        self.quotes.settings()
    }

    /// Switches the active theme for the rest of the session.
    pub fn set_theme(&mut self, name: ThemeName) {
        self.theme = Theme::new(name);
    }

    /// Writes a success line.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn success(&mut self, message: &str) -> Result<()> {
        let line = display::success(message, &self.theme);
        self.term.line(&line)
    }

    /// Writes an error line.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn error(&mut self, message: &str) -> Result<()> {
        let line = display::error(message, &self.theme);
        self.term.line(&line)
    }

    /// Writes a warning line.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn warning(&mut self, message: &str) -> Result<()> {
        let line = display::warning(message, &self.theme);
        self.term.line(&line)
    }

    /// Writes an informational line.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn info(&mut self, message: &str) -> Result<()> {
        let line = display::info(message, &self.theme);
        self.term.line(&line)
    }
}
