//! Line-oriented prompts over any reader and writer.
//!
//! End of input never errors: prompts fall back to their default so piped
//! and scripted sessions finish cleanly.

use crate::{Error, Result};
use std::io::{BufRead, Write};

/// Line that ends multi-line entry.
pub const MULTILINE_TERMINATOR: &str = "END";

/// Interactive terminal.
pub struct Terminal<R: BufRead, W: Write> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    /// Wraps a reader and writer.
    pub const fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Returns the writer.
    pub const fn writer(&self) -> &W {
        &self.writer
    }

    /// Consumes the terminal, returning the writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Writes text as-is.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn write(&mut self, text: &str) -> Result<()> {
        self.writer
            .write_all(text.as_bytes())
            .and_then(|()| self.writer.flush())
            .map_err(io_error("write_terminal"))
    }

    /// Writes a line.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn line(&mut self, text: &str) -> Result<()> {
        self.write(text)?;
        self.write("\n")
    }

    /// Writes an empty line.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn blank(&mut self) -> Result<()> {
        self.write("\n")
    }

    /// Reads one line without its terminator. `None` at end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails.
    pub fn read_line(&mut self) -> Result<Option<String>> {
        let mut buf = String::new();
        let read = self
            .reader
            .read_line(&mut buf)
            .map_err(io_error("read_terminal"))?;
        if read == 0 {
            return Ok(None);
        }
        let trimmed = buf.trim_end_matches(['\n', '\r']).len();
        buf.truncate(trimmed);
        Ok(Some(buf))
    }

    /// Asks for a value. Blank input or end of input yields `default`.
    ///
    /// # Errors
    ///
    /// Returns an error on I/O failure.
    pub fn prompt(&mut self, label: &str, default: Option<&str>) -> Result<String> {
        match default {
            Some(d) if !d.is_empty() => self.write(&format!("{label} [{d}]: "))?,
            _ => self.write(&format!("{label}: "))?,
        }
        let answer = self.read_line()?.unwrap_or_default();
        let answer = answer.trim();
        if answer.is_empty() {
            Ok(default.unwrap_or_default().to_string())
        } else {
            Ok(answer.to_string())
        }
    }

    /// Asks a yes/no question.
    ///
    /// # Errors
    ///
    /// Returns an error on I/O failure.
    pub fn confirm(&mut self, question: &str, default: bool) -> Result<bool> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        loop {
            self.write(&format!("{question} {hint}: "))?;
            let Some(answer) = self.read_line()? else {
                self.blank()?;
                return Ok(default);
            };
            match answer.trim().to_lowercase().as_str() {
                "" => return Ok(default),
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => self.line("Please answer y or n.")?,
            }
        }
    }

    /// Asks until one of `choices` is entered (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error on I/O failure.
    pub fn choice(&mut self, label: &str, choices: &[&str], default: &str) -> Result<String> {
        loop {
            self.write(&format!("{label} ({}) [{default}]: ", choices.join("/")))?;
            let Some(answer) = self.read_line()? else {
                self.blank()?;
                return Ok(default.to_string());
            };
            let answer = answer.trim().to_lowercase();
            if answer.is_empty() {
                return Ok(default.to_string());
            }
            if choices.contains(&answer.as_str()) {
                return Ok(answer);
            }
            self.line(&format!("Please choose one of: {}", choices.join(", ")))?;
        }
    }

    /// Reads lines until a line holding only [`MULTILINE_TERMINATOR`] or end
    /// of input.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cancelled`] when nothing was entered, or an I/O error.
    pub fn multiline(&mut self, intro: &str) -> Result<String> {
        self.line(intro)?;
        let mut lines = Vec::new();
        while let Some(line) = self.read_line()? {
            if line.trim() == MULTILINE_TERMINATOR {
                break;
            }
            lines.push(line);
        }
        let text = lines.join("\n").trim().to_string();
        if text.is_empty() {
            return Err(Error::Cancelled);
        }
        Ok(text)
    }
}

fn io_error(operation: &'static str) -> impl Fn(std::io::Error) -> Error {
    move |e| Error::OperationFailed {
        operation: operation.to_string(),
        cause: e.to_string(),
    }
}
