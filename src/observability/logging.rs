//! Structured logging configuration.

use crate::config::LoggingSettings;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
pub const LOG_FILTER_ENV: &str = "QUOTES_LOG";

/// Filter when nothing else is configured.
const DEFAULT_FILTER: &str = "warn";

/// Filter when `--verbose` is passed.
const VERBOSE_FILTER: &str = "quotes=debug,warn";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

impl LogFormat {
    /// Parses a format name; anything unknown is `Pretty`.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Pretty,
        }
    }
}

/// Resolved logging configuration.
#[derive(Debug)]
pub struct LoggingConfig {
    /// Output format.
    pub format: LogFormat,
    /// Event filter.
    pub filter: EnvFilter,
    /// Log file; stderr when `None`.
    pub file: Option<PathBuf>,
}

impl LoggingConfig {
    /// Builds logging config from the config file section.
    ///
    /// Filter precedence: `--verbose`, `QUOTES_LOG`, config file, `warn`.
    #[must_use]
    pub fn from_settings(settings: Option<&LoggingSettings>, verbose: bool) -> Self {
        let format = settings
            .and_then(|s| s.format.as_deref())
            .map(LogFormat::parse)
            .unwrap_or_default();
        let file = settings.and_then(|s| s.file.clone());

        let directive = if verbose {
            VERBOSE_FILTER.to_string()
        } else {
            std::env::var(LOG_FILTER_ENV)
                .ok()
                .filter(|v| !v.trim().is_empty())
                .or_else(|| settings.and_then(|s| s.filter.clone()))
                .unwrap_or_else(|| DEFAULT_FILTER.to_string())
        };

        let filter = EnvFilter::try_new(&directive).unwrap_or_else(|e| {
            tracing::warn!(directive = %directive, error = %e, "Invalid log filter");
            EnvFilter::new(DEFAULT_FILTER)
        });

        Self {
            format,
            filter,
            file,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Pretty,
            filter: EnvFilter::new(DEFAULT_FILTER),
            file: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse("JSON"), LogFormat::Json);
        assert_eq!(LogFormat::parse("pretty"), LogFormat::Pretty);
        assert_eq!(LogFormat::parse("xml"), LogFormat::Pretty);
    }

    #[test]
    fn test_verbose_wins() {
        let settings = LoggingSettings {
            filter: Some("error".to_string()),
            ..Default::default()
        };
        let config = LoggingConfig::from_settings(Some(&settings), true);
        assert_eq!(config.filter.to_string(), EnvFilter::new(VERBOSE_FILTER).to_string());
    }

    #[test]
    fn test_settings_format_and_file() {
        let settings = LoggingSettings {
            format: Some("json".to_string()),
            file: Some(PathBuf::from("/tmp/quotes.log")),
            filter: None,
        };
        let config = LoggingConfig::from_settings(Some(&settings), false);
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.file, Some(PathBuf::from("/tmp/quotes.log")));
    }
}
