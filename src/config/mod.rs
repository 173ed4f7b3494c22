//! Configuration management.
//!
//! Settings that belong to the machine rather than the collection (where the
//! data lives, which model to call, how to log) come from an optional TOML
//! file plus environment overrides. Collection-level preferences such as the
//! persisted theme live in the store document instead.

use crate::models::ThemeName;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Application directory name under the platform config and data dirs.
pub const APP_DIR_NAME: &str = "quotes-manager";

/// Main configuration for the quotes manager.
#[derive(Debug, Clone)]
pub struct QuotesConfig {
    /// Directory holding `quotes.json`.
    pub data_dir: PathBuf,
    /// Theme from the `[display]` section.
    pub theme: Option<ThemeName>,
    /// LLM provider configuration.
    pub llm: LlmConfig,
    /// Logging settings.
    pub logging: LoggingSettings,
}

/// LLM provider configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Model name.
    pub model: Option<String>,
    /// API base URL.
    pub endpoint: Option<String>,
    /// Default response token budget.
    pub max_tokens: Option<u32>,
    /// Request timeout in milliseconds.
    pub timeout_ms: Option<u64>,
    /// Connect timeout in milliseconds.
    pub connect_timeout_ms: Option<u64>,
}

/// Logging section in config file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `pretty` or `json`.
    pub format: Option<String>,
    /// Log file path; stderr when unset.
    pub file: Option<PathBuf>,
    /// `EnvFilter` directive, e.g. `quotes=debug`.
    pub filter: Option<String>,
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct ConfigFile {
    /// Data directory.
    pub data_dir: Option<String>,
    /// Display section.
    pub display: Option<ConfigFileDisplay>,
    /// LLM section.
    pub llm: Option<LlmConfig>,
    /// Logging section.
    pub logging: Option<LoggingSettings>,
}

/// Display section in config file.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct ConfigFileDisplay {
    /// Theme name.
    pub theme: Option<String>,
}

impl Default for QuotesConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            theme: None,
            llm: LlmConfig::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl QuotesConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> crate::Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| crate::Error::OperationFailed {
                operation: "read_config_file".to_string(),
                cause: e.to_string(),
            })?;

        Self::parse(&contents)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid configuration TOML.
    pub fn parse(contents: &str) -> crate::Result<Self> {
        let file: ConfigFile =
            toml::from_str(contents).map_err(|e| crate::Error::OperationFailed {
                operation: "parse_config_file".to_string(),
                cause: e.to_string(),
            })?;

        Ok(Self::from_config_file(file))
    }

    /// Loads configuration from the default location.
    ///
    /// Checks the following paths in order:
    /// 1. Platform-specific config dir (`~/Library/Application Support/quotes-manager/` on macOS)
    /// 2. XDG config dir (`~/.config/quotes-manager/` for Unix compatibility)
    ///
    /// Returns default configuration if no config file is found.
    #[must_use]
    pub fn load_default() -> Self {
        let Some(base_dirs) = directories::BaseDirs::new() else {
            return Self::default();
        };

        let platform_config = base_dirs.config_dir().join(APP_DIR_NAME).join("config.toml");
        let xdg_config = base_dirs
            .home_dir()
            .join(".config")
            .join(APP_DIR_NAME)
            .join("config.toml");

        for candidate in [platform_config, xdg_config] {
            if !candidate.exists() {
                continue;
            }
            match Self::load_from_file(&candidate) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!(path = %candidate.display(), error = %e, "Ignoring config file");
                },
            }
        }

        Self::default()
    }

    /// Loads configuration from `explicit` when given, else the default
    /// locations, then applies environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly named file cannot be loaded.
    pub fn load(explicit: Option<&Path>) -> crate::Result<Self> {
        let config = match explicit {
            Some(path) => Self::load_from_file(path)?,
            None => Self::load_default(),
        };
        Ok(config.with_env_overrides())
    }

    /// Applies `QUOTES_DATA_DIR`.
    ///
    /// `QUOTES_THEME` is read separately by [`theme_from_env`] because it
    /// ranks above the persisted preference.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(dir) = std::env::var("QUOTES_DATA_DIR") {
            if !dir.trim().is_empty() {
                self.data_dir = expand_home(dir.trim());
            }
        }
        self
    }

    /// Converts a `ConfigFile` to `QuotesConfig`.
    fn from_config_file(file: ConfigFile) -> Self {
        let mut config = Self::default();

        if let Some(data_dir) = file.data_dir {
            config.data_dir = expand_home(&data_dir);
        }
        if let Some(theme) = file.display.and_then(|d| d.theme) {
            config.theme = ThemeName::parse(&theme);
            if config.theme.is_none() {
                tracing::warn!(theme = %theme, "Unknown theme in config file");
            }
        }
        if let Some(llm) = file.llm {
            config.llm = llm;
        }
        if let Some(logging) = file.logging {
            config.logging = logging;
        }

        config
    }

    /// Sets the data directory.
    #[must_use]
    pub fn with_data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_dir = path.into();
        self
    }
}

/// Theme named by `QUOTES_THEME`, if valid.
#[must_use]
pub fn theme_from_env() -> Option<ThemeName> {
    std::env::var("QUOTES_THEME")
        .ok()
        .and_then(|v| ThemeName::parse(&v))
}

/// Resolves the active theme.
///
/// Precedence: explicit flag, `QUOTES_THEME`, persisted preference, config
/// file, then `auto`.
#[must_use]
pub fn resolve_theme(
    flag: Option<ThemeName>,
    env: Option<ThemeName>,
    persisted: Option<ThemeName>,
    config: Option<ThemeName>,
) -> ThemeName {
    flag.or(env).or(persisted).or(config).unwrap_or_default()
}

/// Platform data directory for the store.
fn default_data_dir() -> PathBuf {
    directories::BaseDirs::new().map_or_else(
        || PathBuf::from(".quotes-manager"),
        |dirs| dirs.data_dir().join(APP_DIR_NAME),
    )
}

/// Expands a leading `~/` to the home directory.
fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(dirs) = directories::BaseDirs::new() {
            return dirs.home_dir().join(rest);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
data_dir = "/tmp/quotes"

[display]
theme = "high-contrast"

[llm]
model = "claude-test"
max_tokens = 400
timeout_ms = 1000

[logging]
format = "json"
filter = "quotes=debug"
"#;
        let config = QuotesConfig::parse(toml).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/quotes"));
        assert_eq!(config.theme, Some(ThemeName::HighContrast));
        assert_eq!(config.llm.model.as_deref(), Some("claude-test"));
        assert_eq!(config.llm.max_tokens, Some(400));
        assert_eq!(config.llm.timeout_ms, Some(1000));
        assert!(config.llm.endpoint.is_none());
        assert_eq!(config.logging.format.as_deref(), Some("json"));
    }

    #[test]
    fn test_parse_empty_config_uses_defaults() {
        let config = QuotesConfig::parse("").unwrap();
        assert!(config.theme.is_none());
        assert!(config.data_dir.ends_with(APP_DIR_NAME) || config.data_dir.ends_with(".quotes-manager"));
    }

    #[test]
    fn test_unknown_theme_is_ignored() {
        let config = QuotesConfig::parse("[display]\ntheme = \"neon\"\n").unwrap();
        assert!(config.theme.is_none());
    }

    #[test]
    fn test_invalid_toml() {
        assert!(QuotesConfig::parse("data_dir = [").is_err());
    }

    #[test]
    fn test_resolve_theme_precedence() {
        use ThemeName::{Dark, HighContrast, Light, None as Plain};

        assert_eq!(resolve_theme(Some(Dark), Some(Light), Some(Plain), Some(HighContrast)), Dark);
        assert_eq!(resolve_theme(None, Some(Light), Some(Plain), Some(HighContrast)), Light);
        assert_eq!(resolve_theme(None, None, Some(Plain), Some(HighContrast)), Plain);
        assert_eq!(resolve_theme(None, None, None, Some(HighContrast)), HighContrast);
        assert_eq!(resolve_theme(None, None, None, None), ThemeName::Auto);
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("/abs/path"), PathBuf::from("/abs/path"));
        if let Some(dirs) = directories::BaseDirs::new() {
            assert_eq!(expand_home("~/quotes"), dirs.home_dir().join("quotes"));
        }
    }
}
