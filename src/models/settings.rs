//! Persisted user settings.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Current settings schema version.
pub const SETTINGS_VERSION: &str = "1.0";

/// Default duplicate threshold in percent.
pub const DEFAULT_DUPLICATE_THRESHOLD: u8 = 70;

/// Named color themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeName {
    /// Terminal default palette.
    #[default]
    Auto,
    /// Bright colors for dark backgrounds.
    Dark,
    /// Deep colors for light backgrounds.
    Light,
    /// Maximum contrast.
    HighContrast,
    /// Plain text.
    None,
}

impl ThemeName {
    /// Returns all themes in menu order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Auto,
            Self::Dark,
            Self::Light,
            Self::HighContrast,
            Self::None,
        ]
    }

    /// Returns the theme as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Dark => "dark",
            Self::Light => "light",
            Self::HighContrast => "high-contrast",
            Self::None => "none",
        }
    }

    /// Short description shown in the theme picker.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Auto => "Adapts to your terminal's default colors",
            Self::Dark => "Optimized for dark terminal backgrounds",
            Self::Light => "Optimized for light terminal backgrounds",
            Self::HighContrast => "Maximum contrast for accessibility",
            Self::None => "No colors, plain text only",
        }
    }

    /// Parses a theme name, ignoring case.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            "high-contrast" | "high_contrast" | "highcontrast" => Some(Self::HighContrast),
            "none" => Some(Self::None),
            _ => None,
        }
    }

    /// Comma-separated list of every theme name.
    #[must_use]
    pub fn available() -> String {
        Self::all()
            .iter()
            .map(Self::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a single quote is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayStyle {
    /// Bordered panel.
    #[default]
    Boxed,
    /// Quote and author only.
    Minimal,
}

/// Display and shell preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Persisted theme choice.
    pub theme: Option<ThemeName>,
    /// Whether `daily --quiet` prints at shell startup.
    pub daily_quote_enabled: bool,
    /// Preferred time of day for the daily quote (`HH:MM`).
    ///
    /// Stored and round-tripped only; no command reads it.
    pub daily_quote_time: String,
    /// Whether the shell startup hook was set up.
    ///
    /// Stored and round-tripped only; no command reads it.
    pub shell_integration: bool,
    /// Whether the daily quote shows its short id.
    pub show_quote_id: bool,
    /// How `daily` renders the quote.
    pub display_style: DisplayStyle,
    /// Whether author lookup may fall back to a web search.
    pub enable_web_search_author: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: None,
            daily_quote_enabled: true,
            daily_quote_time: "08:00".to_string(),
            shell_integration: false,
            show_quote_id: false,
            display_style: DisplayStyle::Boxed,
            enable_web_search_author: true,
        }
    }
}

/// Toggles for the AI helpers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiSettings {
    /// Explanations in `view`.
    pub enable_explanations: bool,
    /// Author lookup in `add`.
    pub enable_author_lookup: bool,
    /// Duplicate warnings in `add`.
    pub enable_duplicate_detection: bool,
    /// Category suggestions in `add`.
    pub enable_categorization: bool,
    /// Minimum similarity, in percent, for a duplicate warning.
    ///
    /// Stores written before this setting was honored may carry a value
    /// other than the default 70 (commonly 85). That value is used as is, so
    /// such collections get a stricter check until it is changed back.
    #[serde(deserialize_with = "deserialize_threshold")]
    pub duplicate_threshold: u8,
}

impl AiSettings {
    /// Duplicate threshold as a fraction in `0.0..=1.0`.
    #[must_use]
    pub fn duplicate_threshold_ratio(&self) -> f32 {
        f32::from(self.duplicate_threshold.min(100)) / 100.0
    }
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            enable_explanations: true,
            enable_author_lookup: true,
            enable_duplicate_detection: true,
            enable_categorization: true,
            duplicate_threshold: DEFAULT_DUPLICATE_THRESHOLD,
        }
    }
}

fn deserialize_threshold<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let raw = f64::deserialize(deserializer)?;
    if raw.is_nan() {
        return Ok(DEFAULT_DUPLICATE_THRESHOLD);
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Ok(raw.round().clamp(0.0, 100.0) as u8)
}

/// Everything persisted alongside the quotes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Schema version.
    pub version: String,
    /// Categories the user added beyond the predefined list.
    pub custom_categories: Vec<String>,
    /// Display preferences.
    pub preferences: Preferences,
    /// AI toggles.
    pub ai: AiSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: SETTINGS_VERSION.to_string(),
            custom_categories: Vec::new(),
            preferences: Preferences::default(),
            ai: AiSettings::default(),
        }
    }
}

impl Settings {
    /// Adds a custom category if it is new. Returns true when added.
    pub fn add_custom_category(&mut self, category: &str) -> bool {
        let tag = category.trim().to_lowercase();
        if tag.is_empty() || self.custom_categories.contains(&tag) {
            return false;
        }
        self.custom_categories.push(tag);
        true
    }
}
