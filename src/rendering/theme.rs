//! Color themes.

use crate::models::ThemeName;
use colored::{Color, Colorize};

/// What a piece of text is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Quote text and headings.
    Primary,
    /// Authors and labels.
    Secondary,
    /// Categories and highlights.
    Emphasis,
    /// Confirmations.
    Success,
    /// Warnings and ids.
    Warning,
    /// Errors.
    Error,
    /// De-emphasized metadata.
    Dim,
    /// Panel borders.
    Border,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Tone {
    color: Option<Color>,
    dimmed: bool,
}

impl Tone {
    const fn plain() -> Self {
        Self {
            color: None,
            dimmed: false,
        }
    }

    const fn color(color: Color) -> Self {
        Self {
            color: Some(color),
            dimmed: false,
        }
    }

    const fn dim(color: Option<Color>) -> Self {
        Self {
            color,
            dimmed: true,
        }
    }
}

/// A resolved theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    name: ThemeName,
    primary: Tone,
    secondary: Tone,
    emphasis: Tone,
    success: Tone,
    warning: Tone,
    error: Tone,
    dim: Tone,
    border: Tone,
}

impl Theme {
    /// Builds the palette for `name`.
    #[must_use]
    pub const fn new(name: ThemeName) -> Self {
        match name {
            ThemeName::Auto => Self {
                name,
                primary: Tone::color(Color::Cyan),
                secondary: Tone::plain(),
                emphasis: Tone::color(Color::Magenta),
                success: Tone::color(Color::Green),
                warning: Tone::color(Color::Yellow),
                error: Tone::color(Color::Red),
                dim: Tone::dim(None),
                border: Tone::color(Color::Blue),
            },
            ThemeName::Dark => Self {
                name,
                primary: Tone::color(Color::BrightCyan),
                secondary: Tone::color(Color::BrightWhite),
                emphasis: Tone::color(Color::BrightMagenta),
                success: Tone::color(Color::BrightGreen),
                warning: Tone::color(Color::BrightYellow),
                error: Tone::color(Color::BrightRed),
                dim: Tone::color(Color::BrightWhite),
                border: Tone::color(Color::BrightBlue),
            },
            ThemeName::Light => Self {
                name,
                primary: Tone::color(Color::Blue),
                secondary: Tone::color(Color::Black),
                emphasis: Tone::color(Color::Magenta),
                success: Tone::color(Color::Green),
                // Dark goldenrod.
                warning: Tone::color(Color::TrueColor {
                    r: 184,
                    g: 134,
                    b: 11,
                }),
                error: Tone::color(Color::Red),
                dim: Tone::dim(Some(Color::Black)),
                border: Tone::color(Color::Blue),
            },
            ThemeName::HighContrast => Self {
                name,
                primary: Tone::color(Color::BrightWhite),
                secondary: Tone::color(Color::White),
                emphasis: Tone::color(Color::BrightYellow),
                success: Tone::color(Color::BrightGreen),
                warning: Tone::color(Color::BrightYellow),
                error: Tone::color(Color::BrightRed),
                dim: Tone::color(Color::White),
                border: Tone::color(Color::White),
            },
            ThemeName::None => Self {
                name,
                primary: Tone::plain(),
                secondary: Tone::plain(),
                emphasis: Tone::plain(),
                success: Tone::plain(),
                warning: Tone::plain(),
                error: Tone::plain(),
                dim: Tone::plain(),
                border: Tone::plain(),
            },
        }
    }

    /// The theme's name.
    #[must_use]
    pub const fn name(&self) -> ThemeName {
        self.name
    }

    /// Returns true when output carries no escape codes.
    #[must_use]
    pub const fn is_plain(&self) -> bool {
        matches!(self.name, ThemeName::None)
    }

    const fn tone(&self, role: Role) -> Tone {
        match role {
            Role::Primary => self.primary,
            Role::Secondary => self.secondary,
            Role::Emphasis => self.emphasis,
            Role::Success => self.success,
            Role::Warning => self.warning,
            Role::Error => self.error,
            Role::Dim => self.dim,
            Role::Border => self.border,
        }
    }

    /// Styles `text` for `role`.
    #[must_use]
    pub fn paint(&self, role: Role, text: &str) -> String {
        self.styled(role, text, false)
    }

    /// Styles `text` for `role` in bold.
    #[must_use]
    pub fn bold(&self, role: Role, text: &str) -> String {
        self.styled(role, text, !self.is_plain())
    }

    fn styled(&self, role: Role, text: &str, bold: bool) -> String {
        let tone = self.tone(role);
        if tone == Tone::plain() && !bold {
            return text.to_string();
        }
        let mut out = text.normal();
        if let Some(color) = tone.color {
            out = out.color(color);
        }
        if tone.dimmed {
            out = out.dimmed();
        }
        if bold {
            out = out.bold();
        }
        out.to_string()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(ThemeName::Auto)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_is_plain() {
        let theme = Theme::new(ThemeName::None);
        assert!(theme.is_plain());
        assert_eq!(theme.paint(Role::Primary, "hello"), "hello");
        assert_eq!(theme.bold(Role::Error, "boom"), "boom");
    }

    #[test]
    fn test_colored_themes_keep_text() {
        colored::control::set_override(true);
        for name in ThemeName::all() {
            let theme = Theme::new(*name);
            assert_eq!(theme.name(), *name);
            assert!(theme.paint(Role::Emphasis, "wisdom").contains("wisdom"));
        }
        let auto = Theme::default();
        assert_ne!(auto.paint(Role::Primary, "x"), "x");
        colored::control::unset_override();
    }
}
