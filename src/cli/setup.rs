//! `quotes setup`: shell startup integration instructions.

use super::Session;
use crate::Result;
use crate::rendering::Role;
use crate::storage::QuoteStore;
use std::fmt;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

/// Line users add to their shell profile.
pub const INTEGRATION_LINE: &str = "quotes daily --quiet";

/// Shell family detected from `$SHELL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellKind {
    /// zsh.
    Zsh,
    /// bash.
    Bash,
    /// fish.
    Fish,
    /// Anything else.
    Unknown,
}

impl fmt::Display for ShellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Zsh => "zsh",
            Self::Bash => "bash",
            Self::Fish => "fish",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Picks the shell and its profile file under `home`.
///
/// bash prefers `.bash_profile` when it exists; unknown shells get `.bashrc`.
#[must_use]
pub fn detect_shell(shell_env: Option<&str>, home: &Path) -> (ShellKind, PathBuf) {
    let shell = shell_env.unwrap_or_default();
    if shell.contains("zsh") {
        (ShellKind::Zsh, home.join(".zshrc"))
    } else if shell.contains("bash") {
        let profile = home.join(".bash_profile");
        if profile.exists() {
            (ShellKind::Bash, profile)
        } else {
            (ShellKind::Bash, home.join(".bashrc"))
        }
    } else if shell.contains("fish") {
        (ShellKind::Fish, home.join(".config").join("fish").join("config.fish"))
    } else {
        (ShellKind::Unknown, home.join(".bashrc"))
    }
}

/// Prints setup instructions for the detected shell.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn run<S, R, W>(session: &mut Session<S, R, W>, shell_env: Option<&str>, home: &Path) -> Result<()>
where
    S: QuoteStore,
    R: BufRead,
    W: Write,
{
    let (shell, profile) = detect_shell(shell_env, home);
    let theme = session.theme.clone();
    let profile = profile.display();

    let mut out = format!(
        "\n{}\n\nThis shows how to add a daily quote to your shell startup.\n\
         You'll see a quote each time you open a new terminal.\n\n",
        theme.bold(Role::Primary, "Shell Integration Setup")
    );
    out.push_str(&format!("{} {shell}\n", theme.paint(Role::Success, "✓ Detected shell:")));
    out.push_str(&format!("{} {profile}\n\n", theme.paint(Role::Success, "✓ Profile file:")));
    out.push_str(&format!(
        "{}\n\n    {}\n\n",
        theme.bold(Role::Emphasis, "Add this line to your shell profile:"),
        theme.bold(Role::Primary, INTEGRATION_LINE)
    ));
    out.push_str(&format!("{}\n\n", theme.bold(Role::Emphasis, "Instructions:")));
    out.push_str(&format!(
        "  1. Open your profile file: {}\n",
        theme.paint(Role::Primary, &profile.to_string())
    ));
    out.push_str("  2. Add the line above at the end of the file\n");
    out.push_str("  3. Save and close the file\n");
    out.push_str(&format!(
        "  4. Restart your terminal, or run: {}\n\n",
        theme.paint(Role::Primary, &format!("source {profile}"))
    ));
    out.push_str(&format!(
        "{}\n",
        theme.paint(
            Role::Success,
            "✓ That's it! Your daily quote will appear when you open a new terminal."
        )
    ));
    session.term.write(&out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use test_case::test_case;

    #[test_case(Some("/bin/zsh"), ShellKind::Zsh, ".zshrc"; "zsh")]
    #[test_case(Some("/usr/local/bin/fish"), ShellKind::Fish, ".config/fish/config.fish"; "fish")]
    #[test_case(Some("/bin/tcsh"), ShellKind::Unknown, ".bashrc"; "unknown shell")]
    #[test_case(None, ShellKind::Unknown, ".bashrc"; "unset")]
    #[test_case(Some("/bin/bash"), ShellKind::Bash, ".bashrc"; "bash without profile")]
    fn test_detect_shell(shell: Option<&str>, kind: ShellKind, profile: &str) {
        let home = TempDir::new().unwrap();
        let (detected, path) = detect_shell(shell, home.path());
        assert_eq!(detected, kind);
        assert_eq!(path, home.path().join(profile));
    }

    #[test]
    fn test_bash_prefers_bash_profile() {
        let home = TempDir::new().unwrap();
        std::fs::write(home.path().join(".bash_profile"), "").unwrap();
        let (kind, path) = detect_shell(Some("/bin/bash"), home.path());
        assert_eq!(kind, ShellKind::Bash);
        assert_eq!(path, home.path().join(".bash_profile"));
    }
}
