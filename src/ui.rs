//! Terminal output for the `=== ` protocol.
//!
//! Every status or diagnostic line goes to stdout with a `=== ` prefix, which
//! prompt scripts parse. Profile names from `list`/`current` are printed bare.
//! Color only ever touches the prefix, so stripping escapes never changes what
//! a script sees after it.

use anstream::{ColorChoice, println};
use anstyle::{AnsiColor, Color, Style};
use clap::ValueEnum;
use std::io::IsTerminal;

/// Prefix of every status and diagnostic line
pub const STATUS_PREFIX: &str = "===";

/// `--color` choices
#[derive(ValueEnum, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Always,
    /// Color the prefix only when stdout is a terminal
    #[default]
    Auto,
    Never,
}

/// Resolved display settings
#[derive(Debug, Clone)]
pub struct Ui {
    pub color_enabled: bool,
}

impl Ui {
    /// `--no-color`, `NO_COLOR` and `TERM=dumb` all beat `--color always`
    pub fn new(mode: ColorMode, no_color_flag: bool) -> Self {
        let color_enabled = !no_color_flag && !color_disabled_by_env() && mode_allows_color(mode);

        let choice = match (color_enabled, mode) {
            (false, _) => ColorChoice::Never,
            (true, ColorMode::Always) => ColorChoice::Always,
            (true, _) => ColorChoice::Auto,
        };
        ColorChoice::write_global(choice);

        Self { color_enabled }
    }

    fn style_prefix(&self, color: AnsiColor) -> Style {
        if self.color_enabled {
            Style::new().fg_color(Some(Color::Ansi(color))).bold()
        } else {
            Style::new()
        }
    }

    /// Print a `=== ` status line (cyan prefix) to stdout
    pub fn status(&self, msg: impl AsRef<str>) {
        let prefix = self.style_prefix(AnsiColor::Cyan);
        println!("{prefix}{STATUS_PREFIX}{prefix:#} {}", msg.as_ref());
    }

    /// Print a `=== ` diagnostic line (red prefix) to stdout
    pub fn error(&self, msg: impl AsRef<str>) {
        let prefix = self.style_prefix(AnsiColor::Red);
        println!("{prefix}{STATUS_PREFIX}{prefix:#} {}", msg.as_ref());
    }

    /// Print a bare line to stdout
    pub fn println(&self, msg: impl AsRef<str>) {
        println!("{}", msg.as_ref());
    }
}

fn color_disabled_by_env() -> bool {
    std::env::var_os("NO_COLOR").is_some() || std::env::var_os("TERM").is_some_and(|t| t == "dumb")
}

fn mode_allows_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Auto => std::io::stdout().is_terminal(),
        ColorMode::Never => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_color_mode_values() {
        assert_eq!(ColorMode::from_str("never", false), Ok(ColorMode::Never));
        assert_eq!(ColorMode::from_str("Always", true), Ok(ColorMode::Always));
        assert!(ColorMode::from_str("sometimes", true).is_err());
        assert_eq!(ColorMode::default(), ColorMode::Auto);
    }

    #[test]
    fn test_ui_force_no_color() {
        let ui = Ui::new(ColorMode::Always, true);
        assert!(!ui.color_enabled);
    }

    #[test]
    fn test_ui_never_mode() {
        let ui = Ui::new(ColorMode::Never, false);
        assert!(!ui.color_enabled);
    }

    #[test]
    #[serial]
    fn test_no_color_env_overrides_always() {
        // SAFETY: serialized with every other test that touches the environment
        unsafe { std::env::set_var("NO_COLOR", "1") };
        let ui = Ui::new(ColorMode::Always, false);
        unsafe { std::env::remove_var("NO_COLOR") };
        assert!(!ui.color_enabled);
    }

    #[test]
    #[serial]
    fn test_dumb_term_disables_color() {
        let previous = std::env::var_os("TERM");
        // SAFETY: serialized with every other test that touches the environment
        unsafe { std::env::set_var("TERM", "dumb") };
        let ui = Ui::new(ColorMode::Always, false);
        match previous {
            Some(term) => unsafe { std::env::set_var("TERM", term) },
            None => unsafe { std::env::remove_var("TERM") },
        }
        assert!(!ui.color_enabled);
    }
}
