//! Color support detection.

use super::size::is_tty;
use std::env;
use std::io;

/// Color support level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum ColorSupport {
    /// No color support.
    #[default]
    None,
    /// 16 colors (basic ANSI).
    Basic,
    /// 256 colors.
    Extended,
    /// True color (16 million colors).
    TrueColor,
}

impl ColorSupport {
    /// Detect color support from `NO_COLOR`, `TERM` and `COLORTERM`.
    #[must_use]
    pub fn detect() -> Self {
        let no_color = env::var("NO_COLOR").ok();
        let term = env::var("TERM").unwrap_or_default();
        let colorterm = env::var("COLORTERM").unwrap_or_default();
        Self::from_env(no_color.as_deref(), &term, &colorterm)
    }

    /// Color support for output written to stdout.
    ///
    /// Redirected stdout (a pipe or file) gets no color whatever the
    /// environment says.
    #[must_use]
    pub fn detect_stdout() -> Self {
        Self::for_output(is_tty(&io::stdout()), Self::detect())
    }

    /// Combine TTY status with environment detection.
    #[must_use]
    pub fn for_output(tty: bool, detected: Self) -> Self {
        if tty { detected } else { Self::None }
    }

    /// Pure form of [`Self::detect`].
    ///
    /// `NO_COLOR` set to any value, or `TERM=dumb`, disables color.
    #[must_use]
    pub fn from_env(no_color: Option<&str>, term: &str, colorterm: &str) -> Self {
        if no_color.is_some() || term == "dumb" {
            return Self::None;
        }

        if colorterm.eq_ignore_ascii_case("truecolor") || colorterm.eq_ignore_ascii_case("24bit") {
            return Self::TrueColor;
        }

        if term.contains("24bit") || term.contains("truecolor") {
            return Self::TrueColor;
        }

        if term.contains("256") {
            return Self::Extended;
        }

        // Assume basic color if TERM is set
        if !term.is_empty() {
            return Self::Basic;
        }

        Self::None
    }

    /// Check if the palette sequences used by the built-in styles render.
    #[must_use]
    pub fn has_256_colors(self) -> bool {
        self >= Self::Extended
    }

    /// Check if any color output is wanted.
    #[must_use]
    pub fn is_enabled(self) -> bool {
        self != Self::None
    }
}
