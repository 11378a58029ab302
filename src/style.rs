//! SGR text styles for building modifier tables.
//!
//! - [`TextAttributes`]: Bitflags for bold, dim, italic, underline, etc.
//! - [`Style`]: 256-color palette foreground/background plus attributes
//!
//! A [`Style`] renders to the literal escape prefix stored in a modifier
//! table, so styles compose by string concatenation at render time.
//!
//! # Examples
//!
//! ```
//! use yapl_rust::Style;
//! use yapl_rust::ansi::palette;
//!
//! let critical = Style::fg(palette::WHITE).with_bg(palette::RED);
//! assert_eq!(critical.to_sgr(), "\x1b[38;5;15m\x1b[48;5;1m");
//!
//! let loud = Style::bold().with_fg(palette::WHITE);
//! assert_eq!(loud.to_sgr(), "\x1b[1m\x1b[38;5;15m");
//! ```

use crate::ansi::sequences::{bg_256, fg_256};
use bitflags::bitflags;

bitflags! {
    /// Text rendering attributes (bold, italic, underline, etc.).
    ///
    /// Attributes are represented as bitflags and can be combined using
    /// bitwise OR. Not all terminals support all attributes.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
    pub struct TextAttributes: u8 {
        /// Bold/increased intensity.
        const BOLD          = 0x01;
        /// Dim/decreased intensity.
        const DIM           = 0x02;
        /// Italic (not widely supported).
        const ITALIC        = 0x04;
        /// Underlined text.
        const UNDERLINE     = 0x08;
        /// Blinking text (rarely supported).
        const BLINK         = 0x10;
        /// Swapped foreground/background.
        const INVERSE       = 0x20;
        /// Hidden/invisible text.
        const HIDDEN        = 0x40;
        /// Strikethrough text.
        const STRIKETHROUGH = 0x80;
    }
}

impl TextAttributes {
    /// SGR parameter for each attribute, in emission order.
    const SGR_CODES: [(Self, u8); 8] = [
        (Self::BOLD, 1),
        (Self::DIM, 2),
        (Self::ITALIC, 3),
        (Self::UNDERLINE, 4),
        (Self::BLINK, 5),
        (Self::INVERSE, 7),
        (Self::HIDDEN, 8),
        (Self::STRIKETHROUGH, 9),
    ];

    /// One `ESC[<n>m` sequence per set attribute.
    #[must_use]
    pub fn to_sgr(self) -> String {
        Self::SGR_CODES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, code)| format!("\x1b[{code}m"))
            .collect()
    }
}

/// Text style using the 256-color palette.
///
/// `None` for colors means "use terminal default" rather than a specific color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Style {
    /// Foreground palette index (None = terminal default).
    pub fg: Option<u8>,
    /// Background palette index (None = terminal default).
    pub bg: Option<u8>,
    /// Text rendering attributes.
    pub attributes: TextAttributes,
}

impl Style {
    /// Empty style with no colors or attributes.
    pub const NONE: Self = Self {
        fg: None,
        bg: None,
        attributes: TextAttributes::empty(),
    };

    /// Create a style with only foreground color.
    #[must_use]
    pub const fn fg(index: u8) -> Self {
        Self {
            fg: Some(index),
            bg: None,
            attributes: TextAttributes::empty(),
        }
    }

    /// Create a style with only background color.
    #[must_use]
    pub const fn bg(index: u8) -> Self {
        Self {
            fg: None,
            bg: Some(index),
            attributes: TextAttributes::empty(),
        }
    }

    /// Create a bold style.
    #[must_use]
    pub const fn bold() -> Self {
        Self {
            fg: None,
            bg: None,
            attributes: TextAttributes::BOLD,
        }
    }

    /// Return a new style with the specified foreground color.
    #[must_use]
    pub const fn with_fg(self, index: u8) -> Self {
        Self {
            fg: Some(index),
            ..self
        }
    }

    /// Return a new style with the specified background color.
    #[must_use]
    pub const fn with_bg(self, index: u8) -> Self {
        Self {
            bg: Some(index),
            ..self
        }
    }

    /// Return a new style with the specified attributes added.
    #[must_use]
    pub const fn with_attributes(self, attrs: TextAttributes) -> Self {
        Self {
            attributes: self.attributes.union(attrs),
            ..self
        }
    }

    /// Return a new style with the bold attribute added.
    #[must_use]
    pub const fn with_bold(self) -> Self {
        self.with_attributes(TextAttributes::BOLD)
    }

    /// Check if this style has any non-default properties.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && self.attributes.is_empty()
    }

    /// Render as escape sequences: attributes, then foreground, then background.
    ///
    /// An empty style renders as the empty string.
    #[must_use]
    pub fn to_sgr(&self) -> String {
        let mut out = self.attributes.to_sgr();
        if let Some(fg) = self.fg {
            out.push_str(&fg_256(fg));
        }
        if let Some(bg) = self.bg {
            out.push_str(&bg_256(bg));
        }
        out
    }
}
