//! Built-in styles.
//!
//! The console styles colour the event tag and message per event type and
//! run messages through [`highlight_message`]. The file style is plain text.

mod highlight;

pub use highlight::{Span, SpanKind, highlight_message, scan};

use crate::ansi::palette;
use crate::error::Result;
use crate::style::Style;
use crate::template::{ModifierTable, StyleTemplate};
use crate::terminal::ColorSupport;

/// Standard event type names, in verbosity order (most verbose first).
pub const STANDARD_EVENT_TYPES: [&str; 5] = ["DEBUG", "WARNING", "ERROR", "INFO", "CRITICAL"];

const DATE_PART: &str =
    "{year}-{month:02d}-{day:02d} {hour:02d}:{minute:02d}:{second:02d}.{microsecond}|";
const CONSOLE_LOCATION: &str = "\x1b[1m<{location}>\x1b[0m";
const CONSOLE_EVENT: &str = "[{EVENT_TYPE_style_modifier}{event_type}\x1b[0m]:";
const CONSOLE_MESSAGE: &str = "{EVENT_TYPE_msg_style_modifier}{message}\x1b[0m";

/// Per-event colours for the event tag and the message of console styles.
#[must_use]
pub fn stdout_modifiers() -> ModifierTable {
    let tag = [
        ("INFO", Style::NONE),
        ("DEBUG", Style::fg(palette::GREEN)),
        ("WARNING", Style::fg(palette::YELLOW)),
        ("ERROR", Style::fg(palette::RED)),
        ("CRITICAL", Style::fg(palette::WHITE).with_bg(palette::RED)),
    ];
    let message = [
        ("INFO", Style::NONE),
        ("DEBUG", Style::fg(palette::WHITE)),
        ("WARNING", Style::fg(palette::WHITE)),
        ("ERROR", Style::bold().with_fg(palette::WHITE)),
        ("CRITICAL", Style::bold().with_fg(palette::RED)),
    ];
    ModifierTable::new()
        .with(
            "EVENT_TYPE",
            "style_modifier",
            tag.map(|(event, style)| (event, style.to_sgr())),
        )
        .with(
            "EVENT_TYPE",
            "msg_style_modifier",
            message.map(|(event, style)| (event, style.to_sgr())),
        )
}

/// Date, caller location, coloured event tag and highlighted message.
pub fn stdout_full_info() -> Result<StyleTemplate> {
    StyleTemplate::builder("{date}{location}{event}{message}")
        .part("date", DATE_PART)
        .part("location", CONSOLE_LOCATION)
        .part("event", CONSOLE_EVENT)
        .part("message", CONSOLE_MESSAGE)
        .modifiers(stdout_modifiers())
        .transform("message", highlight_message)
        .build()
}

/// Caller location, coloured event tag and highlighted message.
pub fn stdout() -> Result<StyleTemplate> {
    StyleTemplate::builder("{location}{event}{message}")
        .part("location", CONSOLE_LOCATION)
        .part("event", CONSOLE_EVENT)
        .part("message", CONSOLE_MESSAGE)
        .modifiers(stdout_modifiers())
        .transform("message", highlight_message)
        .build()
}

/// Coloured event tag and highlighted message only.
pub fn stdout_simple() -> Result<StyleTemplate> {
    StyleTemplate::builder("{event}{message}")
        .part("event", CONSOLE_EVENT)
        .part("message", CONSOLE_MESSAGE)
        .modifiers(stdout_modifiers())
        .transform("message", highlight_message)
        .build()
}

/// Plain-text lines for log files and colourless terminals.
pub fn file() -> Result<StyleTemplate> {
    StyleTemplate::builder("{date}{location}{event}{message}")
        .part("date", DATE_PART)
        .part("location", "<{location}>")
        .part("event", "[{event_type}]:")
        .part("message", "{message}")
        .build()
}

/// A style that renders nothing; destinations using it only see records
/// through their record callbacks.
pub fn none() -> Result<StyleTemplate> {
    StyleTemplate::builder("").build()
}

/// [`stdout`] when the terminal shows colour, otherwise [`file`].
pub fn for_terminal(colors: ColorSupport) -> Result<StyleTemplate> {
    if colors.is_enabled() { stdout() } else { file() }
}
