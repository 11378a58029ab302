//! Mock terminal for testing sticky console output without a real terminal.
//!
//! This module provides:
//! - `MockTerminal`: a cloneable writer that captures output to a shared buffer
//! - `AnsiSequence`: parsed escape sequences for verification
//! - `MockTerminal::screen`: the lines a terminal would show after replaying
//!   the output (cursor-up, erase-line and newlines applied)
//!
//! # Example
//!
//! ```ignore
//! let term = MockTerminal::new();
//! let mut console = StickyConsole::with_width(term.clone(), WidthSource::Fixed(40));
//! console.log_line("hello")?;
//! assert_eq!(term.screen(), vec!["hello"]);
//! ```

#![allow(dead_code)] // Shared test helper; not every integration test uses every utility

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

/// A writer capturing everything written to it.
///
/// Clones share the same buffer, so one clone can be handed to a console
/// while the test keeps another to inspect the output.
#[derive(Clone, Debug, Default)]
pub struct MockTerminal {
    output: Rc<RefCell<Vec<u8>>>,
    flushes: Rc<RefCell<usize>>,
}

impl MockTerminal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the output as a string (lossy UTF-8 conversion).
    #[must_use]
    pub fn output_str(&self) -> String {
        String::from_utf8_lossy(&self.output.borrow()).into_owned()
    }

    /// Clear the output buffer.
    pub fn clear_output(&self) {
        self.output.borrow_mut().clear();
    }

    /// Number of `flush` calls seen.
    #[must_use]
    pub fn flush_count(&self) -> usize {
        *self.flushes.borrow()
    }

    /// Parse all ANSI sequences from the output buffer.
    #[must_use]
    pub fn parse_sequences(&self) -> Vec<AnsiSequence> {
        AnsiSequenceParser::parse_all(&self.output.borrow())
    }

    /// Count occurrences of a sequence.
    #[must_use]
    pub fn count(&self, seq: &AnsiSequence) -> usize {
        self.parse_sequences().iter().filter(|s| *s == seq).count()
    }

    /// Get all text content written (excluding control sequences).
    #[must_use]
    pub fn text_content(&self) -> String {
        self.parse_sequences()
            .into_iter()
            .filter_map(|s| match s {
                AnsiSequence::Text(t) => Some(t),
                _ => None,
            })
            .collect()
    }

    /// Replay the output and return the visible lines, without styling.
    ///
    /// The cursor always sits at column 0 of the current row; a trailing
    /// empty row (the cursor's resting place) is dropped.
    #[must_use]
    pub fn screen(&self) -> Vec<String> {
        let mut rows: Vec<String> = vec![String::new()];
        let mut row = 0usize;
        for seq in self.parse_sequences() {
            match seq {
                AnsiSequence::Text(text) => {
                    for ch in text.chars() {
                        if ch == '\n' {
                            row += 1;
                            if row == rows.len() {
                                rows.push(String::new());
                            }
                        } else {
                            rows[row].push(ch);
                        }
                    }
                }
                AnsiSequence::CursorUp(n) => row = row.saturating_sub(n as usize),
                AnsiSequence::ClearLine => rows[row].clear(),
                _ => {}
            }
        }
        // Rows below the cursor that were cleared are gone.
        rows.truncate(row + 1);
        if rows.last().is_some_and(String::is_empty) {
            rows.pop();
        }
        rows
    }
}

impl Write for MockTerminal {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.output.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        *self.flushes.borrow_mut() += 1;
        Ok(())
    }
}

/// Parsed ANSI escape sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnsiSequence {
    /// Cursor up (CSI n A).
    CursorUp(u32),
    /// Clear line (CSI 2K).
    ClearLine,
    /// Set foreground colour (SGR 38;5;n).
    SetFg(u8),
    /// Set background colour (SGR 48;5;n).
    SetBg(u8),
    /// Bold (SGR 1).
    Bold,
    /// Reset all attributes (SGR 0).
    Reset,
    /// Hide cursor (CSI ?25l).
    HideCursor,
    /// Show cursor (CSI ?25h).
    ShowCursor,
    /// Plain text content, newlines included.
    Text(String),
    /// Unrecognized escape sequence.
    Unknown(Vec<u8>),
}

/// Parser for ANSI escape sequences.
struct AnsiSequenceParser<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> AnsiSequenceParser<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn parse_all(data: &'a [u8]) -> Vec<AnsiSequence> {
        let mut parser = Self::new(data);
        let mut sequences = Vec::new();
        while let Some(seq) = parser.next_sequence() {
            sequences.push(seq);
        }
        sequences
    }

    fn peek(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<u8> {
        let b = self.peek();
        if b.is_some() {
            self.pos += 1;
        }
        b
    }

    fn next_sequence(&mut self) -> Option<AnsiSequence> {
        match self.peek()? {
            0x1b => self.parse_escape(),
            _ => {
                let start = self.pos;
                while self.pos < self.data.len() && self.data[self.pos] != 0x1b {
                    self.pos += 1;
                }
                let text = String::from_utf8_lossy(&self.data[start..self.pos]).into_owned();
                Some(AnsiSequence::Text(text))
            }
        }
    }

    fn parse_escape(&mut self) -> Option<AnsiSequence> {
        self.advance(); // consume ESC
        if self.peek() != Some(b'[') {
            self.pos += 1;
            return Some(AnsiSequence::Unknown(vec![0x1b]));
        }
        self.advance(); // consume '['

        let private = self.peek() == Some(b'?');
        if private {
            self.advance();
        }

        let mut params = Vec::new();
        let mut current = 0u32;
        let mut has_digit = false;
        while let Some(b) = self.peek() {
            match b {
                b'0'..=b'9' => {
                    current = current.saturating_mul(10).saturating_add(u32::from(b - b'0'));
                    has_digit = true;
                    self.advance();
                }
                b';' => {
                    params.push(current);
                    current = 0;
                    has_digit = false;
                    self.advance();
                }
                _ => break,
            }
        }
        if has_digit || !params.is_empty() {
            params.push(current);
        }

        let final_char = self.advance()?;
        let first = params.first().copied();
        Some(match (private, final_char) {
            (true, b'l') if first == Some(25) => AnsiSequence::HideCursor,
            (true, b'h') if first == Some(25) => AnsiSequence::ShowCursor,
            (false, b'A') => AnsiSequence::CursorUp(first.unwrap_or(1)),
            (false, b'K') if first == Some(2) => AnsiSequence::ClearLine,
            (false, b'm') => interpret_sgr(&params),
            _ => AnsiSequence::Unknown(vec![final_char]),
        })
    }
}

fn interpret_sgr(params: &[u32]) -> AnsiSequence {
    match params {
        [] | [0] => AnsiSequence::Reset,
        [1] => AnsiSequence::Bold,
        [38, 5, n] => AnsiSequence::SetFg(*n as u8),
        [48, 5, n] => AnsiSequence::SetBg(*n as u8),
        _ => AnsiSequence::Unknown(Vec::new()),
    }
}
