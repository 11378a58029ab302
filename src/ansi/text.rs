//! Visible-length measurement and slicing of text with embedded escapes.

use std::ops::Range;
use unicode_segmentation::UnicodeSegmentation;

/// A run of either visible text or a single CSI escape sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnsiPiece<'a> {
    /// Non-empty plain text containing no complete CSI sequence.
    Text(&'a str),
    /// One complete CSI sequence, e.g. `"\x1b[38;5;1m"`.
    Escape(&'a str),
}

/// Iterator splitting a string into text runs and escape sequences.
pub struct AnsiPieces<'a> {
    source: &'a str,
    pos: usize,
}

/// Split `s` into alternating text runs and CSI escape sequences.
#[must_use]
pub fn pieces(s: &str) -> AnsiPieces<'_> {
    AnsiPieces { source: s, pos: 0 }
}

/// Length of the CSI sequence starting at `bytes[0]`, if one starts there.
fn csi_len(bytes: &[u8]) -> Option<usize> {
    if bytes.len() < 3 || bytes[0] != 0x1b || bytes[1] != b'[' {
        return None;
    }
    let params = bytes[2..]
        .iter()
        .take_while(|b| b.is_ascii_digit() || matches!(b, b';' | b'?' | b':'))
        .count();
    let final_byte = *bytes.get(2 + params)?;
    final_byte.is_ascii_alphabetic().then_some(3 + params)
}

impl<'a> Iterator for AnsiPieces<'a> {
    type Item = AnsiPiece<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.source[self.pos..];
        if rest.is_empty() {
            return None;
        }
        let bytes = rest.as_bytes();
        if let Some(len) = csi_len(bytes) {
            self.pos += len;
            return Some(AnsiPiece::Escape(&rest[..len]));
        }

        // ESC is ASCII, so every candidate index is a char boundary.
        let mut end = 1;
        while end < bytes.len() {
            if bytes[end] == 0x1b && csi_len(&bytes[end..]).is_some() {
                break;
            }
            end += 1;
        }
        self.pos += end;
        Some(AnsiPiece::Text(&rest[..end]))
    }
}

/// Count visible grapheme clusters, ignoring CSI escape sequences.
///
/// ```
/// use yapl_rust::ansi::visible_length;
///
/// assert_eq!(visible_length("\x1b[1mHi\x1b[0m"), 2);
/// ```
#[must_use]
pub fn visible_length(s: &str) -> usize {
    pieces(s)
        .map(|piece| match piece {
            AnsiPiece::Text(text) => text.graphemes(true).count(),
            AnsiPiece::Escape(_) => 0,
        })
        .sum()
}

/// Remove every CSI escape sequence from `s`.
#[must_use]
pub fn strip_escapes(s: &str) -> String {
    pieces(s)
        .filter_map(|piece| match piece {
            AnsiPiece::Text(text) => Some(text),
            AnsiPiece::Escape(_) => None,
        })
        .collect()
}

impl<'a> AnsiPiece<'a> {
    /// The underlying slice, escape bytes included.
    #[must_use]
    pub fn as_str(&self) -> &'a str {
        match *self {
            AnsiPiece::Text(s) | AnsiPiece::Escape(s) => s,
        }
    }
}

/// Byte range of the last CSI escape sequence in `s`.
fn last_escape_range(s: &str) -> Option<Range<usize>> {
    let mut pos = 0;
    let mut last = None;
    for piece in pieces(s) {
        let len = piece.as_str().len();
        if let AnsiPiece::Escape(_) = piece {
            last = Some(pos..pos + len);
        }
        pos += len;
    }
    last
}

/// The last CSI escape sequence found anywhere in `s`.
#[must_use]
pub fn last_escape(s: &str) -> Option<&str> {
    last_escape_range(s).map(|range| &s[range])
}

/// Slice `s` to the visible grapheme range `[start, end)`.
///
/// Escape sequences met before or inside the range are kept so the slice
/// starts in the same color/style state as the original. The last escape
/// sequence of the whole string is always appended (unless it was already
/// copied), so a style opened inside the slice is closed the way the
/// original closes it.
///
/// ```
/// use yapl_rust::ansi::visible_cut;
///
/// assert_eq!(visible_cut("\x1b[31mHello\x1b[0m", 1, 4), "\x1b[31mell\x1b[0m");
/// ```
#[must_use]
pub fn visible_cut(s: &str, start: usize, end: usize) -> String {
    let mut out = String::with_capacity(s.len());
    let mut offset = 0usize;
    let mut pos = 0usize;
    let mut last_copied: Option<usize> = None;

    for piece in pieces(s) {
        if offset >= end {
            break;
        }
        match piece {
            AnsiPiece::Escape(esc) => {
                out.push_str(esc);
                last_copied = Some(pos);
            }
            AnsiPiece::Text(text) => {
                for grapheme in text.graphemes(true) {
                    if offset >= end {
                        break;
                    }
                    if offset >= start {
                        out.push_str(grapheme);
                    }
                    offset += 1;
                }
            }
        }
        pos += piece.as_str().len();
    }

    if let Some(range) = last_escape_range(s) {
        if last_copied != Some(range.start) {
            out.push_str(&s[range]);
        }
    }
    out
}
