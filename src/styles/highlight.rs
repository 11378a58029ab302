//! Colouring of notable tokens inside log messages.

use crate::ansi::{RESET, fg_256, palette};
use std::ops::Range;

/// What a highlighted span contains.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpanKind {
    /// A parenthesised group, parentheses included.
    Group,
    /// A single-quoted string, quotes included.
    Quoted,
    /// A number such as `42`, `-3` or `1.5`.
    Number,
    /// An upper-case word such as `DONE` or `HTTP2`.
    Constant,
}

impl SpanKind {
    /// 256-colour palette index the span is drawn with.
    #[must_use]
    pub const fn color(self) -> u8 {
        match self {
            Self::Group => palette::GRAY,
            Self::Quoted => palette::GREEN,
            Self::Number => palette::CYAN,
            Self::Constant => palette::MAGENTA,
        }
    }
}

/// A highlighted byte range of a message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Span {
    pub kind: SpanKind,
    pub range: Range<usize>,
}

fn find_from(chars: &[(usize, char)], from: usize, target: char) -> Option<usize> {
    chars[from..]
        .iter()
        .position(|&(_, ch)| ch == target)
        .map(|pos| from + pos)
}

fn end_of(chars: &[(usize, char)], idx: usize, len: usize) -> usize {
    chars.get(idx + 1).map_or(len, |&(byte, _)| byte)
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || matches!(ch, '-' | '.' | '_')
}

/// Classify the word starting at `start`.
///
/// Returns the kind (if the word is notable), the end of the highlighted
/// part, and the end of the whole word, all as char indices.
fn scan_word(chars: &[(usize, char)], start: usize) -> (Option<SpanKind>, usize, usize) {
    let mut end = start;
    while end < chars.len() && is_word_char(chars[end].1) {
        end += 1;
    }
    let mut tail = end;
    while tail > start && matches!(chars[tail - 1].1, '-' | '.' | '_') {
        tail -= 1;
    }

    let word: Vec<char> = chars[start..tail].iter().map(|&(_, ch)| ch).collect();
    let kind = match word.as_slice() {
        [] => None,
        [first, rest @ ..]
            if (first.is_ascii_digit()
                || (*first == '-' && rest.first().is_some_and(char::is_ascii_digit)))
                && rest.iter().all(|ch| ch.is_ascii_digit() || matches!(ch, '.' | '-')) =>
        {
            Some(SpanKind::Number)
        }
        [first, _, ..]
            if first.is_uppercase()
                && word
                    .iter()
                    .all(|ch| ch.is_uppercase() || ch.is_ascii_digit() || *ch == '_') =>
        {
            Some(SpanKind::Constant)
        }
        _ => None,
    };
    (kind, tail, end)
}

/// Find the notable spans of a message, in order.
///
/// Groups run to the first `)`; quotes run to the next `'` and must not
/// open right after a letter (so `don't` is left alone). Numbers and
/// upper-case words are only recognised after a space.
#[must_use]
pub fn scan(message: &str) -> Vec<Span> {
    let chars: Vec<(usize, char)> = message.char_indices().collect();
    let len = message.len();
    let mut spans = Vec::new();
    let mut prev: Option<char> = None;
    let mut i = 0;

    while i < chars.len() {
        let (start, ch) = chars[i];
        let closer = match ch {
            '(' => Some((')', SpanKind::Group)),
            '\'' if !prev.is_some_and(char::is_alphabetic) => Some(('\'', SpanKind::Quoted)),
            _ => None,
        };

        if let Some((close, kind)) = closer {
            if let Some(j) = find_from(&chars, i + 1, close) {
                spans.push(Span {
                    kind,
                    range: start..end_of(&chars, j, len),
                });
                prev = Some(close);
                i = j + 1;
                continue;
            }
        } else if prev == Some(' ') && is_word_char(ch) {
            let (kind, tail, end) = scan_word(&chars, i);
            if let Some(kind) = kind {
                spans.push(Span {
                    kind,
                    range: start..end_of(&chars, tail - 1, len),
                });
                i = tail;
            } else {
                i = end;
            }
            prev = Some(chars[i - 1].1);
            continue;
        }

        prev = Some(ch);
        i += 1;
    }
    spans
}

/// Colour the notable spans of a message, resetting after each.
///
/// ```
/// use yapl_rust::styles::highlight_message;
///
/// assert_eq!(
///     highlight_message("took 12 ms"),
///     "took \x1b[38;5;6m12\x1b[0m ms"
/// );
/// ```
#[must_use]
pub fn highlight_message(message: &str) -> String {
    let spans = scan(message);
    if spans.is_empty() {
        return message.to_string();
    }

    let mut out = String::with_capacity(message.len() + spans.len() * 16);
    let mut last = 0;
    for span in spans {
        out.push_str(&message[last..span.range.start]);
        out.push_str(&fg_256(span.kind.color()));
        out.push_str(&message[span.range.clone()]);
        out.push_str(RESET);
        last = span.range.end;
    }
    out.push_str(&message[last..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(message: &str) -> Vec<(SpanKind, &str)> {
        scan(message)
            .into_iter()
            .map(|span| (span.kind, &message[span.range]))
            .collect()
    }

    #[test]
    fn test_plain_message_untouched() {
        assert_eq!(highlight_message("nothing to see here"), "nothing to see here");
    }

    #[test]
    fn test_group_and_quote() {
        assert_eq!(
            kinds("opened 'data.csv' (read only)"),
            vec![
                (SpanKind::Quoted, "'data.csv'"),
                (SpanKind::Group, "(read only)")
            ]
        );
    }

    #[test]
    fn test_apostrophe_is_not_a_quote() {
        assert!(kinds("don't stop").is_empty());
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            kinds("moved -3 steps in 1.5 s."),
            vec![(SpanKind::Number, "-3"), (SpanKind::Number, "1.5")]
        );
        // Trailing punctuation stays outside the span.
        assert_eq!(kinds("total 10."), vec![(SpanKind::Number, "10")]);
    }

    #[test]
    fn test_constants_need_a_leading_space() {
        assert_eq!(
            kinds("DONE status OK and HTTP2 ready"),
            vec![(SpanKind::Constant, "OK"), (SpanKind::Constant, "HTTP2")]
        );
    }

    #[test]
    fn test_mixed_words_skipped() {
        assert!(kinds("see v2 and Foo and abc123").is_empty());
    }

    #[test]
    fn test_unclosed_group() {
        assert!(kinds("(never closed").is_empty());
    }

    #[test]
    fn test_highlight_colors() {
        assert_eq!(
            highlight_message("state 'x'"),
            "state \x1b[38;5;2m'x'\x1b[0m"
        );
        assert_eq!(
            highlight_message("code ERR"),
            "code \x1b[38;5;5mERR\x1b[0m"
        );
    }
}
