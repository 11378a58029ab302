//! Brace-placeholder format strings.
//!
//! Syntax follows the common `{name}` / `{name:spec}` convention with `{{`
//! and `}}` as literal braces. The spec mini-language supports
//! `[[fill]align][sign][0][width][.precision][type]`, where align is one of
//! `< > ^ =` and type one of `d s x X f`.

use crate::ansi::{visible_cut, visible_length};
use crate::error::ConfigError;
use crate::record::FieldValue;

/// Largest width or precision a spec may ask for.
pub const MAX_SPEC_NUMBER: usize = 4096;

/// Horizontal placement of a value inside its field width.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpecAlign {
    Left,
    Right,
    Center,
    /// Pad between the sign and the digits.
    AfterSign,
}

/// Parsed `:spec` part of a placeholder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormatSpec {
    pub fill: char,
    pub align: Option<SpecAlign>,
    pub sign: Option<char>,
    pub width: Option<usize>,
    pub precision: Option<usize>,
    pub kind: Option<char>,
}

impl Default for FormatSpec {
    fn default() -> Self {
        Self {
            fill: ' ',
            align: None,
            sign: None,
            width: None,
            precision: None,
            kind: None,
        }
    }
}

/// One `{...}` occurrence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placeholder {
    pub name: String,
    pub spec: FormatSpec,
}

/// Literal text or a placeholder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Field(Placeholder),
}

/// A placeholder had no value while formatting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MissingField(pub String);

/// A parsed format string, reusable across renders.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormatString {
    source: String,
    segments: Vec<Segment>,
}

fn malformed(template: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::MalformedTemplate {
        template: template.to_string(),
        reason: reason.into(),
    }
}

fn align_of(c: char) -> Option<SpecAlign> {
    match c {
        '<' => Some(SpecAlign::Left),
        '>' => Some(SpecAlign::Right),
        '^' => Some(SpecAlign::Center),
        '=' => Some(SpecAlign::AfterSign),
        _ => None,
    }
}

impl FormatSpec {
    /// Parse the text after `:` in a placeholder.
    pub fn parse(template: &str, spec: &str) -> Result<Self, ConfigError> {
        let mut out = Self::default();
        let chars: Vec<char> = spec.chars().collect();
        let mut i = 0;

        if let Some(align) = chars.get(1).copied().and_then(align_of) {
            out.fill = chars[0];
            out.align = Some(align);
            i = 2;
        } else if let Some(align) = chars.first().copied().and_then(align_of) {
            out.align = Some(align);
            i = 1;
        }

        if let Some(&c) = chars.get(i) {
            if matches!(c, '+' | '-' | ' ') {
                out.sign = Some(c);
                i += 1;
            }
        }

        if chars.get(i) == Some(&'0') {
            if out.align.is_none() {
                out.fill = '0';
                out.align = Some(SpecAlign::AfterSign);
            }
            i += 1;
        }

        let digits_from = |i: &mut usize, what: &str| -> Result<Option<usize>, ConfigError> {
            let start = *i;
            while chars.get(*i).is_some_and(char::is_ascii_digit) {
                *i += 1;
            }
            if start == *i {
                return Ok(None);
            }
            let digits: String = chars[start..*i].iter().collect();
            match digits.parse::<usize>() {
                Ok(n) if n <= MAX_SPEC_NUMBER => Ok(Some(n)),
                _ => Err(malformed(
                    template,
                    format!("{what} {digits} exceeds {MAX_SPEC_NUMBER}"),
                )),
            }
        };

        out.width = digits_from(&mut i, "width")?;
        if chars.get(i) == Some(&'.') {
            i += 1;
            out.precision = digits_from(&mut i, "precision")?;
            if out.precision.is_none() {
                return Err(malformed(template, "precision missing after '.'"));
            }
        }

        if let Some(&c) = chars.get(i) {
            if !matches!(c, 'd' | 's' | 'x' | 'X' | 'f') {
                return Err(malformed(template, format!("unsupported format type '{c}'")));
            }
            out.kind = Some(c);
            i += 1;
        }

        if i != chars.len() {
            return Err(malformed(template, format!("invalid format spec '{spec}'")));
        }
        Ok(out)
    }

    /// Format one value according to this spec.
    #[must_use]
    pub fn apply(&self, value: &FieldValue) -> String {
        let (sign, body, numeric) = match value {
            FieldValue::Int(n) => {
                let digits = match self.kind {
                    Some('x') => format!("{:x}", n.unsigned_abs()),
                    Some('X') => format!("{:X}", n.unsigned_abs()),
                    Some('f') => {
                        format!("{:.*}", self.precision.unwrap_or(6), n.unsigned_abs() as f64)
                    }
                    _ => n.unsigned_abs().to_string(),
                };
                (self.sign_for(*n < 0), digits, true)
            }
            FieldValue::Float(x) => {
                let digits = match (self.kind, self.precision) {
                    (Some('f'), p) => format!("{:.*}", p.unwrap_or(6), x.abs()),
                    (_, Some(p)) => format!("{:.*}", p, x.abs()),
                    _ => x.abs().to_string(),
                };
                (self.sign_for(*x < 0.0), digits, true)
            }
            FieldValue::Str(s) => {
                let body = match self.precision {
                    Some(p) => visible_cut(s, 0, p),
                    None => s.clone(),
                };
                (String::new(), body, false)
            }
        };

        let Some(width) = self.width else {
            return sign + &body;
        };
        let len = visible_length(&sign) + visible_length(&body);
        if len >= width {
            return sign + &body;
        }

        let pad = width - len;
        let fill = |n: usize| std::iter::repeat_n(self.fill, n).collect::<String>();
        let align = self.align.unwrap_or(if numeric {
            SpecAlign::Right
        } else {
            SpecAlign::Left
        });
        match align {
            SpecAlign::Left => sign + &body + &fill(pad),
            SpecAlign::Right => fill(pad) + &sign + &body,
            SpecAlign::Center => fill(pad / 2) + &sign + &body + &fill(pad - pad / 2),
            SpecAlign::AfterSign => sign + &fill(pad) + &body,
        }
    }

    fn sign_for(&self, negative: bool) -> String {
        match (negative, self.sign) {
            (true, _) => "-".to_string(),
            (false, Some('+')) => "+".to_string(),
            (false, Some(' ')) => " ".to_string(),
            _ => String::new(),
        }
    }
}

impl FormatString {
    /// Parse a template, failing on unbalanced braces or bad specs.
    pub fn parse(template: &str) -> Result<Self, ConfigError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = template.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '}' => return Err(malformed(template, "single '}' encountered")),
                '{' => {
                    let mut inner = String::new();
                    let mut closed = false;
                    for c in chars.by_ref() {
                        match c {
                            '}' => {
                                closed = true;
                                break;
                            }
                            '{' => return Err(malformed(template, "nested '{' in placeholder")),
                            _ => inner.push(c),
                        }
                    }
                    if !closed {
                        return Err(malformed(template, "unclosed '{'"));
                    }
                    let (name, spec) = match inner.split_once(':') {
                        Some((name, spec)) => (name, FormatSpec::parse(template, spec)?),
                        None => (inner.as_str(), FormatSpec::default()),
                    };
                    if name.is_empty() {
                        return Err(malformed(template, "positional placeholders are not supported"));
                    }
                    if name.contains('!') {
                        return Err(malformed(template, "conversions are not supported"));
                    }
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Field(Placeholder {
                        name: name.to_string(),
                        spec,
                    }));
                }
                _ => literal.push(c),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            source: template.to_string(),
            segments,
        })
    }

    /// The original template text.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Parsed segments in order.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Placeholders in order of appearance (duplicates included).
    pub fn placeholders(&self) -> impl Iterator<Item = &Placeholder> {
        self.segments.iter().filter_map(|seg| match seg {
            Segment::Field(ph) => Some(ph),
            Segment::Literal(_) => None,
        })
    }

    /// Format with one value per placeholder, in [`Self::placeholders`] order.
    ///
    /// Placeholders beyond the end of `values` render as nothing.
    #[must_use]
    pub fn format_values(&self, values: &[FieldValue]) -> String {
        let mut out = String::with_capacity(self.source.len());
        let mut next = values.iter();
        for seg in &self.segments {
            match seg {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field(ph) => {
                    if let Some(value) = next.next() {
                        out.push_str(&ph.spec.apply(value));
                    }
                }
            }
        }
        out
    }

    /// Format by looking each placeholder up by name.
    pub fn format_with<F>(&self, mut lookup: F) -> Result<String, MissingField>
    where
        F: FnMut(&str) -> Option<FieldValue>,
    {
        let mut out = String::with_capacity(self.source.len());
        for seg in &self.segments {
            match seg {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field(ph) => {
                    let value = lookup(&ph.name).ok_or_else(|| MissingField(ph.name.clone()))?;
                    out.push_str(&ph.spec.apply(&value));
                }
            }
        }
        Ok(out)
    }
}
