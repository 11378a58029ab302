//! Width-normalized text columns with marquee scrolling.

use crate::ansi::{visible_cut, visible_length};
use crate::error::{Error, Result};
use crate::record::FieldValue;
use crate::template::{FormatString, MissingField};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Horizontal alignment of text that fits its column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

fn spaces(n: usize) -> String {
    " ".repeat(n)
}

/// One text segment rendered to an exact visible width.
///
/// Text that fits is padded according to [`Align`]. Text that overflows is
/// shown through a sliding window: the text followed by `width` blank
/// columns scrolls past, one column per [`WidthColumn::shift_str`].
///
/// The text is a template; `{name}` placeholders are filled from the
/// column's variables when rendering.
#[derive(Clone, Debug, Default)]
pub struct WidthColumn {
    name: String,
    template: String,
    variables: BTreeMap<String, FieldValue>,
    width: Option<usize>,
    align: Align,
    offset: usize,
    formatted: Option<(String, usize)>,
    rendered: Option<String>,
}

impl WidthColumn {
    /// Create a column whose width defaults to its text's visible length.
    ///
    /// `name` only appears in error messages.
    #[must_use]
    pub fn new(name: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            template: template.into(),
            ..Self::default()
        }
    }

    /// Builder-style fixed width.
    #[must_use]
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    /// Builder-style alignment.
    #[must_use]
    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Builder-style variable.
    #[must_use]
    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set_variable(name, value);
        self
    }

    /// Column name used in error messages.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw, unformatted text.
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Explicit width, if one was set.
    #[must_use]
    pub fn width(&self) -> Option<usize> {
        self.width
    }

    #[must_use]
    pub fn align(&self) -> Align {
        self.align
    }

    /// Current marquee offset.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Current substitution variables.
    #[must_use]
    pub fn variables(&self) -> &BTreeMap<String, FieldValue> {
        &self.variables
    }

    fn invalidate_text(&mut self) {
        self.formatted = None;
        self.rendered = None;
    }

    /// Replace the text and restart scrolling from the beginning.
    pub fn set_text(&mut self, template: impl Into<String>) {
        self.template = template.into();
        self.offset = 0;
        self.invalidate_text();
    }

    /// Replace the text, keeping the scroll offset.
    ///
    /// With `update_width`, the width becomes the new text's visible length.
    pub fn update_text(&mut self, template: impl Into<String>, update_width: bool) -> Result<()> {
        self.template = template.into();
        self.invalidate_text();
        if update_width {
            let len = self.visible_len()?;
            self.set_width(len);
        }
        Ok(())
    }

    /// Set the target width in visible columns.
    pub fn set_width(&mut self, width: usize) {
        if self.width != Some(width) {
            self.width = Some(width);
            self.rendered = None;
        }
    }

    pub fn set_align(&mut self, align: Align) {
        if self.align != align {
            self.align = align;
            self.rendered = None;
        }
    }

    /// Jump the marquee to a given offset.
    pub fn set_offset(&mut self, offset: usize) {
        if self.offset != offset {
            self.offset = offset;
            self.rendered = None;
        }
    }

    /// Set or replace one substitution variable.
    pub fn set_variable(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.variables.insert(name.into(), value.into());
        self.invalidate_text();
    }

    /// Replace all substitution variables.
    pub fn set_variables(&mut self, variables: BTreeMap<String, FieldValue>) {
        self.variables = variables;
        self.invalidate_text();
    }

    /// Formatted text and its visible length, cached until text or variables change.
    fn formatted(&mut self) -> Result<(&str, usize)> {
        if self.formatted.is_none() {
            let format = FormatString::parse(&self.template)?;
            let text = format
                .format_with(|name| self.variables.get(name).cloned())
                .map_err(|MissingField(name)| Error::Variable {
                    column: self.name.clone(),
                    name,
                })?;
            let len = visible_length(&text);
            self.formatted = Some((text, len));
        }
        Ok(self
            .formatted
            .as_ref()
            .map_or(("", 0), |(text, len)| (text.as_str(), *len)))
    }

    /// Visible length of the formatted text.
    pub fn visible_len(&mut self) -> Result<usize> {
        Ok(self.formatted()?.1)
    }

    /// Width used for rendering: the explicit width or the text's own length.
    pub fn effective_width(&mut self) -> Result<usize> {
        match self.width {
            Some(width) => Ok(width),
            None => self.visible_len(),
        }
    }

    /// Check if the text is wider than the column.
    pub fn is_overflowing(&mut self) -> Result<bool> {
        Ok(self.visible_len()? > self.effective_width()?)
    }

    /// Advance the marquee by one column, wrapping after a full cycle.
    pub fn shift_str(&mut self) -> Result<()> {
        let cycle = self.effective_width()? + self.visible_len()?;
        self.offset += 1;
        if self.offset >= cycle {
            self.offset = 0;
        }
        self.rendered = None;
        Ok(())
    }

    /// Render to exactly `width` visible columns.
    pub fn render(&mut self) -> Result<String> {
        if let Some(rendered) = &self.rendered {
            return Ok(rendered.clone());
        }

        let width = self.effective_width()?;
        let offset = self.offset;
        let align = self.align;
        let (text, len) = self.formatted()?;

        let out = if len <= width {
            let pad = width - len;
            match align {
                Align::Left => format!("{text}{}", spaces(pad)),
                Align::Right => format!("{}{text}", spaces(pad)),
                Align::Center => format!("{}{text}{}", spaces(pad / 2), spaces(pad - pad / 2)),
            }
        } else {
            marquee_window(text, len, width, offset % (len + width))
        };

        self.rendered = Some(out.clone());
        Ok(out)
    }
}

/// Window `[offset, offset + width)` over the text followed by `width` blanks,
/// wrapping so the text re-enters from the right.
fn marquee_window(text: &str, len: usize, width: usize, offset: usize) -> String {
    let end = offset + width;
    if end <= len {
        visible_cut(text, offset, end)
    } else if end <= len + width {
        visible_cut(text, offset.min(len), len) + &spaces(end - len)
    } else {
        spaces(len + 2 * width - end) + &visible_cut(text, 0, end - len - width)
    }
}
