//! Named columns laid out across one terminal line.

use super::column::{Align, WidthColumn};
use crate::ansi::{visible_cut, visible_length};
use crate::error::{ConfigError, Result};
use crate::record::FieldValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How a column's width is chosen when the board is laid out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawWidth", into = "RawWidth")]
pub enum ColumnWidth {
    /// Exactly this many columns.
    Fixed(usize),
    /// This fraction of the terminal width, rounded down.
    Fraction(f64),
    /// An equal share of whatever the other columns leave.
    Auto,
    /// The visible length of the column's own text.
    #[default]
    Natural,
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawWidth {
    Int(u64),
    Float(f64),
    Keyword(String),
}

impl TryFrom<RawWidth> for ColumnWidth {
    type Error = String;

    fn try_from(raw: RawWidth) -> std::result::Result<Self, Self::Error> {
        let width = match raw {
            RawWidth::Int(n) => {
                Self::Fixed(usize::try_from(n).map_err(|_| format!("{n} is too large"))?)
            }
            RawWidth::Float(f) => Self::Fraction(f),
            RawWidth::Keyword(word) => match word.as_str() {
                "auto" => Self::Auto,
                "natural" => Self::Natural,
                _ => return Err(format!("expected an integer, a fraction or \"auto\", got {word:?}")),
            },
        };
        width.validate()?;
        Ok(width)
    }
}

impl From<ColumnWidth> for RawWidth {
    fn from(width: ColumnWidth) -> Self {
        match width {
            ColumnWidth::Fixed(n) => Self::Int(n as u64),
            ColumnWidth::Fraction(f) => Self::Float(f),
            ColumnWidth::Auto => Self::Keyword("auto".to_string()),
            ColumnWidth::Natural => Self::Keyword("natural".to_string()),
        }
    }
}

impl ColumnWidth {
    fn validate(self) -> std::result::Result<(), String> {
        match self {
            Self::Fraction(f) if !(0.0..=1.0).contains(&f) => {
                Err(format!("fraction {f} is outside 0..=1"))
            }
            _ => Ok(()),
        }
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn fraction_of(f: f64, total: usize) -> usize {
        (f * total as f64).floor() as usize
    }
}

/// Layout of one column as written in configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    pub template: String,
    pub width: ColumnWidth,
    pub align: Align,
    pub variables: BTreeMap<String, FieldValue>,
}

impl ColumnConfig {
    /// Column showing `template` at its natural width, left-aligned.
    #[must_use]
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn width(mut self, width: ColumnWidth) -> Self {
        self.width = width;
        self
    }

    #[must_use]
    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    #[must_use]
    pub fn variable(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }
}

#[derive(Clone, Debug)]
struct BoardColumn {
    width: ColumnWidth,
    column: WidthColumn,
}

/// Board layout as written in configuration, in column order.
pub type BoardConfig = IndexMap<String, ColumnConfig>;

/// An ordered set of named [`WidthColumn`]s rendered as one status line.
#[derive(Clone, Debug, Default)]
pub struct StickyBoard {
    columns: IndexMap<String, BoardColumn>,
}

impl StickyBoard {
    /// Create an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from columns in layout order.
    pub fn from_config(config: BoardConfig) -> Result<Self> {
        let mut board = Self::new();
        for (name, column) in config {
            board.add_column(name, column)?;
        }
        Ok(board)
    }

    /// Parse a board layout from JSON text.
    ///
    /// ```
    /// use yapl_rust::sticky::StickyBoard;
    ///
    /// let mut board = StickyBoard::from_json(
    ///     r#"{"left": {"template": "[{n}]", "width": 6, "variables": {"n": 3}},
    ///         "right": {"template": "ok", "width": "auto", "align": "right"}}"#,
    /// ).unwrap();
    /// assert_eq!(board.summary_string(12).unwrap(), "[3]       ok");
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let config: BoardConfig = serde_json::from_str(json)?;
        Self::from_config(config)
    }

    /// Add a column at the end, or replace a column with the same name in place.
    pub fn add_column(&mut self, name: impl Into<String>, config: ColumnConfig) -> Result<()> {
        let name = name.into();
        config.width.validate().map_err(|reason| ConfigError::InvalidWidth {
            column: name.clone(),
            reason,
        })?;

        let mut column = WidthColumn::new(name.clone(), config.template).with_align(config.align);
        column.set_variables(config.variables);
        if let ColumnWidth::Fixed(width) = config.width {
            column.set_width(width);
        }
        let entry = BoardColumn {
            width: config.width,
            column,
        };

        self.columns.insert(name, entry);
        Ok(())
    }

    /// Builder form of [`Self::add_column`].
    pub fn with_column(mut self, name: impl Into<String>, config: ColumnConfig) -> Result<Self> {
        self.add_column(name, config)?;
        Ok(self)
    }

    /// Remove a column, returning it if it existed.
    pub fn remove_column(&mut self, name: &str) -> Option<WidthColumn> {
        self.columns.shift_remove(name).map(|c| c.column)
    }

    #[must_use]
    pub fn column(&self, name: &str) -> Option<&WidthColumn> {
        self.columns.get(name).map(|c| &c.column)
    }

    pub fn column_mut(&mut self, name: &str) -> Option<&mut WidthColumn> {
        self.columns.get_mut(name).map(|c| &mut c.column)
    }

    /// Change how a column's width is chosen.
    pub fn set_column_width(&mut self, name: &str, width: ColumnWidth) -> Result<()> {
        width.validate().map_err(|reason| ConfigError::InvalidWidth {
            column: name.to_string(),
            reason,
        })?;
        let entry = self
            .columns
            .get_mut(name)
            .ok_or_else(|| ConfigError::UnknownColumn {
                column: name.to_string(),
            })?;
        entry.width = width;
        if let ColumnWidth::Fixed(n) = width {
            entry.column.set_width(n);
        }
        Ok(())
    }

    /// Column names in layout order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Assign every column its width for a terminal `total` columns wide.
    ///
    /// Fixed, fractional and natural widths are taken from the budget in
    /// layout order; auto columns then split what is left evenly. Any
    /// remainder of that split stays unused.
    pub fn recompute_widths(&mut self, total: usize) -> Result<()> {
        let mut remaining = total;
        let mut auto = 0usize;

        for entry in self.columns.values_mut() {
            let used = match entry.width {
                ColumnWidth::Fixed(n) => n,
                ColumnWidth::Fraction(f) => ColumnWidth::fraction_of(f, total),
                ColumnWidth::Natural => entry.column.visible_len()?,
                ColumnWidth::Auto => {
                    auto += 1;
                    continue;
                }
            };
            entry.column.set_width(used);
            remaining = remaining.saturating_sub(used);
        }

        if auto > 0 {
            let share = remaining / auto;
            for entry in self.columns.values_mut() {
                if entry.width == ColumnWidth::Auto {
                    entry.column.set_width(share);
                }
            }
        }

        tracing::trace!(total, remaining, auto, "sticky board widths recomputed");
        Ok(())
    }

    /// The board as one line for a terminal `total` columns wide.
    ///
    /// A line wider than the terminal is cut to `total - 1` visible columns
    /// so the cursor never wraps. Shorter lines are not padded.
    pub fn summary_string(&mut self, total: usize) -> Result<String> {
        self.recompute_widths(total)?;
        let mut line = String::new();
        for entry in self.columns.values_mut() {
            line.push_str(&entry.column.render()?);
        }
        if visible_length(&line) > total {
            line = visible_cut(&line, 0, total.saturating_sub(1));
        }
        Ok(line)
    }

    /// Scroll every overflowing column by one step.
    pub fn advance_marquee(&mut self) -> Result<()> {
        for entry in self.columns.values_mut() {
            if entry.column.is_overflowing()? {
                entry.column.shift_str()?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_fixed_fraction_auto_budget() {
        let mut board = StickyBoard::new()
            .with_column("a", ColumnConfig::new("x").width(ColumnWidth::Fixed(5)))
            .unwrap()
            .with_column("b", ColumnConfig::new("y").width(ColumnWidth::Fraction(0.5)))
            .unwrap()
            .with_column("c", ColumnConfig::new("z").width(ColumnWidth::Auto))
            .unwrap();
        board.recompute_widths(20).unwrap();
        assert_eq!(board.column("a").unwrap().width(), Some(5));
        assert_eq!(board.column("b").unwrap().width(), Some(10));
        assert_eq!(board.column("c").unwrap().width(), Some(5));
    }

    #[test]
    fn test_auto_remainder_dropped() {
        let mut board = StickyBoard::new()
            .with_column("a", ColumnConfig::new("").width(ColumnWidth::Auto))
            .unwrap()
            .with_column("b", ColumnConfig::new("").width(ColumnWidth::Auto))
            .unwrap();
        assert_eq!(board.summary_string(7).unwrap(), "      ");
    }

    #[test]
    fn test_overcommitted_budget_saturates() {
        let mut board = StickyBoard::new()
            .with_column("a", ColumnConfig::new("abc").width(ColumnWidth::Fixed(15)))
            .unwrap()
            .with_column("b", ColumnConfig::new("zzz").width(ColumnWidth::Auto))
            .unwrap();
        board.recompute_widths(10).unwrap();
        assert_eq!(board.column("b").unwrap().width(), Some(0));
    }

    #[test]
    fn test_summary_truncated_to_terminal() {
        let mut board = StickyBoard::new()
            .with_column("a", ColumnConfig::new("0123456789"))
            .unwrap();
        assert_eq!(board.summary_string(6).unwrap(), "01234");
        assert_eq!(board.summary_string(20).unwrap(), "0123456789");
    }

    #[test]
    fn test_invalid_fraction_rejected() {
        let err = StickyBoard::new()
            .with_column("a", ColumnConfig::new("x").width(ColumnWidth::Fraction(1.5)))
            .unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::InvalidWidth { ref column, .. }) if column == "a"));

        assert!(StickyBoard::from_json(r#"{"a": {"template": "x", "width": "wide"}}"#).is_err());
    }

    #[test]
    fn test_json_layout_order() {
        let board = StickyBoard::from_json(
            r#"{"z": {"template": "1"}, "a": {"template": "2", "width": 0.25}}"#,
        )
        .unwrap();
        assert_eq!(board.names().collect::<Vec<_>>(), vec!["z", "a"]);
    }

    #[test]
    fn test_advance_skips_static_columns() {
        let mut board = StickyBoard::new()
            .with_column("static", ColumnConfig::new("ok").width(ColumnWidth::Fixed(4)))
            .unwrap()
            .with_column("scroll", ColumnConfig::new("scrolling").width(ColumnWidth::Fixed(4)))
            .unwrap();
        board.advance_marquee().unwrap();
        assert_eq!(board.column("static").unwrap().offset(), 0);
        assert_eq!(board.column("scroll").unwrap().offset(), 1);
    }

    #[test]
    fn test_set_width_unknown_column() {
        let mut board = StickyBoard::new();
        let err = board.set_column_width("nope", ColumnWidth::Auto).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::UnknownColumn { .. })));
    }

    #[test]
    fn test_remove_column() {
        let mut board = StickyBoard::new()
            .with_column("a", ColumnConfig::new("x"))
            .unwrap();
        assert!(board.remove_column("a").is_some());
        assert!(board.is_empty());
        assert!(board.remove_column("a").is_none());
    }

    #[test]
    fn test_replacing_column_keeps_position() {
        let mut board = StickyBoard::new()
            .with_column("a", ColumnConfig::new("1"))
            .unwrap()
            .with_column("b", ColumnConfig::new("2"))
            .unwrap();
        board.add_column("a", ColumnConfig::new("3")).unwrap();
        assert_eq!(board.names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(board.summary_string(10).unwrap(), "32");
    }
}
