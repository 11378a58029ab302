//! Fields generated for every record.

use crate::record::{FieldValue, LogRecord};
use chrono::{Datelike, Local, Timelike};
use std::panic::Location;

/// What a generator produces.
#[derive(Clone, Debug, PartialEq)]
pub enum Generated {
    /// Stored under the generator's name.
    Value(FieldValue),
    /// Merged into the record field by field.
    Fields(LogRecord),
}

/// Produces extra record fields at log time.
///
/// `caller` is the source location of the logging call.
pub trait DataGen {
    fn generate(&self, caller: &Location<'_>) -> Generated;
}

impl<F> DataGen for F
where
    F: Fn(&Location<'_>) -> Generated,
{
    fn generate(&self, caller: &Location<'_>) -> Generated {
        self(caller)
    }
}

/// Local date and time as `year`, `month`, `day`, `hour`, `minute`,
/// `second` and `microsecond` integer fields.
#[derive(Clone, Copy, Debug, Default)]
pub struct DateTime;

impl DataGen for DateTime {
    fn generate(&self, _caller: &Location<'_>) -> Generated {
        let now = Local::now();
        Generated::Fields(
            LogRecord::new()
                .with("year", now.year())
                .with("month", now.month())
                .with("day", now.day())
                .with("hour", now.hour())
                .with("minute", now.minute())
                .with("second", now.second())
                .with("microsecond", now.nanosecond() / 1_000),
        )
    }
}

/// The caller's `path:line`, with the first `folder_depth` path components
/// removed.
#[derive(Clone, Copy, Debug, Default)]
pub struct CallerLocation {
    pub folder_depth: usize,
}

impl CallerLocation {
    #[must_use]
    pub fn new(folder_depth: usize) -> Self {
        Self { folder_depth }
    }

    /// Format a location. Depths past the end keep the full path.
    #[must_use]
    pub fn describe(&self, file: &str, line: u32) -> String {
        let normalized = file.replace('\\', "/");
        let parts: Vec<&str> = normalized.split('/').collect();
        let path = if self.folder_depth >= parts.len() {
            normalized.clone()
        } else {
            parts[self.folder_depth..].join("/")
        };
        format!("{path}:{line}")
    }
}

impl DataGen for CallerLocation {
    fn generate(&self, caller: &Location<'_>) -> Generated {
        Generated::Value(FieldValue::from(self.describe(caller.file(), caller.line())))
    }
}
