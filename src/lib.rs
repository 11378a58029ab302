//! `yapl` - structured log formatting and sticky terminal status lines
//!
//! Log calls become records of named fields. A [`StyleTemplate`] renders a
//! record into one line from independently skippable parts, choosing ANSI
//! colours from a [`ModifierTable`] keyed by field values. A
//! [`StickyConsole`] keeps [`StickyBoard`] status lines pinned below the
//! log output, with ANSI-aware column widths and marquee scrolling.
//!
//! # Example
//!
//! ```
//! use yapl_rust::{LogRecord, StyleTemplate};
//!
//! let style = StyleTemplate::builder("{event}{message}")
//!     .part("event", "[{event_type}]:")
//!     .part("message", "{message}")
//!     .build()?;
//!
//! let record = LogRecord::new()
//!     .with("event_type", "WARNING")
//!     .with("message", "low disk");
//! assert_eq!(style.render(&record), "[WARNING]: low disk");
//! # Ok::<(), yapl_rust::Error>(())
//! ```

// Crate-level lint configuration
#![warn(unsafe_code)] // Unsafe code needs justification (required for ioctl FFI)
#![allow(clippy::cast_possible_truncation)] // Intentional width casts
#![allow(clippy::cast_sign_loss)] // Intentional width conversions
#![allow(clippy::cast_precision_loss)] // Intentional for fractional widths
#![allow(clippy::module_name_repetitions)] // Allow sticky::StickyBoard etc
#![allow(clippy::missing_errors_doc)] // Docs WIP
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::format_push_string)] // format! with push_str is fine
#![allow(clippy::needless_pass_by_value)] // Allow pass by value for small Copy types
#![allow(clippy::cast_lossless)] // as casts are fine for primitive widening
#![allow(clippy::items_after_statements)] // Common pattern in tests
#![allow(clippy::redundant_clone)] // Clones in tests for clarity are fine
#![allow(clippy::semicolon_if_nothing_returned)] // Style preference

pub mod ansi;
pub mod error;
pub mod logger;
pub mod record;
pub mod sticky;
pub mod style;
pub mod styles;
pub mod template;
pub mod terminal;

// Re-export core types at crate root
pub use error::{ConfigError, Error, Result};
pub use record::{FieldValue, LogRecord};
pub use style::{Style, TextAttributes};

// Re-export template types
pub use template::{ModifierTable, StyleDefinition, StyleTemplate};

// Re-export sticky types
pub use sticky::{
    Align, BoardId, ColumnConfig, ColumnWidth, StickyBoard, StickyConsole, WidthColumn,
    WidthSource,
};

// Re-export logger types
pub use logger::{DestinationKey, EventSet, EventType, Logger, LoggerGuard};

// Re-export commonly used functions
pub use ansi::{visible_cut, visible_length};
pub use terminal::{ColorSupport, is_tty, terminal_columns, terminal_size};
