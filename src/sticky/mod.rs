//! Sticky status lines.
//!
//! A [`StickyBoard`] lays named [`WidthColumn`]s out across one terminal
//! line. A [`StickyConsole`] keeps its boards pinned below ordinary output
//! by erasing them with `ESC[1A ESC[2K` before each write and drawing them
//! again afterwards.

pub mod board;
pub mod column;
pub mod console;

pub use board::{BoardConfig, ColumnConfig, ColumnWidth, StickyBoard};
pub use column::{Align, WidthColumn};
pub use console::{BoardId, RedrawStats, StickyConsole, WidthSource};
