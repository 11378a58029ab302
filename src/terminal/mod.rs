//! Terminal queries: width, TTY detection, and color support.

mod color;
mod size;

pub use color::ColorSupport;
pub use size::{FALLBACK_COLUMNS, is_tty, terminal_columns, terminal_size};
