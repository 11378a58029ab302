//! ANSI escape sequences and escape-aware text measurement.
//!
//! Text handed to the sticky renderer routinely carries SGR color codes, so
//! every width computation here ignores CSI sequences (`ESC [ params letter`)
//! and counts only visible grapheme clusters.

pub mod sequences;
pub mod text;

pub use sequences::*;
pub use text::{
    AnsiPiece, AnsiPieces, last_escape, pieces, strip_escapes, visible_cut, visible_length,
};
