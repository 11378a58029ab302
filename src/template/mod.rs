//! Style template resolution.
//!
//! A style is a join template (`"{date}{event}{message}"`) whose placeholders
//! name *parts*, each with its own sub-template. Sub-template placeholders
//! are either plain record fields (`{message}`) or derived modifiers
//! (`{EVENT_TYPE_style_modifier}`) looked up in a [`ModifierTable`] by the
//! value of another field.
//!
//! Everything that can be wrong with a style is reported when it is built;
//! rendering never fails.

pub mod format;
pub mod key;
pub mod modifier;
pub mod style;

pub use format::{FormatSpec, FormatString, MissingField, Placeholder, Segment};
pub use key::{PlaceholderKey, split_derived};
pub use modifier::{ModifierMap, ModifierTable};
pub use style::{FieldTransform, PartList, StyleBuilder, StyleDefinition, StyleTemplate};
