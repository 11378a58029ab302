//! Error types for yapl.

use std::io;
use thiserror::Error;

/// Result type alias for yapl operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for yapl operations.
///
/// Missing record fields are not errors: a style part that cannot be
/// resolved is dropped from the rendered line instead.
#[derive(Debug, Error)]
pub enum Error {
    /// A style definition or board layout could not be built.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// A column template references a variable that was not supplied.
    #[error("column '{column}' references variable '{name}' which is not set")]
    Variable { column: String, name: String },
    /// Two destinations were registered under the same key.
    #[error("a destination linked to '{0}' already exists")]
    DuplicateDestination(String),
    /// An event type was logged that the logger does not know about.
    #[error("unknown event type '{0}'")]
    UnknownEventType(String),
    /// I/O error from terminal or file output.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// Malformed JSON configuration.
    #[error("invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Construction-time configuration errors.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A derived placeholder names a family with no `<family>_modifiers` entry.
    #[error(
        "style dictionary missing property '{family}_modifiers'; if '{key}' is not a derived \
         property, do not start it with a capital letter"
    )]
    MissingModifierFamily { family: String, key: String },
    /// The family exists but has no entry for the dependency.
    #[error("modifier set '{family}_modifiers' has no modifiers for '{dependency}' ('{key}' in template)")]
    MissingModifierDependency {
        family: String,
        dependency: String,
        key: String,
    },
    /// The modifier entry exists but is not a mapping of strings.
    #[error("expected a mapping of strings in '{family}_modifiers'->'{dependency}', found {found}")]
    WrongShape {
        family: String,
        dependency: String,
        found: String,
    },
    /// The join template references a part that is not defined.
    #[error("template references undefined part '{part}'")]
    UnknownPart { part: String },
    /// A template string is not a valid format string.
    #[error("malformed template {template:?}: {reason}")]
    MalformedTemplate { template: String, reason: String },
    /// A column width is out of range or not one of int, fraction, "auto".
    #[error("invalid width for column '{column}': {reason}")]
    InvalidWidth { column: String, reason: String },
    /// A board operation named a column the board does not have.
    #[error("no column named '{column}'")]
    UnknownColumn { column: String },
}
