//! Style templates: named parts joined into one log line.

use crate::error::{ConfigError, Result};
use crate::record::{FieldValue, LogRecord};
use crate::template::format::FormatString;
use crate::template::key::PlaceholderKey;
use crate::template::modifier::{ModifierMap, ModifierTable};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

/// Post-processing applied to a plain field's text before substitution.
#[derive(Clone)]
pub struct FieldTransform(Arc<dyn Fn(&str) -> String + Send + Sync>);

impl FieldTransform {
    /// Wrap a function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Apply the transform.
    #[must_use]
    pub fn apply(&self, text: &str) -> String {
        (self.0)(text)
    }
}

impl fmt::Debug for FieldTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FieldTransform(..)")
    }
}

/// Ordered `(part name, sub-template)` pairs.
pub type PartList = IndexMap<String, String>;

const fn default_skip_modifiers() -> bool {
    true
}

/// Declarative style description, loadable from JSON.
///
/// ```json
/// {
///   "template": "{event}{message}",
///   "parts": {
///     "event": "[{EVENT_TYPE_style_modifier}{event_type}\u001b[0m]:",
///     "message": "{message}"
///   },
///   "modifiers": {"EVENT_TYPE_modifiers": {"style_modifier": {"ERROR": "\u001b[38;5;1m"}}}
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StyleDefinition {
    /// Join template whose placeholders are part names.
    pub template: String,
    #[serde(default)]
    pub parts: PartList,
    #[serde(default)]
    pub modifiers: ModifierTable,
    /// Written once when a destination opens.
    #[serde(default)]
    pub initial: String,
    /// Written once when a destination closes.
    #[serde(default, rename = "final")]
    pub final_str: String,
    /// Substitute `""` for unresolvable modifiers instead of dropping the part.
    #[serde(default = "default_skip_modifiers")]
    pub skip_modifiers: bool,
}

impl Default for StyleDefinition {
    fn default() -> Self {
        Self {
            template: String::new(),
            parts: PartList::default(),
            modifiers: ModifierTable::default(),
            initial: String::new(),
            final_str: String::new(),
            skip_modifiers: true,
        }
    }
}

#[derive(Clone, Debug)]
enum ResolvedKey {
    Plain(String),
    Derived {
        selector_field: String,
        modifiers: ModifierMap,
    },
}

#[derive(Clone, Debug)]
struct CompiledPart {
    name: String,
    format: FormatString,
    keys: Vec<ResolvedKey>,
}

/// A compiled, immutable style.
///
/// Built once per destination and rendered for every record. Parts whose
/// plain fields are missing from a record vanish from the output together
/// with their separating space.
///
/// # Examples
///
/// ```
/// use yapl_rust::{LogRecord, StyleTemplate};
///
/// let style = StyleTemplate::builder("{event}{message}")
///     .part("event", "[{event_type}]:")
///     .part("message", "{message}")
///     .build()
///     .unwrap();
///
/// let record = LogRecord::new().with("event_type", "INFO").with("message", "ready");
/// assert_eq!(style.render(&record), "[INFO]: ready");
/// ```
#[derive(Clone, Debug)]
pub struct StyleTemplate {
    join: FormatString,
    parts: Vec<CompiledPart>,
    /// Indices into `parts` in the order the join template places them.
    placement: Vec<usize>,
    initial: String,
    final_str: String,
    skip_modifiers: bool,
    transforms: BTreeMap<String, FieldTransform>,
}

/// Fluent builder for [`StyleTemplate`].
#[derive(Clone, Debug, Default)]
pub struct StyleBuilder {
    definition: StyleDefinition,
    transforms: BTreeMap<String, FieldTransform>,
}

impl StyleBuilder {
    /// Start from an existing definition.
    #[must_use]
    pub fn from_definition(definition: StyleDefinition) -> Self {
        Self {
            definition,
            transforms: BTreeMap::new(),
        }
    }

    /// Append a named part.
    #[must_use]
    pub fn part(mut self, name: impl Into<String>, template: impl Into<String>) -> Self {
        self.definition.parts.insert(name.into(), template.into());
        self
    }

    /// Set the modifier table.
    #[must_use]
    pub fn modifiers(mut self, modifiers: ModifierTable) -> Self {
        self.definition.modifiers = modifiers;
        self
    }

    /// Set the string written when a destination opens.
    #[must_use]
    pub fn initial(mut self, initial: impl Into<String>) -> Self {
        self.definition.initial = initial.into();
        self
    }

    /// Set the string written when a destination closes.
    #[must_use]
    pub fn final_str(mut self, final_str: impl Into<String>) -> Self {
        self.definition.final_str = final_str.into();
        self
    }

    /// Choose whether unresolvable modifiers become `""` (true) or drop the part.
    #[must_use]
    pub fn skip_modifiers(mut self, skip: bool) -> Self {
        self.definition.skip_modifiers = skip;
        self
    }

    /// Register a transform for a plain field.
    #[must_use]
    pub fn transform<F>(mut self, field: impl Into<String>, f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.transforms.insert(field.into(), FieldTransform::new(f));
        self
    }

    /// Compile, validating every derived placeholder against the modifiers.
    pub fn build(self) -> Result<StyleTemplate> {
        StyleTemplate::compile(self.definition, self.transforms)
    }
}

impl StyleTemplate {
    /// Create a builder with the given join template.
    #[must_use]
    pub fn builder(template: impl Into<String>) -> StyleBuilder {
        StyleBuilder::from_definition(StyleDefinition {
            template: template.into(),
            ..StyleDefinition::default()
        })
    }

    /// Compile a definition without field transforms.
    pub fn new(definition: StyleDefinition) -> Result<Self> {
        Self::compile(definition, BTreeMap::new())
    }

    /// Parse a JSON style definition and compile it.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::new(serde_json::from_str(json)?)
    }

    fn compile(
        definition: StyleDefinition,
        transforms: BTreeMap<String, FieldTransform>,
    ) -> Result<Self> {
        let join = FormatString::parse(&definition.template)?;
        let mut parts = Vec::with_capacity(definition.parts.len());

        for (name, template) in definition.parts.iter() {
            let format = FormatString::parse(template)?;
            let mut keys = Vec::new();
            for placeholder in format.placeholders() {
                let classified = PlaceholderKey::classify(&placeholder.name);
                let key = match &classified {
                    PlaceholderKey::Plain(field) => ResolvedKey::Plain(field.clone()),
                    PlaceholderKey::Derived {
                        key,
                        family,
                        dependency,
                    } => ResolvedKey::Derived {
                        selector_field: classified.source_field(),
                        modifiers: definition.modifiers.resolve(family, dependency, key)?,
                    },
                };
                keys.push(key);
            }
            parts.push(CompiledPart {
                name: name.to_string(),
                format,
                keys,
            });
        }

        let mut placement = Vec::new();
        for placeholder in join.placeholders() {
            let Some(idx) = parts.iter().position(|part| part.name == placeholder.name) else {
                return Err(ConfigError::UnknownPart {
                    part: placeholder.name.clone(),
                }
                .into());
            };
            if !placement.contains(&idx) {
                placement.push(idx);
            }
        }

        tracing::debug!(
            template = %definition.template,
            parts = parts.len(),
            skip_modifiers = definition.skip_modifiers,
            "compiled style template"
        );

        Ok(Self {
            join,
            parts,
            placement,
            initial: definition.initial,
            final_str: definition.final_str,
            skip_modifiers: definition.skip_modifiers,
            transforms,
        })
    }

    /// String emitted once when a destination opens.
    #[must_use]
    pub fn initial(&self) -> &str {
        &self.initial
    }

    /// String emitted once when a destination closes.
    #[must_use]
    pub fn final_str(&self) -> &str {
        &self.final_str
    }

    /// Whether unresolvable modifiers substitute `""` instead of dropping the part.
    #[must_use]
    pub fn skip_modifiers(&self) -> bool {
        self.skip_modifiers
    }

    /// Check if the join template is empty, so every record renders as `""`.
    #[must_use]
    pub fn is_silent(&self) -> bool {
        self.join.segments().is_empty()
    }

    /// Part names in render order.
    pub fn part_names(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().map(|part| part.name.as_str())
    }

    /// Render one part, or `None` if it must be dropped for this record.
    fn render_part(&self, part: &CompiledPart, record: &LogRecord) -> Option<String> {
        let mut values = Vec::with_capacity(part.keys.len());
        for key in &part.keys {
            match key {
                ResolvedKey::Plain(field) => {
                    let value = record.get(field)?;
                    values.push(match self.transforms.get(field) {
                        Some(transform) => FieldValue::Str(transform.apply(&value.to_string())),
                        None => value.clone(),
                    });
                }
                ResolvedKey::Derived {
                    selector_field,
                    modifiers,
                } => {
                    let substitution = record
                        .get(selector_field)
                        .and_then(|selector| modifiers.get(&selector.to_string()));
                    match substitution {
                        Some(text) => values.push(FieldValue::from(text)),
                        None if self.skip_modifiers => values.push(FieldValue::from("")),
                        None => return None,
                    }
                }
            }
        }
        Some(part.format.format_values(&values))
    }

    /// Render a record into one line.
    ///
    /// A part with a missing plain field (or an unresolvable modifier while
    /// `skip_modifiers` is off) renders as nothing. Non-empty parts are
    /// separated by exactly one space in the order the join template places
    /// them, with no space after the last one.
    #[must_use]
    pub fn render(&self, record: &LogRecord) -> String {
        let mut rendered = vec![String::new(); self.parts.len()];
        for &idx in &self.placement {
            let part = &self.parts[idx];
            rendered[idx] = self.render_part(part, record).unwrap_or_else(|| {
                tracing::trace!(part = %part.name, "part skipped");
                String::new()
            });
        }

        let placed = |pos: &usize| !rendered[*pos].is_empty();
        if let Some(last) = self.placement.iter().rposition(placed) {
            for &idx in &self.placement[..last] {
                if !rendered[idx].is_empty() {
                    rendered[idx].push(' ');
                }
            }
        }

        let by_name: HashMap<&str, String> = self
            .parts
            .iter()
            .map(|part| part.name.as_str())
            .zip(rendered)
            .collect();
        self.join
            .format_with(|name| by_name.get(name).cloned().map(FieldValue::Str))
            .unwrap_or_default()
    }
}
