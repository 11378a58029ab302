//! Modifier tables: family → dependency → selector value → substitution.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Suffix appended to a family name to form its table key.
pub const FAMILY_SUFFIX: &str = "_modifiers";

/// Lookup tables for derived placeholders.
///
/// Keys are `<FAMILY>_modifiers`, e.g. `EVENT_TYPE_modifiers`. Values are
/// kept as loose JSON until a style asks for them, so a malformed entry is
/// only reported when a template actually references it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModifierTable {
    families: Map<String, Value>,
}

/// Resolved selector → substitution mapping for one family/dependency pair.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModifierMap {
    entries: BTreeMap<String, String>,
}

impl ModifierMap {
    /// Substitution for a selector value, if the table has one.
    #[must_use]
    pub fn get(&self, selector: &str) -> Option<&str> {
        self.entries.get(selector).map(String::as_str)
    }

    /// Number of selector entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl ModifierTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a table from JSON text.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Add (or replace) the entries of one family/dependency pair.
    ///
    /// `family` is given without the `_modifiers` suffix.
    #[must_use]
    pub fn with<I, K, V>(mut self, family: &str, dependency: &str, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.insert(family, dependency, entries);
        self
    }

    /// In-place form of [`Self::with`].
    pub fn insert<I, K, V>(&mut self, family: &str, dependency: &str, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map: Map<String, Value> = entries
            .into_iter()
            .map(|(k, v)| (k.into(), Value::String(v.into())))
            .collect();
        let family_entry = self
            .families
            .entry(format!("{family}{FAMILY_SUFFIX}"))
            .or_insert_with(|| Value::Object(Map::new()));
        if !family_entry.is_object() {
            *family_entry = Value::Object(Map::new());
        }
        if let Value::Object(deps) = family_entry {
            deps.insert(dependency.to_string(), Value::Object(map));
        }
    }

    /// Check whether a family (without suffix) is present.
    #[must_use]
    pub fn has_family(&self, family: &str) -> bool {
        self.families
            .contains_key(&format!("{family}{FAMILY_SUFFIX}"))
    }

    /// Validate and extract the mapping for `family`/`dependency`.
    ///
    /// `key` is the placeholder that asked for it, used in error messages.
    pub fn resolve(
        &self,
        family: &str,
        dependency: &str,
        key: &str,
    ) -> Result<ModifierMap, ConfigError> {
        let wrong_shape = |found: &Value| ConfigError::WrongShape {
            family: family.to_string(),
            dependency: dependency.to_string(),
            found: json_kind(found).to_string(),
        };

        let family_value = self
            .families
            .get(&format!("{family}{FAMILY_SUFFIX}"))
            .ok_or_else(|| ConfigError::MissingModifierFamily {
                family: family.to_string(),
                key: key.to_string(),
            })?;
        let Value::Object(deps) = family_value else {
            return Err(wrong_shape(family_value));
        };
        let dep_value = deps
            .get(dependency)
            .ok_or_else(|| ConfigError::MissingModifierDependency {
                family: family.to_string(),
                dependency: dependency.to_string(),
                key: key.to_string(),
            })?;
        let Value::Object(selectors) = dep_value else {
            return Err(wrong_shape(dep_value));
        };

        let mut entries = BTreeMap::new();
        for (selector, value) in selectors {
            let Value::String(text) = value else {
                return Err(wrong_shape(value));
            };
            entries.insert(selector.clone(), text.clone());
        }
        Ok(ModifierMap { entries })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ModifierTable {
        ModifierTable::new().with(
            "EVENT_TYPE",
            "style_modifier",
            [("ERROR", "\x1b[38;5;1m"), ("INFO", "")],
        )
    }

    #[test]
    fn test_resolve_ok() {
        let map = table()
            .resolve("EVENT_TYPE", "style_modifier", "EVENT_TYPE_style_modifier")
            .unwrap();
        assert_eq!(map.get("ERROR"), Some("\x1b[38;5;1m"));
        assert_eq!(map.get("INFO"), Some(""));
        assert_eq!(map.get("UNKNOWN"), None);
    }

    #[test]
    fn test_missing_family() {
        let err = table().resolve("BadFamily", "thing", "BadFamily_thing").unwrap_err();
        assert!(matches!(err, ConfigError::MissingModifierFamily { ref family, .. } if family == "BadFamily"));
    }

    #[test]
    fn test_missing_dependency() {
        let err = table().resolve("EVENT_TYPE", "nope", "EVENT_TYPE_nope").unwrap_err();
        assert!(matches!(err, ConfigError::MissingModifierDependency { .. }));
    }

    #[test]
    fn test_wrong_shape_from_json() {
        let table = ModifierTable::from_json(
            r#"{"EVENT_TYPE_modifiers": {"style_modifier": "not a mapping"}}"#,
        )
        .unwrap();
        let err = table
            .resolve("EVENT_TYPE", "style_modifier", "EVENT_TYPE_style_modifier")
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::WrongShape {
                family: "EVENT_TYPE".to_string(),
                dependency: "style_modifier".to_string(),
                found: "string".to_string(),
            }
        );
    }

    #[test]
    fn test_non_string_entry_is_wrong_shape() {
        let table = ModifierTable::from_json(
            r#"{"LEVEL_modifiers": {"color": {"ERROR": 1}}}"#,
        )
        .unwrap();
        assert!(matches!(
            table.resolve("LEVEL", "color", "LEVEL_color"),
            Err(ConfigError::WrongShape { .. })
        ));
    }
}
