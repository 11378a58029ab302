//! Placeholder classification: plain record fields vs derived modifiers.

/// A parsed placeholder name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlaceholderKey {
    /// Substituted directly from the record field of the same name.
    Plain(String),
    /// Substituted from `<family>_modifiers[dependency][selector]`, where the
    /// selector is the record field named by the lower-cased family.
    Derived {
        key: String,
        family: String,
        dependency: String,
    },
}

impl PlaceholderKey {
    /// Classify a placeholder by its first character.
    ///
    /// Names starting with a lowercase letter are plain fields; everything
    /// else is a derived modifier reference.
    #[must_use]
    pub fn classify(name: &str) -> Self {
        if name.chars().next().is_some_and(char::is_lowercase) {
            return Self::Plain(name.to_string());
        }
        let (family, dependency) = split_derived(name);
        Self::Derived {
            key: name.to_string(),
            family,
            dependency,
        }
    }

    /// The placeholder name as written in the template.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Plain(name) | Self::Derived { key: name, .. } => name,
        }
    }

    /// Record field consulted for the value (plain) or selector (derived).
    #[must_use]
    pub fn source_field(&self) -> String {
        match self {
            Self::Plain(name) => name.clone(),
            Self::Derived { family, .. } => family.to_lowercase(),
        }
    }
}

/// Split a derived key into `(family, dependency)`.
///
/// Characters accumulate into the family until the first lowercase letter,
/// then into the dependency for the rest of the key. Non-alphabetic
/// characters are held back and attached to whichever side the next letter
/// lands on, except that the run straddling the switch is dropped:
/// `EVENT_TYPE_style_modifier` gives `("EVENT_TYPE", "style_modifier")`.
#[must_use]
pub fn split_derived(key: &str) -> (String, String) {
    let mut family = String::new();
    let mut dependency = String::new();
    let mut pending = String::new();

    for c in key.chars() {
        if !c.is_alphabetic() {
            pending.push(c);
            continue;
        }
        if c.is_lowercase() || !dependency.is_empty() {
            if dependency.is_empty() {
                pending.clear();
            }
            dependency.push_str(&pending);
            dependency.push(c);
        } else {
            family.push_str(&pending);
            family.push(c);
        }
        pending.clear();
    }
    (family, dependency)
}
