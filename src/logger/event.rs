//! Event types and verbosity levels.

use crate::styles::STANDARD_EVENT_TYPES;
use std::collections::BTreeMap;
use std::fmt;

/// Severity or category of a log message.
///
/// The name is written into the `event_type` record field.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventType {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
    /// Any other name, stored upper-case.
    Custom(String),
}

impl EventType {
    /// Normalise a name: upper-case, with `_` read as a space.
    ///
    /// ```
    /// use yapl_rust::logger::EventType;
    ///
    /// assert_eq!(EventType::new("warning"), EventType::Warning);
    /// assert_eq!(EventType::new("cache_miss").as_str(), "CACHE MISS");
    /// ```
    #[must_use]
    pub fn new(name: &str) -> Self {
        let name = name.to_uppercase().replace('_', " ");
        match name.as_str() {
            "DEBUG" => Self::Debug,
            "INFO" => Self::Info,
            "WARNING" => Self::Warning,
            "ERROR" => Self::Error,
            "CRITICAL" => Self::Critical,
            _ => Self::Custom(name),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
            Self::Custom(name) => name,
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for EventType {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// The event types a logger accepts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EventSet {
    /// Every event type is accepted at level 0 unless overridden.
    Any,
    /// Only these, listed from most to least verbose.
    List(Vec<EventType>),
}

impl Default for EventSet {
    fn default() -> Self {
        Self::standard()
    }
}

impl EventSet {
    /// `DEBUG`, `WARNING`, `ERROR`, `INFO`, `CRITICAL`.
    #[must_use]
    pub fn standard() -> Self {
        Self::List(STANDARD_EVENT_TYPES.iter().map(|name| EventType::new(name)).collect())
    }

    /// Build a list from names.
    pub fn list<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::List(names.into_iter().map(|name| EventType::new(name.as_ref())).collect())
    }

    #[must_use]
    pub fn contains(&self, event: &EventType) -> bool {
        match self {
            Self::Any => true,
            Self::List(events) => events.contains(event),
        }
    }

    /// Number of listed event types; zero for [`EventSet::Any`].
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Any => 0,
            Self::List(events) => events.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Level implied by list position: the first entry gets `len - 1`,
    /// the last gets 0. `None` if the event is not listed.
    #[must_use]
    pub fn position_level(&self, event: &EventType) -> Option<usize> {
        match self {
            Self::Any => Some(0),
            Self::List(events) => events
                .iter()
                .position(|e| e == event)
                .map(|idx| events.len() - idx - 1),
        }
    }
}

/// Verbosity filter: which levels get through.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Verbosity {
    overrides: BTreeMap<EventType, usize>,
    threshold: Option<usize>,
}

impl Verbosity {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fix the level of one event type instead of deriving it from position.
    pub fn set_level(&mut self, event: EventType, level: usize) {
        self.overrides.insert(event, level);
    }

    pub fn clear_levels(&mut self) {
        self.overrides.clear();
    }

    /// Emit only messages whose level is at most `threshold`.
    pub fn set_threshold(&mut self, threshold: usize) {
        self.threshold = Some(threshold);
    }

    /// Return to the default threshold: the number of event types.
    pub fn reset_threshold(&mut self) {
        self.threshold = None;
    }

    #[must_use]
    pub fn threshold(&self, events: &EventSet) -> usize {
        self.threshold.unwrap_or_else(|| events.len())
    }

    /// Level of `event`, or `None` if `events` does not accept it.
    #[must_use]
    pub fn level_of(&self, events: &EventSet, event: &EventType) -> Option<usize> {
        if !events.contains(event) {
            return None;
        }
        self.overrides
            .get(event)
            .copied()
            .or_else(|| events.position_level(event))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalise() {
        assert_eq!(EventType::new("Critical"), EventType::Critical);
        assert_eq!(EventType::new("db_query"), EventType::Custom("DB QUERY".to_string()));
        assert_eq!(EventType::Info.to_string(), "INFO");
    }

    #[test]
    fn test_standard_levels() {
        let events = EventSet::standard();
        let verbosity = Verbosity::new();
        assert_eq!(verbosity.level_of(&events, &EventType::Debug), Some(4));
        assert_eq!(verbosity.level_of(&events, &EventType::Info), Some(1));
        assert_eq!(verbosity.level_of(&events, &EventType::Critical), Some(0));
        assert_eq!(verbosity.threshold(&events), 5);
    }

    #[test]
    fn test_unknown_event() {
        let events = EventSet::list(["a", "b"]);
        assert_eq!(Verbosity::new().level_of(&events, &EventType::Debug), None);
    }

    #[test]
    fn test_overrides() {
        let events = EventSet::standard();
        let mut verbosity = Verbosity::new();
        verbosity.set_level(EventType::Info, 7);
        verbosity.set_threshold(3);
        assert_eq!(verbosity.level_of(&events, &EventType::Info), Some(7));
        assert_eq!(verbosity.threshold(&events), 3);
    }

    #[test]
    fn test_any_accepts_everything() {
        let events = EventSet::Any;
        let verbosity = Verbosity::new();
        assert_eq!(verbosity.level_of(&events, &EventType::new("whatever")), Some(0));
        assert_eq!(verbosity.threshold(&events), 0);
    }
}
