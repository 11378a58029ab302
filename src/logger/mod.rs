//! Logger: event filtering and fan-out to styled destinations.
//!
//! A [`Logger`] turns `log(event, message)` calls into [`LogRecord`]s,
//! adds generated fields (date, caller location), and writes one rendered
//! line per destination, each with its own [`StyleTemplate`].
//!
//! Destinations are opened and closed through [`Logger::open`], which
//! returns a [`LoggerGuard`]. Each destination's style `initial` string is
//! written on open and its `final` string when the guard is closed or
//! dropped.
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use yapl_rust::logger::Logger;
//! use yapl_rust::styles;
//!
//! let lines = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&lines);
//!
//! let mut logger = Logger::new();
//! logger
//!     .add_callback("test", styles::file().unwrap(), move |line| {
//!         sink.borrow_mut().push(line.to_string());
//!     })
//!     .unwrap();
//!
//! let mut guard = logger.open().unwrap();
//! guard.info("service started").unwrap();
//! guard.close().unwrap();
//!
//! assert_eq!(*lines.borrow(), vec!["[INFO]: service started"]);
//! ```

pub mod datagen;
pub mod destination;
pub mod event;

pub use datagen::{CallerLocation, DataGen, DateTime, Generated};
pub use destination::{
    CallbackDestination, ConsoleDestination, ConsoleWriter, Destination, FileDestination,
};
pub use event::{EventSet, EventType, Verbosity};

use crate::error::{Error, Result};
use crate::record::LogRecord;
use crate::sticky::StickyConsole;
use crate::styles;
use crate::template::StyleTemplate;
use crate::terminal::ColorSupport;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::panic::Location;
use std::path::PathBuf;

/// Identity of a destination. A logger holds at most one per key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DestinationKey {
    Stdout,
    File(PathBuf),
    Callback(String),
}

impl fmt::Display for DestinationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => f.write_str("stdout"),
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Callback(name) => write!(f, "callback:{name}"),
        }
    }
}

type RecordCallback = Box<dyn FnMut(&LogRecord)>;

struct Route {
    key: DestinationKey,
    destination: Box<dyn Destination>,
    style: StyleTemplate,
    on_record: Vec<RecordCallback>,
}

impl Route {
    fn write_raw(&mut self, text: &str) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        self.destination.write_line(text)
    }

    fn write_record(&mut self, record: &LogRecord) -> Result<()> {
        if !self.style.is_silent() {
            let line = self.style.render(record);
            self.destination.write_line(&line)?;
        }
        for callback in &mut self.on_record {
            callback(record);
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        let final_str = self.style.final_str().to_string();
        let written = self.write_raw(&final_str);
        let closed = self.destination.close();
        written.and(closed)
    }
}

/// Filters events and writes them to every destination.
#[derive(Default)]
pub struct Logger {
    routes: Vec<Route>,
    events: EventSet,
    verbosity: Verbosity,
    datagens: Vec<(String, Box<dyn DataGen>)>,
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field(
                "destinations",
                &self.routes.iter().map(|r| &r.key).collect::<Vec<_>>(),
            )
            .field("events", &self.events)
            .field("verbosity", &self.verbosity)
            .field(
                "datagens",
                &self.datagens.iter().map(|(name, _)| name).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Logger {
    /// A logger with the standard event types and no destinations.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stdout logging with caller location and date fields.
    ///
    /// Uses the coloured [`styles::stdout`] style unless colour is disabled
    /// (`NO_COLOR`, `TERM=dumb`, or stdout is not a TTY), in which case
    /// [`styles::file`] is used.
    pub fn console() -> Result<Self> {
        let mut logger = Self::new();
        logger.add_stdout(styles::for_terminal(ColorSupport::detect_stdout())?)?;
        logger.add_datagen("location", CallerLocation::default());
        logger.add_datagen("date_time", DateTime);
        Ok(logger)
    }

    /// Register a destination under `key`.
    pub fn add_destination(
        &mut self,
        key: DestinationKey,
        destination: Box<dyn Destination>,
        style: StyleTemplate,
    ) -> Result<()> {
        if self.routes.iter().any(|route| route.key == key) {
            return Err(Error::DuplicateDestination(key.to_string()));
        }
        tracing::debug!(destination = %key, "destination added");
        self.routes.push(Route {
            key,
            destination,
            style,
            on_record: Vec::new(),
        });
        Ok(())
    }

    /// Log to stdout.
    pub fn add_stdout(&mut self, style: StyleTemplate) -> Result<()> {
        self.add_destination(
            DestinationKey::Stdout,
            Box::new(ConsoleDestination::stdout()),
            style,
        )
    }

    /// Log to a file, truncating it.
    pub fn add_file(&mut self, path: impl Into<PathBuf>, style: StyleTemplate) -> Result<()> {
        let path = path.into();
        let key = DestinationKey::File(path.clone());
        if self.has_destination(&key) {
            return Err(Error::DuplicateDestination(key.to_string()));
        }
        let destination = FileDestination::create(&path)?;
        self.add_destination(key, Box::new(destination), style)
    }

    /// Hand rendered lines to a closure.
    pub fn add_callback<F>(
        &mut self,
        name: impl Into<String>,
        style: StyleTemplate,
        callback: F,
    ) -> Result<()>
    where
        F: FnMut(&str) + 'static,
    {
        self.add_destination(
            DestinationKey::Callback(name.into()),
            Box::new(CallbackDestination::new(callback)),
            style,
        )
    }

    #[must_use]
    pub fn has_destination(&self, key: &DestinationKey) -> bool {
        self.routes.iter().any(|route| route.key == *key)
    }

    fn route_mut(&mut self, key: &DestinationKey) -> Option<&mut Route> {
        self.routes.iter_mut().find(|route| route.key == *key)
    }

    /// Close a destination, writing its style's final string first.
    ///
    /// Returns `Ok(false)` if there was no such destination.
    pub fn remove_destination(&mut self, key: &DestinationKey) -> Result<bool> {
        let Some(idx) = self.routes.iter().position(|route| route.key == *key) else {
            return Ok(false);
        };
        let mut route = self.routes.remove(idx);
        route.finish()?;
        Ok(true)
    }

    /// Replace the style of one destination.
    pub fn set_style(&mut self, key: &DestinationKey, style: StyleTemplate) -> bool {
        let Some(route) = self.route_mut(key) else {
            return false;
        };
        route.style = style;
        true
    }

    /// Call `callback` with every record written to `key`.
    pub fn on_record<F>(&mut self, key: &DestinationKey, callback: F) -> bool
    where
        F: FnMut(&LogRecord) + 'static,
    {
        let Some(route) = self.route_mut(key) else {
            return false;
        };
        route.on_record.push(Box::new(callback));
        true
    }

    /// The sticky console of the stdout destination.
    pub fn console_mut(&mut self) -> Option<&mut StickyConsole<ConsoleWriter>> {
        self.route_mut(&DestinationKey::Stdout)?
            .destination
            .console_mut()
    }

    /// Add a field generator, replacing one with the same name.
    pub fn add_datagen(&mut self, name: impl Into<String>, datagen: impl DataGen + 'static) {
        let name = name.into();
        let datagen: Box<dyn DataGen> = Box::new(datagen);
        match self.datagens.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = datagen,
            None => self.datagens.push((name, datagen)),
        }
    }

    pub fn remove_datagen(&mut self, name: &str) -> bool {
        let before = self.datagens.len();
        self.datagens.retain(|(n, _)| n != name);
        self.datagens.len() != before
    }

    #[must_use]
    pub fn events(&self) -> &EventSet {
        &self.events
    }

    /// Replace the accepted event types. Levels follow the new order.
    pub fn set_event_types(&mut self, events: EventSet) {
        self.events = events;
    }

    /// Fix the level of one event type.
    pub fn set_level(&mut self, event: impl Into<EventType>, level: usize) {
        self.verbosity.set_level(event.into(), level);
    }

    /// Emit only events whose level is at most `verbosity`.
    pub fn set_verbosity(&mut self, verbosity: usize) {
        self.verbosity.set_threshold(verbosity);
    }

    #[must_use]
    pub fn verbosity(&self) -> usize {
        self.verbosity.threshold(&self.events)
    }

    /// Log a message at its event type's level.
    #[track_caller]
    pub fn log(&mut self, event: impl Into<EventType>, message: &str) -> Result<()> {
        self.log_at(event, message, None)
    }

    /// Log a message, optionally overriding its level.
    #[track_caller]
    pub fn log_at(
        &mut self,
        event: impl Into<EventType>,
        message: &str,
        level: Option<usize>,
    ) -> Result<()> {
        let event = event.into();
        let Some(default_level) = self.verbosity.level_of(&self.events, &event) else {
            return Err(Error::UnknownEventType(event.to_string()));
        };
        if level.unwrap_or(default_level) > self.verbosity() {
            return Ok(());
        }

        let caller = Location::caller();
        let mut record = LogRecord::new()
            .with("event_type", event.as_str())
            .with("message", message);
        for (name, datagen) in &self.datagens {
            match datagen.generate(caller) {
                Generated::Value(value) => record.insert(name.clone(), value),
                Generated::Fields(fields) => record.merge(fields),
            }
        }
        self.log_record(&record)
    }

    /// Write a prepared record to every destination.
    pub fn log_record(&mut self, record: &LogRecord) -> Result<()> {
        let mut result = Ok(());
        for route in &mut self.routes {
            if let Err(err) = route.write_record(record) {
                tracing::warn!(destination = %route.key, %err, "write failed");
                result = result.and(Err(err));
            }
        }
        result
    }

    #[track_caller]
    pub fn debug(&mut self, message: &str) -> Result<()> {
        self.log(EventType::Debug, message)
    }

    #[track_caller]
    pub fn info(&mut self, message: &str) -> Result<()> {
        self.log(EventType::Info, message)
    }

    #[track_caller]
    pub fn warning(&mut self, message: &str) -> Result<()> {
        self.log(EventType::Warning, message)
    }

    #[track_caller]
    pub fn error(&mut self, message: &str) -> Result<()> {
        self.log(EventType::Error, message)
    }

    #[track_caller]
    pub fn critical(&mut self, message: &str) -> Result<()> {
        self.log(EventType::Critical, message)
    }

    /// Write every destination's initial string and hand back a guard that
    /// writes the final strings when it goes away.
    pub fn open(mut self) -> Result<LoggerGuard> {
        for route in &mut self.routes {
            let initial = route.style.initial().to_string();
            route.write_raw(&initial)?;
        }
        Ok(LoggerGuard {
            logger: self,
            closed: false,
        })
    }

    fn finish(&mut self) -> Result<()> {
        let mut result = Ok(());
        for route in &mut self.routes {
            result = result.and(route.finish());
        }
        result
    }
}

/// An open [`Logger`]. Dereferences to the logger.
///
/// Closing writes each destination's final string and closes it. Dropping
/// the guard does the same and reports failures through `tracing`.
pub struct LoggerGuard {
    logger: Logger,
    closed: bool,
}

impl LoggerGuard {
    /// Close every destination, returning the first error.
    pub fn close(mut self) -> Result<()> {
        self.closed = true;
        self.logger.finish()
    }
}

impl fmt::Debug for LoggerGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerGuard")
            .field("logger", &self.logger)
            .field("closed", &self.closed)
            .finish()
    }
}

impl Deref for LoggerGuard {
    type Target = Logger;

    fn deref(&self) -> &Logger {
        &self.logger
    }
}

impl DerefMut for LoggerGuard {
    fn deref_mut(&mut self) -> &mut Logger {
        &mut self.logger
    }
}

impl Drop for LoggerGuard {
    fn drop(&mut self) {
        if !self.closed {
            self.closed = true;
            if let Err(err) = self.logger.finish() {
                tracing::warn!(%err, "closing logger failed");
            }
        }
    }
}
