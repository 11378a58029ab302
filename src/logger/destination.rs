//! Where rendered lines go.

use crate::error::Result;
use crate::sticky::{StickyConsole, WidthSource};
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Boxed terminal writer used by console destinations.
pub type ConsoleWriter = Box<dyn Write>;

/// A sink for rendered log lines.
pub trait Destination {
    /// Write one line. The destination adds the line terminator.
    fn write_line(&mut self, line: &str) -> Result<()>;

    /// Flush and release the destination. Called once, after the last line.
    fn close(&mut self) -> Result<()> {
        Ok(())
    }

    /// The sticky console behind this destination, if it has one.
    fn console_mut(&mut self) -> Option<&mut StickyConsole<ConsoleWriter>> {
        None
    }
}

/// Terminal output with sticky status lines.
pub struct ConsoleDestination {
    console: StickyConsole<ConsoleWriter>,
}

impl ConsoleDestination {
    /// Write to stdout, sizing sticky lines from the terminal.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()), WidthSource::Terminal)
    }

    #[must_use]
    pub fn new(writer: ConsoleWriter, width: WidthSource) -> Self {
        Self {
            console: StickyConsole::with_width(writer, width),
        }
    }

    #[must_use]
    pub fn console(&self) -> &StickyConsole<ConsoleWriter> {
        &self.console
    }
}

impl fmt::Debug for ConsoleDestination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleDestination")
            .field("boards", &self.console.board_count())
            .field("drawn_lines", &self.console.drawn_lines())
            .finish_non_exhaustive()
    }
}

impl Destination for ConsoleDestination {
    fn write_line(&mut self, line: &str) -> Result<()> {
        self.console.log_line(line)
    }

    fn console_mut(&mut self) -> Option<&mut StickyConsole<ConsoleWriter>> {
        Some(&mut self.console)
    }
}

/// A log file, truncated when opened.
#[derive(Debug)]
pub struct FileDestination {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl FileDestination {
    /// Create or truncate the file at `path`.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path)?;
        tracing::debug!(path = %path.display(), "opened log file");
        Ok(Self {
            path,
            writer: BufWriter::new(file),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Destination for FileDestination {
    fn write_line(&mut self, line: &str) -> Result<()> {
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Hands every line to a closure.
pub struct CallbackDestination {
    callback: Box<dyn FnMut(&str)>,
}

impl CallbackDestination {
    pub fn new<F>(callback: F) -> Self
    where
        F: FnMut(&str) + 'static,
    {
        Self {
            callback: Box::new(callback),
        }
    }
}

impl fmt::Debug for CallbackDestination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CallbackDestination(..)")
    }
}

impl Destination for CallbackDestination {
    fn write_line(&mut self, line: &str) -> Result<()> {
        (self.callback)(line);
        Ok(())
    }
}
