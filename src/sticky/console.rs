//! In-place redraw of sticky lines below ordinary log output.

use super::board::StickyBoard;
use crate::ansi::ERASE_PREVIOUS_LINE;
use crate::error::Result;
use crate::terminal::{terminal_columns, terminal_size};
use std::io::Write;

/// Handle to a board owned by a [`StickyConsole`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoardId(u64);

/// Where the console gets the terminal width from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WidthSource {
    /// Ask the stdout TTY on every redraw, falling back to `COLUMNS` or 80.
    #[default]
    Terminal,
    /// Always use this width.
    Fixed(usize),
}

/// Redraw counters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RedrawStats {
    pub redraws: u64,
    pub lines_logged: u64,
    pub lines_erased: u64,
}

/// The single writer for one terminal stream.
///
/// Ordinary lines scroll up as usual; every board keeps one line at the
/// bottom that is erased and redrawn around each write. The console
/// remembers how many sticky lines are on screen, so removing a board
/// still erases the line it left behind.
///
/// Output for one operation is assembled in a buffer and written with a
/// single `write_all` + `flush`.
pub struct StickyConsole<W: Write> {
    writer: W,
    buffer: Vec<u8>,
    boards: Vec<(BoardId, StickyBoard)>,
    next_id: u64,
    drawn_lines: usize,
    width: WidthSource,
    warned_width_fallback: bool,
    stats: RedrawStats,
}

impl<W: Write> StickyConsole<W> {
    /// Create a console that sizes boards from the terminal.
    pub fn new(writer: W) -> Self {
        Self::with_width(writer, WidthSource::Terminal)
    }

    /// Create a console with an explicit width source.
    pub fn with_width(writer: W, width: WidthSource) -> Self {
        Self {
            writer,
            buffer: Vec::with_capacity(1024),
            boards: Vec::new(),
            next_id: 0,
            drawn_lines: 0,
            width,
            warned_width_fallback: false,
            stats: RedrawStats::default(),
        }
    }

    pub fn set_width_source(&mut self, width: WidthSource) {
        self.width = width;
    }

    /// Add a board below the existing ones. It appears on the next redraw.
    pub fn add_board(&mut self, board: StickyBoard) -> BoardId {
        let id = BoardId(self.next_id);
        self.next_id += 1;
        self.boards.push((id, board));
        id
    }

    /// Remove a board. Its line is erased on the next redraw.
    pub fn remove_board(&mut self, id: BoardId) -> Option<StickyBoard> {
        let idx = self.boards.iter().position(|(bid, _)| *bid == id)?;
        Some(self.boards.remove(idx).1)
    }

    #[must_use]
    pub fn board(&self, id: BoardId) -> Option<&StickyBoard> {
        self.boards.iter().find(|(bid, _)| *bid == id).map(|(_, b)| b)
    }

    pub fn board_mut(&mut self, id: BoardId) -> Option<&mut StickyBoard> {
        self.boards
            .iter_mut()
            .find(|(bid, _)| *bid == id)
            .map(|(_, b)| b)
    }

    /// Number of boards.
    #[must_use]
    pub fn board_count(&self) -> usize {
        self.boards.len()
    }

    /// Sticky lines currently on screen.
    #[must_use]
    pub fn drawn_lines(&self) -> usize {
        self.drawn_lines
    }

    #[must_use]
    pub fn stats(&self) -> &RedrawStats {
        &self.stats
    }

    /// Borrow the underlying writer.
    #[must_use]
    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Consume the console and return the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Terminal width used for the next redraw.
    pub fn columns(&mut self) -> usize {
        match self.width {
            WidthSource::Fixed(n) => n,
            WidthSource::Terminal => match terminal_size() {
                Ok((cols, _)) => usize::from(cols),
                Err(err) => {
                    if !self.warned_width_fallback {
                        self.warned_width_fallback = true;
                        tracing::warn!(%err, "cannot query terminal width; using COLUMNS or default");
                    }
                    terminal_columns()
                }
            },
        }
    }

    fn summary_lines(&mut self) -> Result<Vec<String>> {
        let width = self.columns();
        self.boards
            .iter_mut()
            .map(|(_, board)| board.summary_string(width))
            .collect()
    }

    fn push_erase(&mut self) {
        for _ in 0..self.drawn_lines {
            self.buffer.extend_from_slice(ERASE_PREVIOUS_LINE.as_bytes());
        }
    }

    fn push_lines(&mut self, lines: &[String]) {
        for line in lines {
            self.buffer.extend_from_slice(line.as_bytes());
            self.buffer.push(b'\n');
        }
    }

    /// Write the buffer, then record `drawn` sticky lines as on screen.
    ///
    /// After a failed write the screen state is unknown; no sticky lines are
    /// assumed, so the next redraw never erases ordinary output.
    fn flush_buffer(&mut self, drawn: usize) -> Result<()> {
        let written = self
            .writer
            .write_all(&self.buffer)
            .and_then(|()| self.writer.flush());
        self.buffer.clear();
        if let Err(err) = written {
            self.drawn_lines = 0;
            return Err(err.into());
        }
        self.stats.lines_erased += self.drawn_lines as u64;
        self.drawn_lines = drawn;
        Ok(())
    }

    /// Write one ordinary line above the sticky region.
    ///
    /// Nothing is written if a board fails to render.
    pub fn log_line(&mut self, line: &str) -> Result<()> {
        let lines = self.summary_lines()?;
        self.buffer.clear();
        self.push_erase();
        self.buffer.extend_from_slice(line.as_bytes());
        self.buffer.push(b'\n');
        self.push_lines(&lines);
        self.flush_buffer(lines.len())?;
        self.stats.lines_logged += 1;
        Ok(())
    }

    /// Erase and redraw every sticky line.
    pub fn refresh(&mut self) -> Result<()> {
        let lines = self.summary_lines()?;
        self.buffer.clear();
        let erased = self.drawn_lines;
        self.push_erase();
        self.push_lines(&lines);
        self.flush_buffer(lines.len())?;
        self.stats.redraws += 1;
        tracing::trace!(erased, drawn = self.drawn_lines, "sticky lines redrawn");
        Ok(())
    }

    /// Advance every board's marquee one step and redraw.
    pub fn tick(&mut self) -> Result<()> {
        for (_, board) in &mut self.boards {
            board.advance_marquee()?;
        }
        self.refresh()
    }

    /// Erase the sticky region without redrawing it.
    pub fn clear_sticky(&mut self) -> Result<()> {
        self.buffer.clear();
        self.push_erase();
        self.flush_buffer(0)
    }
}
