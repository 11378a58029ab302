//! Terminal size and TTY queries.
//!
//! # Safety
//! This module uses unsafe code for FFI calls to libc (`isatty`, `ioctl`).

#![allow(unsafe_code)]
#![allow(clippy::borrow_as_ptr)]

use std::env;
use std::io;
use std::os::unix::io::AsRawFd;

/// Column count assumed when neither the TTY nor `COLUMNS` reports one.
pub const FALLBACK_COLUMNS: usize = 80;

/// Check if the given file descriptor is a TTY.
#[must_use]
pub fn is_tty<F: AsRawFd>(fd: &F) -> bool {
    // SAFETY: isatty is safe to call with any fd
    unsafe { libc::isatty(fd.as_raw_fd()) == 1 }
}

/// Get the terminal size of stdout as `(columns, rows)`.
///
/// Returns an error if the terminal size cannot be determined or if the
/// returned dimensions are zero.
pub fn terminal_size() -> io::Result<(u16, u16)> {
    let mut size: libc::winsize = unsafe { std::mem::zeroed() };

    // SAFETY: ioctl with TIOCGWINSZ is safe when passed a valid winsize struct
    let result = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &mut size) };

    if result == -1 {
        Err(io::Error::last_os_error())
    } else if size.ws_col == 0 || size.ws_row == 0 {
        Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "terminal reported zero dimensions",
        ))
    } else {
        Ok((size.ws_col, size.ws_row))
    }
}

/// Parse a `COLUMNS`-style override.
fn parse_columns(value: Option<&str>) -> Option<usize> {
    value?.trim().parse().ok().filter(|&n: &usize| n > 0)
}

/// Visible terminal width in columns.
///
/// Tries the stdout TTY first, then the `COLUMNS` environment variable,
/// then [`FALLBACK_COLUMNS`].
#[must_use]
pub fn terminal_columns() -> usize {
    match terminal_size() {
        Ok((cols, _)) => usize::from(cols),
        Err(err) => {
            let columns = parse_columns(env::var("COLUMNS").ok().as_deref());
            tracing::trace!(%err, ?columns, "terminal size unavailable");
            columns.unwrap_or(FALLBACK_COLUMNS)
        }
    }
}
