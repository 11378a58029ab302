//! Constant ANSI escape sequences.

/// Reset all attributes to default.
pub const RESET: &str = "\x1b[0m";

/// Bold/increased intensity.
pub const BOLD: &str = "\x1b[1m";

/// Move the cursor up one line.
pub const CURSOR_UP: &str = "\x1b[1A";

/// Clear entire line.
pub const CLEAR_LINE: &str = "\x1b[2K";

/// Move up one line and clear it; emitted once per sticky line being erased.
pub const ERASE_PREVIOUS_LINE: &str = "\x1b[1A\x1b[2K";

/// Hide cursor.
pub const CURSOR_HIDE: &str = "\x1b[?25l";

/// Show cursor.
pub const CURSOR_SHOW: &str = "\x1b[?25h";

/// Generate a 256-color palette foreground sequence (`ESC[38;5;Nm`).
#[must_use]
pub fn fg_256(index: u8) -> String {
    format!("\x1b[38;5;{index}m")
}

/// Generate a 256-color palette background sequence (`ESC[48;5;Nm`).
#[must_use]
pub fn bg_256(index: u8) -> String {
    format!("\x1b[48;5;{index}m")
}

/// Palette indices used by the built-in styles.
pub mod palette {
    pub const RED: u8 = 1;
    pub const GREEN: u8 = 2;
    pub const YELLOW: u8 = 3;
    pub const MAGENTA: u8 = 5;
    pub const CYAN: u8 = 6;
    pub const GRAY: u8 = 8;
    pub const WHITE: u8 = 15;
}
