//! Constant ANSI escape sequences.

/// Reset all attributes to default.
pub const RESET: &str = "\x1b[0m";

/// Clear entire screen.
pub const CLEAR_SCREEN: &str = "\x1b[2J";

pub const CURSOR_HIDE: &str = "\x1b[?25l";
pub const CURSOR_SHOW: &str = "\x1b[?25h";

/// Move cursor to home position (1,1).
pub const CURSOR_HOME: &str = "\x1b[H";

/// Enter the alternate screen buffer.
pub const ALT_SCREEN_ON: &str = "\x1b[?1049h";

/// Leave the alternate screen buffer.
pub const ALT_SCREEN_OFF: &str = "\x1b[?1049l";

/// Button and drag tracking with SGR encoding. Wheel events arrive as buttons 64/65.
pub const MOUSE_ON: &str = "\x1b[?1002h\x1b[?1006h";

pub const MOUSE_OFF: &str = "\x1b[?1002l\x1b[?1006l";

/// Set window title: prefix, then the title, then suffix.
pub const TITLE_PREFIX: &str = "\x1b]0;";
pub const TITLE_SUFFIX: &str = "\x1b\\";

/// Synchronized output (mode 2026), so a frame lands all at once.
pub mod sync {
    pub const BEGIN: &str = "\x1b[?2026h";
    pub const END: &str = "\x1b[?2026l";
}
