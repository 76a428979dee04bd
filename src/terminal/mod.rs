//! Terminal state management.

mod mouse;
mod raw;

pub use mouse::{MouseButton, MouseEvent, MouseEventKind};
pub use raw::{RawModeGuard, enable_raw_mode, is_tty, set_nonblocking, terminal_size};

use crate::ansi::{self, sequences};
use std::io::{self, Write};

/// Tracks which terminal modes are on so cleanup can undo exactly those.
pub struct Terminal<W: Write> {
    writer: W,
    alt_screen: bool,
    mouse_enabled: bool,
    cursor_visible: bool,
}

impl<W: Write> Terminal<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            alt_screen: false,
            mouse_enabled: false,
            cursor_visible: true,
        }
    }

    pub fn enter_alt_screen(&mut self) -> io::Result<()> {
        if !self.alt_screen {
            self.writer.write_all(sequences::ALT_SCREEN_ON.as_bytes())?;
            self.alt_screen = true;
        }
        Ok(())
    }

    pub fn leave_alt_screen(&mut self) -> io::Result<()> {
        if self.alt_screen {
            self.writer.write_all(sequences::ALT_SCREEN_OFF.as_bytes())?;
            self.alt_screen = false;
        }
        Ok(())
    }

    pub fn enable_mouse(&mut self) -> io::Result<()> {
        if !self.mouse_enabled {
            self.writer.write_all(sequences::MOUSE_ON.as_bytes())?;
            self.mouse_enabled = true;
        }
        Ok(())
    }

    pub fn disable_mouse(&mut self) -> io::Result<()> {
        if self.mouse_enabled {
            self.writer.write_all(sequences::MOUSE_OFF.as_bytes())?;
            self.mouse_enabled = false;
        }
        Ok(())
    }

    pub fn hide_cursor(&mut self) -> io::Result<()> {
        if self.cursor_visible {
            self.writer.write_all(sequences::CURSOR_HIDE.as_bytes())?;
            self.cursor_visible = false;
        }
        Ok(())
    }

    pub fn show_cursor(&mut self) -> io::Result<()> {
        if !self.cursor_visible {
            self.writer.write_all(sequences::CURSOR_SHOW.as_bytes())?;
            self.cursor_visible = true;
        }
        Ok(())
    }

    pub fn clear(&mut self) -> io::Result<()> {
        self.writer.write_all(sequences::CLEAR_SCREEN.as_bytes())?;
        self.writer.write_all(sequences::CURSOR_HOME.as_bytes())
    }

    pub fn set_title(&mut self, title: &str) -> io::Result<()> {
        self.writer.write_all(ansi::window_title(title).as_bytes())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Undo every mode this terminal turned on. Safe to call repeatedly.
    pub fn cleanup(&mut self) -> io::Result<()> {
        self.writer.write_all(sequences::RESET.as_bytes())?;
        self.show_cursor()?;
        self.disable_mouse()?;
        self.leave_alt_screen()?;
        self.flush()
    }
}

impl<W: Write> Drop for Terminal<W> {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
