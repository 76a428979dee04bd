//! Frame-sized ANSI output buffer with state tracking.

use crate::ansi::{self, ColorMode};
use crate::cell::Cell;
use crate::color::Rgba;
use crate::style::TextAttributes;
use std::io::{self, Write};

/// Accumulates one frame of escape sequences, skipping redundant SGR and
/// cursor changes. Nothing reaches the terminal until [`finish`](Self::finish).
#[derive(Debug)]
pub struct AnsiWriter {
    buffer: Vec<u8>,
    color_mode: ColorMode,

    current_fg: Option<Rgba>,
    current_bg: Option<Rgba>,
    current_attrs: TextAttributes,

    /// `None` until the first absolute move of a frame.
    cursor: Option<(u32, u32)>,
}

impl AnsiWriter {
    #[must_use]
    pub fn new(color_mode: ColorMode) -> Self {
        Self {
            buffer: Vec::with_capacity(16 * 1024),
            color_mode,
            current_fg: None,
            current_bg: None,
            current_attrs: TextAttributes::empty(),
            cursor: None,
        }
    }

    pub fn set_color_mode(&mut self, mode: ColorMode) {
        self.color_mode = mode;
        self.reset_state();
    }

    #[must_use]
    pub fn color_mode(&self) -> ColorMode {
        self.color_mode
    }

    /// Forget the terminal state; the next cell re-emits everything.
    pub fn reset_state(&mut self) {
        self.current_fg = None;
        self.current_bg = None;
        self.current_attrs = TextAttributes::empty();
        self.cursor = None;
    }

    pub fn write_str(&mut self, s: &str) {
        self.buffer.extend_from_slice(s.as_bytes());
    }

    /// Record that the cursor is now at `row`, `col` (e.g. after `ESC[H`).
    pub fn assume_cursor(&mut self, row: u32, col: u32) {
        self.cursor = Some((row, col));
    }

    /// Forget the cursor position so the next move is absolute.
    pub fn forget_cursor(&mut self) {
        self.cursor = None;
    }

    /// Move the cursor, choosing a relative move when it is shorter.
    pub fn move_cursor(&mut self, row: u32, col: u32) {
        let Some((cur_row, cur_col)) = self.cursor else {
            let _ = ansi::write_cursor_position(&mut self.buffer, row, col);
            self.cursor = Some((row, col));
            return;
        };
        if (row, col) == (cur_row, cur_col) {
            return;
        }

        let dy = row as i32 - cur_row as i32;
        let dx = col as i32 - cur_col as i32;

        // ESC [ r ; c H
        let abs_cost = 4 + digits(row + 1) + digits(col + 1);
        let axis_cost = |d: i32| if d == 0 { 0 } else { 3 + digits(d.unsigned_abs()) };
        let rel_cost = axis_cost(dy) + axis_cost(dx);

        if rel_cost < abs_cost {
            let _ = ansi::write_cursor_move(&mut self.buffer, dx, dy);
        } else {
            let _ = ansi::write_cursor_position(&mut self.buffer, row, col);
        }
        self.cursor = Some((row, col));
    }

    pub fn set_fg(&mut self, color: Rgba) {
        if self.current_fg.is_none_or(|c| !c.bits_eq(color)) {
            let _ = ansi::write_fg_color_with_mode(&mut self.buffer, color, self.color_mode);
            self.current_fg = Some(color);
        }
    }

    pub fn set_bg(&mut self, color: Rgba) {
        if self.current_bg.is_none_or(|c| !c.bits_eq(color)) {
            let _ = ansi::write_bg_color_with_mode(&mut self.buffer, color, self.color_mode);
            self.current_bg = Some(color);
        }
    }

    /// Switch attributes, turning off only what was removed.
    pub fn set_attributes(&mut self, attrs: TextAttributes) {
        if self.current_attrs == attrs {
            return;
        }

        let removed = self.current_attrs - attrs;
        if !removed.is_empty() {
            let mut codes: Vec<&[u8]> = Vec::with_capacity(4);
            // 22 resets both bold and dim
            if removed.intersects(TextAttributes::BOLD | TextAttributes::DIM) {
                codes.push(b"22");
            }
            for (flag, code) in [
                (TextAttributes::ITALIC, b"23"),
                (TextAttributes::UNDERLINE, b"24"),
                (TextAttributes::BLINK, b"25"),
                (TextAttributes::INVERSE, b"27"),
                (TextAttributes::HIDDEN, b"28"),
                (TextAttributes::STRIKETHROUGH, b"29"),
            ] {
                if removed.contains(flag) {
                    codes.push(code);
                }
            }

            self.buffer.extend_from_slice(b"\x1b[");
            self.buffer.extend_from_slice(&codes.join(&b';'));
            self.buffer.push(b'm');

            self.current_attrs -= removed;
            if removed.intersects(TextAttributes::BOLD | TextAttributes::DIM) {
                self.current_attrs -= TextAttributes::BOLD | TextAttributes::DIM;
            }
        }

        let to_add = attrs - self.current_attrs;
        if !to_add.is_empty() {
            let _ = ansi::write_attributes(&mut self.buffer, to_add);
        }
        self.current_attrs = attrs;
    }

    /// Write a cell at the current cursor position.
    pub fn write_cell(&mut self, cell: &Cell) {
        self.set_attributes(cell.attributes);
        self.set_fg(cell.fg);
        self.set_bg(cell.bg);
        let _ = cell.write_content(&mut self.buffer);

        if let Some((row, col)) = self.cursor {
            self.cursor = Some((row, col + cell.display_width() as u32));
        }
    }

    pub fn write_cell_at(&mut self, row: u32, col: u32, cell: &Cell) {
        self.move_cursor(row, col);
        self.write_cell(cell);
    }

    /// Emit SGR 0 and forget colors and attributes.
    pub fn reset(&mut self) {
        self.write_str(ansi::RESET);
        self.current_fg = None;
        self.current_bg = None;
        self.current_attrs = TextAttributes::empty();
    }

    /// Write the accumulated bytes to `out` and clear the buffer.
    ///
    /// Returns the number of bytes written.
    pub fn finish(&mut self, out: &mut impl Write) -> io::Result<usize> {
        let written = self.buffer.len();
        out.write_all(&self.buffer)?;
        self.buffer.clear();
        out.flush()?;
        Ok(written)
    }

    #[must_use]
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    #[cfg(test)]
    fn clear_buffer(&mut self) {
        self.buffer.clear();
    }
}

fn digits(n: u32) -> usize {
    if n == 0 { 1 } else { (n.ilog10() + 1) as usize }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::palette;
    use crate::style::Style;

    fn text(writer: &AnsiWriter) -> String {
        String::from_utf8_lossy(writer.buffer()).replace('\x1b', "ESC")
    }

    #[test]
    fn test_first_move_is_absolute() {
        let mut writer = AnsiWriter::new(ColorMode::TrueColor);
        writer.move_cursor(0, 5);
        assert_eq!(text(&writer), "ESC[1;6H");
    }

    #[test]
    fn test_relative_move_when_cheaper() {
        let mut writer = AnsiWriter::new(ColorMode::TrueColor);
        writer.assume_cursor(120, 100);
        writer.move_cursor(120, 103);
        assert_eq!(text(&writer), "ESC[3C");

        writer.clear_buffer();
        writer.move_cursor(120, 103);
        assert!(writer.buffer().is_empty());
    }

    #[test]
    fn test_color_caching() {
        let mut writer = AnsiWriter::new(ColorMode::TrueColor);
        writer.set_fg(palette::CYAN_400);
        let len = writer.buffer().len();
        writer.set_fg(palette::CYAN_400);
        assert_eq!(writer.buffer().len(), len);
        writer.set_fg(palette::PURPLE_400);
        assert!(writer.buffer().len() > len);
    }

    #[test]
    fn test_attribute_removal_codes() {
        let mut writer = AnsiWriter::new(ColorMode::TrueColor);
        writer.set_attributes(TextAttributes::BOLD | TextAttributes::UNDERLINE);
        writer.clear_buffer();
        writer.set_attributes(TextAttributes::UNDERLINE);
        assert_eq!(text(&writer), "ESC[22m");

        writer.clear_buffer();
        writer.set_attributes(TextAttributes::DIM);
        assert_eq!(text(&writer), "ESC[24mESC[2m");
    }

    #[test]
    fn test_write_cell_advances_cursor() {
        let mut writer = AnsiWriter::new(ColorMode::NoColor);
        writer.write_cell_at(0, 0, &Cell::new('漢', Style::NONE));
        writer.write_cell(&Cell::continuation(Rgba::BLACK));
        writer.move_cursor(0, 2);
        assert_eq!(text(&writer), "ESC[1;1H漢");
    }

    #[test]
    fn test_finish_drains_buffer() {
        let mut writer = AnsiWriter::new(ColorMode::NoColor);
        writer.write_str("CryptoVault");
        let mut out = Vec::new();
        assert_eq!(writer.finish(&mut out).unwrap(), 11);
        assert_eq!(out, b"CryptoVault");
        assert!(writer.buffer().is_empty());
    }

    #[test]
    fn test_reset_forces_reemit() {
        let mut writer = AnsiWriter::new(ColorMode::TrueColor);
        writer.set_bg(palette::INDIGO_950);
        writer.reset();
        writer.clear_buffer();
        writer.set_bg(palette::INDIGO_950);
        assert!(!writer.buffer().is_empty());
    }
}
