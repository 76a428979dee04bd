//! Cell-based frame buffer with alpha blending and scissoring.
//!
//! [`FrameBuffer`] is the drawing surface the page view paints into. Drawing
//! coordinates are signed because document blocks scrolled above the viewport
//! start at negative rows; everything outside the buffer or the current
//! scissor rectangle is silently dropped.
//!
//! ```
//! use cryptovault::buffer::{ClipRect, FrameBuffer};
//! use cryptovault::{Rgba, Style};
//!
//! let mut buf = FrameBuffer::new(40, 10);
//! buf.clear(Rgba::BLACK);
//! buf.push_scissor(ClipRect::new(0, 3, 40, 7));
//! buf.draw_text(2, 1, "hidden under the header", Style::NONE);
//! buf.draw_text(2, 4, "Everything You Need", Style::fg(Rgba::WHITE));
//! buf.pop_scissor();
//! assert_eq!(buf.row_text(1), "");
//! assert_eq!(buf.row_text(4), "  Everything You Need");
//! ```

mod drawing;
mod scissor;

pub use drawing::{BoxOptions, BoxStyle};
pub use scissor::{ClipRect, ScissorStack};

use crate::cell::Cell;
use crate::color::{Gradient, Rgba};
use crate::style::{Style, TextAttributes};

/// Grid of cells plus a scissor stack.
#[derive(Clone, Debug)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
    scissor_stack: ScissorStack,
}

impl FrameBuffer {
    /// Create a buffer; zero dimensions are clamped to 1.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            cells: vec![Cell::clear(Rgba::TRANSPARENT); width as usize * height as usize],
            scissor_stack: ScissorStack::new(),
        }
    }

    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn cell_index(&self, x: i32, y: i32) -> Option<usize> {
        let x = u32::try_from(x).ok()?;
        let y = u32::try_from(y).ok()?;
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> Option<&Cell> {
        let x = i32::try_from(x).ok()?;
        let y = i32::try_from(y).ok()?;
        self.cell_index(x, y).map(|idx| &self.cells[idx])
    }

    /// Visible index: inside the buffer and the current scissor.
    #[inline]
    fn visible_index(&self, x: i32, y: i32) -> Option<usize> {
        if !self.scissor_stack.contains(x, y) {
            return None;
        }
        self.cell_index(x, y)
    }

    /// Replace the cell at a position.
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) {
        if let Some(idx) = self.visible_index(x, y) {
            self.cells[idx] = cell;
        }
    }

    /// Composite a cell over the existing content.
    pub fn set_blended(&mut self, x: i32, y: i32, cell: Cell) {
        if let Some(idx) = self.visible_index(x, y) {
            self.cells[idx] = cell.blend_over(&self.cells[idx]);
        }
    }

    /// Clear the whole buffer, ignoring the scissor.
    pub fn clear(&mut self, bg: Rgba) {
        self.cells.fill(Cell::clear(bg));
    }

    /// Fill a rectangle with a background color.
    ///
    /// Opaque colors erase; translucent colors tint the background and keep
    /// the glyphs underneath.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, bg: Rgba) {
        let area = ClipRect::new(x, y, w, h);
        let bounds = ClipRect::new(0, 0, self.width, self.height);
        let Some(region) = area
            .intersect(&bounds)
            .and_then(|r| r.intersect(&self.scissor_stack.current()))
        else {
            return;
        };

        let fill = Cell::clear(bg);
        let row_width = self.width as usize;
        for row in region.y..region.bottom() {
            let start = row as usize * row_width + region.x as usize;
            let end = start + region.width as usize;
            let cells = &mut self.cells[start..end];
            if bg.is_opaque() {
                cells.fill(fill);
            } else {
                for cell in cells {
                    cell.bg = bg.blend_over(cell.bg);
                }
            }
        }
    }

    /// Fill a rectangle with a left-to-right gradient.
    pub fn fill_gradient(&mut self, x: i32, y: i32, w: u32, h: u32, gradient: &Gradient) {
        drawing::fill_gradient(self, x, y, w, h, gradient);
    }

    /// Draw a single line of text; returns the display width drawn.
    pub fn draw_text(&mut self, x: i32, y: i32, text: &str, style: Style) -> usize {
        drawing::draw_text(self, x, y, text, style)
    }

    /// Draw text with a gradient foreground; returns the display width drawn.
    pub fn draw_gradient_text(
        &mut self,
        x: i32,
        y: i32,
        text: &str,
        gradient: &Gradient,
        attributes: TextAttributes,
    ) -> usize {
        drawing::draw_gradient_text(self, x, y, text, gradient, attributes)
    }

    pub fn draw_box(&mut self, x: i32, y: i32, w: u32, h: u32, options: &BoxOptions) {
        drawing::draw_box(self, x, y, w, h, options);
    }

    pub fn push_scissor(&mut self, rect: ClipRect) {
        self.scissor_stack.push(rect);
    }

    pub fn pop_scissor(&mut self) {
        self.scissor_stack.pop();
    }

    pub fn clear_scissors(&mut self) {
        self.scissor_stack.clear();
    }

    /// Resize the buffer, clearing contents and scissors.
    pub fn resize(&mut self, width: u32, height: u32) {
        *self = Self::new(width, height);
    }

    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Glyphs of one row with trailing blanks trimmed.
    #[must_use]
    pub fn row_text(&self, y: u32) -> String {
        if y >= self.height {
            return String::new();
        }
        let start = y as usize * self.width as usize;
        let row = &self.cells[start..start + self.width as usize];
        let text: String = row.iter().filter_map(|c| c.content.as_char()).collect();
        text.trim_end().to_string()
    }

    /// Every row joined by newlines, used by headless output and tests.
    #[must_use]
    pub fn to_plain_text(&self) -> String {
        (0..self.height)
            .map(|y| self.row_text(y))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new(80, 24)
    }
}
