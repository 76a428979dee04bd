//! Text, gradient and box drawing operations.

use crate::buffer::FrameBuffer;
use crate::cell::Cell;
use crate::color::{Gradient, Rgba};
use crate::style::{Style, TextAttributes};
use crate::unicode::{display_width, graphemes};

/// Box drawing characters plus the style they are drawn with.
#[derive(Clone, Copy, Debug)]
pub struct BoxStyle {
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
    pub horizontal: char,
    pub vertical: char,
    pub style: Style,
}

impl BoxStyle {
    /// Single-line box drawing characters.
    #[must_use]
    pub const fn single(style: Style) -> Self {
        Self {
            top_left: '┌',
            top_right: '┐',
            bottom_left: '└',
            bottom_right: '┘',
            horizontal: '─',
            vertical: '│',
            style,
        }
    }

    /// Rounded corners, used for cards and pills.
    #[must_use]
    pub const fn rounded(style: Style) -> Self {
        Self {
            top_left: '╭',
            top_right: '╮',
            bottom_left: '╰',
            bottom_right: '╯',
            horizontal: '─',
            vertical: '│',
            style,
        }
    }

    /// Heavy lines, used for the focused testimonial.
    #[must_use]
    pub const fn heavy(style: Style) -> Self {
        Self {
            top_left: '┏',
            top_right: '┓',
            bottom_left: '┗',
            bottom_right: '┛',
            horizontal: '━',
            vertical: '┃',
            style,
        }
    }
}

impl Default for BoxStyle {
    fn default() -> Self {
        Self::single(Style::NONE)
    }
}

/// Border plus optional fill.
#[derive(Clone, Debug)]
pub struct BoxOptions {
    pub style: BoxStyle,
    pub fill: Option<Gradient>,
}

impl BoxOptions {
    #[must_use]
    pub fn new(style: BoxStyle) -> Self {
        Self {
            style,
            fill: None,
        }
    }

    #[must_use]
    pub fn with_fill(mut self, fill: Gradient) -> Self {
        self.fill = Some(fill);
        self
    }
}

/// Draw one line of text; newlines are skipped. Returns the columns advanced.
pub(super) fn draw_text(buffer: &mut FrameBuffer, x: i32, y: i32, text: &str, style: Style) -> usize {
    let mut col = x;
    let bg = style.bg.unwrap_or(Rgba::TRANSPARENT);

    if text.is_ascii() {
        for ch in text.chars().filter(|c| !matches!(c, '\n' | '\r')) {
            buffer.set_blended(col, y, Cell::new(ch, style));
            col += 1;
        }
        return col.abs_diff(x) as usize;
    }

    for grapheme in graphemes(text) {
        if grapheme == "\n" || grapheme == "\r" {
            continue;
        }
        let Some(cell) = Cell::from_grapheme(grapheme, style) else {
            continue;
        };
        let width = cell.display_width();
        if width == 0 {
            continue;
        }

        buffer.set_blended(col, y, cell);
        for i in 1..width {
            buffer.set_blended(col + i as i32, y, Cell::continuation(bg));
        }
        col += width as i32;
    }
    col.abs_diff(x) as usize
}

/// Draw text whose foreground follows `gradient` across its width.
pub(super) fn draw_gradient_text(
    buffer: &mut FrameBuffer,
    x: i32,
    y: i32,
    text: &str,
    gradient: &Gradient,
    attributes: TextAttributes,
) -> usize {
    let steps = display_width(text);
    let mut col = x;
    let mut step = 0usize;

    for grapheme in graphemes(text) {
        let style = Style::fg(gradient.sample(step, steps)).with_attributes(attributes);
        let Some(cell) = Cell::from_grapheme(grapheme, style) else {
            continue;
        };
        let width = cell.display_width();
        if width == 0 {
            continue;
        }
        buffer.set_blended(col, y, cell);
        for i in 1..width {
            buffer.set_blended(col + i as i32, y, Cell::continuation(Rgba::TRANSPARENT));
        }
        col += width as i32;
        step += width;
    }
    steps
}

/// Fill a rectangle left to right with a gradient background.
pub(super) fn fill_gradient(
    buffer: &mut FrameBuffer,
    x: i32,
    y: i32,
    w: u32,
    h: u32,
    gradient: &Gradient,
) {
    let steps = w as usize;
    for dx in 0..w {
        let color = gradient.sample(dx as usize, steps);
        buffer.fill_rect(x + dx as i32, y, 1, h, color);
    }
}

/// Draw a box border over an optional gradient fill.
pub(super) fn draw_box(buffer: &mut FrameBuffer, x: i32, y: i32, w: u32, h: u32, options: &BoxOptions) {
    if w < 2 || h < 2 {
        return;
    }

    if let Some(fill) = &options.fill {
        fill_gradient(buffer, x, y, w, h, fill);
    }

    let b = options.style;
    let right = x + w as i32 - 1;
    let bottom = y + h as i32 - 1;

    buffer.set_blended(x, y, Cell::new(b.top_left, b.style));
    buffer.set_blended(right, y, Cell::new(b.top_right, b.style));
    buffer.set_blended(x, bottom, Cell::new(b.bottom_left, b.style));
    buffer.set_blended(right, bottom, Cell::new(b.bottom_right, b.style));

    for col in (x + 1)..right {
        buffer.set_blended(col, y, Cell::new(b.horizontal, b.style));
        buffer.set_blended(col, bottom, Cell::new(b.horizontal, b.style));
    }
    for row in (y + 1)..bottom {
        buffer.set_blended(x, row, Cell::new(b.vertical, b.style));
        buffer.set_blended(right, row, Cell::new(b.vertical, b.style));
    }
}
