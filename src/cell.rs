//! Terminal cell type representing a single character position.
//!
//! Wide characters (CJK, emoji) occupy two columns: the cell holding the
//! character is followed by a [`CellContent::Continuation`] cell. Multi-codepoint
//! grapheme clusters are stored by their base character so that cells stay
//! `Copy`; the page copy never needs more than that.

use crate::color::Rgba;
use crate::style::{Style, TextAttributes};
use std::io::{self, Write};

/// Content of a terminal cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CellContent {
    /// A single character (display width 1-2).
    Char(char),
    /// Empty/cleared cell, rendered as a space.
    #[default]
    Empty,
    /// Right half of a wide character from the previous cell.
    Continuation,
}

impl CellContent {
    #[must_use]
    pub fn display_width(&self) -> usize {
        match self {
            Self::Char(c) => crate::unicode::display_width_char(*c),
            Self::Empty => 1,
            Self::Continuation => 0,
        }
    }

    #[must_use]
    pub fn is_continuation(&self) -> bool {
        matches!(self, Self::Continuation)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The character a plain-text dump shows for this cell, if any.
    #[must_use]
    pub fn as_char(&self) -> Option<char> {
        match self {
            Self::Char(c) => Some(*c),
            Self::Empty => Some(' '),
            Self::Continuation => None,
        }
    }
}

/// A single terminal cell with content and styling.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Cell {
    pub content: CellContent,
    pub fg: Rgba,
    pub bg: Rgba,
    pub attributes: TextAttributes,
}

impl Cell {
    /// Create a new cell with a single character.
    #[must_use]
    pub fn new(ch: char, style: Style) -> Self {
        Self {
            content: CellContent::Char(ch),
            fg: style.fg.unwrap_or(Rgba::WHITE),
            bg: style.bg.unwrap_or(Rgba::TRANSPARENT),
            attributes: style.attributes,
        }
    }

    /// Create a cell from a grapheme cluster, keeping its base character.
    ///
    /// Returns `None` for an empty string.
    #[must_use]
    pub fn from_grapheme(grapheme: &str, style: Style) -> Option<Self> {
        grapheme.chars().next().map(|base| Self::new(base, style))
    }

    /// Create a cleared cell with the specified background.
    #[must_use]
    pub fn clear(bg: Rgba) -> Self {
        Self {
            content: CellContent::Empty,
            fg: Rgba::WHITE,
            bg,
            attributes: TextAttributes::empty(),
        }
    }

    /// Create a continuation cell (right half of a wide character).
    #[must_use]
    pub fn continuation(bg: Rgba) -> Self {
        Self {
            content: CellContent::Continuation,
            fg: Rgba::WHITE,
            bg,
            attributes: TextAttributes::empty(),
        }
    }

    #[must_use]
    pub fn display_width(&self) -> usize {
        self.content.display_width()
    }

    #[must_use]
    pub fn is_continuation(&self) -> bool {
        self.content.is_continuation()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Write the cell's glyph. Continuations write nothing.
    pub fn write_content<W: Write>(&self, w: &mut W) -> io::Result<()> {
        match self.content {
            CellContent::Char(c) => {
                let mut buf = [0u8; 4];
                w.write_all(c.encode_utf8(&mut buf).as_bytes())
            }
            CellContent::Empty => w.write_all(b" "),
            CellContent::Continuation => Ok(()),
        }
    }

    /// Composite this cell over `background`.
    ///
    /// An empty foreground keeps the background's glyph and attributes so that
    /// translucent fills tint text instead of erasing it.
    #[must_use]
    pub fn blend_over(self, background: &Cell) -> Cell {
        let (content, attributes) = if self.content.is_empty() {
            (background.content, background.attributes)
        } else {
            (self.content, self.attributes)
        };

        Cell {
            content,
            fg: self.fg.blend_over(background.fg),
            bg: self.bg.blend_over(background.bg),
            attributes,
        }
    }

    /// Exact equality on colors by bit pattern, used by the diff.
    #[inline]
    #[must_use]
    pub fn bits_eq(&self, other: &Cell) -> bool {
        self.content == other.content
            && self.attributes == other.attributes
            && self.fg.bits_eq(other.fg)
            && self.bg.bits_eq(other.bg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::palette;

    #[test]
    fn test_cell_new() {
        let cell = Cell::new('₿', Style::fg(palette::ORANGE_500));
        assert_eq!(cell.content, CellContent::Char('₿'));
        assert_eq!(cell.fg, palette::ORANGE_500);
        assert_eq!(cell.bg, Rgba::TRANSPARENT);
        assert_eq!(cell.display_width(), 1);
    }

    #[test]
    fn test_from_grapheme_keeps_base_char() {
        let cell = Cell::from_grapheme("e\u{0301}", Style::NONE).unwrap();
        assert_eq!(cell.content, CellContent::Char('e'));
        assert!(Cell::from_grapheme("", Style::NONE).is_none());
    }

    #[test]
    fn test_wide_char() {
        assert_eq!(Cell::new('漢', Style::NONE).display_width(), 2);
        let cont = Cell::continuation(Rgba::BLACK);
        assert!(cont.is_continuation());
        assert_eq!(cont.display_width(), 0);
        assert_eq!(cont.content.as_char(), None);
    }

    #[test]
    fn test_clear() {
        let cell = Cell::clear(palette::INDIGO_950);
        assert!(cell.is_empty());
        assert_eq!(cell.content.as_char(), Some(' '));
        assert_eq!(cell.bg, palette::INDIGO_950);
    }

    #[test]
    fn test_write_content() {
        let mut out = Vec::new();
        Cell::new('Ξ', Style::NONE).write_content(&mut out).unwrap();
        Cell::clear(Rgba::BLACK).write_content(&mut out).unwrap();
        Cell::continuation(Rgba::BLACK).write_content(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Ξ ");
    }

    #[test]
    fn test_blend_empty_over_text_keeps_glyph() {
        let text = Cell::new('A', Style { bg: Some(Rgba::BLACK), ..Style::fg(Rgba::WHITE).with_bold() });
        let tint = Cell::clear(palette::PURPLE_500.with_alpha(0.3));
        let out = tint.blend_over(&text);
        assert_eq!(out.content, CellContent::Char('A'));
        assert!(out.attributes.contains(TextAttributes::BOLD));
        assert!(out.bg.is_opaque());
        assert!(out.bg.r > 0.0);
    }

    #[test]
    fn test_blend_text_over_cell_replaces_glyph() {
        let under = Cell::new('A', Style { bg: Some(Rgba::BLACK), ..Style::bold() });
        let over = Cell::new('B', Style::NONE);
        let out = over.blend_over(&under);
        assert_eq!(out.content, CellContent::Char('B'));
        assert!(out.attributes.is_empty());
        assert_eq!(out.bg, Rgba::BLACK);
    }

    #[test]
    fn test_bits_eq() {
        let a = Cell::new('x', Style::fg(Rgba::WHITE));
        let mut b = a;
        assert!(a.bits_eq(&b));
        b.fg = palette::CYAN_400;
        assert!(!a.bits_eq(&b));
    }
}
