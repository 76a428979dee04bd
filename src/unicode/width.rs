//! Display width calculation for terminal rendering.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of a string in terminal columns.
#[must_use]
pub fn display_width(s: &str) -> usize {
    if s.is_ascii() {
        return s.bytes().filter(|b| (b' '..=b'~').contains(b)).count();
    }
    UnicodeWidthStr::width(s)
}

/// Display width of a character in terminal columns.
#[inline]
#[must_use]
pub fn display_width_char(c: char) -> usize {
    if (' '..='~').contains(&c) {
        return 1;
    }
    if c < ' ' {
        return 0;
    }
    UnicodeWidthChar::width(c).unwrap_or(0)
}
