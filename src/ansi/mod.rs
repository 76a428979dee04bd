//! ANSI escape sequence generation.

pub mod output;
pub mod sequences;

pub use output::AnsiWriter;
pub use sequences::*;

use crate::color::Rgba;
use crate::style::TextAttributes;
use std::io::{self, Write};

/// Color output mode for ANSI sequences.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// True color (24-bit RGB).
    #[default]
    TrueColor,
    /// xterm 256-color palette.
    Color256,
    /// Basic 16 ANSI colors.
    Color16,
    /// No color output, attributes only.
    NoColor,
}

impl ColorMode {
    /// Pick a mode from `COLORTERM` and `TERM`.
    #[must_use]
    pub fn detect() -> Self {
        let colorterm = std::env::var("COLORTERM").ok();
        let term = std::env::var("TERM").ok();
        Self::from_env(colorterm.as_deref(), term.as_deref())
    }

    /// Mode implied by the given `COLORTERM` / `TERM` values.
    #[must_use]
    pub fn from_env(colorterm: Option<&str>, term: Option<&str>) -> Self {
        if matches!(colorterm, Some("truecolor" | "24bit")) {
            return Self::TrueColor;
        }
        match term {
            Some("dumb") => Self::NoColor,
            Some(t) if t.contains("256color") => Self::Color256,
            Some(t) if t.contains("direct") => Self::TrueColor,
            _ => Self::Color16,
        }
    }

    /// Parse a command-line name: `truecolor`, `256`, `16` or `none`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "truecolor" | "24bit" => Some(Self::TrueColor),
            "256" => Some(Self::Color256),
            "16" => Some(Self::Color16),
            "none" => Some(Self::NoColor),
            _ => None,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::TrueColor => "truecolor",
            Self::Color256 => "256",
            Self::Color16 => "16",
            Self::NoColor => "none",
        }
    }
}

/// Write a u8 as decimal digits without formatting overhead.
#[inline]
fn write_u8_decimal(w: &mut impl Write, n: u8) -> io::Result<()> {
    if n >= 100 {
        w.write_all(&[b'0' + n / 100, b'0' + (n / 10) % 10, b'0' + n % 10])
    } else if n >= 10 {
        w.write_all(&[b'0' + n / 10, b'0' + n % 10])
    } else {
        w.write_all(&[b'0' + n])
    }
}

/// Write a u32 as decimal digits without formatting overhead.
#[inline]
fn write_u32_decimal(w: &mut impl Write, n: u32) -> io::Result<()> {
    if n < 10 {
        return w.write_all(&[b'0' + n as u8]);
    }
    let mut buf = [0u8; 10];
    let mut i = buf.len();
    let mut val = n;
    while val > 0 {
        i -= 1;
        buf[i] = b'0' + (val % 10) as u8;
        val /= 10;
    }
    w.write_all(&buf[i..])
}

/// Shared body of the fg/bg SGR writers; `base` is 30 for fg, 40 for bg.
fn write_color(w: &mut impl Write, color: Rgba, mode: ColorMode, base: u8) -> io::Result<()> {
    match mode {
        ColorMode::TrueColor => {
            let (r, g, b) = color.to_rgb_u8();
            w.write_all(b"\x1b[")?;
            write_u8_decimal(w, base + 8)?;
            w.write_all(b";2;")?;
            write_u8_decimal(w, r)?;
            w.write_all(b";")?;
            write_u8_decimal(w, g)?;
            w.write_all(b";")?;
            write_u8_decimal(w, b)?;
            w.write_all(b"m")
        }
        ColorMode::Color256 => {
            w.write_all(b"\x1b[")?;
            write_u8_decimal(w, base + 8)?;
            w.write_all(b";5;")?;
            write_u8_decimal(w, color.to_256_color())?;
            w.write_all(b"m")
        }
        ColorMode::Color16 => {
            let idx = color.to_16_color();
            // 30-37 / 40-47 normal, 90-97 / 100-107 bright
            let code = if idx < 8 { base + idx } else { base + 60 + idx - 8 };
            w.write_all(b"\x1b[")?;
            write_u8_decimal(w, code)?;
            w.write_all(b"m")
        }
        ColorMode::NoColor => Ok(()),
    }
}

/// Write the SGR sequence for a foreground color.
pub fn write_fg_color_with_mode(w: &mut impl Write, color: Rgba, mode: ColorMode) -> io::Result<()> {
    write_color(w, color, mode, 30)
}

/// Write the SGR sequence for a background color.
pub fn write_bg_color_with_mode(w: &mut impl Write, color: Rgba, mode: ColorMode) -> io::Result<()> {
    write_color(w, color, mode, 40)
}

/// Write one SGR sequence that turns on every flag in `attrs`.
pub fn write_attributes(w: &mut impl Write, attrs: TextAttributes) -> io::Result<()> {
    const CODES: [(TextAttributes, &[u8]); 8] = [
        (TextAttributes::BOLD, b"1"),
        (TextAttributes::DIM, b"2"),
        (TextAttributes::ITALIC, b"3"),
        (TextAttributes::UNDERLINE, b"4"),
        (TextAttributes::BLINK, b"5"),
        (TextAttributes::INVERSE, b"7"),
        (TextAttributes::HIDDEN, b"8"),
        (TextAttributes::STRIKETHROUGH, b"9"),
    ];

    if attrs.is_empty() {
        return Ok(());
    }
    w.write_all(b"\x1b[")?;
    let mut first = true;
    for (flag, code) in CODES {
        if attrs.contains(flag) {
            if !first {
                w.write_all(b";")?;
            }
            w.write_all(code)?;
            first = false;
        }
    }
    w.write_all(b"m")
}

/// Write an absolute cursor position (0-indexed in, 1-indexed out).
pub fn write_cursor_position(w: &mut impl Write, row: u32, col: u32) -> io::Result<()> {
    w.write_all(b"\x1b[")?;
    write_u32_decimal(w, row + 1)?;
    w.write_all(b";")?;
    write_u32_decimal(w, col + 1)?;
    w.write_all(b"H")
}

/// Write a relative cursor movement; zero deltas emit nothing.
pub fn write_cursor_move(w: &mut impl Write, dx: i32, dy: i32) -> io::Result<()> {
    let mut step = |n: u32, dir: u8| -> io::Result<()> {
        w.write_all(b"\x1b[")?;
        write_u32_decimal(w, n)?;
        w.write_all(&[dir])
    };

    match dy.cmp(&0) {
        std::cmp::Ordering::Less => step(dy.unsigned_abs(), b'A')?,
        std::cmp::Ordering::Greater => step(dy.unsigned_abs(), b'B')?,
        std::cmp::Ordering::Equal => {}
    }
    match dx.cmp(&0) {
        std::cmp::Ordering::Greater => step(dx.unsigned_abs(), b'C')?,
        std::cmp::Ordering::Less => step(dx.unsigned_abs(), b'D')?,
        std::cmp::Ordering::Equal => {}
    }
    Ok(())
}

/// Window title sequence with control characters stripped from `title`.
#[must_use]
pub fn window_title(title: &str) -> String {
    let clean: String = title.chars().filter(|c| !c.is_control()).collect();
    format!("{TITLE_PREFIX}{clean}{TITLE_SUFFIX}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::palette;
    use insta::assert_snapshot;

    fn readable(bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).replace('\x1b', "ESC")
    }

    fn fg(color: Rgba, mode: ColorMode) -> String {
        let mut out = Vec::new();
        write_fg_color_with_mode(&mut out, color, mode).unwrap();
        readable(&out)
    }

    fn bg(color: Rgba, mode: ColorMode) -> String {
        let mut out = Vec::new();
        write_bg_color_with_mode(&mut out, color, mode).unwrap();
        readable(&out)
    }

    #[test]
    fn test_truecolor_sequences() {
        assert_snapshot!(fg(palette::CYAN_500, ColorMode::TrueColor), @"ESC[38;2;6;182;212m");
        assert_snapshot!(bg(palette::INDIGO_950, ColorMode::TrueColor), @"ESC[48;2;30;27;75m");
    }

    #[test]
    fn test_palette_sequences() {
        assert_eq!(fg(Rgba::from_rgb_u8(255, 0, 0), ColorMode::Color256), "ESC[38;5;196m");
        assert_eq!(bg(Rgba::BLACK, ColorMode::Color256), "ESC[48;5;232m");
        assert_eq!(fg(Rgba::from_rgb_u8(255, 0, 0), ColorMode::Color16), "ESC[91m");
        assert_eq!(bg(Rgba::from_rgb_u8(128, 0, 0), ColorMode::Color16), "ESC[41m");
        assert_eq!(fg(Rgba::WHITE, ColorMode::NoColor), "");
    }

    #[test]
    fn test_attributes() {
        let mut out = Vec::new();
        write_attributes(&mut out, TextAttributes::BOLD | TextAttributes::UNDERLINE).unwrap();
        assert_eq!(readable(&out), "ESC[1;4m");

        out.clear();
        write_attributes(&mut out, TextAttributes::empty()).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_cursor_position_is_one_indexed() {
        let mut out = Vec::new();
        write_cursor_position(&mut out, 0, 0).unwrap();
        write_cursor_position(&mut out, 41, 1234).unwrap();
        assert_eq!(readable(&out), "ESC[1;1HESC[42;1235H");
    }

    #[test]
    fn test_cursor_move() {
        let mut out = Vec::new();
        write_cursor_move(&mut out, 3, -2).unwrap();
        assert_eq!(readable(&out), "ESC[2AESC[3C");
        out.clear();
        write_cursor_move(&mut out, 0, 0).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_color_mode_detection() {
        assert_eq!(ColorMode::from_env(Some("truecolor"), Some("xterm")), ColorMode::TrueColor);
        assert_eq!(ColorMode::from_env(None, Some("xterm-256color")), ColorMode::Color256);
        assert_eq!(ColorMode::from_env(None, Some("dumb")), ColorMode::NoColor);
        assert_eq!(ColorMode::from_env(None, None), ColorMode::Color16);
    }

    #[test]
    fn test_color_mode_names_round_trip() {
        for mode in [
            ColorMode::TrueColor,
            ColorMode::Color256,
            ColorMode::Color16,
            ColorMode::NoColor,
        ] {
            assert_eq!(ColorMode::from_name(mode.name()), Some(mode));
        }
        assert_eq!(ColorMode::from_name("rainbow"), None);
    }

    #[test]
    fn test_window_title_strips_controls() {
        assert_eq!(
            window_title("CryptoVault\x07\x1b"),
            "\x1b]0;CryptoVault\x1b\\"
        );
    }
}
