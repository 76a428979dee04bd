//! RGBA colors, two/three-stop gradients and the page palette.
//!
//! Colors are stored as `f32` components so that translucent panels
//! (`indigo-900/60` and friends) can be composited with Porter-Duff "over"
//! before being reduced to whatever the terminal supports.
//!
//! ```
//! use cryptovault::color::{Gradient, palette};
//!
//! let accent = Gradient::new(palette::CYAN_400, palette::PURPLE_400);
//! let mid = accent.at(0.5);
//! assert!(mid.is_opaque());
//! ```

use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// RGBA color with f32 components in range [0.0, 1.0].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    /// Create a new RGBA color from f32 components.
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from f32 RGB components.
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create an opaque color from a packed `0xRRGGBB` value.
    #[must_use]
    pub const fn from_hex_u32(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Create an opaque color from u8 RGB components.
    #[must_use]
    pub fn from_rgb_u8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
        )
    }

    /// Parse `#RGB`, `#RRGGBB` or `#RRGGBBAA` (the `#` is optional).
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return None;
        }
        let byte = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();

        match hex.len() {
            3 => {
                let r = byte(0..1)?;
                let g = byte(1..2)?;
                let b = byte(2..3)?;
                Some(Self::from_rgb_u8(r * 17, g * 17, b * 17))
            }
            6 => Some(Self::from_rgb_u8(byte(0..2)?, byte(2..4)?, byte(4..6)?)),
            8 => {
                let a = byte(6..8)?;
                Some(
                    Self::from_rgb_u8(byte(0..2)?, byte(2..4)?, byte(4..6)?)
                        .with_alpha(f32::from(a) / 255.0),
                )
            }
            _ => None,
        }
    }

    /// Blend this color over another (Porter-Duff "over").
    ///
    /// `self` is the foreground, `other` the background.
    #[must_use]
    pub fn blend_over(self, other: Self) -> Self {
        const ALPHA_EPSILON: f32 = 1e-6;

        if self.a >= 1.0 {
            return self;
        }
        if self.a <= 0.0 {
            return other;
        }

        let inv_alpha = 1.0 - self.a;
        let out_a = other.a.mul_add(inv_alpha, self.a);
        if out_a <= ALPHA_EPSILON {
            return Self::TRANSPARENT;
        }

        Self {
            r: (other.r * other.a).mul_add(inv_alpha, self.r * self.a) / out_a,
            g: (other.g * other.a).mul_add(inv_alpha, self.g * self.a) / out_a,
            b: (other.b * other.a).mul_add(inv_alpha, self.b * self.a) / out_a,
            a: out_a,
        }
    }

    /// Return a new color with the specified alpha value.
    #[must_use]
    pub const fn with_alpha(self, alpha: f32) -> Self {
        Self::new(self.r, self.g, self.b, alpha)
    }

    /// Multiply this color's alpha by the given factor.
    #[must_use]
    pub fn multiply_alpha(self, factor: f32) -> Self {
        self.with_alpha(self.a * factor)
    }

    /// Convert to u8 RGB tuple, clamping values to [0, 255].
    #[must_use]
    pub fn to_rgb_u8(self) -> (u8, u8, u8) {
        let to_u8 = |value: f32| (value * 255.0).round().clamp(0.0, 255.0) as u8;
        (to_u8(self.r), to_u8(self.g), to_u8(self.b))
    }

    #[must_use]
    pub fn is_opaque(self) -> bool {
        self.a >= 1.0
    }

    /// Pack the component bit patterns for exact comparison during diffing.
    #[inline]
    #[must_use]
    pub const fn to_bits(self) -> u128 {
        let r = self.r.to_bits() as u128;
        let g = self.g.to_bits() as u128;
        let b = self.b.to_bits() as u128;
        let a = self.a.to_bits() as u128;
        r | (g << 32) | (b << 64) | (a << 96)
    }

    #[inline]
    #[must_use]
    pub const fn bits_eq(self, other: Self) -> bool {
        self.to_bits() == other.to_bits()
    }

    /// Linearly interpolate between two colors, `t` clamped to [0, 1].
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        if t <= 0.0 {
            return self;
        }
        if t >= 1.0 {
            return other;
        }
        Self {
            r: (other.r - self.r).mul_add(t, self.r),
            g: (other.g - self.g).mul_add(t, self.g),
            b: (other.b - self.b).mul_add(t, self.b),
            a: (other.a - self.a).mul_add(t, self.a),
        }
    }

    /// Nearest xterm 256-color index: 6x6x6 cube or the grayscale ramp.
    #[must_use]
    pub fn to_256_color(self) -> u8 {
        let (r, g, b) = self.to_rgb_u8();

        let gray = ((u16::from(r) + u16::from(g) + u16::from(b)) / 3) as u8;
        let near_gray = |c: u8| (i16::from(c) - i16::from(gray)).abs() < 10;
        if near_gray(r) && near_gray(g) && near_gray(b) {
            let step = (u16::from(gray) * 24 / 256) as u8;
            return 232 + step.min(23);
        }

        16 + 36 * cube_index(r) + 6 * cube_index(g) + cube_index(b)
    }

    /// Nearest basic ANSI color (0-15).
    #[must_use]
    pub fn to_16_color(self) -> u8 {
        #[rustfmt::skip]
        const ANSI: [(i32, i32, i32); 16] = [
            (0, 0, 0), (128, 0, 0), (0, 128, 0), (128, 128, 0),
            (0, 0, 128), (128, 0, 128), (0, 128, 128), (192, 192, 192),
            (128, 128, 128), (255, 0, 0), (0, 255, 0), (255, 255, 0),
            (0, 0, 255), (255, 0, 255), (0, 255, 255), (255, 255, 255),
        ];

        let (r, g, b) = self.to_rgb_u8();
        let (r, g, b) = (i32::from(r), i32::from(g), i32::from(b));

        ANSI.iter()
            .enumerate()
            .min_by_key(|(_, (pr, pg, pb))| {
                let (dr, dg, db) = (r - pr, g - pg, b - pb);
                dr * dr + dg * dg + db * db
            })
            .map_or(0, |(i, _)| i as u8)
    }
}

/// Map a channel onto the cube levels 0, 95, 135, 175, 215, 255.
#[inline]
fn cube_index(val: u8) -> u8 {
    match val {
        0..=47 => 0,
        48..=114 => 1,
        115..=154 => 2,
        155..=194 => 3,
        195..=234 => 4,
        _ => 5,
    }
}

impl FromStr for Rgba {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s).ok_or_else(|| Error::InvalidColor(s.to_string()))
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b) = self.to_rgb_u8();
        if self.a >= 1.0 {
            write!(f, "#{r:02X}{g:02X}{b:02X}")
        } else {
            let a = (self.a.clamp(0.0, 1.0) * 255.0).round() as u8;
            write!(f, "#{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }
}

/// Left-to-right color ramp with an optional middle stop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gradient {
    pub from: Rgba,
    pub via: Option<Rgba>,
    pub to: Rgba,
}

impl Gradient {
    #[must_use]
    pub const fn new(from: Rgba, to: Rgba) -> Self {
        Self {
            from,
            via: None,
            to,
        }
    }

    #[must_use]
    pub const fn with_via(from: Rgba, via: Rgba, to: Rgba) -> Self {
        Self {
            from,
            via: Some(via),
            to,
        }
    }

    /// Same stops with every alpha multiplied by `alpha`.
    #[must_use]
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            from: self.from.multiply_alpha(alpha),
            via: self.via.map(|c| c.multiply_alpha(alpha)),
            to: self.to.multiply_alpha(alpha),
        }
    }

    /// Color at position `t` in [0, 1].
    #[must_use]
    pub fn at(&self, t: f32) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        match self.via {
            None => self.from.lerp(self.to, t),
            Some(via) if t <= 0.5 => self.from.lerp(via, t * 2.0),
            Some(via) => via.lerp(self.to, (t - 0.5) * 2.0),
        }
    }

    /// Color of step `index` when the gradient is spread over `steps` cells.
    #[must_use]
    pub fn sample(&self, index: usize, steps: usize) -> Rgba {
        if steps <= 1 {
            return self.from;
        }
        self.at(index as f32 / (steps - 1) as f32)
    }
}

/// Tailwind colors used by the page.
pub mod palette {
    #![allow(clippy::unreadable_literal)]

    use super::{Gradient, Rgba};

    pub const INDIGO_950: Rgba = Rgba::from_hex_u32(0x1E1B4B);
    pub const INDIGO_900: Rgba = Rgba::from_hex_u32(0x312E81);
    pub const INDIGO_500: Rgba = Rgba::from_hex_u32(0x6366F1);
    pub const PURPLE_950: Rgba = Rgba::from_hex_u32(0x3B0764);
    pub const PURPLE_900: Rgba = Rgba::from_hex_u32(0x581C87);
    pub const PURPLE_600: Rgba = Rgba::from_hex_u32(0x9333EA);
    pub const PURPLE_500: Rgba = Rgba::from_hex_u32(0xA855F7);
    pub const PURPLE_400: Rgba = Rgba::from_hex_u32(0xC084FC);
    pub const CYAN_500: Rgba = Rgba::from_hex_u32(0x06B6D4);
    pub const CYAN_300: Rgba = Rgba::from_hex_u32(0x67E8F9);
    pub const CYAN_400: Rgba = Rgba::from_hex_u32(0x22D3EE);
    pub const SLATE_300: Rgba = Rgba::from_hex_u32(0xCBD5E1);
    pub const SLATE_400: Rgba = Rgba::from_hex_u32(0x94A3B8);
    pub const SLATE_600: Rgba = Rgba::from_hex_u32(0x475569);
    pub const GREEN_400: Rgba = Rgba::from_hex_u32(0x4ADE80);
    pub const GREEN_500: Rgba = Rgba::from_hex_u32(0x22C55E);
    pub const RED_400: Rgba = Rgba::from_hex_u32(0xF87171);
    pub const RED_500: Rgba = Rgba::from_hex_u32(0xEF4444);
    pub const YELLOW_400: Rgba = Rgba::from_hex_u32(0xFACC15);
    pub const YELLOW_500: Rgba = Rgba::from_hex_u32(0xEAB308);
    pub const PINK_500: Rgba = Rgba::from_hex_u32(0xEC4899);
    pub const BLUE_500: Rgba = Rgba::from_hex_u32(0x3B82F6);
    pub const TEAL_500: Rgba = Rgba::from_hex_u32(0x14B8A6);
    pub const ORANGE_500: Rgba = Rgba::from_hex_u32(0xF97316);

    /// Page background: `from-indigo-950 via-purple-900 to-indigo-950`.
    pub const BACKGROUND: Gradient = Gradient::with_via(INDIGO_950, PURPLE_900, INDIGO_950);
    /// Headline and progress accent: `from-cyan-400 to-purple-400`.
    pub const ACCENT: Gradient = Gradient::new(CYAN_400, PURPLE_400);
    /// Primary buttons: `from-cyan-500 to-purple-600`.
    pub const BUTTON: Gradient = Gradient::new(CYAN_500, PURPLE_600);
    /// Card fill: `from-indigo-900/60 to-purple-900/60`.
    pub const CARD: Gradient = Gradient::new(
        INDIGO_900.with_alpha(0.6),
        PURPLE_900.with_alpha(0.6),
    );
    /// Card border: `purple-500/30`.
    pub const CARD_BORDER: Rgba = PURPLE_500.with_alpha(0.3);
    /// Badge pills: `from-cyan-500/20 to-purple-500/20`.
    pub const BADGE: Gradient = Gradient::new(CYAN_500.with_alpha(0.2), PURPLE_500.with_alpha(0.2));
    /// Footer: `from-indigo-950 to-purple-950`.
    pub const FOOTER: Gradient = Gradient::new(INDIGO_950, PURPLE_950);
    /// Header bar: `from-indigo-950/80 to-purple-950/80`.
    pub const HEADER: Gradient = Gradient::new(INDIGO_950.with_alpha(0.8), PURPLE_950.with_alpha(0.8));
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_from_hex() {
        assert_eq!(Rgba::from_hex("#FFFFFF"), Some(Rgba::WHITE));
        assert_eq!(Rgba::from_hex("000"), Some(Rgba::BLACK));
        assert_eq!(Rgba::from_hex("#22d3ee"), Some(palette::CYAN_400));
        let translucent = Rgba::from_hex("#00000080").unwrap();
        assert!((translucent.a - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(Rgba::from_hex("#12345"), None);
        assert_eq!(Rgba::from_hex("#zzzzzz"), None);
        assert_eq!(Rgba::from_hex("#ééé"), None);
    }

    #[test]
    fn test_from_str_reports_invalid_color() {
        let ok: Rgba = "#6366f1".parse().unwrap();
        assert_eq!(ok, palette::INDIGO_500);
        let err = "violet".parse::<Rgba>().unwrap_err();
        assert!(matches!(err, Error::InvalidColor(ref s) if s == "violet"));
    }

    #[test]
    fn test_const_hex_matches_runtime() {
        assert_eq!(
            Rgba::from_hex_u32(0xA855F7),
            Rgba::from_rgb_u8(0xA8, 0x55, 0xF7)
        );
        assert_eq!(palette::ORANGE_500.to_rgb_u8(), (0xF9, 0x73, 0x16));
    }

    #[test]
    fn test_display() {
        assert_eq!(palette::CYAN_500.to_string(), "#06B6D4");
        assert_eq!(palette::CARD_BORDER.to_string(), "#A855F74D");
    }

    #[test]
    fn test_blend_over() {
        assert_eq!(palette::RED_500.blend_over(Rgba::WHITE), palette::RED_500);
        assert_eq!(Rgba::TRANSPARENT.blend_over(Rgba::WHITE), Rgba::WHITE);

        let half = Rgba::WHITE.with_alpha(0.5).blend_over(Rgba::BLACK);
        assert!((half.r - 0.5).abs() < 1e-6);
        assert!(half.is_opaque());
    }

    #[test]
    fn test_gradient_two_stops() {
        let g = Gradient::new(Rgba::BLACK, Rgba::WHITE);
        assert_eq!(g.at(0.0), Rgba::BLACK);
        assert_eq!(g.at(1.0), Rgba::WHITE);
        assert_eq!(g.at(7.0), Rgba::WHITE);
        assert!((g.at(0.25).r - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_gradient_via_stop() {
        let bg = palette::BACKGROUND;
        assert_eq!(bg.at(0.5), palette::PURPLE_900);
        assert_eq!(bg.at(0.0), palette::INDIGO_950);
        assert_eq!(bg.at(1.0), palette::INDIGO_950);
    }

    #[test]
    fn test_gradient_sample_spreads_endpoints() {
        let g = palette::ACCENT;
        assert_eq!(g.sample(0, 10), palette::CYAN_400);
        assert_eq!(g.sample(9, 10), palette::PURPLE_400);
        assert_eq!(g.sample(0, 1), palette::CYAN_400);
        assert_eq!(g.sample(3, 0), palette::CYAN_400);
    }

    #[test]
    fn test_gradient_with_alpha() {
        let g = palette::ACCENT.with_alpha(0.2);
        assert!((g.from.a - 0.2).abs() < 1e-6);
        assert!((g.to.a - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_terminal_reductions() {
        assert_eq!(Rgba::BLACK.to_256_color(), 232);
        assert_eq!(Rgba::from_rgb_u8(255, 0, 0).to_256_color(), 196);
        assert_eq!(Rgba::from_rgb_u8(255, 0, 0).to_16_color(), 9);
        assert_eq!(Rgba::WHITE.to_16_color(), 15);
    }

    fn rgba_strategy() -> impl Strategy<Value = Rgba> {
        (0.0f32..=1.0, 0.0f32..=1.0, 0.0f32..=1.0, 0.0f32..=1.0)
            .prop_map(|(r, g, b, a)| Rgba::new(r, g, b, a))
    }

    proptest! {
        #[test]
        fn blend_alpha_in_range(fg in rgba_strategy(), bg in rgba_strategy()) {
            let out = fg.blend_over(bg);
            prop_assert!((0.0..=1.0 + 1e-6).contains(&out.a));
        }

        #[test]
        fn blend_over_opaque_stays_opaque(fg in rgba_strategy(), bg in rgba_strategy()) {
            let out = fg.blend_over(bg.with_alpha(1.0));
            prop_assert!((out.a - 1.0).abs() < 1e-5);
        }

        #[test]
        fn gradient_stays_between_stops(t in 0.0f32..=1.0) {
            let c = Gradient::new(Rgba::BLACK, Rgba::WHITE).at(t);
            prop_assert!((0.0..=1.0).contains(&c.r));
        }

        #[test]
        fn reductions_in_range(color in rgba_strategy()) {
            prop_assert!(color.to_16_color() < 16);
            prop_assert!(color.to_256_color() >= 16);
        }
    }
}
