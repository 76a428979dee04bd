//! Text styling: attribute flags plus optional colors.
//!
//! `None` colors mean "leave whatever is underneath": a styled string drawn
//! over a card keeps the card's background.

use crate::color::Rgba;
use bitflags::bitflags;

bitflags! {
    /// SGR text attributes.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
    pub struct TextAttributes: u32 {
        const BOLD          = 0x01;
        const DIM           = 0x02;
        const ITALIC        = 0x04;
        const UNDERLINE     = 0x08;
        const BLINK         = 0x10;
        const INVERSE       = 0x20;
        const HIDDEN        = 0x40;
        const STRIKETHROUGH = 0x80;
    }
}

/// Colors and attributes applied to drawn text.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Style {
    /// Foreground color (None = keep existing).
    pub fg: Option<Rgba>,
    /// Background color (None = keep existing).
    pub bg: Option<Rgba>,
    pub attributes: TextAttributes,
}

impl Style {
    /// Empty style with no colors or attributes.
    pub const NONE: Self = Self {
        fg: None,
        bg: None,
        attributes: TextAttributes::empty(),
    };

    #[must_use]
    pub const fn fg(color: Rgba) -> Self {
        Self {
            fg: Some(color),
            ..Self::NONE
        }
    }

    #[must_use]
    pub const fn bg(color: Rgba) -> Self {
        Self {
            bg: Some(color),
            ..Self::NONE
        }
    }

    #[must_use]
    pub const fn bold() -> Self {
        Self {
            attributes: TextAttributes::BOLD,
            ..Self::NONE
        }
    }

    /// Add attributes to the existing set.
    #[must_use]
    pub const fn with_attributes(self, attrs: TextAttributes) -> Self {
        Self {
            attributes: self.attributes.union(attrs),
            ..self
        }
    }

    #[must_use]
    pub const fn with_bold(self) -> Self {
        self.with_attributes(TextAttributes::BOLD)
    }

    #[must_use]
    pub const fn with_dim(self) -> Self {
        self.with_attributes(TextAttributes::DIM)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && self.attributes.is_empty()
    }
}
