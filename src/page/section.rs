//! Navigable sections and their layout bounds.

use crate::error::{Error, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A named region of the page, in visual top-to-bottom order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionId {
    Home,
    Features,
    Demo,
    Security,
    Interactive,
    Testimonials,
    Download,
}

impl SectionId {
    /// Every section in declared order.
    pub const ALL: [SectionId; 7] = [
        Self::Home,
        Self::Features,
        Self::Demo,
        Self::Security,
        Self::Interactive,
        Self::Testimonials,
        Self::Download,
    ];

    /// Stable anchor id, e.g. `"features"`.
    #[must_use]
    pub const fn anchor(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Features => "features",
            Self::Demo => "demo",
            Self::Security => "security",
            Self::Interactive => "interactive",
            Self::Testimonials => "testimonials",
            Self::Download => "download",
        }
    }

    /// Label shown in the navigation bar.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Features => "Features",
            Self::Demo => "Demo",
            Self::Security => "Security",
            Self::Interactive => "Interactive",
            Self::Testimonials => "Testimonials",
            Self::Download => "Download",
        }
    }

    /// Position in [`SectionId::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The section bound to digit key `n` (1-based).
    #[must_use]
    pub fn from_ordinal(n: usize) -> Option<Self> {
        n.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.anchor())
    }
}

impl FromStr for SectionId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|id| id.anchor().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownSection(s.to_string()))
    }
}

/// Vertical extent of a section in document rows: `[offset_top, offset_top + height)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SectionBounds {
    pub offset_top: u32,
    pub height: u32,
}

impl SectionBounds {
    #[must_use]
    pub const fn new(offset_top: u32, height: u32) -> Self {
        Self { offset_top, height }
    }

    /// One past the last row.
    #[must_use]
    pub const fn bottom(self) -> u32 {
        self.offset_top.saturating_add(self.height)
    }

    #[must_use]
    pub const fn contains(self, position: u32) -> bool {
        self.offset_top <= position && position < self.bottom()
    }
}

/// Read-only view of the live layout.
///
/// `None` means the section is not mounted; the tracker skips it.
pub trait SectionLayout {
    fn bounds(&self, id: SectionId) -> Option<SectionBounds>;
}

impl SectionLayout for BTreeMap<SectionId, SectionBounds> {
    fn bounds(&self, id: SectionId) -> Option<SectionBounds> {
        self.get(&id).copied()
    }
}

impl<L: SectionLayout + ?Sized> SectionLayout for &L {
    fn bounds(&self, id: SectionId) -> Option<SectionBounds> {
        (**self).bounds(id)
    }
}

/// A layout measured in rows, seen in finer units (`factor` units per row).
#[derive(Clone, Copy, Debug)]
pub struct Scaled<L> {
    pub layout: L,
    pub factor: u32,
}

impl<L: SectionLayout> Scaled<L> {
    /// A factor of zero is treated as one.
    #[must_use]
    pub fn new(layout: L, factor: u32) -> Self {
        Self {
            layout,
            factor: factor.max(1),
        }
    }

    /// A row offset in scaled units.
    #[must_use]
    pub fn to_units(&self, rows: u32) -> u32 {
        rows.saturating_mul(self.factor)
    }

    /// A scaled offset back in rows, rounding down.
    #[must_use]
    pub fn to_rows(&self, units: u32) -> u32 {
        units / self.factor
    }
}

impl<L: SectionLayout> SectionLayout for Scaled<L> {
    fn bounds(&self, id: SectionId) -> Option<SectionBounds> {
        self.layout.bounds(id).map(|b| {
            SectionBounds::new(self.to_units(b.offset_top), self.to_units(b.height))
        })
    }
}
