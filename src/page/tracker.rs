//! Scroll-driven active section and scroll-to-top visibility.
//!
//! The tracker never reads or stores layout itself. Every recompute is handed
//! the current scroll offset and a [`SectionLayout`], so repeating a
//! recompute with the same inputs is a no-op. Jumping to a section computes a
//! target offset only; the scroll events produced by getting there settle
//! the active section.

use crate::error::{Error, Result};
use crate::event::emit_event;
use crate::page::schedule::Listeners;
use crate::page::section::{SectionId, SectionLayout};
use serde_json::json;

/// Tracker constants, in document units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Added to the scroll offset to probe below the fixed header.
    pub probe_offset: u32,
    /// Below this offset an unmatched probe falls back to the first section.
    pub low_scroll_threshold: u32,
    /// The scroll-to-top control shows strictly above this offset.
    pub scroll_top_threshold: u32,
    pub header_height: u32,
    /// Extra offset added to jump targets.
    pub jump_buffer: u32,
}

impl TrackerConfig {
    /// Pixel constants of the web landing page.
    pub const REFERENCE: Self = Self {
        probe_offset: 140,
        low_scroll_threshold: 200,
        scroll_top_threshold: 600,
        header_height: 80,
        jump_buffer: 8,
    };

    /// Row constants for a three-row terminal header.
    #[must_use]
    pub const fn terminal() -> Self {
        Self {
            probe_offset: 5,
            low_scroll_threshold: 6,
            scroll_top_threshold: 18,
            header_height: 3,
            jump_buffer: 1,
        }
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self::REFERENCE
    }
}

/// The section containing the probe position, if it should replace the current one.
///
/// Sections are checked in declared order and unmounted ones are skipped.
/// When nothing matches near the top of the page the first section wins;
/// otherwise `None` means "keep the current value".
#[must_use]
pub fn active_section_at(
    sections: &[SectionId],
    scroll: u32,
    layout: &impl SectionLayout,
    config: &TrackerConfig,
) -> Option<SectionId> {
    let probe = scroll.saturating_add(config.probe_offset);
    let hit = sections
        .iter()
        .copied()
        .find(|&id| layout.bounds(id).is_some_and(|b| b.contains(probe)));

    match hit {
        Some(id) => Some(id),
        None if scroll < config.low_scroll_threshold => sections.first().copied(),
        None => None,
    }
}

#[must_use]
pub fn scroll_top_visible(scroll: u32, config: &TrackerConfig) -> bool {
    scroll > config.scroll_top_threshold
}

/// Offset that puts a section just below the fixed header.
#[must_use]
pub fn jump_target(id: SectionId, layout: &impl SectionLayout, config: &TrackerConfig) -> Option<u32> {
    let bounds = layout.bounds(id)?;
    Some(
        bounds
            .offset_top
            .saturating_sub(config.header_height)
            .saturating_add(config.jump_buffer),
    )
}

/// Outcome of one recompute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrackerUpdate {
    pub active: SectionId,
    pub active_changed: bool,
    pub scroll_top_visible: bool,
    pub scroll_top_changed: bool,
}

impl TrackerUpdate {
    #[must_use]
    pub fn changed(&self) -> bool {
        self.active_changed || self.scroll_top_changed
    }
}

#[derive(Clone, Debug)]
pub struct SectionTracker {
    sections: Vec<SectionId>,
    config: TrackerConfig,
    active: SectionId,
    scroll_top_visible: bool,
    listeners: Listeners,
}

impl SectionTracker {
    /// Start on the first declared section with no listeners attached.
    pub fn new(sections: Vec<SectionId>, config: TrackerConfig) -> Result<Self> {
        let Some(&first) = sections.first() else {
            return Err(Error::NoSections);
        };
        Ok(Self {
            sections,
            config,
            active: first,
            scroll_top_visible: false,
            listeners: Listeners::empty(),
        })
    }

    /// Register the scroll and resize listeners.
    pub fn attach(&mut self) {
        self.listeners |= Listeners::SCROLL | Listeners::RESIZE;
    }

    pub fn detach(&mut self) {
        self.listeners = Listeners::empty();
    }

    #[must_use]
    pub fn listeners(&self) -> Listeners {
        self.listeners
    }

    #[must_use]
    pub fn active(&self) -> SectionId {
        self.active
    }

    #[must_use]
    pub fn scroll_top_visible(&self) -> bool {
        self.scroll_top_visible
    }

    #[must_use]
    pub fn sections(&self) -> &[SectionId] {
        &self.sections
    }

    #[must_use]
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Recompute both values, attached or not.
    pub fn recompute(&mut self, scroll: u32, layout: &impl SectionLayout) -> TrackerUpdate {
        let previous = self.active;
        if let Some(id) = active_section_at(&self.sections, scroll, layout, &self.config) {
            self.active = id;
        }
        let active_changed = self.active != previous;

        let visible = scroll_top_visible(scroll, &self.config);
        let scroll_top_changed = visible != self.scroll_top_visible;
        self.scroll_top_visible = visible;

        if active_changed {
            emit_event(
                "section_changed",
                &json!({ "from": previous, "to": self.active, "scroll": scroll }).to_string(),
            );
        }
        if scroll_top_changed {
            emit_event(
                "scroll_top_visibility",
                &json!({ "visible": visible, "scroll": scroll }).to_string(),
            );
        }

        TrackerUpdate {
            active: self.active,
            active_changed,
            scroll_top_visible: visible,
            scroll_top_changed,
        }
    }

    /// Scroll listener; `None` while detached.
    pub fn on_scroll(&mut self, scroll: u32, layout: &impl SectionLayout) -> Option<TrackerUpdate> {
        self.listeners
            .contains(Listeners::SCROLL)
            .then(|| self.recompute(scroll, layout))
    }

    /// Resize listener; `None` while detached.
    pub fn on_resize(&mut self, scroll: u32, layout: &impl SectionLayout) -> Option<TrackerUpdate> {
        self.listeners
            .contains(Listeners::RESIZE)
            .then(|| self.recompute(scroll, layout))
    }

    #[must_use]
    pub fn jump_target(&self, id: SectionId, layout: &impl SectionLayout) -> Option<u32> {
        jump_target(id, layout, &self.config)
    }
}
