//! The landing page: owned UI state, lifecycle and action routing.
//!
//! [`LandingPage`] owns every piece of mutable state: the layout, the scroll
//! viewport, the section tracker, the testimonial carousel and the menu flag.
//! Drawing gets a shared reference and hands back [`Control`]s through the
//! hit grid; nothing else mutates the page.
//!
//! ```
//! use cryptovault::page::{Action, LandingPage, PageConfig, SectionId};
//! use std::time::{Duration, Instant};
//!
//! let mut page = LandingPage::new(100, 30, PageConfig::default()).unwrap();
//! let t0 = Instant::now();
//! page.mount(t0);
//! assert_eq!(page.active_section(), SectionId::Home);
//!
//! page.apply(Action::JumpTo(SectionId::Security), t0);
//! page.tick(t0 + Duration::from_secs(1));
//! assert_eq!(page.active_section(), SectionId::Security);
//! ```

pub mod carousel;
pub mod content;
pub mod controls;
pub mod layout;
pub mod schedule;
pub mod scroll;
pub mod section;
pub mod tracker;
pub mod view;

pub use carousel::{Carousel, CarouselConfig, RotationPolicy};
pub use controls::{Action, Control};
pub use layout::{Breakpoint, PageLayout};
pub use schedule::{Interval, Listeners};
pub use scroll::{ScrollBehavior, ScrollConfig, Viewport};
pub use section::{Scaled, SectionBounds, SectionId, SectionLayout};
pub use tracker::{SectionTracker, TrackerConfig, TrackerUpdate};

use crate::buffer::FrameBuffer;
use crate::error::{Error, Result};
use crate::event::emit_event;
use crate::renderer::HitGrid;
use serde_json::json;
use std::time::Instant;

/// Pixels per terminal row when tracking with the web constants.
pub const REFERENCE_ROW_PX: u32 = 20;

/// Everything configurable about a page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageConfig {
    pub tracker: TrackerConfig,
    /// Tracker units per layout row; scroll offsets and bounds are scaled by it.
    pub tracker_scale: u32,
    pub carousel: CarouselConfig,
    pub scroll: ScrollConfig,
}

impl PageConfig {
    /// Terminal-row tracker constants.
    #[must_use]
    pub fn terminal() -> Self {
        Self {
            tracker: TrackerConfig::terminal(),
            tracker_scale: 1,
            carousel: CarouselConfig::default(),
            scroll: ScrollConfig::default(),
        }
    }

    /// Web pixel constants, tracked against a layout of [`REFERENCE_ROW_PX`]-pixel rows.
    #[must_use]
    pub fn reference() -> Self {
        Self {
            tracker: TrackerConfig::REFERENCE,
            tracker_scale: REFERENCE_ROW_PX,
            ..Self::terminal()
        }
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self::terminal()
    }
}

/// Whether the event loop should keep going.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// What one [`LandingPage::tick`] changed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub testimonial_advances: u32,
    pub scrolled: bool,
}

impl TickReport {
    #[must_use]
    pub fn changed(&self) -> bool {
        self.testimonial_advances > 0 || self.scrolled
    }
}

#[derive(Debug)]
pub struct LandingPage {
    config: PageConfig,
    layout: PageLayout,
    viewport: Viewport,
    tracker: SectionTracker,
    carousel: Carousel,
    menu_open: bool,
    mounted_at: Option<Instant>,
}

impl LandingPage {
    /// An unmounted page at the top of the document.
    pub fn new(width: u32, height: u32, config: PageConfig) -> Result<Self> {
        check_dimensions(width, height)?;
        let layout = PageLayout::compute(width, height);
        let viewport = Viewport::new(height, layout.document_height(), config.scroll);
        Ok(Self {
            tracker: SectionTracker::new(SectionId::ALL.to_vec(), config.tracker)?,
            carousel: Carousel::new(content::TESTIMONIALS.len(), config.carousel)?,
            config,
            layout,
            viewport,
            menu_open: false,
            mounted_at: None,
        })
    }

    /// Register listeners, start the rotation and settle the tracker once.
    pub fn mount(&mut self, now: Instant) {
        if self.mounted_at.is_some() {
            return;
        }
        self.tracker.attach();
        self.carousel.start(now);
        let scaled = Scaled::new(&self.layout, self.config.tracker_scale);
        self.tracker.recompute(scaled.to_units(self.viewport.offset()), &scaled);
        self.mounted_at = Some(now);
        emit_event(
            "page_mounted",
            &json!({
                "width": self.layout.width(),
                "height": self.layout.viewport_height(),
                "document_height": self.layout.document_height(),
            })
            .to_string(),
        );
    }

    /// Unregister listeners and cancel timers. Safe to call repeatedly.
    pub fn teardown(&mut self) {
        if self.mounted_at.take().is_none() {
            return;
        }
        self.tracker.detach();
        self.carousel.stop();
        self.viewport.cancel_animation();
        emit_event("page_torn_down", "{}");
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted_at.is_some()
    }

    /// Lay out for a new terminal size and re-settle through the resize listener.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        check_dimensions(width, height)?;
        self.layout = PageLayout::compute(width, height);
        self.viewport.set_extent(height, self.layout.document_height());
        if !self.layout.breakpoint().collapses_nav() {
            self.menu_open = false;
        }
        let scaled = Scaled::new(&self.layout, self.config.tracker_scale);
        self.tracker.on_resize(scaled.to_units(self.viewport.offset()), &scaled);
        Ok(())
    }

    pub fn apply(&mut self, action: Action, now: Instant) -> Flow {
        match action {
            Action::Quit => return Flow::Quit,
            Action::JumpTo(id) => self.jump_to_section(id, now),
            Action::ScrollToTop => self.scroll_to_top(now),
            Action::ToggleMenu => self.toggle_menu(),
            Action::PrevTestimonial => self.carousel.prev(now),
            Action::NextTestimonial => self.carousel.next(now),
            Action::ShowTestimonial(k) => self.show_testimonial(k, now),
            Action::ScrollLines(rows) => {
                let changed = self.viewport.scroll_by(i64::from(rows), now);
                self.after_scroll(changed);
            }
            Action::ScrollPages(pages) => {
                let changed = self.viewport.page_by(pages, now);
                self.after_scroll(changed);
            }
            Action::ScrollToEnd => {
                let changed = self
                    .viewport
                    .scroll_to(self.viewport.max_offset(), ScrollBehavior::Instant, now);
                self.after_scroll(changed);
            }
        }
        Flow::Continue
    }

    /// Smooth-scroll so the section sits just below the header; closes the menu.
    ///
    /// The active section is settled by the scroll events along the way.
    pub fn jump_to_section(&mut self, id: SectionId, now: Instant) {
        let scaled = Scaled::new(&self.layout, self.config.tracker_scale);
        if let Some(target) = self.tracker.jump_target(id, &scaled) {
            let target = scaled.to_rows(target);
            let changed = self.viewport.scroll_to(target, ScrollBehavior::Smooth, now);
            self.after_scroll(changed);
        }
        self.menu_open = false;
    }

    pub fn scroll_to_top(&mut self, now: Instant) {
        let changed = self.viewport.scroll_to(0, ScrollBehavior::Smooth, now);
        self.after_scroll(changed);
    }

    /// Instant scroll, bypassing animation.
    pub fn scroll_to(&mut self, offset: u32, now: Instant) {
        let changed = self.viewport.scroll_to(offset, ScrollBehavior::Instant, now);
        self.after_scroll(changed);
    }

    /// The menu only exists while the navigation is collapsed.
    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open && self.layout.breakpoint().collapses_nav();
    }

    /// Show testimonial `k`; out-of-range indices are ignored.
    pub fn show_testimonial(&mut self, k: usize, now: Instant) {
        if k < self.carousel.len() {
            self.carousel.jump_to(k, now);
        }
    }

    /// Drive the rotation timer and the scroll animation.
    pub fn tick(&mut self, now: Instant) -> TickReport {
        let testimonial_advances = self.carousel.tick(now);
        let scrolled = self.viewport.step(now);
        self.after_scroll(scrolled);
        TickReport {
            testimonial_advances,
            scrolled,
        }
    }

    /// The earliest moment `tick` has work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.carousel.next_due(), self.viewport.animation_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Draw the current frame and register clickable areas.
    pub fn render(&self, buffer: &mut FrameBuffer, hits: &mut HitGrid, now: Instant) {
        view::render(self, buffer, hits, now);
    }

    #[must_use]
    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    #[must_use]
    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    #[must_use]
    pub fn tracker(&self) -> &SectionTracker {
        &self.tracker
    }

    #[must_use]
    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.layout.width(), self.layout.viewport_height())
    }

    #[must_use]
    pub fn breakpoint(&self) -> Breakpoint {
        self.layout.breakpoint()
    }

    #[must_use]
    pub fn scroll_offset(&self) -> u32 {
        self.viewport.offset()
    }

    #[must_use]
    pub fn scroll_progress(&self) -> f32 {
        self.viewport.progress()
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.viewport.is_animating()
    }

    #[must_use]
    pub fn active_section(&self) -> SectionId {
        self.tracker.active()
    }

    #[must_use]
    pub fn scroll_top_visible(&self) -> bool {
        self.tracker.scroll_top_visible()
    }

    #[must_use]
    pub fn testimonial_index(&self) -> usize {
        self.carousel.index()
    }

    #[must_use]
    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    #[must_use]
    pub fn mounted_at(&self) -> Option<Instant> {
        self.mounted_at
    }

    #[must_use]
    pub fn section_bounds(&self) -> Vec<(SectionId, SectionBounds)> {
        self.layout.section_bounds()
    }

    fn after_scroll(&mut self, changed: bool) {
        if changed {
            let scaled = Scaled::new(&self.layout, self.config.tracker_scale);
            self.tracker.on_scroll(scaled.to_units(self.viewport.offset()), &scaled);
        }
    }
}

impl Drop for LandingPage {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn check_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimensions { width, height });
    }
    Ok(())
}
