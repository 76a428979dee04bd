//! Scroll offset, clamping and smooth-scroll animation.

use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScrollConfig {
    /// Rows per arrow key.
    pub line_step: u32,
    /// Rows per mouse wheel notch.
    pub wheel_step: u32,
    /// Rows that stay visible across a page step, matching the fixed header.
    pub page_overlap: u32,
    pub smooth_duration: Duration,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            line_step: 1,
            wheel_step: 3,
            page_overlap: 3,
            smooth_duration: Duration::from_millis(320),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScrollBehavior {
    #[default]
    Instant,
    Smooth,
}

#[derive(Clone, Copy, Debug)]
struct Animation {
    from: u32,
    to: u32,
    started: Instant,
    duration: Duration,
}

impl Animation {
    fn offset_at(&self, now: Instant) -> (u32, bool) {
        let elapsed = now.saturating_duration_since(self.started);
        if elapsed >= self.duration {
            return (self.to, true);
        }
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        let eased = ease_in_out_cubic(t);
        let from = f64::from(self.from);
        let to = f64::from(self.to);
        ((from + (to - from) * eased).round() as u32, false)
    }
}

/// Cubic ease-in-out on `[0, 1]`.
#[must_use]
pub fn ease_in_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// The visible window onto the document. `offset <= max_offset()` always holds.
#[derive(Clone, Debug)]
pub struct Viewport {
    offset: u32,
    viewport_height: u32,
    document_height: u32,
    config: ScrollConfig,
    animation: Option<Animation>,
}

impl Viewport {
    #[must_use]
    pub fn new(viewport_height: u32, document_height: u32, config: ScrollConfig) -> Self {
        Self {
            offset: 0,
            viewport_height,
            document_height,
            config,
            animation: None,
        }
    }

    #[must_use]
    pub fn offset(&self) -> u32 {
        self.offset
    }

    #[must_use]
    pub fn viewport_height(&self) -> u32 {
        self.viewport_height
    }

    #[must_use]
    pub fn document_height(&self) -> u32 {
        self.document_height
    }

    #[must_use]
    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    #[must_use]
    pub fn max_offset(&self) -> u32 {
        self.document_height.saturating_sub(self.viewport_height)
    }

    /// How far down the page is scrolled, in `[0, 1]`; 0 when everything fits.
    #[must_use]
    pub fn progress(&self) -> f32 {
        match self.max_offset() {
            0 => 0.0,
            max => (f64::from(self.offset) / f64::from(max)) as f32,
        }
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// When the in-flight smooth scroll finishes.
    #[must_use]
    pub fn animation_deadline(&self) -> Option<Instant> {
        self.animation.map(|a| a.started + a.duration)
    }

    /// Scroll to `target`, clamped. Returns whether the offset changed now.
    ///
    /// A smooth scroll replaces any in-flight one and starts from the current
    /// offset; the offset then moves in [`step`](Self::step).
    pub fn scroll_to(&mut self, target: u32, behavior: ScrollBehavior, now: Instant) -> bool {
        let target = target.min(self.max_offset());
        match behavior {
            ScrollBehavior::Smooth if target != self.offset => {
                self.animation = Some(Animation {
                    from: self.offset,
                    to: target,
                    started: now,
                    duration: self.config.smooth_duration,
                });
                false
            }
            _ => {
                self.animation = None;
                self.set_offset(target)
            }
        }
    }

    /// Instant relative scroll; cancels any animation.
    pub fn scroll_by(&mut self, delta: i64, now: Instant) -> bool {
        let target = (i64::from(self.offset) + delta).clamp(0, i64::from(u32::MAX)) as u32;
        self.scroll_to(target, ScrollBehavior::Instant, now)
    }

    /// Scroll by whole pages, keeping `page_overlap` rows in view.
    pub fn page_by(&mut self, pages: i32, now: Instant) -> bool {
        let page = self
            .viewport_height
            .saturating_sub(self.config.page_overlap)
            .max(1);
        self.scroll_by(i64::from(pages) * i64::from(page), now)
    }

    /// Advance the animation. Returns whether the offset changed.
    pub fn step(&mut self, now: Instant) -> bool {
        let Some(animation) = self.animation else {
            return false;
        };
        let (offset, done) = animation.offset_at(now);
        if done {
            self.animation = None;
        }
        self.set_offset(offset.min(self.max_offset()))
    }

    /// New viewport or document size. Returns whether the offset had to move.
    pub fn set_extent(&mut self, viewport_height: u32, document_height: u32) -> bool {
        self.viewport_height = viewport_height;
        self.document_height = document_height;
        let max = self.max_offset();
        if let Some(animation) = &mut self.animation {
            animation.to = animation.to.min(max);
        }
        self.set_offset(self.offset.min(max))
    }

    pub fn cancel_animation(&mut self) {
        self.animation = None;
    }

    fn set_offset(&mut self, offset: u32) -> bool {
        let changed = offset != self.offset;
        self.offset = offset;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport::new(24, 200, ScrollConfig::default())
    }

    #[test]
    fn test_clamps_to_max_offset() {
        let mut vp = viewport();
        let now = Instant::now();
        assert_eq!(vp.max_offset(), 176);
        assert!(vp.scroll_to(1000, ScrollBehavior::Instant, now));
        assert_eq!(vp.offset(), 176);
        assert!(vp.scroll_by(-1000, now));
        assert_eq!(vp.offset(), 0);
        assert!(!vp.scroll_by(-1, now));
    }

    #[test]
    fn test_page_by_keeps_overlap() {
        let mut vp = viewport();
        let now = Instant::now();
        vp.page_by(1, now);
        assert_eq!(vp.offset(), 21);
        vp.page_by(-2, now);
        assert_eq!(vp.offset(), 0);
    }

    #[test]
    fn test_smooth_scroll_reaches_target_exactly() {
        let mut vp = viewport();
        let t0 = Instant::now();
        assert!(!vp.scroll_to(100, ScrollBehavior::Smooth, t0));
        assert!(vp.is_animating());
        assert_eq!(vp.offset(), 0);

        assert!(vp.step(t0 + Duration::from_millis(160)));
        assert_eq!(vp.offset(), 50);

        vp.step(t0 + Duration::from_millis(320));
        assert_eq!(vp.offset(), 100);
        assert!(!vp.is_animating());
        assert!(!vp.step(t0 + Duration::from_millis(400)));
    }

    #[test]
    fn test_smooth_scroll_is_monotonic() {
        let mut vp = viewport();
        let t0 = Instant::now();
        vp.scroll_to(150, ScrollBehavior::Smooth, t0);
        let mut last = 0;
        for ms in (0..=340).step_by(10) {
            vp.step(t0 + Duration::from_millis(ms));
            assert!(vp.offset() >= last);
            last = vp.offset();
        }
        assert_eq!(last, 150);
    }

    #[test]
    fn test_new_smooth_scroll_replaces_old() {
        let mut vp = viewport();
        let t0 = Instant::now();
        vp.scroll_to(150, ScrollBehavior::Smooth, t0);
        vp.step(t0 + Duration::from_millis(160));
        let midway = vp.offset();

        let t1 = t0 + Duration::from_millis(160);
        vp.scroll_to(0, ScrollBehavior::Smooth, t1);
        assert_eq!(vp.animation_deadline(), Some(t1 + Duration::from_millis(320)));
        vp.step(t1 + Duration::from_millis(1));
        assert!(vp.offset() <= midway);
        vp.step(t1 + Duration::from_millis(320));
        assert_eq!(vp.offset(), 0);
    }

    #[test]
    fn test_instant_scroll_cancels_animation() {
        let mut vp = viewport();
        let t0 = Instant::now();
        vp.scroll_to(150, ScrollBehavior::Smooth, t0);
        vp.scroll_by(5, t0);
        assert!(!vp.is_animating());
        assert_eq!(vp.offset(), 5);
    }

    #[test]
    fn test_smooth_scroll_to_current_offset_is_noop() {
        let mut vp = viewport();
        assert!(!vp.scroll_to(0, ScrollBehavior::Smooth, Instant::now()));
        assert!(!vp.is_animating());
    }

    #[test]
    fn test_set_extent_reclamps() {
        let mut vp = viewport();
        let t0 = Instant::now();
        vp.scroll_to(170, ScrollBehavior::Instant, t0);
        assert!(vp.set_extent(50, 200));
        assert_eq!(vp.offset(), 150);
        assert!(vp.set_extent(50, 40));
        assert_eq!(vp.offset(), 0);
        assert_eq!(vp.progress(), 0.0);
    }

    #[test]
    fn test_progress() {
        let mut vp = viewport();
        vp.scroll_to(88, ScrollBehavior::Instant, Instant::now());
        assert!((vp.progress() - 0.5).abs() < 1e-6);
        vp.scroll_to(176, ScrollBehavior::Instant, Instant::now());
        assert!((vp.progress() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_easing_endpoints() {
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);
        assert!((ease_in_out_cubic(0.5) - 0.5).abs() < 1e-12);
        assert!(ease_in_out_cubic(0.25) < 0.25);
    }
}
