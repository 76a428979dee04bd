//! Auto-rotating testimonial index with manual navigation.

use crate::error::{Error, Result};
use crate::event::emit_event;
use crate::page::schedule::Interval;
use serde_json::json;
use std::time::{Duration, Instant};

/// How manual navigation interacts with the rotation timer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RotationPolicy {
    /// Manual navigation leaves the timer phase alone.
    #[default]
    Independent,
    /// Every manual action restarts the countdown.
    RestartOnManual,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CarouselConfig {
    pub interval: Duration,
    pub policy: RotationPolicy,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(5000),
            policy: RotationPolicy::Independent,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Carousel {
    len: usize,
    index: usize,
    policy: RotationPolicy,
    timer: Interval,
}

impl Carousel {
    /// A stopped carousel at index 0.
    pub fn new(len: usize, config: CarouselConfig) -> Result<Self> {
        if len == 0 {
            return Err(Error::EmptyCarousel);
        }
        Ok(Self {
            len,
            index: 0,
            policy: config.policy,
            timer: Interval::new(config.interval),
        })
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    #[must_use]
    pub fn policy(&self) -> RotationPolicy {
        self.policy
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.timer.is_active()
    }

    /// Arm the rotation timer.
    pub fn start(&mut self, now: Instant) {
        self.timer.start(now);
    }

    /// Cancel the rotation timer; `tick` returns 0 afterwards.
    pub fn stop(&mut self) {
        self.timer.cancel();
    }

    /// Advance once per elapsed interval and return how many steps were taken.
    pub fn tick(&mut self, now: Instant) -> u32 {
        let fired = self.timer.poll(now);
        if fired > 0 {
            let steps = fired as usize % self.len;
            self.set_index((self.index + steps) % self.len, "auto");
        }
        fired
    }

    pub fn prev(&mut self, now: Instant) {
        self.set_index((self.index + self.len - 1) % self.len, "prev");
        self.after_manual(now);
    }

    pub fn next(&mut self, now: Instant) {
        self.set_index((self.index + 1) % self.len, "next");
        self.after_manual(now);
    }

    /// Show item `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range; callers only offer valid indices.
    pub fn jump_to(&mut self, index: usize, now: Instant) {
        assert!(
            index < self.len,
            "testimonial index {index} out of range for {} items",
            self.len
        );
        self.set_index(index, "jump");
        self.after_manual(now);
    }

    /// When the rotation fires next, if running.
    #[must_use]
    pub fn next_due(&self) -> Option<Instant> {
        self.timer.next_due()
    }

    fn after_manual(&mut self, now: Instant) {
        if self.policy == RotationPolicy::RestartOnManual {
            self.timer.restart(now);
        }
    }

    fn set_index(&mut self, index: usize, cause: &str) {
        if index != self.index {
            emit_event(
                "testimonial_changed",
                &json!({ "from": self.index, "to": index, "cause": cause }).to_string(),
            );
        }
        self.index = index;
    }
}
