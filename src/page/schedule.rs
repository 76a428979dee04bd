//! Repeating timers and listener registration, both scoped to a page's lifetime.
//!
//! Nothing here spawns threads or sleeps. The event loop passes the current
//! [`Instant`] in and asks when the next deadline is, so every timer is an
//! independently cancellable subscription that simply stops reporting once
//! cancelled.

use bitflags::bitflags;
use std::time::{Duration, Instant};

bitflags! {
    /// Event listeners a component currently has registered.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Listeners: u8 {
        const SCROLL = 0b01;
        const RESIZE = 0b10;
    }
}

const MIN_PERIOD: Duration = Duration::from_millis(1);

/// A repeating deadline that fires once per period while active.
#[derive(Clone, Debug)]
pub struct Interval {
    period: Duration,
    next_due: Option<Instant>,
}

impl Interval {
    /// An inactive interval; zero periods are clamped to 1ms.
    #[must_use]
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(MIN_PERIOD),
            next_due: None,
        }
    }

    /// Arm the interval; the first firing is one period after `now`.
    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.period);
    }

    /// Restart the countdown from `now` if the interval is active.
    pub fn restart(&mut self, now: Instant) {
        if self.is_active() {
            self.start(now);
        }
    }

    /// Stop for good; `poll` returns 0 until the next `start`.
    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.next_due.is_some()
    }

    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }

    #[must_use]
    pub fn next_due(&self) -> Option<Instant> {
        self.next_due
    }

    /// Count the firings due at `now` and move the deadline past it.
    ///
    /// The deadline advances by whole periods, so a late poll neither loses
    /// firings nor drifts the phase.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let Some(due) = self.next_due else {
            return 0;
        };
        if now < due {
            return 0;
        }

        let overdue = now.duration_since(due).as_nanos();
        let periods = overdue / self.period.as_nanos() + 1;
        let fired = u32::try_from(periods).unwrap_or(u32::MAX);
        self.next_due = Some(due + self.period * fired);
        fired
    }

    /// Time left before the next firing; zero when already due.
    #[must_use]
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECOND: Duration = Duration::from_secs(1);

    #[test]
    fn test_inactive_until_started() {
        let mut interval = Interval::new(SECOND);
        let t0 = Instant::now();
        assert!(!interval.is_active());
        assert_eq!(interval.poll(t0 + SECOND * 10), 0);
        assert_eq!(interval.time_until_due(t0), None);
    }

    #[test]
    fn test_fires_once_per_period() {
        let mut interval = Interval::new(SECOND);
        let t0 = Instant::now();
        interval.start(t0);

        assert_eq!(interval.poll(t0 + Duration::from_millis(999)), 0);
        assert_eq!(interval.poll(t0 + SECOND), 1);
        assert_eq!(interval.poll(t0 + SECOND), 0);
        assert_eq!(interval.poll(t0 + Duration::from_millis(1999)), 0);
        assert_eq!(interval.poll(t0 + SECOND * 2), 1);
    }

    #[test]
    fn test_late_poll_catches_up_without_drift() {
        let mut interval = Interval::new(SECOND);
        let t0 = Instant::now();
        interval.start(t0);

        assert_eq!(interval.poll(t0 + Duration::from_millis(3500)), 3);
        assert_eq!(interval.next_due(), Some(t0 + SECOND * 4));
        assert_eq!(
            interval.time_until_due(t0 + Duration::from_millis(3500)),
            Some(Duration::from_millis(500))
        );
    }

    #[test]
    fn test_cancel_stops_firing() {
        let mut interval = Interval::new(SECOND);
        let t0 = Instant::now();
        interval.start(t0);
        interval.cancel();
        assert_eq!(interval.poll(t0 + SECOND * 5), 0);

        // restart only re-arms an active interval
        interval.restart(t0);
        assert!(!interval.is_active());
    }

    #[test]
    fn test_restart_moves_phase() {
        let mut interval = Interval::new(SECOND);
        let t0 = Instant::now();
        interval.start(t0);
        interval.restart(t0 + Duration::from_millis(800));
        assert_eq!(interval.poll(t0 + SECOND), 0);
        assert_eq!(interval.poll(t0 + Duration::from_millis(1800)), 1);
    }

    #[test]
    fn test_zero_period_is_clamped() {
        let interval = Interval::new(Duration::ZERO);
        assert_eq!(interval.period(), Duration::from_millis(1));
    }

    #[test]
    fn test_listener_flags() {
        let mut listeners = Listeners::empty();
        listeners |= Listeners::SCROLL | Listeners::RESIZE;
        assert!(listeners.contains(Listeners::SCROLL));
        listeners.remove(Listeners::SCROLL);
        assert_eq!(listeners, Listeners::RESIZE);
    }
}
