#![forbid(unsafe_code)]

//! Cancellable scheduling of the next automatic advance.
//!
//! [`AdvanceTimer`] holds at most one pending advance. The host loop asks for
//! the [`deadline`](AdvanceTimer::deadline), sleeps or polls input until then,
//! and calls [`fire`](AdvanceTimer::fire). Cancellation is synchronous: once
//! [`cancel`](AdvanceTimer::cancel) returns, nothing armed earlier can fire.
//!
//! # Invariants
//!
//! 1. At most one advance is pending.
//! 2. `fire(now)` succeeds only when `now >= due`, and at most once per arm.
//! 3. `cancel()` and re-`arm()` both discard the previously pending advance.

use web_time::{Duration, Instant};

/// Single-slot timer for the playback loop.
#[derive(Debug, Default)]
pub struct AdvanceTimer {
    due: Option<Instant>,
}

impl AdvanceTimer {
    /// Create an idle timer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule an advance `interval` after `now`, replacing any pending one.
    pub fn arm(&mut self, now: Instant, interval: Duration) {
        self.due = Some(now + interval);
    }

    /// Drop the pending advance, if any. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.due.take().is_some()
    }

    /// Whether an advance is pending.
    #[inline]
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.due.is_some()
    }

    /// When the pending advance is due.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.due
    }

    /// Consume the pending advance if it is due at `now`.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.due {
            Some(due) if now >= due => {
                self.due = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn starts_idle() {
        let timer = AdvanceTimer::new();
        assert!(!timer.is_armed());
        assert!(timer.deadline().is_none());
    }

    #[test]
    fn fires_only_when_due() {
        let t0 = Instant::now();
        let mut timer = AdvanceTimer::new();
        timer.arm(t0, 100 * MS);
        assert!(!timer.fire(t0 + 99 * MS));
        assert!(timer.is_armed());
        assert!(timer.fire(t0 + 100 * MS));
        assert!(!timer.is_armed());
    }

    #[test]
    fn fires_at_most_once() {
        let t0 = Instant::now();
        let mut timer = AdvanceTimer::new();
        timer.arm(t0, 10 * MS);
        assert!(timer.fire(t0 + 50 * MS));
        assert!(!timer.fire(t0 + 60 * MS));
    }

    #[test]
    fn cancel_prevents_fire() {
        let t0 = Instant::now();
        let mut timer = AdvanceTimer::new();
        timer.arm(t0, 10 * MS);
        assert!(timer.cancel());
        assert!(!timer.fire(t0 + 1000 * MS));
        assert!(!timer.cancel());
    }

    #[test]
    fn rearm_replaces_pending() {
        let t0 = Instant::now();
        let mut timer = AdvanceTimer::new();
        timer.arm(t0, 10 * MS);
        timer.arm(t0, 500 * MS);
        assert_eq!(timer.deadline(), Some(t0 + 500 * MS));
        assert!(!timer.fire(t0 + 20 * MS));
        assert!(timer.fire(t0 + 500 * MS));
    }
}
