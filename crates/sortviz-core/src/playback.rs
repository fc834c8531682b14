#![forbid(unsafe_code)]

//! Playback controller: walks a recorded [`Timeline`] forward and backward.
//!
//! The controller owns the current position, the run/pause flag and the step
//! interval. It never re-runs sort logic beyond the single lazy
//! [`generate`] call for a fresh array.
//!
//! # State machine
//!
//! ```text
//!            start()                      tick() at last position
//!   Paused ───────────▶ Running ─────────────────────────────────▶ Paused
//!     ▲   ◀───────────    │
//!     │      pause()      │ tick() when due: position += 1, re-arm
//!     │                   ▼
//!     └──── reset() / regenerate() cancel the pending advance first
//! ```
//!
//! # Invariants
//!
//! 1. `0 <= position <= timeline.total_steps()`.
//! 2. An advance is armed if and only if `running`.
//! 3. Stepping and seeking are no-ops while running.
//! 4. Frames handed out own their snapshot; the timeline is never mutated.
//!
//! # Failure Modes
//!
//! None. Out-of-range settings are clamped and disallowed operations return
//! `None` without touching state.

use std::sync::Arc;

use web_time::{Duration, Instant};

use crate::element::Snapshot;
use crate::history::{StepKind, Timeline, generate};
use crate::limits::{self, DEFAULT_ARRAY_SIZE, DEFAULT_INTERVAL, MAX_ARRAY_SIZE};
use crate::schedule::AdvanceTimer;
use crate::source::{RandomSource, ValueSource};

/// Initial settings for a [`Playback`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackConfig {
    /// Length of generated arrays.
    pub array_size: usize,
    /// Delay between automatic advances.
    pub interval: Duration,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            array_size: DEFAULT_ARRAY_SIZE,
            interval: DEFAULT_INTERVAL,
        }
    }
}

impl PlaybackConfig {
    /// Copy with both settings clamped into range.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            array_size: limits::clamp_size(size_as_i64(self.array_size)),
            interval: limits::clamp_interval(self.interval),
        }
    }
}

/// Everything the display needs for one state of the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackFrame {
    /// Owned copy of the snapshot at `position`.
    pub snapshot: Snapshot,
    /// Index into the timeline.
    pub position: usize,
    /// `timeline.len() - 1`.
    pub total_steps: usize,
    /// Iteration count of the timeline.
    pub iterations: usize,
    /// Whether automatic playback is active.
    pub running: bool,
    /// What the step at `position` did.
    pub step: StepKind,
}

/// The playback controller.
#[derive(Debug)]
pub struct Playback<S = RandomSource> {
    source: S,
    input: Vec<i64>,
    timeline: Arc<Timeline>,
    position: usize,
    running: bool,
    interval: Duration,
    array_size: usize,
    timer: AdvanceTimer,
}

impl<S: ValueSource> Playback<S> {
    /// Controller over a freshly drawn array.
    pub fn new(config: PlaybackConfig, mut source: S) -> Self {
        let config = config.clamped();
        let input = source.draw(config.array_size);
        Self::from_parts(config, source, input)
    }

    /// Controller over explicit values.
    ///
    /// Values beyond `MAX_ARRAY_SIZE` are dropped; an empty list is replaced
    /// by a single drawn value.
    pub fn with_values(config: PlaybackConfig, mut source: S, values: Vec<i64>) -> Self {
        let config = config.clamped();
        let input = normalize_values(values, &mut source);
        let config = PlaybackConfig {
            array_size: input.len(),
            ..config
        };
        Self::from_parts(config, source, input)
    }

    fn from_parts(config: PlaybackConfig, source: S, input: Vec<i64>) -> Self {
        let timeline = Arc::new(Timeline::placeholder(&input));
        Self {
            source,
            input,
            timeline,
            position: 0,
            running: false,
            interval: config.interval,
            array_size: config.array_size,
            timer: AdvanceTimer::new(),
        }
    }

    // ====================================================================
    // Control operations
    // ====================================================================

    /// Begin or resume automatic playback.
    ///
    /// Records the timeline first if this array has not been run yet, then
    /// advances one step immediately and arms the next advance. No-op while
    /// already running or when there is nothing left to play.
    pub fn start(&mut self, now: Instant) -> Option<PlaybackFrame> {
        if self.running {
            return None;
        }
        if !self.timeline.is_generated() {
            self.timeline = Arc::new(generate(&self.input));
        }
        if self.timeline.len() <= 1 || self.position >= self.timeline.total_steps() {
            return None;
        }
        self.running = true;
        tracing::debug!(
            position = self.position,
            total = self.timeline.total_steps(),
            interval_ms = self.interval.as_millis() as u64,
            "playback started"
        );
        Some(self.advance(now))
    }

    /// Stop automatic playback, keeping the position.
    pub fn pause(&mut self) -> Option<PlaybackFrame> {
        self.timer.cancel();
        if !self.running {
            return None;
        }
        self.running = false;
        tracing::debug!(position = self.position, "playback paused");
        Some(self.frame())
    }

    /// `start` when paused, `pause` when running.
    pub fn toggle(&mut self, now: Instant) -> Option<PlaybackFrame> {
        if self.running {
            self.pause()
        } else {
            self.start(now)
        }
    }

    /// Move one step forward. No-op while running or at the last step.
    pub fn step_forward(&mut self) -> Option<PlaybackFrame> {
        if self.running || self.position >= self.timeline.total_steps() {
            return None;
        }
        self.position += 1;
        tracing::trace!(position = self.position, "step forward");
        Some(self.frame())
    }

    /// Move one step back. No-op while running or at the first step.
    pub fn step_backward(&mut self) -> Option<PlaybackFrame> {
        if self.running || self.position == 0 {
            return None;
        }
        self.position -= 1;
        tracing::trace!(position = self.position, "step backward");
        Some(self.frame())
    }

    /// Jump to `position` (clamped). No-op while running or if unchanged.
    pub fn seek(&mut self, position: usize) -> Option<PlaybackFrame> {
        if self.running {
            return None;
        }
        let target = position.min(self.timeline.total_steps());
        if target == self.position {
            return None;
        }
        tracing::trace!(from = self.position, to = target, "seek");
        self.position = target;
        Some(self.frame())
    }

    /// Stop playback and return to the first step of the current timeline.
    pub fn reset(&mut self) -> PlaybackFrame {
        self.timer.cancel();
        self.running = false;
        self.position = 0;
        tracing::debug!("playback reset");
        self.frame()
    }

    /// Discard the timeline and draw a new array of `size` values (clamped).
    pub fn regenerate(&mut self, size: usize) -> PlaybackFrame {
        self.timer.cancel();
        let size = limits::clamp_size(size_as_i64(size));
        let values = self.source.draw(size);
        self.replace_input(values)
    }

    /// Discard the timeline and use `values` as the new array.
    pub fn regenerate_with(&mut self, values: Vec<i64>) -> PlaybackFrame {
        self.timer.cancel();
        let values = normalize_values(values, &mut self.source);
        self.replace_input(values)
    }

    fn replace_input(&mut self, values: Vec<i64>) -> PlaybackFrame {
        self.running = false;
        self.position = 0;
        self.array_size = values.len();
        self.timeline = Arc::new(Timeline::placeholder(&values));
        self.input = values;
        tracing::debug!(size = self.array_size, "array regenerated");
        self.frame()
    }

    /// Set the delay between automatic advances (clamped).
    ///
    /// An already armed advance keeps its due time; the new interval applies
    /// from the next one.
    pub fn set_speed(&mut self, interval: Duration) -> Duration {
        self.interval = limits::clamp_interval(interval);
        tracing::debug!(interval_ms = self.interval.as_millis() as u64, "speed set");
        self.interval
    }

    /// Drive the automatic-advance loop.
    ///
    /// Advances by exactly one step when the armed advance is due.
    pub fn tick(&mut self, now: Instant) -> Option<PlaybackFrame> {
        if !self.running {
            return None;
        }
        if !self.timer.fire(now) {
            return None;
        }
        Some(self.advance(now))
    }

    fn advance(&mut self, now: Instant) -> PlaybackFrame {
        self.position += 1;
        tracing::trace!(position = self.position, "advance");
        if self.position >= self.timeline.total_steps() {
            self.running = false;
            self.timer.cancel();
            tracing::debug!(
                steps = self.timeline.total_steps(),
                iterations = self.timeline.iterations(),
                "playback finished"
            );
        } else {
            self.timer.arm(now, self.interval);
        }
        self.frame()
    }

    // ====================================================================
    // Queries
    // ====================================================================

    /// Current position.
    #[inline]
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Whether automatic playback is active.
    #[inline]
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Index of the last step of the current timeline.
    #[must_use]
    pub fn total_steps(&self) -> usize {
        self.timeline.total_steps()
    }

    /// Iteration count of the current timeline.
    #[must_use]
    pub fn iterations(&self) -> usize {
        self.timeline.iterations()
    }

    /// Delay between automatic advances.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Rounded steps per second at the current interval.
    #[must_use]
    pub fn steps_per_second(&self) -> u64 {
        limits::steps_per_second(self.interval)
    }

    /// Length of the current array.
    #[must_use]
    pub fn array_size(&self) -> usize {
        self.array_size
    }

    /// Whether the current array has already been sorted into a timeline.
    #[must_use]
    pub fn is_generated(&self) -> bool {
        self.timeline.is_generated()
    }

    /// Shared handle to the current timeline.
    #[must_use]
    pub fn timeline(&self) -> &Arc<Timeline> {
        &self.timeline
    }

    /// Borrow the snapshot at the current position.
    #[must_use]
    pub fn current(&self) -> &Snapshot {
        self.timeline
            .get(self.position)
            .unwrap_or_else(|| self.timeline.first())
    }

    /// What the step at the current position did.
    #[must_use]
    pub fn current_step(&self) -> StepKind {
        self.timeline.kind(self.position).unwrap_or(StepKind::Initial)
    }

    /// When the pending automatic advance is due.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    /// Owned view of the current state for the display.
    #[must_use]
    pub fn frame(&self) -> PlaybackFrame {
        PlaybackFrame {
            snapshot: self.current().clone(),
            position: self.position,
            total_steps: self.timeline.total_steps(),
            iterations: self.timeline.iterations(),
            running: self.running,
            step: self.current_step(),
        }
    }
}

fn size_as_i64(size: usize) -> i64 {
    i64::try_from(size).unwrap_or(i64::MAX)
}

fn normalize_values<S: ValueSource>(mut values: Vec<i64>, source: &mut S) -> Vec<i64> {
    values.truncate(MAX_ARRAY_SIZE);
    if values.is_empty() {
        values = source.draw(limits::MIN_ARRAY_SIZE);
    }
    values
}
