#![forbid(unsafe_code)]

//! Bounds for user-adjustable settings.
//!
//! Out-of-range values are clamped, never rejected, so the visualizer always
//! stays displayable.

use web_time::Duration;

/// Smallest array the visualizer will generate.
pub const MIN_ARRAY_SIZE: usize = 1;
/// Largest array the visualizer will generate.
pub const MAX_ARRAY_SIZE: usize = 40;
/// Array size used when none is given.
pub const DEFAULT_ARRAY_SIZE: usize = 10;

/// Fastest automatic advance.
pub const MIN_INTERVAL: Duration = Duration::from_millis(100);
/// Slowest automatic advance.
pub const MAX_INTERVAL: Duration = Duration::from_millis(1000);
/// Interval used when none is given.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(500);
/// Granularity of keyboard speed adjustments.
pub const INTERVAL_STEP: Duration = Duration::from_millis(100);

/// Clamp a requested array size into `[MIN_ARRAY_SIZE, MAX_ARRAY_SIZE]`.
#[must_use]
pub fn clamp_size(requested: i64) -> usize {
    if requested <= MIN_ARRAY_SIZE as i64 {
        MIN_ARRAY_SIZE
    } else {
        usize::try_from(requested).map_or(MAX_ARRAY_SIZE, |n| n.min(MAX_ARRAY_SIZE))
    }
}

/// Clamp a requested step interval into `[MIN_INTERVAL, MAX_INTERVAL]`.
#[must_use]
pub fn clamp_interval(requested: Duration) -> Duration {
    requested.clamp(MIN_INTERVAL, MAX_INTERVAL)
}

/// Clamp an interval given in (possibly negative) milliseconds.
#[must_use]
pub fn clamp_interval_ms(requested_ms: i64) -> Duration {
    let ms = requested_ms.clamp(
        MIN_INTERVAL.as_millis() as i64,
        MAX_INTERVAL.as_millis() as i64,
    );
    Duration::from_millis(ms as u64)
}

/// Rounded steps per second for an interval, as shown next to the speed.
#[must_use]
pub fn steps_per_second(interval: Duration) -> u64 {
    let ms = interval.as_millis().max(1);
    ((1000 + ms / 2) / ms) as u64
}
