#![forbid(unsafe_code)]

//! Core of the sortviz insertion-sort visualizer.
//!
//! - [`history`]: records every atomic step of an insertion sort as a [`Timeline`].
//! - [`playback`]: the controller that walks a timeline on a cancellable timer.
//! - [`schedule`]: the single-slot advance timer behind automatic playback.
//! - [`source`]: random values for new arrays.
//! - [`limits`]: bounds for array size and speed.
//!
//! Nothing here touches a terminal; hosts drive [`Playback::tick`] from their
//! own loop using [`Playback::next_deadline`] as the wake-up time.

pub mod element;
pub mod history;
pub mod limits;
pub mod playback;
pub mod schedule;
pub mod source;

pub use element::{Element, LIFT_HEIGHT, Snapshot, Status};
pub use history::{StepKind, Timeline, generate};
pub use playback::{Playback, PlaybackConfig, PlaybackFrame};
pub use schedule::AdvanceTimer;
pub use source::{RandomSource, ValueSource};

/// Re-exported clock types used throughout the API.
pub use web_time::{Duration, Instant};
