#![forbid(unsafe_code)]

//! Terminal runtime for sortviz.
//!
//! A small Elm-style loop: a [`Model`] receives [`Event`]s, returns [`Cmd`]s
//! and renders into a [`Frame`]. The loop is single-threaded; the only
//! suspension point is the input poll, bounded by the model's deadline.

pub mod backend;
pub mod event;
pub mod frame;
pub mod program;

#[cfg(any(test, feature = "test-helpers"))]
pub mod headless;

#[cfg(all(feature = "crossterm", not(target_arch = "wasm32")))]
pub mod terminal;

pub use backend::Backend;
pub use event::{Event, KeyCode, KeyEvent, Modifiers};
pub use frame::{Cell, Color, Frame, Style};
pub use program::{Cmd, Model, Program, ProgramConfig};

#[cfg(any(test, feature = "test-helpers"))]
pub use headless::{HeadlessBackend, Scripted};

#[cfg(all(feature = "crossterm", not(target_arch = "wasm32")))]
pub use terminal::{CrosstermBackend, TerminalSession};

/// Clock types used by [`Model`] and [`Backend`].
pub use web_time::{Duration, Instant};
