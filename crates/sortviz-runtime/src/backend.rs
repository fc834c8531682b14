#![forbid(unsafe_code)]

//! Platform boundary: clock, input and presentation.
//!
//! [`Program`](crate::Program) never reads the wall clock or the terminal
//! directly; everything flows through a [`Backend`]. The native
//! implementation is `CrosstermBackend`; tests use `HeadlessBackend`.

use std::io;

use web_time::{Duration, Instant};

use crate::event::Event;
use crate::frame::Frame;

/// Everything the runtime needs from its host.
pub trait Backend {
    /// Current monotonic time.
    fn now(&self) -> Instant;

    /// Terminal dimensions (columns, rows).
    fn size(&self) -> io::Result<(u16, u16)>;

    /// Wait up to `timeout` for input. Returns `true` if an event is ready.
    fn poll_event(&mut self, timeout: Duration) -> io::Result<bool>;

    /// Read the next event, or `None` if the input is not one the runtime uses.
    fn read_event(&mut self) -> io::Result<Option<Event>>;

    /// Draw a complete frame.
    fn present(&mut self, frame: &Frame) -> io::Result<()>;
}
