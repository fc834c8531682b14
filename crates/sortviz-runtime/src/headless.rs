#![forbid(unsafe_code)]

//! Scripted backend with a virtual clock.
//!
//! Polling consumes the script: an [`Scripted::Event`] is delivered at once,
//! a [`Scripted::Wait`] advances the virtual clock by up to the poll timeout.
//! Nothing ever sleeps, so timer-driven behavior runs instantly and
//! deterministically.
//!
//! # Failure Modes
//!
//! - Exhausted script: `poll_event` returns `UnexpectedEof` so a test that
//!   forgets to quit fails instead of hanging.

use std::collections::VecDeque;
use std::io;

use web_time::{Duration, Instant};

use crate::backend::Backend;
use crate::event::{Event, KeyCode, KeyEvent};
use crate::frame::Frame;

/// One entry of a headless script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scripted {
    /// Deliver an event.
    Event(Event),
    /// Let virtual time pass with no input.
    Wait(Duration),
}

impl Scripted {
    /// Shorthand for a plain key press.
    #[must_use]
    pub fn key(code: KeyCode) -> Self {
        Self::Event(Event::Key(KeyEvent::new(code)))
    }

    /// Shorthand for a character key press.
    #[must_use]
    pub fn char(c: char) -> Self {
        Self::key(KeyCode::Char(c))
    }
}

/// Backend for tests: scripted input, captured output, virtual time.
#[derive(Debug)]
pub struct HeadlessBackend {
    now: Instant,
    size: (u16, u16),
    script: VecDeque<Scripted>,
    frames: Vec<Frame>,
}

impl HeadlessBackend {
    /// Backend with the given terminal size and an empty script.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            now: Instant::now(),
            size: (width, height),
            script: VecDeque::new(),
            frames: Vec::new(),
        }
    }

    /// Append script entries (builder pattern).
    #[must_use]
    pub fn with_script(mut self, entries: impl IntoIterator<Item = Scripted>) -> Self {
        self.script.extend(entries);
        self
    }

    /// Append one entry.
    pub fn push(&mut self, entry: Scripted) {
        self.script.push_back(entry);
    }

    /// Every frame presented so far.
    #[must_use]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// The most recently presented frame.
    #[must_use]
    pub fn last_frame(&self) -> Option<&Frame> {
        self.frames.last()
    }

    /// Entries not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl Backend for HeadlessBackend {
    fn now(&self) -> Instant {
        self.now
    }

    fn size(&self) -> io::Result<(u16, u16)> {
        Ok(self.size)
    }

    fn poll_event(&mut self, timeout: Duration) -> io::Result<bool> {
        match self.script.front_mut() {
            Some(Scripted::Event(_)) => Ok(true),
            Some(Scripted::Wait(left)) => {
                let step = (*left).min(timeout);
                self.now += step;
                *left -= step;
                if left.is_zero() {
                    self.script.pop_front();
                }
                Ok(false)
            }
            None => Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "headless script exhausted",
            )),
        }
    }

    fn read_event(&mut self) -> io::Result<Option<Event>> {
        match self.script.pop_front() {
            Some(Scripted::Event(event)) => {
                if let Event::Resize { width, height } = event {
                    self.size = (width, height);
                }
                Ok(Some(event))
            }
            Some(wait) => {
                self.script.push_front(wait);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    fn present(&mut self, frame: &Frame) -> io::Result<()> {
        self.frames.push(frame.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wait_advances_clock_in_timeout_slices() {
        let mut b = HeadlessBackend::new(10, 5).with_script([Scripted::Wait(Duration::from_millis(250))]);
        let t0 = b.now();
        assert!(!b.poll_event(Duration::from_millis(100)).unwrap());
        assert_eq!(b.now() - t0, Duration::from_millis(100));
        assert!(!b.poll_event(Duration::from_millis(100)).unwrap());
        assert!(!b.poll_event(Duration::from_millis(100)).unwrap());
        assert_eq!(b.now() - t0, Duration::from_millis(250));
        assert_eq!(b.remaining(), 0);
    }

    #[test]
    fn events_are_ready_immediately() {
        let mut b = HeadlessBackend::new(10, 5).with_script([Scripted::char('q')]);
        assert!(b.poll_event(Duration::ZERO).unwrap());
        assert_eq!(
            b.read_event().unwrap(),
            Some(Event::Key(KeyEvent::new(KeyCode::Char('q'))))
        );
    }

    #[test]
    fn exhausted_script_is_an_error() {
        let mut b = HeadlessBackend::new(10, 5);
        let err = b.poll_event(Duration::from_millis(1)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn resize_updates_size() {
        let mut b = HeadlessBackend::new(10, 5).with_script([Scripted::Event(Event::Resize {
            width: 30,
            height: 9,
        })]);
        b.read_event().unwrap();
        assert_eq!(b.size().unwrap(), (30, 9));
    }
}
