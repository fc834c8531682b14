#![forbid(unsafe_code)]

//! Elm-style runtime for terminal applications.
//!
//! The program runtime manages the update/view loop. State lives in a
//! [`Model`]; side effects are requested through [`Cmd`]. Timers are
//! expressed as a single wake-up [`deadline`](Model::deadline): the loop
//! polls input until that instant, then delivers [`Event::Tick`].
//!
//! # Loop
//!
//! ```text
//! init ─▶ render ─▶ ┌─ poll input (timeout = min(poll_timeout, deadline - now))
//!                   ├─ dispatch key/resize events
//!                   ├─ dispatch Tick(now) if the deadline has passed
//!                   └─ render if dirty ─┘ until Cmd::Quit
//! ```
//!
//! # Invariants
//!
//! 1. One cooperative loop; `update` runs to completion before the next event.
//! 2. At most one `Tick` per loop iteration, so timed updates never batch.
//! 3. The model's deadline is re-read after every update, so cancelling it
//!    inside `update` takes effect before the next poll.

use std::io;

use web_time::{Duration, Instant};

use crate::backend::Backend;
use crate::event::Event;
use crate::frame::Frame;

/// Application state and behavior.
pub trait Model {
    /// Messages that drive [`update`](Self::update). Must accept raw events.
    type Message: From<Event>;

    /// Startup commands.
    fn init(&mut self) -> Cmd<Self::Message> {
        Cmd::none()
    }

    /// Apply a message at time `now`.
    fn update(&mut self, msg: Self::Message, now: Instant) -> Cmd<Self::Message>;

    /// Render the current state.
    fn view(&self, frame: &mut Frame);

    /// When the model next wants a [`Event::Tick`], if ever.
    fn deadline(&self) -> Option<Instant> {
        None
    }
}

/// Side effects requested by the model.
#[derive(Debug)]
pub enum Cmd<M> {
    /// No operation.
    None,
    /// Stop the loop.
    Quit,
    /// Run several commands in order.
    Batch(Vec<Cmd<M>>),
    /// Feed a message back into `update`.
    Msg(M),
    /// Emit a log line through `tracing`.
    Log(String),
}

impl<M> Cmd<M> {
    #[inline]
    pub fn none() -> Self {
        Self::None
    }

    #[inline]
    pub fn quit() -> Self {
        Self::Quit
    }

    #[inline]
    pub fn msg(m: M) -> Self {
        Self::Msg(m)
    }

    #[inline]
    pub fn log(msg: impl Into<String>) -> Self {
        Self::Log(msg.into())
    }

    /// Combine commands, collapsing empty and single-element batches.
    pub fn batch(cmds: Vec<Self>) -> Self {
        let mut cmds: Vec<Self> = cmds.into_iter().filter(|c| !matches!(c, Self::None)).collect();
        match cmds.len() {
            0 => Self::None,
            1 => cmds.pop().unwrap_or(Self::None),
            _ => Self::Batch(cmds),
        }
    }
}

impl<M> Default for Cmd<M> {
    fn default() -> Self {
        Self::None
    }
}

/// Configuration for the program runtime.
#[derive(Debug, Clone)]
pub struct ProgramConfig {
    /// Longest a single input poll may block.
    pub poll_timeout: Duration,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            poll_timeout: Duration::from_millis(100),
        }
    }
}

/// The runtime driving a [`Model`] on a [`Backend`].
#[derive(Debug)]
pub struct Program<M: Model, B: Backend> {
    model: M,
    backend: B,
    config: ProgramConfig,
    running: bool,
    dirty: bool,
    size: (u16, u16),
    frames_rendered: u64,
}

impl<M: Model, B: Backend> Program<M, B> {
    /// Create a program with default configuration.
    pub fn new(model: M, backend: B) -> Self {
        Self::with_config(model, backend, ProgramConfig::default())
    }

    /// Create a program with the specified configuration.
    pub fn with_config(model: M, backend: B, config: ProgramConfig) -> Self {
        Self {
            model,
            backend,
            config,
            running: true,
            dirty: true,
            size: (0, 0),
            frames_rendered: 0,
        }
    }

    /// Run until the model quits.
    ///
    /// # Errors
    ///
    /// Propagates backend I/O failures.
    pub fn run(&mut self) -> io::Result<()> {
        self.size = self.backend.size()?;
        let cmd = self.model.init();
        self.execute(cmd)?;
        if self.running {
            self.render()?;
        }

        while self.running {
            let timeout = self.effective_timeout(self.backend.now());
            if self.backend.poll_event(timeout)? {
                if let Some(event) = self.backend.read_event()? {
                    self.handle_event(event)?;
                }
            }

            if self.running {
                let now = self.backend.now();
                if self.model.deadline().is_some_and(|due| due <= now) {
                    self.dispatch(Event::Tick(now).into())?;
                }
            }

            if self.dirty && self.running {
                self.render()?;
            }
        }

        tracing::debug!(frames = self.frames_rendered, "program stopped");
        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> io::Result<()> {
        if let Event::Resize { width, height } = event {
            self.size = (width, height);
            self.dirty = true;
        }
        self.dispatch(event.into())
    }

    fn dispatch(&mut self, msg: M::Message) -> io::Result<()> {
        let now = self.backend.now();
        let cmd = self.model.update(msg, now);
        self.dirty = true;
        self.execute(cmd)
    }

    fn execute(&mut self, cmd: Cmd<M::Message>) -> io::Result<()> {
        match cmd {
            Cmd::None => {}
            Cmd::Quit => self.running = false,
            Cmd::Msg(m) => self.dispatch(m)?,
            Cmd::Batch(cmds) => {
                for c in cmds {
                    self.execute(c)?;
                }
            }
            Cmd::Log(text) => tracing::info!(target: "sortviz::log", "{text}"),
        }
        Ok(())
    }

    fn render(&mut self) -> io::Result<()> {
        let (width, height) = self.size;
        let mut frame = Frame::new(width, height);
        self.model.view(&mut frame);
        self.backend.present(&frame)?;
        self.frames_rendered += 1;
        self.dirty = false;
        Ok(())
    }

    /// Poll timeout: until the model's deadline, capped by `poll_timeout`.
    fn effective_timeout(&self, now: Instant) -> Duration {
        match self.model.deadline() {
            Some(due) => due.saturating_duration_since(now).min(self.config.poll_timeout),
            None => self.config.poll_timeout,
        }
    }

    /// Get a reference to the model.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Get a reference to the backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Frames presented so far.
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Whether the loop is still running.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Consume the program, returning model and backend.
    pub fn into_parts(self) -> (M, B) {
        (self.model, self.backend)
    }
}
