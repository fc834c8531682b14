#![forbid(unsafe_code)]

//! Native terminal backend built on crossterm.
//!
//! [`TerminalSession`] owns the terminal modes: raw mode, the alternate
//! screen and a hidden cursor. They are restored when the session drops and,
//! through a process-wide panic hook, when the program panics.

use std::io::{self, BufWriter, Stdout, Write};
use std::sync::OnceLock;

use crossterm::style::{Attribute, Color as CtColor, Print, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::{cursor, event, execute, queue, terminal};
use web_time::{Duration, Instant};

use crate::backend::Backend;
use crate::event::Event;
use crate::frame::{Color, Frame, Style};

/// Guard for terminal modes; restores them on drop.
#[derive(Debug)]
pub struct TerminalSession {
    alternate_screen: bool,
}

impl TerminalSession {
    /// Enter raw mode and the alternate screen.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal refuses raw mode or the escape
    /// sequences cannot be written.
    pub fn new() -> io::Result<Self> {
        install_panic_hook();
        terminal::enable_raw_mode()?;
        let mut session = Self {
            alternate_screen: false,
        };
        execute!(
            io::stdout(),
            terminal::EnterAlternateScreen,
            terminal::Clear(terminal::ClearType::All),
            cursor::Hide,
            cursor::MoveTo(0, 0)
        )?;
        session.alternate_screen = true;
        tracing::info!("terminal session started");
        Ok(session)
    }

    fn cleanup(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, terminal::EndSynchronizedUpdate, cursor::Show);
        if self.alternate_screen {
            let _ = execute!(stdout, terminal::LeaveAlternateScreen);
            self.alternate_screen = false;
        }
        let _ = terminal::disable_raw_mode();
        let _ = stdout.flush();
        tracing::info!("terminal session restored");
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        self.cleanup();
    }
}

fn install_panic_hook() {
    static HOOK: OnceLock<()> = OnceLock::new();
    HOOK.get_or_init(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            best_effort_cleanup();
            previous(info);
        }));
    });
}

fn best_effort_cleanup() {
    let mut stdout = io::stdout();
    let _ = execute!(
        stdout,
        terminal::EndSynchronizedUpdate,
        cursor::Show,
        terminal::LeaveAlternateScreen
    );
    let _ = terminal::disable_raw_mode();
    let _ = stdout.flush();
}

/// [`Backend`] for a real terminal.
#[derive(Debug)]
pub struct CrosstermBackend {
    _session: TerminalSession,
    out: BufWriter<Stdout>,
}

impl CrosstermBackend {
    /// Take over the terminal.
    ///
    /// # Errors
    ///
    /// Propagates failures from [`TerminalSession::new`].
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            _session: TerminalSession::new()?,
            out: BufWriter::new(io::stdout()),
        })
    }

    fn apply_style(&mut self, style: Style) -> io::Result<()> {
        queue!(
            self.out,
            SetAttribute(Attribute::Reset),
            SetForegroundColor(to_crossterm(style.fg)),
            SetBackgroundColor(to_crossterm(style.bg))
        )?;
        if style.bold {
            queue!(self.out, SetAttribute(Attribute::Bold))?;
        }
        Ok(())
    }
}

impl Backend for CrosstermBackend {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn size(&self) -> io::Result<(u16, u16)> {
        let (w, h) = terminal::size()?;
        Ok((w.max(2), h.max(2)))
    }

    fn poll_event(&mut self, timeout: Duration) -> io::Result<bool> {
        event::poll(timeout)
    }

    fn read_event(&mut self) -> io::Result<Option<Event>> {
        Ok(Event::from_crossterm(event::read()?))
    }

    fn present(&mut self, frame: &Frame) -> io::Result<()> {
        queue!(self.out, terminal::BeginSynchronizedUpdate)?;
        for y in 0..frame.height() {
            queue!(self.out, cursor::MoveTo(0, y))?;
            let mut current: Option<Style> = None;
            for cell in frame.row(y) {
                let Some(ch) = cell.ch else {
                    continue;
                };
                if current != Some(cell.style) {
                    self.apply_style(cell.style)?;
                    current = Some(cell.style);
                }
                queue!(self.out, Print(ch))?;
            }
        }
        queue!(
            self.out,
            SetAttribute(Attribute::Reset),
            terminal::EndSynchronizedUpdate
        )?;
        self.out.flush()
    }
}

fn to_crossterm(color: Color) -> CtColor {
    match color {
        Color::Reset => CtColor::Reset,
        Color::Black => CtColor::Black,
        Color::White => CtColor::White,
        Color::Grey => CtColor::Grey,
        Color::DarkGrey => CtColor::DarkGrey,
        Color::Red => CtColor::Red,
        Color::Green => CtColor::Green,
        Color::Yellow => CtColor::Yellow,
        Color::Blue => CtColor::Blue,
        Color::Magenta => CtColor::Magenta,
        Color::Cyan => CtColor::Cyan,
        Color::Rgb(r, g, b) => CtColor::Rgb { r, g, b },
    }
}
