#![forbid(unsafe_code)]

//! Canonical input events.
//!
//! Backends translate platform input into these types; models never see
//! crossterm types directly.

use bitflags::bitflags;
use web_time::Instant;

bitflags! {
    /// Keyboard modifiers held during a key press.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const NONE = 0;
        const SHIFT = 1 << 0;
        const CTRL = 1 << 1;
        const ALT = 1 << 2;
    }
}

/// Keys the runtime distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Escape,
    Backspace,
    Tab,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
}

/// A key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Key press without modifiers.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
        }
    }

    /// Attach modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Whether this is the plain character `c` (shift allowed).
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        self.code == KeyCode::Char(c) && !self.modifiers.intersects(Modifiers::CTRL | Modifiers::ALT)
    }

    /// Whether this is `Ctrl+c`.
    #[must_use]
    pub fn is_ctrl(&self, c: char) -> bool {
        self.code == KeyCode::Char(c) && self.modifiers.contains(Modifiers::CTRL)
    }
}

/// Events delivered to [`Model::update`](crate::Model::update).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// The terminal was resized.
    Resize { width: u16, height: u16 },
    /// The model's deadline has passed.
    Tick(Instant),
}

#[cfg(all(feature = "crossterm", not(target_arch = "wasm32")))]
impl Event {
    /// Translate a crossterm event; returns `None` for events the runtime ignores.
    #[must_use]
    pub fn from_crossterm(event: crossterm::event::Event) -> Option<Self> {
        use crossterm::event::{self as ct, KeyEventKind};

        match event {
            ct::Event::Key(key) if key.kind != KeyEventKind::Release => {
                let code = match key.code {
                    ct::KeyCode::Char(c) => KeyCode::Char(c),
                    ct::KeyCode::Enter => KeyCode::Enter,
                    ct::KeyCode::Esc => KeyCode::Escape,
                    ct::KeyCode::Backspace => KeyCode::Backspace,
                    ct::KeyCode::Tab => KeyCode::Tab,
                    ct::KeyCode::Left => KeyCode::Left,
                    ct::KeyCode::Right => KeyCode::Right,
                    ct::KeyCode::Up => KeyCode::Up,
                    ct::KeyCode::Down => KeyCode::Down,
                    ct::KeyCode::Home => KeyCode::Home,
                    ct::KeyCode::End => KeyCode::End,
                    ct::KeyCode::PageUp => KeyCode::PageUp,
                    ct::KeyCode::PageDown => KeyCode::PageDown,
                    _ => return None,
                };
                let mut modifiers = Modifiers::NONE;
                if key.modifiers.contains(ct::KeyModifiers::SHIFT) {
                    modifiers |= Modifiers::SHIFT;
                }
                if key.modifiers.contains(ct::KeyModifiers::CONTROL) {
                    modifiers |= Modifiers::CTRL;
                }
                if key.modifiers.contains(ct::KeyModifiers::ALT) {
                    modifiers |= Modifiers::ALT;
                }
                Some(Self::Key(KeyEvent { code, modifiers }))
            }
            ct::Event::Resize(width, height) => Some(Self::Resize { width, height }),
            _ => None,
        }
    }
}
