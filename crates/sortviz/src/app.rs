#![forbid(unsafe_code)]

//! The visualizer model: maps keys to playback operations.
//!
//! # Keybindings
//!
//! - Space: Play/pause
//! - Right / l: Step forward
//! - Left / h: Step backward
//! - Home / End: Jump to first/last step
//! - r: Reset to the first step
//! - n: New random array
//! - v: Restore the values given on the command line
//! - + / -: Grow/shrink the array (generates a new one)
//! - f / s: Faster/slower
//! - i / ?: Toggle the info overlay
//! - q / Esc / Ctrl+C: Quit (Esc closes the overlay first)

use sortviz_core::limits::{self, INTERVAL_STEP, MAX_ARRAY_SIZE, MIN_ARRAY_SIZE};
use sortviz_core::{Instant, Playback, PlaybackConfig, RandomSource};
use sortviz_runtime::{Cmd, Event, Frame, KeyCode, KeyEvent, Model};

use crate::view;

/// A user-level command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Toggle,
    StepForward,
    StepBackward,
    First,
    Last,
    Reset,
    NewArray,
    RestoreValues,
    Grow,
    Shrink,
    Faster,
    Slower,
    ToggleInfo,
    Back,
    Quit,
}

/// Key binding table.
#[must_use]
pub fn action_for(key: &KeyEvent) -> Option<Action> {
    if key.is_ctrl('c') {
        return Some(Action::Quit);
    }
    let action = match key.code {
        KeyCode::Char(' ') | KeyCode::Enter => Action::Toggle,
        KeyCode::Right => Action::StepForward,
        KeyCode::Left => Action::StepBackward,
        KeyCode::Home => Action::First,
        KeyCode::End => Action::Last,
        KeyCode::Escape => Action::Back,
        KeyCode::Char(c) if key.is_char(c) => match c {
            'l' => Action::StepForward,
            'h' => Action::StepBackward,
            'r' => Action::Reset,
            'n' => Action::NewArray,
            'v' => Action::RestoreValues,
            '+' | '=' => Action::Grow,
            '-' | '_' => Action::Shrink,
            'f' => Action::Faster,
            's' => Action::Slower,
            'i' | '?' => Action::ToggleInfo,
            'q' => Action::Quit,
            _ => return None,
        },
        _ => return None,
    };
    Some(action)
}

/// Messages for [`App`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    Event(Event),
    Action(Action),
    /// Begin playback without user input.
    Autoplay,
}

impl From<Event> for Msg {
    fn from(event: Event) -> Self {
        Self::Event(event)
    }
}

/// Application state.
#[derive(Debug)]
pub struct App {
    playback: Playback<RandomSource>,
    preset: Option<Vec<i64>>,
    size_setting: usize,
    show_info: bool,
    autoplay: bool,
}

impl App {
    /// App over a random array.
    #[must_use]
    pub fn new(config: PlaybackConfig, source: RandomSource) -> Self {
        let config = config.clamped();
        Self::from_playback(Playback::new(config, source))
    }

    /// App over explicit values.
    #[must_use]
    pub fn with_values(config: PlaybackConfig, source: RandomSource, values: Vec<i64>) -> Self {
        let playback = Playback::with_values(config, source, values);
        let preset = Some(playback.current().values());
        Self {
            preset,
            ..Self::from_playback(playback)
        }
    }

    fn from_playback(playback: Playback<RandomSource>) -> Self {
        Self {
            size_setting: playback.array_size(),
            playback,
            preset: None,
            show_info: false,
            autoplay: false,
        }
    }

    /// Start playing as soon as the program starts (builder pattern).
    #[must_use]
    pub fn autoplay(mut self, enabled: bool) -> Self {
        self.autoplay = enabled;
        self
    }

    #[must_use]
    pub fn playback(&self) -> &Playback<RandomSource> {
        &self.playback
    }

    /// Requested length for the next generated array.
    #[must_use]
    pub fn size_setting(&self) -> usize {
        self.size_setting
    }

    #[must_use]
    pub fn show_info(&self) -> bool {
        self.show_info
    }

    fn apply(&mut self, action: Action, now: Instant) -> Cmd<Msg> {
        match action {
            Action::Toggle => {
                self.playback.toggle(now);
            }
            Action::StepForward => {
                self.playback.step_forward();
            }
            Action::StepBackward => {
                self.playback.step_backward();
            }
            Action::First => {
                self.playback.seek(0);
            }
            Action::Last => {
                self.playback.seek(usize::MAX);
            }
            Action::Reset => {
                self.playback.reset();
            }
            Action::NewArray => {
                let frame = self.playback.regenerate(self.size_setting);
                return Cmd::log(format!("new array of {} values", frame.snapshot.len()));
            }
            Action::RestoreValues => {
                let Some(values) = self.preset.clone() else {
                    return Cmd::none();
                };
                self.size_setting = values.len();
                self.playback.regenerate_with(values);
                return Cmd::log(format!("restored {} preset values", self.size_setting));
            }
            Action::Grow | Action::Shrink => {
                let next = if action == Action::Grow {
                    self.size_setting.saturating_add(1)
                } else {
                    self.size_setting.saturating_sub(1)
                };
                let next = next.clamp(MIN_ARRAY_SIZE, MAX_ARRAY_SIZE);
                if next != self.size_setting {
                    self.size_setting = next;
                    self.playback.regenerate(next);
                    return Cmd::log(format!("array size set to {next}"));
                }
            }
            Action::Faster => {
                let interval = self.playback.interval().saturating_sub(INTERVAL_STEP);
                self.playback.set_speed(interval);
            }
            Action::Slower => {
                let interval = self.playback.interval() + INTERVAL_STEP;
                self.playback.set_speed(limits::clamp_interval(interval));
            }
            Action::ToggleInfo => self.show_info = !self.show_info,
            Action::Back => {
                if self.show_info {
                    self.show_info = false;
                } else {
                    return self.quit();
                }
            }
            Action::Quit => return self.quit(),
        }
        Cmd::none()
    }

    fn quit(&mut self) -> Cmd<Msg> {
        self.playback.pause();
        Cmd::batch(vec![
            Cmd::log(format!(
                "quit at step {} of {}",
                self.playback.position(),
                self.playback.total_steps()
            )),
            Cmd::quit(),
        ])
    }
}

impl Model for App {
    type Message = Msg;

    fn init(&mut self) -> Cmd<Msg> {
        if self.autoplay {
            Cmd::msg(Msg::Autoplay)
        } else {
            Cmd::none()
        }
    }

    fn update(&mut self, msg: Msg, now: Instant) -> Cmd<Msg> {
        match msg {
            Msg::Event(Event::Key(key)) => match action_for(&key) {
                Some(action) => self.apply(action, now),
                None => Cmd::none(),
            },
            Msg::Event(Event::Tick(at)) => {
                self.playback.tick(at);
                Cmd::none()
            }
            Msg::Event(Event::Resize { .. }) => Cmd::none(),
            Msg::Action(action) => self.apply(action, now),
            Msg::Autoplay => {
                self.playback.start(now);
                Cmd::none()
            }
        }
    }

    fn view(&self, frame: &mut Frame) {
        view::render(self, frame);
    }

    fn deadline(&self) -> Option<Instant> {
        self.playback.next_deadline()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sortviz_runtime::Modifiers;

    fn quits(cmd: &Cmd<Msg>) -> bool {
        match cmd {
            Cmd::Quit => true,
            Cmd::Batch(cmds) => cmds.iter().any(quits),
            _ => false,
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code)
    }

    fn app(values: &[i64]) -> App {
        App::with_values(
            PlaybackConfig::default(),
            RandomSource::seeded(1),
            values.to_vec(),
        )
    }

    #[test]
    fn bindings() {
        assert_eq!(action_for(&key(KeyCode::Char(' '))), Some(Action::Toggle));
        assert_eq!(action_for(&key(KeyCode::Right)), Some(Action::StepForward));
        assert_eq!(action_for(&key(KeyCode::Char('h'))), Some(Action::StepBackward));
        assert_eq!(action_for(&key(KeyCode::End)), Some(Action::Last));
        assert_eq!(action_for(&key(KeyCode::Char('?'))), Some(Action::ToggleInfo));
        assert_eq!(action_for(&key(KeyCode::Char('x'))), None);
        assert_eq!(
            action_for(&key(KeyCode::Char('c')).with_modifiers(Modifiers::CTRL)),
            Some(Action::Quit)
        );
        assert_eq!(
            action_for(&key(KeyCode::Char('r')).with_modifiers(Modifiers::ALT)),
            None
        );
    }

    #[test]
    fn grow_and_shrink_regenerate_within_bounds() {
        let now = Instant::now();
        let mut a = app(&[5]);
        a.update(Msg::Action(Action::Shrink), now);
        assert_eq!(a.size_setting(), MIN_ARRAY_SIZE);
        a.update(Msg::Action(Action::Grow), now);
        assert_eq!(a.size_setting(), 2);
        assert_eq!(a.playback().array_size(), 2);
    }

    #[test]
    fn speed_keys_clamp() {
        let now = Instant::now();
        let mut a = app(&[2, 1]);
        for _ in 0..20 {
            a.update(Msg::Action(Action::Faster), now);
        }
        assert_eq!(a.playback().interval(), limits::MIN_INTERVAL);
        for _ in 0..20 {
            a.update(Msg::Action(Action::Slower), now);
        }
        assert_eq!(a.playback().interval(), limits::MAX_INTERVAL);
    }

    #[test]
    fn escape_closes_info_before_quitting() {
        let now = Instant::now();
        let mut a = app(&[2, 1]);
        a.update(Msg::Action(Action::ToggleInfo), now);
        assert!(a.show_info());
        assert!(matches!(a.update(Msg::Action(Action::Back), now), Cmd::None));
        assert!(!a.show_info());
        assert!(quits(&a.update(Msg::Action(Action::Back), now)));
    }

    #[test]
    fn autoplay_starts_on_init() {
        let now = Instant::now();
        let mut a = app(&[3, 2, 1]).autoplay(true);
        let Cmd::Msg(msg) = a.init() else {
            panic!("expected autoplay message");
        };
        a.update(msg, now);
        assert!(a.playback().is_running());
        assert_eq!(a.deadline(), a.playback().next_deadline());
    }

    #[test]
    fn quit_pauses_playback() {
        let now = Instant::now();
        let mut a = app(&[3, 2, 1]);
        a.update(Msg::Action(Action::Toggle), now);
        let cmd = a.update(Msg::Action(Action::Quit), now);
        assert!(quits(&cmd));
        let Cmd::Batch(cmds) = cmd else {
            panic!("expected log and quit");
        };
        assert!(matches!(&cmds[0], Cmd::Log(line) if line == "quit at step 1 of 13"));
        assert!(!a.playback().is_running());
        assert!(a.deadline().is_none());
    }

    #[test]
    fn restore_values_replays_the_preset() {
        let now = Instant::now();
        let mut a = app(&[4, 8, 6]);
        a.update(Msg::Action(Action::Grow), now);
        assert_eq!(a.playback().array_size(), 4);
        let cmd = a.update(Msg::Action(Action::RestoreValues), now);
        assert!(matches!(cmd, Cmd::Log(ref line) if line == "restored 3 preset values"));
        assert_eq!(a.size_setting(), 3);
        assert_eq!(a.playback().current().values(), vec![4, 8, 6]);
        assert!(!a.playback().is_generated());
    }

    #[test]
    fn restore_values_without_preset_is_noop() {
        let now = Instant::now();
        let mut a = App::new(PlaybackConfig::default(), RandomSource::seeded(3));
        let before = a.playback().current().clone();
        assert!(matches!(a.update(Msg::Action(Action::RestoreValues), now), Cmd::None));
        assert_eq!(a.playback().current(), &before);
    }

    #[test]
    fn size_change_is_logged() {
        let now = Instant::now();
        let mut a = app(&[2, 1]);
        let cmd = a.update(Msg::Action(Action::Grow), now);
        assert!(matches!(cmd, Cmd::Log(ref line) if line == "array size set to 3"));
    }
}
