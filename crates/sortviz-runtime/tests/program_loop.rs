#![forbid(unsafe_code)]

//! Program loop tests on the headless backend.
//!
//! # Invariants
//!
//! 1. Ticks are delivered only after the model's deadline, one per deadline.
//! 2. Clearing the deadline inside `update` stops further ticks.
//! 3. A quit command ends the loop without another render.

use sortviz_runtime::{
    Cmd, Duration, Event, Frame, HeadlessBackend, Instant, KeyCode, Model, Program, Scripted,
    Style,
};

const PERIOD: Duration = Duration::from_millis(250);

/// Counts ticks while armed; `space` toggles the timer, `q` quits.
#[derive(Debug, Default)]
struct Metronome {
    due: Option<Instant>,
    ticks: Vec<Instant>,
    keys: usize,
}

enum Msg {
    Event(Event),
}

impl From<Event> for Msg {
    fn from(event: Event) -> Self {
        Self::Event(event)
    }
}

impl Model for Metronome {
    type Message = Msg;

    fn update(&mut self, msg: Msg, now: Instant) -> Cmd<Msg> {
        let Msg::Event(event) = msg;
        match event {
            Event::Key(k) if k.is_char('q') => return Cmd::quit(),
            Event::Key(k) if k.is_char(' ') => {
                self.keys += 1;
                self.due = match self.due {
                    Some(_) => None,
                    None => Some(now + PERIOD),
                };
            }
            Event::Tick(at) => {
                assert!(self.due.is_some_and(|due| due <= at), "tick before deadline");
                self.ticks.push(at);
                self.due = Some(at + PERIOD);
            }
            _ => {}
        }
        Cmd::none()
    }

    fn view(&self, frame: &mut Frame) {
        frame.put_str(0, 0, &format!("ticks={}", self.ticks.len()), Style::new());
    }

    fn deadline(&self) -> Option<Instant> {
        self.due
    }
}

fn run(script: Vec<Scripted>) -> (Metronome, HeadlessBackend) {
    let backend = HeadlessBackend::new(20, 2).with_script(script);
    let mut program = Program::new(Metronome::default(), backend);
    program.run().expect("program run");
    program.into_parts()
}

#[test]
fn ticks_follow_the_deadline() {
    let (model, backend) = run(vec![
        Scripted::char(' '),
        Scripted::Wait(Duration::from_millis(1000)),
        Scripted::char('q'),
    ]);
    assert_eq!(model.ticks.len(), 4);
    for pair in model.ticks.windows(2) {
        assert_eq!(pair[1] - pair[0], PERIOD);
    }
    assert_eq!(
        backend.last_frame().map(|f| f.row_text(0)),
        Some("ticks=4".to_string())
    );
}

#[test]
fn clearing_the_deadline_stops_ticks() {
    let (model, _) = run(vec![
        Scripted::char(' '),
        Scripted::Wait(Duration::from_millis(600)),
        Scripted::char(' '),
        Scripted::Wait(Duration::from_millis(2000)),
        Scripted::char('q'),
    ]);
    assert_eq!(model.keys, 2);
    assert_eq!(model.ticks.len(), 2);
}

#[test]
fn no_deadline_means_no_ticks() {
    let (model, backend) = run(vec![
        Scripted::Wait(Duration::from_millis(500)),
        Scripted::key(KeyCode::Left),
        Scripted::char('q'),
    ]);
    assert!(model.ticks.is_empty());
    // initial render plus one for the Left key
    assert_eq!(backend.frames().len(), 2);
}

#[test]
fn resize_changes_frame_size() {
    let (_, backend) = run(vec![
        Scripted::Event(Event::Resize {
            width: 40,
            height: 3,
        }),
        Scripted::char('q'),
    ]);
    let last = backend.last_frame().expect("frame");
    assert_eq!((last.width(), last.height()), (40, 3));
}

#[test]
fn exhausted_script_surfaces_an_error() {
    let backend = HeadlessBackend::new(10, 2).with_script([Scripted::char(' ')]);
    let mut program = Program::new(Metronome::default(), backend);
    assert!(program.run().is_err());
}
