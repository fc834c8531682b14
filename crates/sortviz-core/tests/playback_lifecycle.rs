#![forbid(unsafe_code)]

//! Playback controller lifecycle tests driven by a synthetic clock.
//!
//! # Invariants
//!
//! 1. **Termination**: playback stops on its own within `len * interval`.
//! 2. **Ordering**: automatic advances visit every position exactly once, in order.
//! 3. **Cancellation**: no advance fires after pause, reset or regenerate.
//! 4. **Bounds**: `0 <= position <= total_steps` after every operation.

use proptest::prelude::*;

use sortviz_core::limits::MAX_INTERVAL;
use sortviz_core::{Duration, Instant, Playback, PlaybackConfig, RandomSource, Status};

fn player(values: &[i64]) -> Playback {
    Playback::with_values(
        PlaybackConfig::default(),
        RandomSource::seeded(42),
        values.to_vec(),
    )
}

/// Run playback to completion, returning every surfaced position.
fn run_to_end(p: &mut Playback, t0: Instant) -> (Vec<usize>, Instant) {
    let mut now = t0;
    let mut seen = Vec::new();
    if let Some(frame) = p.start(now) {
        seen.push(frame.position);
    }
    while let Some(due) = p.next_deadline() {
        now = due;
        if let Some(frame) = p.tick(now) {
            seen.push(frame.position);
        }
    }
    (seen, now)
}

#[test]
fn advances_are_sequential_and_complete() {
    let mut p = player(&[5, 3, 4, 1, 2]);
    let (seen, _) = run_to_end(&mut p, Instant::now());
    let expected: Vec<usize> = (1..=p.total_steps()).collect();
    assert_eq!(seen, expected);
    assert!(!p.is_running());
    assert_eq!(p.current().values(), vec![1, 2, 3, 4, 5]);
    assert_eq!(p.iterations(), 12);
}

#[test]
fn terminates_within_len_times_max_interval() {
    let mut p = player(&[9, 8, 7, 6, 5, 4, 3, 2, 1]);
    p.set_speed(MAX_INTERVAL);
    let t0 = Instant::now();
    let (_, end) = run_to_end(&mut p, t0);
    let len = p.timeline().len() as u32;
    assert!(end.duration_since(t0) <= MAX_INTERVAL * len);
}

#[test]
fn pause_then_step_then_resume() {
    let t0 = Instant::now();
    let mut p = player(&[3, 1, 2]);
    p.start(t0);
    p.tick(t0 + p.interval());
    p.pause();
    assert_eq!(p.position(), 2);

    p.step_forward();
    p.step_forward();
    assert_eq!(p.position(), 4);
    p.step_backward();
    assert_eq!(p.position(), 3);

    let frame = p.start(t0 + Duration::from_secs(1)).expect("resume");
    assert_eq!(frame.position, 4);
    assert!(frame.running);
}

#[test]
fn regenerate_while_running_cancels_the_pending_advance() {
    let t0 = Instant::now();
    let mut p = player(&[4, 3, 2, 1]);
    p.start(t0);
    let due = p.next_deadline().expect("armed");
    p.regenerate(6);
    assert!(p.tick(due).is_none());
    assert!(p.tick(due + Duration::from_secs(60)).is_none());
    assert_eq!(p.position(), 0);
    assert_eq!(p.array_size(), 6);
}

#[test]
fn full_replay_after_reset_matches_first_run() {
    let mut p = player(&[2, 7, 1, 8, 2, 8]);
    let (first, _) = run_to_end(&mut p, Instant::now());
    p.reset();
    let (second, _) = run_to_end(&mut p, Instant::now());
    assert_eq!(first, second);
    assert!(p.current().iter().all(|e| e.status == Status::Sorted));
}

#[derive(Debug, Clone)]
enum Op {
    Toggle,
    Forward,
    Backward,
    Reset,
    Regenerate(usize),
    Wait(u64),
    Speed(u64),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        2 => Just(Op::Toggle),
        3 => Just(Op::Forward),
        2 => Just(Op::Backward),
        1 => Just(Op::Reset),
        1 => (0usize..12).prop_map(Op::Regenerate),
        4 => (0u64..1500).prop_map(Op::Wait),
        1 => (0u64..2000).prop_map(Op::Speed),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn random_operations_keep_state_consistent(
        values in prop::collection::vec(1i64..=100, 1..10),
        ops in prop::collection::vec(op_strategy(), 1..60),
    ) {
        let mut p = player(&values);
        let mut now = Instant::now();
        for op in ops {
            match op {
                Op::Toggle => { p.toggle(now); }
                Op::Forward => { p.step_forward(); }
                Op::Backward => { p.step_backward(); }
                Op::Reset => { p.reset(); }
                Op::Regenerate(n) => { p.regenerate(n); }
                Op::Wait(ms) => {
                    now += Duration::from_millis(ms);
                    p.tick(now);
                }
                Op::Speed(ms) => { p.set_speed(Duration::from_millis(ms)); }
            }
            prop_assert!(p.position() <= p.total_steps());
            prop_assert_eq!(p.is_running(), p.next_deadline().is_some());
            prop_assert!(p.array_size() >= 1);
        }
    }
}
