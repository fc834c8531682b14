#![forbid(unsafe_code)]

//! History generation: instrumented insertion sort.
//!
//! [`generate`] runs a textbook insertion sort over a private copy of the
//! input and records a full [`Snapshot`] after every atomic sub-step:
//!
//! ```text
//! initial ─▶ pick-up(i) ─▶ [compare(j) ─▶ shift(j→j+1)]* ─▶ place-down ─▶ … ─▶ mark-sorted(0..n)
//! ```
//!
//! # Invariants
//!
//! 1. `timeline[0]` is the input with every element unsorted and resting.
//! 2. `timeline[last]` is fully sorted (status and values) with no lift.
//! 3. Every snapshot holds the same multiset of values as the input.
//! 4. The inner loop uses strict `>`, so equal values keep their input order.
//! 5. `iterations` counts pick-up and shift events; the final pass adds nothing.
//!
//! # Failure Modes
//!
//! - Empty input: the timeline holds the single empty snapshot.

use std::fmt;

use crate::element::{Element, LIFT_HEIGHT, Snapshot, Status};

/// What happened between the previous snapshot and this one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    /// The unmodified input.
    Initial,
    /// The key at `index` was picked up.
    PickUp { index: usize, value: i64 },
    /// The element at `index` is compared against the key.
    Compare { index: usize, value: i64, key: i64 },
    /// `value` moved right from `from` to `to`; the key took its slot.
    Shift { from: usize, to: usize, value: i64 },
    /// The key was put down at `index`.
    PlaceDown { index: usize, value: i64 },
    /// The final pass confirmed `index` as sorted.
    MarkSorted { index: usize },
}

impl StepKind {
    /// Stable short name for logs.
    pub fn name(self) -> &'static str {
        match self {
            Self::Initial => "initial",
            Self::PickUp { .. } => "pick_up",
            Self::Compare { .. } => "compare",
            Self::Shift { .. } => "shift",
            Self::PlaceDown { .. } => "place_down",
            Self::MarkSorted { .. } => "mark_sorted",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Initial => f.write_str("Initial array"),
            Self::PickUp { index, value } => write!(f, "Pick up {value} at index {index}"),
            Self::Compare { index, value, key } => {
                write!(f, "Compare {value} (index {index}) > key {key}")
            }
            Self::Shift { from, to, value } => write!(f, "Shift {value} from {from} to {to}"),
            Self::PlaceDown { index, value } => write!(f, "Place {value} at index {index}"),
            Self::MarkSorted { index } => write!(f, "Index {index} sorted"),
        }
    }
}

/// The complete ordered sequence of snapshots for one sort run.
///
/// Immutable once built; a new input needs a new `Timeline`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeline {
    snapshots: Vec<Snapshot>,
    kinds: Vec<StepKind>,
    iterations: usize,
    generated: bool,
}

impl Timeline {
    /// Single-snapshot timeline shown before the sort has been recorded.
    #[must_use]
    pub fn placeholder(values: &[i64]) -> Self {
        Self {
            snapshots: vec![Snapshot::from_values(values)],
            kinds: vec![StepKind::Initial],
            iterations: 0,
            generated: false,
        }
    }

    /// Number of snapshots (never zero).
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// A timeline always holds at least one snapshot, so this returns `false`.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Index of the last snapshot (`len - 1`).
    #[inline]
    #[must_use]
    pub fn total_steps(&self) -> usize {
        self.snapshots.len().saturating_sub(1)
    }

    /// Pick-up plus shift events recorded during the sort.
    #[inline]
    #[must_use]
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Whether this timeline holds a recorded sort (not a placeholder).
    #[inline]
    #[must_use]
    pub fn is_generated(&self) -> bool {
        self.generated
    }

    /// Snapshot at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    /// Step label at `index`.
    #[must_use]
    pub fn kind(&self, index: usize) -> Option<StepKind> {
        self.kinds.get(index).copied()
    }

    /// The input snapshot.
    #[must_use]
    pub fn first(&self) -> &Snapshot {
        &self.snapshots[0]
    }

    /// The final snapshot.
    #[must_use]
    pub fn last(&self) -> &Snapshot {
        &self.snapshots[self.snapshots.len() - 1]
    }

    /// All snapshots in order.
    #[must_use]
    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    /// All step labels in order (parallel to [`snapshots`](Self::snapshots)).
    #[must_use]
    pub fn kinds(&self) -> &[StepKind] {
        &self.kinds
    }
}

/// Appends deep copies of the working array.
struct Recorder {
    snapshots: Vec<Snapshot>,
    kinds: Vec<StepKind>,
}

impl Recorder {
    fn new(initial: Snapshot, expected_len: usize) -> Self {
        let mut snapshots = Vec::with_capacity(expected_len);
        let mut kinds = Vec::with_capacity(expected_len);
        snapshots.push(initial);
        kinds.push(StepKind::Initial);
        Self { snapshots, kinds }
    }

    fn record(&mut self, kind: StepKind, working: &[Element]) {
        self.snapshots.push(Snapshot::from_elements(working.to_vec()));
        self.kinds.push(kind);
    }
}

/// Record every atomic step of insertion sort over `input`.
///
/// Deterministic; `input` itself is never modified.
#[must_use]
pub fn generate(input: &[i64]) -> Timeline {
    let initial = Snapshot::from_values(input);
    let n = initial.len();
    // pick-up + place-down per key, plus the final pass; shifts grow it further.
    let mut recorder = Recorder::new(initial.clone(), 1 + 2 * n.saturating_sub(1) + n);
    let mut working = initial.elements().to_vec();
    let mut iterations = 0usize;

    for i in 1..n {
        let key = working[i];

        working[i] = key.with(Status::Sorting, LIFT_HEIGHT);
        recorder.record(
            StepKind::PickUp {
                index: i,
                value: key.value,
            },
            &working,
        );
        iterations += 1;

        // `hole` is where the key currently sits; the candidate is `hole - 1`.
        let mut hole = i;
        while hole > 0 && working[hole - 1].value > key.value {
            let j = hole - 1;
            let moved = working[j];

            working[j] = moved.with(Status::Comparing, moved.lift);
            recorder.record(
                StepKind::Compare {
                    index: j,
                    value: moved.value,
                    key: key.value,
                },
                &working,
            );

            working[hole] = moved.with(Status::Unsorted, 0);
            working[j] = key.with(Status::Sorting, LIFT_HEIGHT);
            recorder.record(
                StepKind::Shift {
                    from: j,
                    to: hole,
                    value: moved.value,
                },
                &working,
            );

            hole = j;
            iterations += 1;
        }

        working[hole] = key.with(Status::Unsorted, 0);
        recorder.record(
            StepKind::PlaceDown {
                index: hole,
                value: key.value,
            },
            &working,
        );
    }

    for index in 0..n {
        working[index] = working[index].with(Status::Sorted, 0);
        recorder.record(StepKind::MarkSorted { index }, &working);
    }

    tracing::debug!(
        len = n,
        steps = recorder.snapshots.len(),
        iterations,
        "recorded insertion sort"
    );

    Timeline {
        snapshots: recorder.snapshots,
        kinds: recorder.kinds,
        iterations,
        generated: true,
    }
}
