#![forbid(unsafe_code)]

//! Array elements and snapshots.
//!
//! A [`Snapshot`] is a complete, owned copy of the array at one step of the
//! sort. Snapshots never share storage with each other or with the array the
//! generator mutates, so any of them can be rendered or handed out on its own.

use std::fmt;
use std::ops::Index;

/// Lift applied to the key while it is picked up.
pub const LIFT_HEIGHT: u16 = 20;

/// Role of an element in the current snapshot.
///
/// Purely descriptive: it never influences sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Status {
    /// Resting, not yet confirmed sorted.
    #[default]
    Unsorted,
    /// The key currently being inserted.
    Sorting,
    /// The element the key is being compared against.
    Comparing,
    /// Confirmed by the final pass.
    Sorted,
}

impl Status {
    /// Short label for logs and captions.
    pub fn label(self) -> &'static str {
        match self {
            Self::Unsorted => "unsorted",
            Self::Sorting => "sorting",
            Self::Comparing => "comparing",
            Self::Sorted => "sorted",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One value of the sequence being sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Element {
    /// Sort key and display payload.
    pub value: i64,
    /// Role in the current snapshot.
    pub status: Status,
    /// How far the element is picked up (0 = resting).
    pub lift: u16,
    /// Index of this element in the input sequence.
    pub origin: usize,
}

impl Element {
    /// A resting, unsorted element.
    #[must_use]
    pub const fn new(value: i64, origin: usize) -> Self {
        Self {
            value,
            status: Status::Unsorted,
            lift: 0,
            origin,
        }
    }

    /// Copy of this element with a new status and lift.
    #[must_use]
    pub const fn with(self, status: Status, lift: u16) -> Self {
        Self {
            status,
            lift,
            ..self
        }
    }

    /// Whether the element is elevated.
    #[inline]
    #[must_use]
    pub const fn is_lifted(&self) -> bool {
        self.lift > 0
    }
}

/// A fully independent recorded state of the array.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Snapshot {
    elements: Vec<Element>,
}

impl Snapshot {
    /// Snapshot of `values` with every element unsorted and resting.
    #[must_use]
    pub fn from_values(values: &[i64]) -> Self {
        Self {
            elements: values
                .iter()
                .enumerate()
                .map(|(origin, &value)| Element::new(value, origin))
                .collect(),
        }
    }

    pub(crate) fn from_elements(elements: Vec<Element>) -> Self {
        Self { elements }
    }

    /// Number of elements.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the snapshot holds no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The elements in array order.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Iterate over the elements.
    pub fn iter(&self) -> std::slice::Iter<'_, Element> {
        self.elements.iter()
    }

    /// The values in array order.
    #[must_use]
    pub fn values(&self) -> Vec<i64> {
        self.elements.iter().map(|e| e.value).collect()
    }

    /// Largest value, or `None` when empty.
    #[must_use]
    pub fn max_value(&self) -> Option<i64> {
        self.elements.iter().map(|e| e.value).max()
    }

    /// Whether the values are in non-decreasing order.
    #[must_use]
    pub fn is_ordered(&self) -> bool {
        self.elements.windows(2).all(|w| w[0].value <= w[1].value)
    }
}

impl Index<usize> for Snapshot {
    type Output = Element;

    fn index(&self, index: usize) -> &Element {
        &self.elements[index]
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a Element;
    type IntoIter = std::slice::Iter<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_values_marks_everything_unsorted_and_resting() {
        let snap = Snapshot::from_values(&[4, 1, 9]);
        assert_eq!(snap.len(), 3);
        for (i, e) in snap.iter().enumerate() {
            assert_eq!(e.status, Status::Unsorted);
            assert_eq!(e.lift, 0);
            assert_eq!(e.origin, i);
        }
        assert_eq!(snap.values(), vec![4, 1, 9]);
    }

    #[test]
    fn with_keeps_value_and_origin() {
        let e = Element::new(7, 3).with(Status::Sorting, LIFT_HEIGHT);
        assert_eq!(e.value, 7);
        assert_eq!(e.origin, 3);
        assert!(e.is_lifted());
    }

    #[test]
    fn is_ordered_accepts_duplicates() {
        assert!(Snapshot::from_values(&[1, 2, 2, 5]).is_ordered());
        assert!(!Snapshot::from_values(&[2, 1]).is_ordered());
        assert!(Snapshot::from_values(&[]).is_ordered());
    }

    #[test]
    fn max_value_of_empty_is_none() {
        assert_eq!(Snapshot::default().max_value(), None);
        assert_eq!(Snapshot::from_values(&[3, 8, 1]).max_value(), Some(8));
    }

    #[test]
    fn status_labels() {
        assert_eq!(Status::Comparing.to_string(), "comparing");
        assert_eq!(Status::default(), Status::Unsorted);
    }
}
