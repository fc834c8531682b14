#![forbid(unsafe_code)]

//! Random value source for new arrays.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Smallest value drawn for a new array.
pub const MIN_VALUE: i64 = 1;
/// Largest value drawn for a new array.
pub const MAX_VALUE: i64 = 100;

/// Produces the values of freshly generated arrays.
pub trait ValueSource {
    /// A uniform integer in `[MIN_VALUE, MAX_VALUE]`.
    fn next_value(&mut self) -> i64;

    /// Draw `len` values.
    fn draw(&mut self, len: usize) -> Vec<i64> {
        (0..len).map(|_| self.next_value()).collect()
    }
}

/// [`ValueSource`] backed by a small, fast PRNG.
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: SmallRng,
}

impl RandomSource {
    /// Seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
        }
    }

    /// Reproducible sequence for a given seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl ValueSource for RandomSource {
    fn next_value(&mut self) -> i64 {
        self.rng.random_range(MIN_VALUE..=MAX_VALUE)
    }
}

impl<S: ValueSource + ?Sized> ValueSource for Box<S> {
    fn next_value(&mut self) -> i64 {
        (**self).next_value()
    }
}
