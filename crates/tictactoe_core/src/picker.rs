//! Move selection for the automatic opponent.
//!
//! The opponent never decides on its own: it asks a [`MovePicker`] for an
//! index into the list of available cells. Production code uses
//! [`RandomPicker`]; tests and replays use [`SequencePicker`].

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};
use tracing::instrument;

/// Chooses one of `choices` candidates.
pub trait MovePicker {
    /// Returns an index in `0..choices`. Never called with `choices == 0`.
    fn pick(&mut self, choices: usize) -> usize;
}

impl<P: MovePicker + ?Sized> MovePicker for &mut P {
    fn pick(&mut self, choices: usize) -> usize {
        (**self).pick(choices)
    }
}

impl<P: MovePicker + ?Sized> MovePicker for Box<P> {
    fn pick(&mut self, choices: usize) -> usize {
        (**self).pick(choices)
    }
}

/// Uniformly random picker over any [`Rng`].
#[derive(Debug, Clone)]
pub struct RandomPicker<R> {
    rng: R,
}

impl<R: Rng> RandomPicker<R> {
    /// Wraps an existing generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomPicker<ThreadRng> {
    /// Picker backed by the thread-local generator.
    pub fn thread() -> Self {
        Self::new(rand::rng())
    }
}

impl RandomPicker<StdRng> {
    /// Reproducible picker for a fixed seed.
    #[instrument]
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// `Send` picker seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> MovePicker for RandomPicker<R> {
    fn pick(&mut self, choices: usize) -> usize {
        self.rng.random_range(0..choices)
    }
}

/// Replays a fixed list of indices, cycling when exhausted.
///
/// Each index is reduced modulo the number of choices, so a sequence
/// written for a fresh board stays valid as the board fills.
#[derive(Debug, Clone)]
pub struct SequencePicker {
    indices: Vec<usize>,
    cursor: usize,
}

impl SequencePicker {
    /// Creates a picker replaying `indices`. An empty list always picks 0.
    pub fn new(indices: impl Into<Vec<usize>>) -> Self {
        Self {
            indices: indices.into(),
            cursor: 0,
        }
    }

    /// Picker that always takes the first available cell.
    pub fn first() -> Self {
        Self::new(Vec::new())
    }
}

impl MovePicker for SequencePicker {
    fn pick(&mut self, choices: usize) -> usize {
        if self.indices.is_empty() {
            return 0;
        }
        let index = self.indices[self.cursor % self.indices.len()];
        self.cursor += 1;
        index % choices
    }
}
