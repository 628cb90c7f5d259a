//! Fluent builder for constructing a `PersonStore`.
//!
//! # Usage
//!
//! ```rust
//! use epi_agent::PopulationBuilder;
//! use epi_core::SimRng;
//!
//! let mut rng = SimRng::new(42);
//! let store = PopulationBuilder::new(1_000).build(&mut rng);
//!
//! assert_eq!(store.count, 1_000);
//! ```

use std::ops::Range;

use epi_core::SimRng;

use crate::PersonStore;

/// Default per-agent speed range, in field units per tick.
const DEFAULT_SPEED_RANGE: Range<f32> = 2.0..5.0;

/// Fluent builder for [`PersonStore`].
///
/// All arrays are allocated up front; the only stochastic part of
/// construction is the per-agent speed sample, drawn from the shared
/// [`SimRng`] in ascending agent order so population builds are reproducible.
pub struct PopulationBuilder {
    count: usize,
    speed_range: Range<f32>,
}

impl PopulationBuilder {
    /// Create a builder for `count` agents.
    pub fn new(count: usize) -> Self {
        Self {
            count,
            speed_range: DEFAULT_SPEED_RANGE,
        }
    }

    /// Override the speed sampling range (default `2.0..5.0`).
    pub fn speed_range(mut self, range: Range<f32>) -> Self {
        self.speed_range = range;
        self
    }

    /// Construct the store.  Every agent starts healthy, heading unset, with
    /// a speed sampled uniformly from the configured range.
    pub fn build(self, rng: &mut SimRng) -> PersonStore {
        let mut store = PersonStore::new(self.count);
        for speed in store.speed.iter_mut() {
            *speed = rng.gen_range(self.speed_range.clone());
        }
        store
    }
}
