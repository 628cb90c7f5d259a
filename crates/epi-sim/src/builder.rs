//! Fluent builder for constructing a [`Sim`].

use std::ops::Range;

use epi_agent::PopulationBuilder;
use epi_core::{AgentId, SimConfig, SimRng};
use epi_disease::Disease;
use epi_space::ContactField;

use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim<F>`].
///
/// # Required inputs
///
/// - [`SimConfig`] — population size, seed, day length, day cap
/// - [`Disease`] — the validated parameter bundle
/// - `F: ContactField` — the spatial strategy (grid or continuous surface)
///
/// # Optional inputs (have defaults)
///
/// | Method           | Default                                   |
/// |------------------|-------------------------------------------|
/// | `.positions(v)`  | Random scatter across the field           |
/// | `.speed_range(r)`| `2.0..5.0` field units per tick           |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, disease, GridField::new(50, 50)?)
///     .build()?;
/// sim.run(&mut NoopObserver);
/// ```
///
/// `build` performs the initial seeding: the first
/// `floor(initial_rate * population)` agents by index start infected,
/// deterministically and independent of the RNG seed.
pub struct SimBuilder<F: ContactField> {
    config: SimConfig,
    disease: Disease,
    field: F,
    positions: Option<Vec<F::Pos>>,
    speed_range: Option<Range<f32>>,
}

impl<F: ContactField> SimBuilder<F> {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, disease: Disease, field: F) -> Self {
        Self {
            config,
            disease,
            field,
            positions: None,
            speed_range: None,
        }
    }

    /// Supply an explicit starting position per agent (must be length
    /// `population`).  If not called, agents scatter randomly.
    pub fn positions(mut self, positions: Vec<F::Pos>) -> Self {
        self.positions = Some(positions);
        self
    }

    /// Override the agent speed sampling range.
    pub fn speed_range(mut self, range: Range<f32>) -> Self {
        self.speed_range = Some(range);
        self
    }

    /// Validate inputs, build and seed the population, place every agent,
    /// and return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<F>> {
        self.config.validate()?;
        let population = self.config.population;

        // RNG draw order is fixed: speeds first, then (optionally) the
        // scatter.  Explicit positions draw nothing, which is why seeding
        // below must not touch the RNG either way.
        let mut rng = SimRng::new(self.config.seed);

        let mut builder = PopulationBuilder::new(population);
        if let Some(range) = self.speed_range {
            builder = builder.speed_range(range);
        }
        let mut store = builder.build(&mut rng);

        // Deterministic initial seeding, by index, no randomness.
        for i in 0..population as u32 {
            self.disease.seed(&mut store, AgentId(i));
        }

        let mut field = self.field;
        match self.positions {
            Some(positions) => {
                if positions.len() != population {
                    return Err(SimError::PopulationMismatch {
                        expected: population,
                        got: positions.len(),
                        what: "initial positions",
                    });
                }
                field.place_all(&positions);
            }
            None => field.scatter(population, &mut rng),
        }

        Ok(Sim::new(self.config, store, field, self.disease, rng))
    }
}
