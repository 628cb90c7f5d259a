//! The `Disease` value object and its transition operations.

use epi_agent::PersonStore;
use epi_core::{AgentId, DiseaseId, EpiError, EpiResult, SimRng};

/// Immutable disease parameters plus the transition rules that apply them.
///
/// Constructed once per run via [`Disease::new`], which rejects out-of-range
/// parameters immediately — no deferred validation.  Never mutated afterwards.
///
/// Dead agents are terminal: every operation here is a no-op for them, so a
/// dead agent's `infected`/`days_infected` stay frozen at their at-death
/// values forever.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Disease {
    id: DiseaseId,
    initial_rate: f64,
    duration_ticks: u32,
    death_probability: f64,
    transmission_probability: f64,
}

impl Disease {
    /// Validate and build a parameter bundle.
    ///
    /// # Errors
    ///
    /// `EpiError::Config` when any rate/probability falls outside `[0, 1]` or
    /// `duration_ticks` is zero.
    pub fn new(
        id: DiseaseId,
        initial_rate: f64,
        duration_ticks: u32,
        death_probability: f64,
        transmission_probability: f64,
    ) -> EpiResult<Self> {
        if !(0.0..=1.0).contains(&initial_rate) {
            return Err(EpiError::Config(format!(
                "initial_rate {initial_rate} must be in [0, 1]"
            )));
        }
        if duration_ticks == 0 {
            return Err(EpiError::Config("duration_ticks must be >= 1".into()));
        }
        if !(0.0..=1.0).contains(&death_probability) {
            return Err(EpiError::Config(format!(
                "death_probability {death_probability} must be in [0, 1]"
            )));
        }
        if !(0.0..=1.0).contains(&transmission_probability) {
            return Err(EpiError::Config(format!(
                "transmission_probability {transmission_probability} must be in [0, 1]"
            )));
        }
        Ok(Self {
            id,
            initial_rate,
            duration_ticks,
            death_probability,
            transmission_probability,
        })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> DiseaseId {
        self.id
    }

    #[inline]
    pub fn initial_rate(&self) -> f64 {
        self.initial_rate
    }

    #[inline]
    pub fn duration_ticks(&self) -> u32 {
        self.duration_ticks
    }

    #[inline]
    pub fn death_probability(&self) -> f64 {
        self.death_probability
    }

    #[inline]
    pub fn transmission_probability(&self) -> f64 {
        self.transmission_probability
    }

    // ── Initial seeding ───────────────────────────────────────────────────

    /// How many agents the initial seeding infects in a population of
    /// `population`: exactly `floor(initial_rate * population)`.
    #[inline]
    pub fn initial_case_count(&self, population: usize) -> usize {
        (self.initial_rate * population as f64).floor() as usize
    }

    /// Deterministic seeding predicate: the first `initial_case_count`
    /// agents by index start the run infected.  Draws no randomness, so the
    /// seeded set is identical across RNG seeds.
    #[inline]
    pub fn seeded_initially(&self, index: usize, population: usize) -> bool {
        index < self.initial_case_count(population)
    }

    /// Apply the initial seeding to one agent.  Returns `true` if it was
    /// seeded.
    pub fn seed(&self, store: &mut PersonStore, agent: AgentId) -> bool {
        if self.seeded_initially(agent.index(), store.count) {
            store.infect(agent, self.id);
            true
        } else {
            false
        }
    }

    // ── Per-tick transitions ──────────────────────────────────────────────

    /// Contact transmission roll for one currently healthy agent.
    ///
    /// Infects with probability `transmission_probability`; on success the
    /// agent's day counter starts at 1 and the disease id is appended to its
    /// exposure history.  No-op (and no RNG draw) for agents that are already
    /// infected or dead — the caller decides contact eligibility, this
    /// decides the coin flip.
    pub fn try_transmit(&self, store: &mut PersonStore, agent: AgentId, rng: &mut SimRng) -> bool {
        let i = agent.index();
        if store.dead[i] || store.infected[i] {
            return false;
        }
        if rng.gen_bool(self.transmission_probability) {
            store.infect(agent, self.id);
            true
        } else {
            false
        }
    }

    /// Advance one agent's infection by a day.
    ///
    /// - `days_infected == duration_ticks` → the agent recovers (healthy,
    ///   day counter reset); returns `true`.
    /// - `days_infected == 0` (never infected, or already recovered) → no-op.
    /// - otherwise → the counter increments by exactly one.
    ///
    /// Dead agents are untouched.
    pub fn progress_day(&self, store: &mut PersonStore, agent: AgentId) -> bool {
        let i = agent.index();
        if store.dead[i] {
            return false;
        }
        if store.days_infected[i] == self.duration_ticks {
            store.disinfect(agent);
            true
        } else {
            if store.days_infected[i] != 0 {
                store.add_day(agent);
            }
            false
        }
    }

    /// Death roll for one agent.  Only infected, non-dead agents are at
    /// risk; returns `true` if the agent died this tick.
    pub fn check_death(&self, store: &mut PersonStore, agent: AgentId, rng: &mut SimRng) -> bool {
        let i = agent.index();
        if store.dead[i] || !store.infected[i] {
            return false;
        }
        if rng.gen_bool(self.death_probability) {
            store.kill(agent);
            true
        } else {
            false
        }
    }
}
