//! Core person storage: `PersonStore` (SoA data) plus the derived health
//! classification and per-tick census.
//!
//! Every `Vec` field has exactly `count` elements; the `AgentId` value is the
//! index into all of them:
//!
//! ```ignore
//! let sick = store.infected[agent.index()];  // O(1), cache-friendly
//! ```
//!
//! The mutators here are dumb — they flip fields and nothing else.  Which
//! transitions are *legal* on a given tick (dead agents are frozen, recovery
//! precedes the death check, …) is the disease layer's business; the store
//! carries no policy.

use epi_core::{AgentId, DiseaseId, Heading};

// ── HealthClass ───────────────────────────────────────────────────────────────

/// Derived health classification of one agent.
///
/// Precedence: dead > infected > recovered > susceptible.  `Recovered` is
/// bookkeeping for the reporting layer — a recovered agent is epidemiologically
/// a susceptible one again.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum HealthClass {
    Susceptible,
    Infected,
    Recovered,
    Dead,
}

impl std::fmt::Display for HealthClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HealthClass::Susceptible => "susceptible",
            HealthClass::Infected => "infected",
            HealthClass::Recovered => "recovered",
            HealthClass::Dead => "dead",
        };
        f.write_str(s)
    }
}

// ── Census ────────────────────────────────────────────────────────────────────

/// Population counts by [`HealthClass`] at one instant.
///
/// Invariant: the four buckets always sum to the population size — agents are
/// never created or destroyed mid-run, only reclassified.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct Census {
    pub susceptible: usize,
    pub infected: usize,
    pub recovered: usize,
    pub dead: usize,
}

impl Census {
    /// Sum of all four buckets.
    #[inline]
    pub fn total(&self) -> usize {
        self.susceptible + self.infected + self.recovered + self.dead
    }
}

// ── PersonStore ───────────────────────────────────────────────────────────────

/// Structure-of-Arrays storage for all person state.
///
/// Positions are *not* stored here — the spatial field owns the authoritative
/// placement of every agent (see `epi-space`), the same split the store keeps
/// from movement state.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PersonStore {
    /// Number of agents.  Equals the length of every SoA `Vec`.
    pub count: usize,

    // ── Infection state ───────────────────────────────────────────────────
    /// `true` while the agent carries an active infection.
    pub infected: Vec<bool>,

    /// One-way death flag.  A dead agent's other fields are frozen.
    pub dead: Vec<bool>,

    /// Days (ticks) the current infection has lasted; 0 when healthy.
    pub days_infected: Vec<u32>,

    /// `true` once the agent has ever been infected — distinguishes
    /// `Recovered` from `Susceptible` in the census.
    pub ever_infected: Vec<bool>,

    /// Ordered history of diseases the agent was exposed to.
    pub exposures: Vec<Vec<DiseaseId>>,

    // ── Movement attributes ───────────────────────────────────────────────
    /// Per-agent movement speed, sampled once at build time.
    pub speed: Vec<f32>,

    /// Current compass heading; `None` until the first movement decision.
    /// The grid strategy ignores this.
    pub heading: Vec<Option<Heading>>,
}

impl PersonStore {
    /// A store of `count` healthy, stationary agents.  Speeds default to 1.0;
    /// [`PopulationBuilder`][crate::PopulationBuilder] samples real ones.
    pub fn new(count: usize) -> Self {
        Self {
            count,
            infected: vec![false; count],
            dead: vec![false; count],
            days_infected: vec![0; count],
            ever_infected: vec![false; count],
            exposures: vec![Vec::new(); count],
            speed: vec![1.0; count],
            heading: vec![None; count],
        }
    }

    /// Iterator over all `AgentId`s in ascending index order — the canonical
    /// iteration order everywhere in the simulator.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.count as u32).map(AgentId)
    }

    // ── Mutators ──────────────────────────────────────────────────────────

    /// Mark the agent infected by `disease` and start its day counter.
    pub fn infect(&mut self, agent: AgentId, disease: DiseaseId) {
        let i = agent.index();
        self.infected[i] = true;
        self.days_infected[i] += 1;
        self.ever_infected[i] = true;
        self.exposures[i].push(disease);
    }

    /// Return the agent to health.  Harmless when already healthy — the day
    /// counter is simply re-zeroed.
    pub fn disinfect(&mut self, agent: AgentId) {
        let i = agent.index();
        self.infected[i] = false;
        self.days_infected[i] = 0;
    }

    /// One-way death flag.  Other fields are left exactly as they were —
    /// callers stop touching a dead agent rather than the store scrubbing it.
    pub fn kill(&mut self, agent: AgentId) {
        self.dead[agent.index()] = true;
    }

    /// Advance the agent's infection by one day.
    pub fn add_day(&mut self, agent: AgentId) {
        self.days_infected[agent.index()] += 1;
    }

    // ── Derived state ─────────────────────────────────────────────────────

    /// Health classification of one agent.
    pub fn class_of(&self, agent: AgentId) -> HealthClass {
        let i = agent.index();
        if self.dead[i] {
            HealthClass::Dead
        } else if self.infected[i] {
            HealthClass::Infected
        } else if self.ever_infected[i] {
            HealthClass::Recovered
        } else {
            HealthClass::Susceptible
        }
    }

    /// Count the population by health class.  O(count).
    pub fn census(&self) -> Census {
        let mut census = Census::default();
        for agent in self.agent_ids() {
            match self.class_of(agent) {
                HealthClass::Susceptible => census.susceptible += 1,
                HealthClass::Infected => census.infected += 1,
                HealthClass::Recovered => census.recovered += 1,
                HealthClass::Dead => census.dead += 1,
            }
        }
        census
    }
}
