//! The `ContactField` trait — the seam between the tick loop and space.

use std::fmt;

use epi_agent::PersonStore;
use epi_core::{AgentId, Point, SimRng};

/// Two agents eligible for a transmission evaluation this tick.
///
/// A pair is symmetric: the tick loop evaluates both directions.  Pairs carry
/// no health information — fields report geometry, the disease layer decides
/// what it means.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct ContactPair {
    pub a: AgentId,
    pub b: AgentId,
}

/// Pluggable spatial strategy.
///
/// A field owns every agent's placement and answers two questions each tick:
/// where did each agent move to, and which agents are now in contact.  All
/// stochastic choices draw from the shared [`SimRng`] passed in, never from
/// internal state, so a run replays identically from its seed.
///
/// # Determinism contract
///
/// Implementations must produce contact pairs in an order that is a pure
/// function of current placements — never of container iteration history —
/// so that a checkpointed run resumes bit-for-bit.
pub trait ContactField {
    /// Placement coordinate type (`Cell` for the grid, `Point` for the
    /// continuous surface).
    type Pos: Copy + fmt::Debug;

    /// Number of agents currently placed.
    fn agent_count(&self) -> usize;

    /// Place `count` agents at field-chosen random starting positions.
    fn scatter(&mut self, count: usize, rng: &mut SimRng);

    /// Place agents at explicit positions (one per agent, by index).
    ///
    /// # Panics
    ///
    /// Panics if any position is outside the field bounds — explicit
    /// placement with invalid coordinates is a caller bug.
    fn place_all(&mut self, positions: &[Self::Pos]);

    /// Move one agent according to the field's movement rule.  The tick loop
    /// never calls this for dead agents.
    fn step(&mut self, agent: AgentId, store: &mut PersonStore, rng: &mut SimRng);

    /// Collect this tick's contact pairs into `out` (cleared first).
    fn collect_contacts(&self, out: &mut Vec<ContactPair>);

    /// Continuous render coordinate of one agent.
    fn position(&self, agent: AgentId) -> Point;
}
