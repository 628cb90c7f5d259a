//! The `Sim` struct and its tick loop.

use serde::{Deserialize, Serialize};

use epi_agent::PersonStore;
use epi_core::{AgentId, SimClock, SimConfig, SimRng};
use epi_disease::Disease;
use epi_space::{ContactField, ContactPair};

use crate::observer::AgentFrame;
use crate::{DayRecord, DayTally, SimObserver};

/// The main simulation runner.
///
/// `Sim<F>` holds all run state — population, disease, spatial field, the
/// single shared RNG, and the day-report accumulator — and drives the
/// eight-step tick sequence documented on the [crate root](crate).  The
/// spatial strategy `F` is the only varying part; disease rules and
/// reporting are identical for every field.
///
/// Execution is strictly sequential: within each step agents are processed
/// in ascending `AgentId`, so a run is a pure function of its config.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
#[derive(Serialize, Deserialize)]
pub struct Sim<F: ContactField> {
    /// Global configuration (population, seed, day length, day cap).
    pub config: SimConfig,

    /// Simulation clock — current tick and day bookkeeping.
    pub clock: SimClock,

    /// Per-agent health and movement attributes (SoA arrays).
    pub store: PersonStore,

    /// The spatial contact strategy.  Owns all agent placements.
    pub field: F,

    /// The disease parameter bundle, immutable for the whole run.
    pub disease: Disease,

    /// The run's single shared random source.
    pub rng: SimRng,

    tally: DayTally,
    records: Vec<DayRecord>,
    finished: bool,

    // Per-tick scratch buffers, rebuilt from scratch every tick.
    #[serde(skip)]
    was_infectious: Vec<bool>,
    #[serde(skip)]
    contacts: Vec<ContactPair>,
    #[serde(skip)]
    frame: Vec<AgentFrame>,
}

impl<F: ContactField> Sim<F> {
    /// Package-private constructor used by `SimBuilder`.
    pub(crate) fn new(
        config: SimConfig,
        store: PersonStore,
        field: F,
        disease: Disease,
        rng: SimRng,
    ) -> Self {
        Self {
            clock: config.make_clock(),
            config,
            store,
            field,
            disease,
            rng,
            tally: DayTally::default(),
            records: Vec::new(),
            finished: false,
            was_infectious: Vec::new(),
            contacts: Vec::new(),
            frame: Vec::new(),
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// The ordered per-day records produced so far.
    pub fn records(&self) -> &[DayRecord] {
        &self.records
    }

    /// `true` once the run has ended (no infection left, or day cap hit).
    pub fn finished(&self) -> bool {
        self.finished
    }

    /// Run from the current tick until no agent remains infected or the
    /// `max_days` cap is reached, then fire `on_sim_end` with the full record
    /// sequence.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) {
        while !self.finished {
            self.process_tick(observer);
        }
        observer.on_sim_end(&self.records);
    }

    /// Run at most `n` ticks from the current position.  Useful for tests,
    /// incremental embedding, and frame-paced presentation layers.  Does not
    /// fire `on_sim_end`.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            if self.finished {
                break;
            }
            self.process_tick(observer);
        }
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn process_tick<O: SimObserver>(&mut self, observer: &mut O) {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);

        // ── ① Pre-tick infectious snapshot ────────────────────────────────
        //
        // Transmission eligibility is judged against the state the tick
        // began with: an agent recovering in ② still transmits today, and is
        // not re-infected today.
        self.was_infectious.clear();
        self.was_infectious.extend(
            (0..self.store.count).map(|i| self.store.infected[i] && !self.store.dead[i]),
        );

        // ── ② Disease progression ─────────────────────────────────────────
        for i in 0..self.store.count as u32 {
            if self.disease.progress_day(&mut self.store, AgentId(i)) {
                self.tally.recoveries += 1;
            }
        }

        // ── ③ Movement ────────────────────────────────────────────────────
        //
        // Dead agents are frozen in place; the field never sees them.
        for i in 0..self.store.count as u32 {
            let agent = AgentId(i);
            if !self.store.dead[agent.index()] {
                self.field.step(agent, &mut self.store, &mut self.rng);
            }
        }

        // ── ④ Contact resolution ──────────────────────────────────────────
        let mut contacts = std::mem::take(&mut self.contacts);
        self.field.collect_contacts(&mut contacts);

        // ── ⑤ Transmission ────────────────────────────────────────────────
        //
        // Every pair direction is an independent roll; an agent with several
        // infectious contacts faces several chances this tick.
        for pair in &contacts {
            self.evaluate_transmission(pair.a, pair.b);
            self.evaluate_transmission(pair.b, pair.a);
        }
        self.contacts = contacts;

        // ── ⑥ Death check ─────────────────────────────────────────────────
        for i in 0..self.store.count as u32 {
            if self.disease.check_death(&mut self.store, AgentId(i), &mut self.rng) {
                self.tally.deaths += 1;
            }
        }

        // ── ⑦ Census, render frame, day close ─────────────────────────────
        let census = self.store.census();
        assert_eq!(
            census.total(),
            self.config.population,
            "census no longer sums to the population at {now}"
        );

        self.build_frame();
        observer.on_frame(now, &self.frame);
        observer.on_tick_end(now, &census);

        let mut day_closed = false;
        if self.clock.is_day_end() {
            let record = self.tally.close(self.clock.day(), census.infected);
            observer.on_day_end(&record);
            self.records.push(record);
            day_closed = true;
        }

        // ── ⑧ Termination ─────────────────────────────────────────────────
        if census.infected == 0 {
            // An epidemic that burns out mid-day still closes its final
            // (partial) day so event totals stay conserved in the export.
            if !day_closed {
                let record = self.tally.close(self.clock.day(), census.infected);
                observer.on_day_end(&record);
                self.records.push(record);
            }
            self.finished = true;
        }

        self.clock.advance();
        if self.clock.current_tick >= self.config.end_tick() {
            self.finished = true;
        }
    }

    /// One direction of one contact pair: `source` → `target`.
    fn evaluate_transmission(&mut self, source: AgentId, target: AgentId) {
        if !self.was_infectious[source.index()] || self.was_infectious[target.index()] {
            return;
        }
        if self.disease.try_transmit(&mut self.store, target, &mut self.rng) {
            self.tally.new_infections += 1;
        }
    }

    /// Rebuild the render frame for the current tick.
    fn build_frame(&mut self) {
        let store = &self.store;
        let field = &self.field;
        self.frame.clear();
        self.frame.extend(store.agent_ids().map(|agent| AgentFrame {
            position: field.position(agent),
            class: store.class_of(agent),
        }));
    }
}
