//! Integration tests for epi-sim.

use epi_agent::{Census, PersonStore};
use epi_core::{AgentId, Cell, DiseaseId, Point, SimConfig, SimRng, Tick};
use epi_disease::Disease;
use epi_space::{ContactField, ContactPair, GridField, OpenField};

use crate::{AgentFrame, DayRecord, NoopObserver, SimBuilder, SimError, SimObserver};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn config(population: usize, ticks_per_day: u32, max_days: u64, seed: u64) -> SimConfig {
    SimConfig {
        population,
        seed,
        ticks_per_day,
        max_days,
    }
}

fn disease(initial_rate: f64, duration: u32, death: f64, transmission: f64) -> Disease {
    Disease::new(DiseaseId(0), initial_rate, duration, death, transmission).unwrap()
}

fn grid(width: u32, height: u32) -> GridField {
    GridField::new(width, height).unwrap()
}

/// Test strategy: agents never move and every pair is permanently in
/// contact.  Gives the tick-order tests exact control over who meets whom.
struct PinnedField {
    positions: Vec<Point>,
}

impl PinnedField {
    fn new() -> Self {
        Self { positions: Vec::new() }
    }
}

impl ContactField for PinnedField {
    type Pos = Point;

    fn agent_count(&self) -> usize {
        self.positions.len()
    }

    fn scatter(&mut self, count: usize, _rng: &mut SimRng) {
        self.positions = vec![Point::new(0.0, 0.0); count];
    }

    fn place_all(&mut self, positions: &[Point]) {
        self.positions = positions.to_vec();
    }

    fn step(&mut self, _agent: AgentId, _store: &mut PersonStore, _rng: &mut SimRng) {}

    fn collect_contacts(&self, out: &mut Vec<ContactPair>) {
        out.clear();
        let n = self.positions.len();
        for i in 0..n {
            for j in (i + 1)..n {
                out.push(ContactPair {
                    a: AgentId(i as u32),
                    b: AgentId(j as u32),
                });
            }
        }
    }

    fn position(&self, agent: AgentId) -> Point {
        self.positions[agent.index()]
    }
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_with_random_scatter() {
        let sim = SimBuilder::new(config(20, 1, 10, 42), disease(0.0, 5, 0.0, 0.1), grid(10, 10))
            .build()
            .unwrap();
        assert_eq!(sim.store.count, 20);
        assert_eq!(sim.field.agent_count(), 20);
        assert_eq!(sim.clock.current_tick, Tick(0));
    }

    #[test]
    fn position_count_mismatch_errors() {
        let result = SimBuilder::new(config(3, 1, 10, 42), disease(0.0, 5, 0.0, 0.1), grid(10, 10))
            .positions(vec![Cell::new(0, 0); 2]) // wrong length
            .build();
        assert!(matches!(
            result,
            Err(SimError::PopulationMismatch { expected: 3, got: 2, .. })
        ));
    }

    #[test]
    fn zero_population_errors() {
        let result = SimBuilder::new(config(0, 1, 10, 42), disease(0.0, 5, 0.0, 0.1), grid(10, 10))
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn seeding_infects_first_agents_regardless_of_seed() {
        for seed in [1u64, 999, 123_456] {
            let sim = SimBuilder::new(
                config(10, 1, 10, seed),
                disease(0.3, 5, 0.0, 0.1),
                grid(10, 10),
            )
            .build()
            .unwrap();
            assert!(sim.store.infected[..3].iter().all(|&i| i), "seed {seed}");
            assert!(sim.store.infected[3..].iter().all(|&i| !i), "seed {seed}");
            assert!(sim.store.days_infected[..3].iter().all(|&d| d == 1));
        }
    }

    #[test]
    fn explicit_positions_are_used() {
        let sim = SimBuilder::new(config(2, 1, 10, 42), disease(0.0, 5, 0.0, 0.1), grid(10, 10))
            .positions(vec![Cell::new(1, 2), Cell::new(8, 9)])
            .build()
            .unwrap();
        assert_eq!(sim.field.cell_of(AgentId(0)), Cell::new(1, 2));
        assert_eq!(sim.field.cell_of(AgentId(1)), Cell::new(8, 9));
    }
}

// ── Basic runs ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    #[test]
    fn run_without_infection_ends_after_one_tick() {
        let mut sim =
            SimBuilder::new(config(5, 1, 10, 42), disease(0.0, 5, 0.0, 0.5), grid(10, 10))
                .build()
                .unwrap();
        sim.run(&mut NoopObserver);
        assert!(sim.finished());
        assert_eq!(sim.clock.current_tick, Tick(1));
        assert_eq!(sim.records().len(), 1);
        assert_eq!(sim.records()[0].active_infections, 0);
    }

    #[test]
    fn day_cap_bounds_an_endless_epidemic() {
        // One seeded agent that never recovers, never dies, never transmits.
        let mut sim = SimBuilder::new(
            config(5, 1, 7, 42),
            disease(0.2, 10_000, 0.0, 0.0),
            grid(10, 10),
        )
        .build()
        .unwrap();
        sim.run(&mut NoopObserver);
        assert!(sim.finished());
        assert_eq!(sim.records().len(), 7);
        assert!(sim.records().iter().all(|r| r.active_infections == 1));
    }

    #[test]
    fn run_ticks_steps_incrementally() {
        let mut sim = SimBuilder::new(
            config(5, 1, 100, 42),
            disease(0.2, 10_000, 0.0, 0.0),
            grid(10, 10),
        )
        .build()
        .unwrap();
        sim.run_ticks(5, &mut NoopObserver);
        assert_eq!(sim.clock.current_tick, Tick(5));
        sim.run_ticks(3, &mut NoopObserver);
        assert_eq!(sim.clock.current_tick, Tick(8));
        assert!(!sim.finished());
    }

    /// Observer that checks conservation at every tick.
    struct ConservationCheck {
        population: usize,
        ticks_seen: usize,
    }
    impl SimObserver for ConservationCheck {
        fn on_tick_end(&mut self, tick: Tick, census: &Census) {
            assert_eq!(census.total(), self.population, "at {tick}");
            self.ticks_seen += 1;
        }
    }

    #[test]
    fn census_sums_to_population_every_tick() {
        let mut sim = SimBuilder::new(
            config(100, 1, 30, 7),
            disease(0.05, 3, 0.2, 0.8),
            grid(20, 20),
        )
        .build()
        .unwrap();
        let mut check = ConservationCheck { population: 100, ticks_seen: 0 };
        sim.run(&mut check);
        assert!(check.ticks_seen >= 1);
    }

    #[test]
    fn identical_configs_replay_identically() {
        let run = || {
            let mut sim = SimBuilder::new(
                config(60, 1, 40, 2024),
                disease(0.1, 4, 0.05, 0.7),
                grid(12, 12),
            )
            .build()
            .unwrap();
            sim.run(&mut NoopObserver);
            sim
        };
        let a = run();
        let b = run();
        assert_eq!(a.records(), b.records());
        assert_eq!(a.store.infected, b.store.infected);
        assert_eq!(a.store.days_infected, b.store.days_infected);
        assert_eq!(a.store.dead, b.store.dead);
    }

    #[test]
    fn event_totals_reconcile_with_final_state() {
        let mut sim = SimBuilder::new(
            config(80, 1, 60, 11),
            disease(0.1, 3, 0.1, 0.9),
            grid(10, 10),
        )
        .build()
        .unwrap();
        sim.run(&mut NoopObserver);

        let records = sim.records();
        let total_infections: u64 = records.iter().map(|r| r.new_infections).sum();
        let total_deaths: u64 = records.iter().map(|r| r.deaths).sum();

        let seeds = sim.disease.initial_case_count(80) as u64;
        let total_exposures: u64 = sim.store.exposures.iter().map(|e| e.len() as u64).sum();
        assert_eq!(seeds + total_infections, total_exposures);

        let census = sim.store.census();
        assert_eq!(total_deaths, census.dead as u64);
    }
}

// ── Tick ordering semantics ───────────────────────────────────────────────────

#[cfg(test)]
mod tick_order_tests {
    use super::*;

    #[test]
    fn same_tick_recovery_still_transmits() {
        // Agent 0 is seeded with a 1-day disease; agent 1 is healthy and in
        // guaranteed contact.  On the first tick agent 0 recovers (step ②)
        // yet still infects agent 1 (step ⑤ judges the pre-tick snapshot),
        // and is not re-infected itself that tick.
        let mut sim = SimBuilder::new(
            config(2, 1, 10, 42),
            disease(0.5, 1, 0.0, 1.0),
            PinnedField::new(),
        )
        .build()
        .unwrap();

        sim.run_ticks(1, &mut NoopObserver);

        assert!(!sim.store.infected[0], "agent 0 should have recovered");
        assert_eq!(sim.store.days_infected[0], 0);
        assert!(sim.store.ever_infected[0]);

        assert!(sim.store.infected[1], "agent 1 should have caught it");
        assert_eq!(sim.store.days_infected[1], 1);

        let record = sim.records()[0];
        assert_eq!(record.recoveries, 1);
        assert_eq!(record.new_infections, 1);
        assert_eq!(record.active_infections, 1);
    }

    #[test]
    fn recovered_regains_susceptibility_on_later_ticks() {
        // Continuing the scenario above: on tick 2 agent 1 recovers and —
        // from its pre-tick infectious status — re-infects agent 0, whose
        // recovery was a full tick ago.
        let mut sim = SimBuilder::new(
            config(2, 1, 10, 42),
            disease(0.5, 1, 0.0, 1.0),
            PinnedField::new(),
        )
        .build()
        .unwrap();

        sim.run_ticks(2, &mut NoopObserver);

        assert!(sim.store.infected[0], "agent 0 re-infected on tick 2");
        assert!(!sim.store.infected[1], "agent 1 recovered on tick 2");
        assert_eq!(sim.store.exposures[0].len(), 2);
    }

    #[test]
    fn recovery_preempts_death_on_the_same_tick() {
        // duration 1 and certain death: progression (step ②) runs before the
        // death check (step ⑥), so the agent recovers and never rolls.
        let mut sim = SimBuilder::new(
            config(1, 1, 10, 42),
            disease(1.0, 1, 1.0, 0.0),
            PinnedField::new(),
        )
        .build()
        .unwrap();

        sim.run(&mut NoopObserver);

        assert!(!sim.store.dead[0], "recovered agent must not roll for death");
        assert!(!sim.store.infected[0]);
        assert!(sim.store.ever_infected[0]);
        assert!(sim.finished());
        let record = sim.records()[0];
        assert_eq!((record.recoveries, record.deaths), (1, 0));
    }

    #[test]
    fn certain_death_kills_on_the_first_tick() {
        let mut sim = SimBuilder::new(
            config(1, 1, 10, 42),
            disease(1.0, 14, 1.0, 0.0),
            grid(10, 10),
        )
        .positions(vec![Cell::new(5, 5)])
        .build()
        .unwrap();

        sim.run(&mut NoopObserver);

        assert!(sim.store.dead[0]);
        // Progression ran once before death: seeded day 1 → day 2, frozen.
        assert_eq!(sim.store.days_infected[0], 2);
        assert!(sim.store.infected[0], "death freezes state, it does not scrub it");
        assert!(sim.finished(), "no live infection remains");
        assert_eq!(sim.records()[0].deaths, 1);
    }

    #[test]
    fn dead_agents_are_frozen_while_the_epidemic_continues() {
        // Both agents seeded; agent 0 is killed by hand before the first
        // tick.  Across 10 ticks it must neither move, nor progress, nor
        // recover, while agent 1 keeps aging normally.
        let mut sim = SimBuilder::new(
            config(2, 1, 50, 42),
            disease(1.0, 50, 0.0, 0.0),
            grid(10, 10),
        )
        .positions(vec![Cell::new(3, 3), Cell::new(7, 7)])
        .build()
        .unwrap();
        sim.store.kill(AgentId(0));

        sim.run_ticks(10, &mut NoopObserver);

        assert_eq!(sim.field.cell_of(AgentId(0)), Cell::new(3, 3), "dead agent moved");
        assert_eq!(sim.store.days_infected[0], 1, "dead agent progressed");
        assert!(sim.store.infected[0] && sim.store.dead[0]);

        assert_eq!(sim.store.days_infected[1], 11, "live agent should age 1/tick");
        let census = sim.store.census();
        assert_eq!((census.infected, census.dead), (1, 1));
    }

    #[test]
    fn each_contact_is_one_roll_and_infection_is_recorded_once() {
        // Agents 0 and 1 seeded, agent 2 healthy and in contact with both.
        // With certain transmission the first evaluated contact infects it;
        // the second direction must not add a duplicate exposure.
        let mut sim = SimBuilder::new(
            config(3, 1, 10, 42),
            disease(0.67, 10, 0.0, 1.0),
            PinnedField::new(),
        )
        .build()
        .unwrap();
        assert!(sim.store.infected[0] && sim.store.infected[1]);

        sim.run_ticks(1, &mut NoopObserver);

        assert!(sim.store.infected[2]);
        assert_eq!(sim.store.exposures[2].len(), 1);
        assert_eq!(sim.records()[0].new_infections, 1);
    }

    #[test]
    fn zero_transmission_never_spreads() {
        let mut sim = SimBuilder::new(
            config(10, 1, 20, 42),
            disease(0.2, 5, 0.0, 0.0),
            PinnedField::new(),
        )
        .build()
        .unwrap();
        sim.run(&mut NoopObserver);

        let ever: usize = sim.store.ever_infected.iter().filter(|&&e| e).count();
        assert_eq!(ever, 2, "only the seeds were ever infected");
        assert!(sim.records().iter().all(|r| r.new_infections == 0));
        // Seeds carry a 5-day disease: the run burns out on day 5.
        assert_eq!(sim.records().len(), 5);
    }
}

// ── Day aggregation ───────────────────────────────────────────────────────────

#[cfg(test)]
mod day_tests {
    use super::*;

    #[test]
    fn burnout_mid_day_closes_a_partial_record() {
        // 5 ticks per day, but the single seeded 3-tick infection recovers on
        // tick 2 — the run must still emit a day-1 record.
        let mut sim = SimBuilder::new(
            config(2, 5, 10, 42),
            disease(0.5, 3, 0.0, 0.0),
            PinnedField::new(),
        )
        .build()
        .unwrap();
        sim.run(&mut NoopObserver);

        assert_eq!(sim.records().len(), 1);
        let record = sim.records()[0];
        assert_eq!(record.day, 1);
        assert_eq!(record.recoveries, 1);
        assert_eq!(record.active_infections, 0);
    }

    #[test]
    fn records_aggregate_across_the_ticks_of_a_day() {
        // 2 ticks/day, one seed with a 4-tick disease:
        //   day 1 = ticks 0,1 (ages to 3) → still active at close;
        //   day 2 = ticks 2,3 → recovers on tick 3.
        let mut sim = SimBuilder::new(
            config(2, 2, 10, 42),
            disease(0.5, 4, 0.0, 0.0),
            PinnedField::new(),
        )
        .build()
        .unwrap();
        sim.run(&mut NoopObserver);

        assert_eq!(sim.records().len(), 2);
        assert_eq!(sim.records()[0].active_infections, 1);
        assert_eq!(sim.records()[0].recoveries, 0);
        assert_eq!(sim.records()[1].active_infections, 0);
        assert_eq!(sim.records()[1].recoveries, 1);
    }
}

// ── Observer plumbing ─────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        day_records: Vec<DayRecord>,
        final_records: Vec<DayRecord>,
        sim_end_calls: usize,
        last_frame: Vec<AgentFrame>,
    }

    impl SimObserver for Recorder {
        fn on_frame(&mut self, _tick: Tick, frame: &[AgentFrame]) {
            self.last_frame = frame.to_vec();
        }
        fn on_day_end(&mut self, record: &DayRecord) {
            self.day_records.push(*record);
        }
        fn on_sim_end(&mut self, records: &[DayRecord]) {
            self.final_records = records.to_vec();
            self.sim_end_calls += 1;
        }
    }

    #[test]
    fn day_callbacks_match_accumulated_records() {
        let mut sim = SimBuilder::new(
            config(30, 1, 20, 5),
            disease(0.1, 3, 0.0, 0.6),
            grid(10, 10),
        )
        .build()
        .unwrap();
        let mut recorder = Recorder::default();
        sim.run(&mut recorder);

        assert_eq!(recorder.sim_end_calls, 1);
        assert_eq!(recorder.day_records, sim.records());
        assert_eq!(recorder.final_records, sim.records());
        // Day numbers are 1-based and consecutive.
        for (i, record) in recorder.day_records.iter().enumerate() {
            assert_eq!(record.day, i as u64 + 1);
        }
    }

    #[test]
    fn frames_carry_one_entry_per_agent() {
        let mut sim = SimBuilder::new(
            config(12, 1, 5, 5),
            disease(0.25, 3, 0.0, 0.0),
            grid(10, 10),
        )
        .build()
        .unwrap();
        let mut recorder = Recorder::default();
        sim.run_ticks(1, &mut recorder);

        assert_eq!(recorder.last_frame.len(), 12);
        for (i, entry) in recorder.last_frame.iter().enumerate() {
            assert_eq!(entry.class, sim.store.class_of(AgentId(i as u32)));
            assert_eq!(entry.position, sim.field.position(AgentId(i as u32)));
        }
    }
}

// ── Checkpointing ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod checkpoint_tests {
    use super::*;
    use crate::Sim;

    fn assert_same_outcome<F: ContactField>(a: &Sim<F>, b: &Sim<F>) {
        assert_eq!(a.records(), b.records());
        assert_eq!(a.store.infected, b.store.infected);
        assert_eq!(a.store.days_infected, b.store.days_infected);
        assert_eq!(a.store.dead, b.store.dead);
        assert_eq!(a.store.ever_infected, b.store.ever_infected);
        assert_eq!(a.store.exposures, b.store.exposures);
        assert_eq!(a.store.heading, b.store.heading);
        for i in 0..a.store.count as u32 {
            assert_eq!(a.field.position(AgentId(i)), b.field.position(AgentId(i)));
        }
        assert_eq!(a.clock.current_tick, b.clock.current_tick);
    }

    #[test]
    fn grid_checkpoint_resumes_identically() {
        let make = || {
            SimBuilder::new(
                config(40, 1, 25, 99),
                disease(0.1, 4, 0.1, 0.9),
                grid(15, 15),
            )
            .build()
            .unwrap()
        };

        // Reference: one uninterrupted run.
        let mut reference = make();
        reference.run(&mut NoopObserver);

        // Interrupted run: 8 ticks, checkpoint, restore, continue.
        let mut interrupted = make();
        interrupted.run_ticks(8, &mut NoopObserver);
        let mut buffer = Vec::new();
        interrupted.save_checkpoint(&mut buffer).unwrap();
        let mut restored: Sim<GridField> =
            Sim::load_checkpoint(buffer.as_slice()).unwrap();
        restored.run(&mut NoopObserver);

        assert_same_outcome(&reference, &restored);
    }

    #[test]
    fn open_checkpoint_resumes_identically_mid_day() {
        // 3 ticks/day so the checkpoint lands inside a day and must carry
        // the half-accumulated tally with it.
        let make = || {
            SimBuilder::new(
                config(25, 3, 15, 4242),
                disease(0.08, 6, 0.02, 0.5),
                OpenField::new(100.0, 100.0).unwrap(),
            )
            .build()
            .unwrap()
        };

        let mut reference = make();
        reference.run(&mut NoopObserver);

        let mut interrupted = make();
        interrupted.run_ticks(7, &mut NoopObserver); // mid-day-3
        let mut buffer = Vec::new();
        interrupted.save_checkpoint(&mut buffer).unwrap();
        let mut restored: Sim<OpenField> =
            Sim::load_checkpoint(buffer.as_slice()).unwrap();
        restored.run(&mut NoopObserver);

        assert_same_outcome(&reference, &restored);
    }
}
