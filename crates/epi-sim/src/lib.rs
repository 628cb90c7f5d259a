//! `epi-sim` — tick loop orchestrator for the epi simulator.
//!
//! # The per-tick sequence
//!
//! ```text
//! for each tick until no infection remains (or max_days):
//!   ① Snapshot  — record which agents are infectious before anything moves.
//!   ② Progress  — advance every infection by a day; full-duration agents recover.
//!   ③ Move      — every living agent takes one movement step (field strategy).
//!   ④ Contacts  — the field reports contact pairs for the new positions.
//!   ⑤ Transmit  — every pair direction gets an independent infection roll.
//!   ⑥ Death     — every still-infected agent rolls against the death rate.
//!   ⑦ Report    — census, conservation check, render frame, day tally.
//!   ⑧ Terminate — zero infected ends the run after closing the day.
//! ```
//!
//! Recovery (②) runs before the death check (⑥): an agent reaching its full
//! disease duration carries no death risk that tick.  Transmission
//! sources are judged by the ① snapshot, so an agent that recovers in ② still
//! infects its contacts that day, and is never re-infected the tick it
//! recovers.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use epi_core::{DiseaseId, SimConfig};
//! use epi_disease::Disease;
//! use epi_sim::{NoopObserver, SimBuilder};
//! use epi_space::GridField;
//!
//! let disease = Disease::new(DiseaseId(0), 0.01, 10, 0.001, 0.2)?;
//! let mut sim = SimBuilder::new(config, disease, GridField::new(50, 50)?).build()?;
//! sim.run(&mut NoopObserver);
//! println!("{} days simulated", sim.records().len());
//! ```

pub mod builder;
pub mod checkpoint;
pub mod error;
pub mod observer;
pub mod report;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{AgentFrame, NoopObserver, SimObserver};
pub use report::{DayRecord, DayTally};
pub use sim::Sim;
