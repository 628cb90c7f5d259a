//! `epi-core` — foundational types for the epi epidemic simulator.
//!
//! This crate is a dependency of every other `epi-*` crate.  It intentionally
//! has no `epi-*` dependencies and minimal external ones (only `rand`,
//! `rand_chacha`, and `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                          |
//! |-------------|---------------------------------------------------|
//! | [`ids`]     | `AgentId`, `DiseaseId`                            |
//! | [`coord`]   | `Cell` (grid), `Point` (continuous)               |
//! | [`heading`] | `Heading` — 8-way compass direction               |
//! | [`time`]    | `Tick`, `SimClock`, `SimConfig`                   |
//! | [`rng`]     | `SimRng` — the shared seedable random source      |
//! | [`error`]   | `EpiError`, `EpiResult`                           |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                   |
//! |---------|----------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types,      |
//!           | including the RNG state.  Required by epi-sim.           |

pub mod coord;
pub mod error;
pub mod heading;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use coord::{Cell, Point};
pub use error::{EpiError, EpiResult};
pub use heading::Heading;
pub use ids::{AgentId, DiseaseId};
pub use rng::SimRng;
pub use time::{SimClock, SimConfig, Tick};
