//! `epi-agent` — Structure-of-Arrays person storage for the epi simulator.
//!
//! # Crate layout
//!
//! | Module      | Contents                                              |
//! |-------------|-------------------------------------------------------|
//! | [`store`]   | `PersonStore` (SoA arrays), `HealthClass`, `Census`   |
//! | [`builder`] | `PopulationBuilder` (construction + speed sampling)   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                  |
//! |---------|---------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on all public types.  |

pub mod builder;
pub mod store;


pub use builder::PopulationBuilder;
pub use store::{Census, HealthClass, PersonStore};
