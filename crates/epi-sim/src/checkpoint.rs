//! Run checkpointing.
//!
//! A checkpoint captures *everything* the next tick depends on — agent
//! health, placements, the clock, the half-accumulated day tally, and the
//! RNG's internal state (ChaCha serializes; this is why `SimRng` wraps it).
//! Restoring a checkpoint and continuing therefore reproduces an
//! uninterrupted run tick for tick.
//!
//! The per-tick scratch buffers are not captured: every tick rebuilds them
//! from scratch before reading them.
//!
//! JSON via `serde_json` keeps checkpoints diffable and debuggable; at the
//! hundreds-to-thousands agent scale the file is tens of kilobytes, so a
//! binary format would buy nothing.

use std::io;

use serde::Serialize;
use serde::de::DeserializeOwned;

use epi_space::ContactField;

use crate::{Sim, SimResult};

impl<F> Sim<F>
where
    F: ContactField + Serialize + DeserializeOwned,
{
    /// Serialize the complete run state as JSON.
    pub fn save_checkpoint<W: io::Write>(&self, writer: W) -> SimResult<()> {
        serde_json::to_writer(writer, self)?;
        Ok(())
    }

    /// Restore a run from a JSON checkpoint.  The returned sim continues
    /// exactly where [`save_checkpoint`][Self::save_checkpoint] left off.
    pub fn load_checkpoint<R: io::Read>(reader: R) -> SimResult<Self> {
        Ok(serde_json::from_reader(reader)?)
    }
}
