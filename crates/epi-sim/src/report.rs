//! Daily aggregate reporting types.
//!
//! The tick loop owns a [`DayTally`] that accumulates transition events
//! across the ticks of one simulated day.  On a day boundary (or when a run
//! terminates mid-day) the tally closes into an immutable [`DayRecord`] and
//! resets; the ordered record sequence is the run's reportable output.

use serde::{Deserialize, Serialize};

/// Aggregate statistics for one completed simulated day.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct DayRecord {
    /// 1-based day number.
    pub day: u64,
    /// Contact transmissions that occurred during the day.  Initial seeds
    /// predate day 1 and are not counted here.
    pub new_infections: u64,
    /// Number of infected agents when the day closed.
    pub active_infections: u64,
    /// Agents that died during the day.
    pub deaths: u64,
    /// Agents whose infection ran its full course during the day.
    pub recoveries: u64,
}

/// Mutable accumulator for the day in progress.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct DayTally {
    pub new_infections: u64,
    pub deaths: u64,
    pub recoveries: u64,
}

impl DayTally {
    /// Close the day: produce its record and reset the accumulator.
    pub fn close(&mut self, day: u64, active_infections: usize) -> DayRecord {
        let record = DayRecord {
            day,
            new_infections: self.new_infections,
            active_infections: active_infections as u64,
            deaths: self.deaths,
            recoveries: self.recoveries,
        };
        *self = DayTally::default();
        record
    }
}
