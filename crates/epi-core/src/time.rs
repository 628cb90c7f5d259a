//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter.  The disease state
//! machine runs per tick; reporting aggregates `ticks_per_day` ticks into one
//! simulated day.  The grid variant conventionally runs 1 tick per day; the
//! continuous variant runs many (one per animation frame of a frame-paced
//! presentation layer, 30 by convention here).
//!
//! Using an integer tick as the canonical unit keeps all day arithmetic exact
//! and comparisons O(1); days are derived, never stored.

use std::fmt;

use crate::{EpiError, EpiResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
///
/// `u64` cannot realistically overflow: even at one tick per millisecond a
/// run would last ~585 million years.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Converts between ticks and simulated days.
///
/// `SimClock` is cheap to copy and intentionally holds no heap data.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// How many ticks make up one simulated day.
    pub ticks_per_day: u32,
    /// The current tick — advanced by [`SimClock::advance`] each iteration.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(ticks_per_day: u32) -> Self {
        Self {
            ticks_per_day,
            current_tick: Tick::ZERO,
        }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// The 1-based simulated day the current tick belongs to.
    #[inline]
    pub fn day(&self) -> u64 {
        self.current_tick.0 / self.ticks_per_day as u64 + 1
    }

    /// Tick index within the current day, in `0..ticks_per_day`.
    #[inline]
    pub fn tick_of_day(&self) -> u32 {
        (self.current_tick.0 % self.ticks_per_day as u64) as u32
    }

    /// `true` on the last tick of a day — the point where the day's tally
    /// closes into a report record.
    #[inline]
    pub fn is_day_end(&self) -> bool {
        self.tick_of_day() == self.ticks_per_day - 1
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (day {} tick {}/{})",
            self.current_tick,
            self.day(),
            self.tick_of_day(),
            self.ticks_per_day
        )
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Number of person agents.  Fixed for the whole run — dead agents stay
    /// in the population as inert entities.
    pub population: usize,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Ticks per simulated day.  1 for the grid variant; the continuous
    /// variant typically uses its frame rate.
    pub ticks_per_day: u32,

    /// Upper bound on simulated days.  The run usually ends earlier, when no
    /// infected agent remains.
    pub max_days: u64,
}

impl SimConfig {
    /// The tick at which the run is cut off (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.max_days * self.ticks_per_day as u64)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.ticks_per_day)
    }

    /// Fail fast on parameters no run could be built from.
    pub fn validate(&self) -> EpiResult<()> {
        if self.population == 0 {
            return Err(EpiError::Config("population must be >= 1".into()));
        }
        if self.ticks_per_day == 0 {
            return Err(EpiError::Config("ticks_per_day must be >= 1".into()));
        }
        if self.max_days == 0 {
            return Err(EpiError::Config("max_days must be >= 1".into()));
        }
        Ok(())
    }
}
