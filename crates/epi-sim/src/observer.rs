//! Simulation observer trait — the seam to the presentation/reporting layer.

use epi_agent::{Census, HealthClass};
use epi_core::{Point, Tick};

use crate::DayRecord;

/// Everything the (external) renderer needs to draw one agent: where it is
/// and which color bucket it falls in.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct AgentFrame {
    pub position: Point,
    pub class: HealthClass,
}

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  Hooks return `()`; observers that can
/// fail (file writers, …) buffer their first error internally and expose it
/// after the run.
///
/// # Example — day printer
///
/// ```rust,ignore
/// struct DayPrinter;
///
/// impl SimObserver for DayPrinter {
///     fn on_day_end(&mut self, record: &DayRecord) {
///         println!("day {}: {} active", record.day, record.active_infections);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called every tick with the render frame — one entry per agent, in
    /// `AgentId` order.  The slice is reused between ticks; copy out anything
    /// that must outlive the call.
    fn on_frame(&mut self, _tick: Tick, _frame: &[AgentFrame]) {}

    /// Called at the end of each tick with the fresh census.
    fn on_tick_end(&mut self, _tick: Tick, _census: &Census) {}

    /// Called when a simulated day closes (including a partial final day on
    /// early termination).
    fn on_day_end(&mut self, _record: &DayRecord) {}

    /// Called once after the run ends, with the full ordered day sequence.
    fn on_sim_end(&mut self, _records: &[DayRecord]) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
