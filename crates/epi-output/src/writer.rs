//! The `ReportWriter` trait implemented by report backends.

use epi_sim::DayRecord;

use crate::OutputResult;

/// A sink for the per-day record sequence.
///
/// All methods are infallible from the observer's perspective — errors are
/// stored internally and retrieved with
/// [`ReportObserver::take_error`][crate::ReportObserver::take_error].
pub trait ReportWriter {
    /// Append one day's record.
    fn write_day(&mut self, record: &DayRecord) -> OutputResult<()>;

    /// Flush and close the underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
