//! `ReportObserver<W>` — bridges `SimObserver` to a `ReportWriter`.

use epi_sim::{DayRecord, SimObserver};

use crate::writer::ReportWriter;
use crate::OutputError;

/// A [`SimObserver`] that streams day records into any [`ReportWriter`]
/// backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct ReportObserver<W: ReportWriter> {
    writer: W,
    last_error: Option<OutputError>,
}

impl<W: ReportWriter> ReportObserver<W> {
    /// Create an observer backed by `writer`.
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: crate::OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: ReportWriter> SimObserver for ReportObserver<W> {
    fn on_day_end(&mut self, record: &DayRecord) {
        let result = self.writer.write_day(record);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _records: &[DayRecord]) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
