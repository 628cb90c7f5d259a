//! CSV report backend.
//!
//! Creates `disease_report.csv` in the configured output directory, one row
//! per simulated day.  Column names are spreadsheet-style headers so the
//! file drops straight into downstream analysis sheets.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use epi_sim::DayRecord;

use crate::writer::ReportWriter;
use crate::OutputResult;

/// Writes the day sequence to `disease_report.csv`.
pub struct CsvReportWriter {
    days: Writer<File>,
    finished: bool,
}

impl CsvReportWriter {
    /// Open (or create) the report file in `dir` and write the header row.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut days = Writer::from_path(dir.join("disease_report.csv"))?;
        days.write_record([
            "Day",
            "Daily Cases",
            "Active Cases",
            "Daily Deaths",
            "Daily Recoveries",
        ])?;
        Ok(Self { days, finished: false })
    }
}

impl ReportWriter for CsvReportWriter {
    fn write_day(&mut self, record: &DayRecord) -> OutputResult<()> {
        self.days.write_record(&[
            record.day.to_string(),
            record.new_infections.to_string(),
            record.active_infections.to_string(),
            record.deaths.to_string(),
            record.recoveries.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.days.flush()?;
        Ok(())
    }
}
