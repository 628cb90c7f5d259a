//! `epi-output` — daily-report export for the epi simulator.
//!
//! The simulation core hands one [`DayRecord`][epi_sim::DayRecord] per
//! simulated day to its observer; this crate persists that sequence as a flat
//! CSV table (the only persistence format the simulator supports).
//!
//! # Usage
//!
//! ```rust,ignore
//! use epi_output::{CsvReportWriter, ReportObserver};
//!
//! let writer = CsvReportWriter::new(Path::new("./output"))?;
//! let mut obs = ReportObserver::new(writer);
//! sim.run(&mut obs);
//! if let Some(e) = obs.take_error() {
//!     eprintln!("report error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod writer;


pub use csv::CsvReportWriter;
pub use error::{OutputError, OutputResult};
pub use observer::ReportObserver;
pub use writer::ReportWriter;
