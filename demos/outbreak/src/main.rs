//! outbreak — demo run of the epi simulator, both spatial variants.
//!
//! Runs the same disease twice: once on a discrete grid (1 tick = 1 day) and
//! once on a continuous surface (30 ticks = 1 day), then prints the daily
//! curves and writes one `disease_report.csv` per variant under `output/`.
//!
//! `RUST_LOG=info cargo run -p outbreak` shows per-day progress.

use std::path::Path;

use anyhow::Result;
use log::info;

use epi_agent::Census;
use epi_core::{DiseaseId, SimConfig, Tick};
use epi_disease::Disease;
use epi_output::{CsvReportWriter, ReportObserver};
use epi_sim::{DayRecord, SimBuilder, SimObserver};
use epi_space::{ContactField, GridField, OpenField};

// ── Constants ─────────────────────────────────────────────────────────────────

const POPULATION: usize = 1_000;
const SEED: u64 = 42;
const MAX_DAYS: u64 = 365;

const GRID_WIDTH: u32 = 50;
const GRID_HEIGHT: u32 = 50;

const SURFACE_WIDTH: f32 = 640.0;
const SURFACE_HEIGHT: f32 = 480.0;
const TICKS_PER_DAY_OPEN: u32 = 30;

// ── Observer: CSV export + logged progress ────────────────────────────────────

struct LoggingReport {
    inner: ReportObserver<CsvReportWriter>,
    last_census: Census,
}

impl LoggingReport {
    fn new(inner: ReportObserver<CsvReportWriter>) -> Self {
        Self { inner, last_census: Census::default() }
    }
}

impl SimObserver for LoggingReport {
    fn on_tick_end(&mut self, _tick: Tick, census: &Census) {
        self.last_census = *census;
    }

    fn on_day_end(&mut self, record: &DayRecord) {
        info!(
            "day {:>3}: {:>4} new, {:>4} active, {:>3} deaths, {:>4} recoveries",
            record.day, record.new_infections, record.active_infections,
            record.deaths, record.recoveries,
        );
        self.inner.on_day_end(record);
    }

    fn on_sim_end(&mut self, records: &[DayRecord]) {
        self.inner.on_sim_end(records);
    }
}

// ── Runs ──────────────────────────────────────────────────────────────────────

fn run_variant<F: ContactField>(
    label: &str,
    config: SimConfig,
    disease: Disease,
    field: F,
) -> Result<()> {
    let out_dir = format!("output/outbreak-{label}");
    std::fs::create_dir_all(&out_dir)?;

    let mut sim = SimBuilder::new(config, disease, field).build()?;
    let writer = CsvReportWriter::new(Path::new(&out_dir))?;
    let mut obs = LoggingReport::new(ReportObserver::new(writer));

    let t0 = std::time::Instant::now();
    sim.run(&mut obs);
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("report error: {e}");
    }

    let census = obs.last_census;
    let records = sim.records();
    let peak = records.iter().map(|r| r.active_infections).max().unwrap_or(0);
    let total_cases: u64 = records.iter().map(|r| r.new_infections).sum();

    println!("── {label} ──────────────────────────────────");
    println!("  days simulated : {}", records.len());
    println!("  elapsed        : {:.3} s", elapsed.as_secs_f64());
    println!("  peak active    : {peak}");
    println!("  total cases    : {total_cases}");
    println!(
        "  final census   : {} susceptible / {} infected / {} recovered / {} dead",
        census.susceptible, census.infected, census.recovered, census.dead,
    );
    println!("  report         : {out_dir}/disease_report.csv");
    println!();
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    println!("=== outbreak — epi simulator demo ===");
    println!("Population: {POPULATION}  |  Seed: {SEED}  |  Day cap: {MAX_DAYS}");
    println!();

    // Variant 1: discrete grid, cell co-occupancy contacts, 1 tick per day.
    run_variant(
        "grid",
        SimConfig {
            population: POPULATION,
            seed: SEED,
            ticks_per_day: 1,
            max_days: MAX_DAYS,
        },
        Disease::new(DiseaseId(0), 0.01, 14, 0.01, 0.2)?,
        GridField::new(GRID_WIDTH, GRID_HEIGHT)?,
    )?;

    // Variant 2: continuous surface, circle-overlap contacts, 30 ticks per
    // day (disease duration is in ticks, hence 10 days × 30).
    run_variant(
        "open",
        SimConfig {
            population: POPULATION,
            seed: SEED,
            ticks_per_day: TICKS_PER_DAY_OPEN,
            max_days: MAX_DAYS,
        },
        Disease::new(DiseaseId(1), 0.001, 10 * TICKS_PER_DAY_OPEN, 0.0, 0.01)?,
        OpenField::new(SURFACE_WIDTH, SURFACE_HEIGHT)?,
    )?;

    Ok(())
}
