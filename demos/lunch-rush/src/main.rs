//! lunch-rush — one lunch period in a school cafeteria.
//!
//! Visitors arrive as a Poisson stream, pick a store, queue for a server and
//! then a cashier, and finally wait for a seat to eat.  Prints the
//! configuration and wait-time statistics, and logs every departure to
//! `departures.csv`.
//!
//! ```text
//! lunch-rush [config.json] [output_dir]
//! ```
//!
//! Fields missing from `config.json` take their defaults (11:30–13:00, two
//! stores, 200–300 visitors, seed 42).  Set `RUST_LOG=debug` to follow
//! individual visitors.

use std::env;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use log::info;

use cs_core::CafeteriaConfig;
use cs_report::csv::DEPARTURES_FILE;
use cs_report::{CsvWriter, ReportObserver, render_report};
use cs_sim::Sim;

const DEFAULT_OUTPUT_DIR: &str = "output/lunch-rush";

fn load_config(path: Option<&Path>) -> Result<CafeteriaConfig> {
    let Some(path) = path else {
        return Ok(CafeteriaConfig::default());
    };
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let config: CafeteriaConfig = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args = env::args_os().skip(1);
    let config_path = args.next().map(PathBuf::from);
    let output_dir = args.next().map_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR), PathBuf::from);

    let config = load_config(config_path.as_deref())?;
    config.validate().context("invalid configuration")?;
    info!("config: {config:?}");

    // 1. Build sim.
    let mut sim = Sim::from_config(config)?;

    // 2. Set up output.
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("creating {}", output_dir.display()))?;
    let writer = CsvWriter::new(&output_dir)?;
    let mut obs = ReportObserver::new(writer);

    // 3. Run.
    let t0 = Instant::now();
    let outcome = sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.take_error() {
        eprintln!("output error: {e}");
    }
    let rows = obs.into_writer().rows_written();

    // 4. Report.
    println!("{}", render_report(&sim.config, &outcome.samples));
    println!(
        "Simulation complete in {:.3} s ({} events)",
        elapsed.as_secs_f64(),
        outcome.events
    );
    if outcome.abandoned > 0 {
        println!(
            "  {} visitors still inside at closing ({} holding seats)",
            outcome.abandoned, outcome.seats_held
        );
    }
    println!("  {} : {rows} rows", output_dir.join(DEPARTURES_FILE).display());

    Ok(())
}
