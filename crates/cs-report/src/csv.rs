//! CSV output backend.
//!
//! Creates `departures.csv` in the configured output directory.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{DepartureRow, ReportResult};

pub const DEPARTURES_FILE: &str = "departures.csv";

/// Writes one CSV row per departed visitor.
pub struct CsvWriter {
    departures: Writer<File>,
    rows:       u64,
    finished:   bool,
}

impl CsvWriter {
    /// Open (or create) `departures.csv` in `dir` and write the header row.
    pub fn new(dir: &Path) -> ReportResult<Self> {
        let mut departures = Writer::from_path(dir.join(DEPARTURES_FILE))?;
        departures.write_record([
            "visitor_id",
            "store_id",
            "arrival_secs",
            "departure_secs",
            "elapsed_secs",
        ])?;
        Ok(Self { departures, rows: 0, finished: false })
    }

    /// Data rows written so far (header excluded).
    pub fn rows_written(&self) -> u64 {
        self.rows
    }
}

impl OutputWriter for CsvWriter {
    fn write_departures(&mut self, rows: &[DepartureRow]) -> ReportResult<()> {
        for row in rows {
            self.departures.write_record(&[
                row.visitor_id.to_string(),
                row.store_id.to_string(),
                format!("{:.3}", row.arrival_secs),
                format!("{:.3}", row.departure_secs),
                format!("{:.3}", row.elapsed_secs),
            ])?;
            self.rows += 1;
        }
        Ok(())
    }

    fn finish(&mut self) -> ReportResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.departures.flush()?;
        Ok(())
    }
}
