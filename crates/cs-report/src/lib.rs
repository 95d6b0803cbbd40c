//! `cs-report` — turns a run's sample set into something a person can read.
//!
//! | Module        | Contents                                                      |
//! |---------------|---------------------------------------------------------------|
//! | [`summary`]   | `Summary`, `percentile`, `moving_average`, service rate       |
//! | [`text`]      | `render_report` — configuration block plus results block      |
//! | [`csv`]       | `CsvWriter` — `departures.csv`, one row per departed visitor  |
//! | [`observer`]  | `ReportObserver`, a `SimObserver` feeding any `OutputWriter`  |
//!
//! # Usage
//!
//! ```rust,ignore
//! use cs_report::{CsvWriter, ReportObserver, render_report};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = ReportObserver::new(writer);
//! let outcome = sim.run(&mut obs)?;
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! println!("{}", render_report(&sim.config, &outcome.samples));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod summary;
pub mod text;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{ReportError, ReportResult};
pub use observer::ReportObserver;
pub use row::DepartureRow;
pub use summary::{Summary, moving_average, percentile, service_rate_per_minute};
pub use text::{Report, render_report};
pub use writer::OutputWriter;
