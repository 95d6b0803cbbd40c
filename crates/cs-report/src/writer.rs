//! The `OutputWriter` trait implemented by backend writers.

use crate::{DepartureRow, ReportResult};

/// Sink for per-visitor output rows.
///
/// Errors are stored by the observer rather than aborting the run; retrieve
/// them with [`ReportObserver::take_error`][crate::ReportObserver::take_error].
pub trait OutputWriter {
    /// Write a batch of departures, in departure order.
    fn write_departures(&mut self, rows: &[DepartureRow]) -> ReportResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> ReportResult<()>;
}
