//! `ReportObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use cs_core::SimTime;
use cs_facility::{Facility, Visitor};
use cs_sim::{SimObserver, SimOutcome};

use crate::row::DepartureRow;
use crate::writer::OutputWriter;
use crate::{ReportError, ReportResult};

/// A [`SimObserver`] that streams departures to any [`OutputWriter`].
///
/// Departures are buffered and flushed as one batch per event.  Errors from
/// the writer are stored internally because `SimObserver` methods have no
/// return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct ReportObserver<W: OutputWriter> {
    writer:     W,
    pending:    Vec<DepartureRow>,
    last_error: Option<ReportError>,
}

impl<W: OutputWriter> ReportObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, pending: Vec::new(), last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<ReportError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn flush_pending(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let result = self.writer.write_departures(&self.pending);
        self.pending.clear();
        self.store_err(result);
    }

    fn store_err(&mut self, result: ReportResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for ReportObserver<W> {
    fn on_departure(&mut self, visitor: &Visitor) {
        if let Some(row) = DepartureRow::from_visitor(visitor) {
            self.pending.push(row);
        }
    }

    fn on_event(&mut self, _now: SimTime, _facility: &Facility, _visitors: &[Visitor]) {
        self.flush_pending();
    }

    fn on_sim_end(&mut self, _outcome: &SimOutcome) {
        self.flush_pending();
        let result = self.writer.finish();
        self.store_err(result);
    }
}
