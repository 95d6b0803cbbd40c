//! Simulation observer trait for progress reporting and data collection.

use cs_core::SimTime;
use cs_facility::{Facility, Visitor};

use crate::SimOutcome;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// event loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — departure printer
///
/// ```rust,ignore
/// struct DeparturePrinter;
///
/// impl SimObserver for DeparturePrinter {
///     fn on_departure(&mut self, visitor: &Visitor) {
///         println!("{} left after {:?}s", visitor.id, visitor.elapsed());
///     }
/// }
/// ```
pub trait SimObserver {
    /// A visitor has just been spawned (still in `Arrived`).
    fn on_arrival(&mut self, _visitor: &Visitor) {}

    /// A visitor has reached `Departed`; `visitor.elapsed()` is set.
    fn on_departure(&mut self, _visitor: &Visitor) {}

    /// Called after every dispatched event, once all same-instant follow-up
    /// work has run.
    ///
    /// Provides read-only access to the facility and every visitor so that
    /// checkers and writers can inspect state without the driver knowing
    /// about them.
    fn on_event(&mut self, _now: SimTime, _facility: &Facility, _visitors: &[Visitor]) {}

    /// Called once when the run stops (queue drained or horizon reached).
    fn on_sim_end(&mut self, _outcome: &SimOutcome) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
