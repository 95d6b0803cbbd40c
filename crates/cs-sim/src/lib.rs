//! `cs-sim` — event-loop driver for the cafsim cafeteria simulator.
//!
//! # Event loop
//!
//! ```text
//! start:  population = arrivals.population(rng)
//!         schedule(first_delay, Arrival)
//!
//! while next event due ≤ horizon:
//!   ① Pop     — clock := event.due
//!   ② Dispatch
//!        Arrival       → spawn visitor i; schedule next Arrival after gap
//!        HoldDone(v)   → resume v: release slot (head waiter resumes
//!                        first), advance stage, request next
//!   ③ Observe — SimObserver::on_event(now, facility, visitors)
//! ```
//!
//! A visitor's trip is `Arrived → Ordering → Paying → Seating → Departed`;
//! each service stage acquires a resource (possibly queueing), holds it for
//! a uniformly drawn time, and releases it.  Departed visitors contribute
//! their elapsed time to the sample set.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use cs_core::CafeteriaConfig;
//! use cs_sim::{NoopObserver, Sim};
//!
//! let mut sim = Sim::from_config(CafeteriaConfig::default())?;
//! let outcome = sim.run(&mut NoopObserver)?;
//! println!("{} visitors served", outcome.completed());
//! ```

pub mod arrivals;
pub mod builder;
pub mod error;
pub mod observer;
pub mod process;
pub mod sim;

#[cfg(test)]
mod tests;

pub use arrivals::{ArrivalProcess, FixedArrivals, PoissonArrivals};
pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use process::{Activity, ServiceTimes, SimState};
pub use sim::{Sim, SimOutcome};
