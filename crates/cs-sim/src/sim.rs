//! The `Sim` struct and its event loop.

use log::info;

use cs_core::{CafeteriaConfig, SimTime};
use cs_engine::EventQueue;
use cs_facility::{Stage, Wait};

use crate::process::{Activity, SimState};
use crate::{ArrivalProcess, PoissonArrivals, SimBuilder, SimError, SimObserver, SimResult};

// ── SimOutcome ────────────────────────────────────────────────────────────────

/// What a finished run hands to the report generator.
#[derive(Clone, Debug, PartialEq)]
pub struct SimOutcome {
    /// Elapsed seconds per departed visitor, in departure order.
    pub samples:    Vec<f64>,
    /// Visitor count drawn at the start of the run.
    pub population: u32,
    /// Visitors actually spawned before the run stopped.
    pub spawned:    u32,
    /// Visitors still inside when the horizon cut the run off.
    pub abandoned:  u32,
    /// Seats still held by abandoned visitors.  These slots are never
    /// released; see DESIGN.md.
    pub seats_held: usize,
    /// Events dispatched by this call to `run`.
    pub events:     usize,
    pub final_time: SimTime,
}

impl SimOutcome {
    pub fn completed(&self) -> usize {
        self.samples.len()
    }
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The simulation driver.
///
/// `Sim<A>` owns the event queue (and with it the clock), the cafeteria
/// state, and the arrival process `A`.  A run:
///
/// 1. **Start**: draw the population and schedule the first arrival.
/// 2. **Loop**: pop the earliest event at or before the horizon and dispatch
///    it — spawn a visitor, or resume one whose hold timer expired.  A slot
///    freed along the way goes straight to the head waiter, who resumes
///    before the releasing visitor continues.
/// 3. **Stop**: when the queue is empty or the next event lies beyond the
///    horizon.  Unfinished visitors are abandoned without a sample.
///
/// Create via [`SimBuilder`][crate::SimBuilder] or [`Sim::from_config`].
pub struct Sim<A: ArrivalProcess> {
    /// Validated, read-only run configuration.
    pub config: CafeteriaConfig,

    /// Pending events plus the simulation clock.
    pub queue: EventQueue<Activity>,

    /// Facility, visitors, samples, and the run's RNG.
    pub state: SimState,

    pub arrivals: A,

    started: bool,
}

impl Sim<PoissonArrivals> {
    /// A run with Poisson arrivals and the configured selection strategy.
    pub fn from_config(config: CafeteriaConfig) -> SimResult<Self> {
        let arrivals = PoissonArrivals::from_config(&config)?;
        SimBuilder::new(config, arrivals).build()
    }
}

impl<A: ArrivalProcess> Sim<A> {
    pub(crate) fn new(
        config:   CafeteriaConfig,
        queue:    EventQueue<Activity>,
        state:    SimState,
        arrivals: A,
    ) -> Self {
        Self { config, queue, state, arrivals, started: false }
    }

    /// Simulated length of the run, measured from `SimTime::ZERO`.
    pub fn horizon(&self) -> SimTime {
        SimTime(self.config.horizon_secs())
    }

    pub fn now(&self) -> SimTime {
        self.queue.now()
    }

    /// Samples recorded so far.
    pub fn samples(&self) -> &[f64] {
        &self.state.samples
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run until no events remain or the horizon is reached.
    ///
    /// Calls observer hooks along the way.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    /// Any engine or facility invariant violation aborts the run and is
    /// returned as the error.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<SimOutcome> {
        self.start()?;
        let horizon = self.horizon();

        let Sim { queue, state, arrivals, .. } = &mut *self;
        let events = queue.run_until(horizon, |queue, now, activity| {
            state.dispatch(queue, arrivals, activity, observer)?;
            observer.on_event(now, &state.facility, &state.visitors);
            Ok::<(), SimError>(())
        })?;

        let outcome = self.outcome(events);
        info!(
            "run finished at {}: {} spawned, {} departed, {} abandoned ({} seats still held)",
            self.queue.clock(),
            outcome.spawned,
            outcome.completed(),
            outcome.abandoned,
            outcome.seats_held,
        );
        observer.on_sim_end(&outcome);
        Ok(outcome)
    }

    /// Dispatch exactly one event (if one is due at or before the horizon).
    ///
    /// Returns the instant of the dispatched event, or `None` when the run is
    /// over.  Useful for tests and incremental stepping.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<Option<SimTime>> {
        self.start()?;
        let horizon = self.horizon();
        let Some((now, activity)) = self.queue.advance_until(horizon) else {
            return Ok(None);
        };
        self.state.dispatch(&mut self.queue, &mut self.arrivals, activity, observer)?;
        observer.on_event(now, &self.state.facility, &self.state.visitors);
        Ok(Some(now))
    }

    // ── Internals ─────────────────────────────────────────────────────────

    /// Draw the population and schedule the arrival generator.  Idempotent.
    fn start(&mut self) -> SimResult<()> {
        if self.started {
            return Ok(());
        }
        self.started = true;

        let population = self.arrivals.population(&mut self.state.rng);
        self.state.population = Some(population);
        info!(
            "starting run: {} visitors, {} stores, strategy {}, horizon {}",
            population,
            self.state.facility.store_count(),
            self.state.selector_name(),
            self.horizon(),
        );
        if population > 0 {
            let delay = self.arrivals.first_delay(&mut self.state.rng);
            self.queue.schedule(delay, Activity::Arrival)?;
        }
        Ok(())
    }

    fn outcome(&self, events: usize) -> SimOutcome {
        let spawned = self.state.spawned();
        let seats_held = self
            .state
            .visitors
            .iter()
            .filter(|v| v.stage == Stage::Seating && v.wait == Wait::Timer)
            .count();
        SimOutcome {
            samples: self.state.samples.clone(),
            population: self.state.population.unwrap_or(0),
            spawned,
            abandoned: spawned - self.state.departed(),
            seats_held,
            events,
            final_time: self.queue.now(),
        }
    }
}
