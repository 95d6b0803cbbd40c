//! Fluent builder for constructing a [`Sim`].

use cs_core::{CafeteriaConfig, SimClock, SimRng};
use cs_engine::EventQueue;
use cs_facility::{Facility, StoreSelector, selector_for};

use crate::process::{ServiceTimes, SimState};
use crate::{ArrivalProcess, Sim, SimResult};

/// Fluent builder for [`Sim<A>`].
///
/// # Required inputs
///
/// - [`CafeteriaConfig`] — capacities, service times, horizon, seed, …
/// - `A: ArrivalProcess` — e.g. [`PoissonArrivals`][crate::PoissonArrivals]
///
/// # Optional inputs (have defaults)
///
/// | Method          | Default                                   |
/// |-----------------|-------------------------------------------|
/// | `.selector(s)`  | `selector_for(config.strategy)`           |
/// | `.rng(r)`       | `SimRng::new(config.seed)`                |
///
/// # Example
///
/// ```rust,ignore
/// let arrivals = PoissonArrivals::from_config(&config)?;
/// let mut sim = SimBuilder::new(config, arrivals).build()?;
/// let outcome = sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<A: ArrivalProcess> {
    config:   CafeteriaConfig,
    arrivals: A,
    selector: Option<Box<dyn StoreSelector>>,
    rng:      Option<SimRng>,
}

impl<A: ArrivalProcess> SimBuilder<A> {
    pub fn new(config: CafeteriaConfig, arrivals: A) -> Self {
        Self { config, arrivals, selector: None, rng: None }
    }

    /// Override the store selection policy named by `config.strategy`.
    pub fn selector(mut self, selector: Box<dyn StoreSelector>) -> Self {
        self.selector = Some(selector);
        self
    }

    /// Inject a specific RNG instead of seeding one from `config.seed`.
    pub fn rng(mut self, rng: SimRng) -> Self {
        self.rng = Some(rng);
        self
    }

    /// Validate the configuration, build the facility, and return a
    /// ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<A>> {
        self.config.validate()?;

        let facility = Facility::from_config(&self.config)?;
        let selector = self.selector.unwrap_or_else(|| selector_for(self.config.strategy));
        let rng = self.rng.unwrap_or_else(|| SimRng::new(self.config.seed));
        let state = SimState::new(facility, selector, ServiceTimes::from_config(&self.config), rng);
        let queue = EventQueue::new(SimClock::new(self.config.start_time_secs));

        Ok(Sim::new(self.config, queue, state, self.arrivals))
    }
}
