//! Visitor processes and the arrival generator.
//!
//! Each visitor is an explicit state machine ([`Stage`] × [`Wait`]).  A
//! visitor runs until it reaches a suspension point — queued on a resource,
//! or holding one until a timer fires — and then hands control back to the
//! event loop.  Nothing else runs in between, so every transition is atomic
//! with respect to all other visitors.
//!
//! # Hand-off
//!
//! When a visitor releases a resource that someone is queued on, the slot
//! passes directly to the head of the queue and that waiter is resumed on
//! the spot: it draws its hold time and schedules its timer before the
//! releasing visitor moves on to its next stage.

use log::{debug, trace};

use cs_core::{CafeteriaConfig, SimRng, SimTime, Span, StoreId, VisitorId};
use cs_engine::{Acquire, EventQueue};
use cs_facility::{Facility, FacilityError, Stage, StoreSelector, Visitor, Wait};

use crate::{ArrivalProcess, SimError, SimObserver, SimResult};

/// Event payloads carried by the event queue.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Activity {
    /// The arrival generator wakes up to spawn the next visitor.
    Arrival,
    /// A visitor's hold timer has expired.
    HoldDone(VisitorId),
}

/// Uniform service-time ranges, one per resource-holding stage.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ServiceTimes {
    pub order:   Span,
    pub payment: Span,
    pub eating:  Span,
}

impl ServiceTimes {
    pub fn from_config(config: &CafeteriaConfig) -> Self {
        Self {
            order:   config.order_time,
            payment: config.payment_time,
            eating:  config.eating_time,
        }
    }

    /// Hold-time range for `stage`, or `None` for stages that hold nothing.
    pub fn span(&self, stage: Stage) -> Option<Span> {
        match stage {
            Stage::Ordering => Some(self.order),
            Stage::Paying   => Some(self.payment),
            Stage::Seating  => Some(self.eating),
            Stage::Arrived | Stage::Departed => None,
        }
    }
}

/// Everything the event handlers mutate, apart from the event queue itself.
pub struct SimState {
    pub facility: Facility,
    /// Every spawned visitor, indexed by `VisitorId`.
    pub visitors: Vec<Visitor>,
    /// Elapsed seconds of each departed visitor, in departure order.
    pub samples:  Vec<f64>,
    pub rng:      SimRng,
    /// Drawn when the run starts; `None` before that.
    pub population: Option<u32>,
    selector: Box<dyn StoreSelector>,
    service:  ServiceTimes,
    spawned:  u32,
    departed: u32,
}

impl SimState {
    pub(crate) fn new(
        facility: Facility,
        selector: Box<dyn StoreSelector>,
        service:  ServiceTimes,
        rng:      SimRng,
    ) -> Self {
        Self {
            facility,
            visitors: Vec::new(),
            samples: Vec::new(),
            rng,
            population: None,
            selector,
            service,
            spawned: 0,
            departed: 0,
        }
    }

    pub fn selector_name(&self) -> &'static str {
        self.selector.name()
    }

    /// Visitors spawned so far.
    pub fn spawned(&self) -> u32 {
        self.spawned
    }

    /// Visitors that reached `Departed`.
    pub fn departed(&self) -> u32 {
        self.departed
    }

    // ── Event dispatch ────────────────────────────────────────────────────

    /// Handle one popped event, including every hand-off it triggers.
    pub(crate) fn dispatch<A: ArrivalProcess, O: SimObserver>(
        &mut self,
        queue:    &mut EventQueue<Activity>,
        arrivals: &mut A,
        activity: Activity,
        observer: &mut O,
    ) -> SimResult<()> {
        trace!("{} dispatch {:?}", queue.clock(), activity);
        match activity {
            Activity::Arrival => {
                if let Some(id) = self.spawn(queue, arrivals, observer)? {
                    self.step(id, queue, observer)?;
                }
                Ok(())
            }
            Activity::HoldDone(id) => self.step(id, queue, observer),
        }
    }

    /// Arrival generator body: spawn one visitor and draw the gap to the
    /// next one.  The gap is drawn after every spawn, the last included, but
    /// only scheduled while the population is incomplete.
    ///
    /// Returns the new visitor, which has not taken its first step yet.
    fn spawn<A: ArrivalProcess, O: SimObserver>(
        &mut self,
        queue:    &mut EventQueue<Activity>,
        arrivals: &mut A,
        observer: &mut O,
    ) -> SimResult<Option<VisitorId>> {
        let population = self.population.unwrap_or(0);
        let index = self.spawned;
        if index >= population {
            return Ok(None);
        }

        let id = VisitorId(index);
        let visitor = Visitor::new(id, queue.now());
        debug!("{} {} arrives", queue.clock(), id);
        observer.on_arrival(&visitor);
        self.visitors.push(visitor);
        self.spawned += 1;

        let gap = arrivals.gap_after(index, &mut self.rng);
        if self.spawned < population {
            queue.schedule(gap, Activity::Arrival)?;
        }
        Ok(Some(id))
    }

    // ── Visitor state machine ─────────────────────────────────────────────

    /// Run visitor `id` from its current state to its next suspension point.
    fn step<O: SimObserver>(
        &mut self,
        id:       VisitorId,
        queue:    &mut EventQueue<Activity>,
        observer: &mut O,
    ) -> SimResult<()> {
        let now = queue.now();
        loop {
            let visitor = self.visitors.get(id.index()).ok_or(SimError::UnknownVisitor(id))?;
            let (stage, wait) = (visitor.stage, visitor.wait);

            match (stage, wait) {
                (Stage::Departed, _) => return Ok(()),

                (Stage::Arrived, _) => {
                    let store = self.selector.select(&self.facility, &mut self.rng);
                    self.facility.store_mut(store)?.join();
                    let visitor = self.visitor_mut(id)?;
                    visitor.store = Some(store);
                    visitor.stage = Stage::Ordering;
                    visitor.wait = Wait::Ready;
                    debug!("{} {} joins {}", queue.clock(), id, store);
                }

                (stage, Wait::Ready) => {
                    let store = self.store_of(id)?;
                    match self.facility.resource_mut(stage, store)?.acquire(id)? {
                        Acquire::Granted => return self.begin_hold(id, stage, queue),
                        Acquire::Queued { position } => {
                            debug!("{} {} queues for {} at position {}", queue.clock(), id, stage, position);
                            self.visitor_mut(id)?.wait = Wait::Resource;
                            return Ok(());
                        }
                    }
                }

                // Handed a slot by someone else's release.
                (stage, Wait::Resource) => return self.begin_hold(id, stage, queue),

                (stage, Wait::Timer) => {
                    let store = self.store_of(id)?;
                    if let Some(next) = self.facility.resource_mut(stage, store)?.release()? {
                        // The waiter is parked in `Wait::Resource`, so this
                        // returns as soon as its timer is scheduled.
                        self.step(next, queue, observer)?;
                    }
                    if stage == Stage::Paying {
                        self.facility.store_mut(store)?.leave()?;
                    }

                    let visitor = self.visitor_mut(id)?;
                    visitor.stage = stage.next();
                    visitor.wait = Wait::Ready;
                    if visitor.stage == Stage::Departed {
                        return self.depart(id, now, observer);
                    }
                }
            }
        }
    }

    /// Occupy the current stage's resource for a freshly drawn duration.
    fn begin_hold(
        &mut self,
        id:    VisitorId,
        stage: Stage,
        queue: &mut EventQueue<Activity>,
    ) -> SimResult<()> {
        let span = self.service.span(stage).ok_or(FacilityError::NoResource(stage))?;
        let duration = self.rng.uniform(span);
        queue.schedule(duration, Activity::HoldDone(id))?;
        self.visitor_mut(id)?.wait = Wait::Timer;
        debug!("{} {} starts {} for {:.1}s", queue.clock(), id, stage, duration);
        Ok(())
    }

    fn depart<O: SimObserver>(
        &mut self,
        id:       VisitorId,
        now:      SimTime,
        observer: &mut O,
    ) -> SimResult<()> {
        let visitor = self.visitor_mut(id)?;
        visitor.departure = Some(now);
        let elapsed = now.since(visitor.arrival);
        debug!("{} departs at {} after {:.1}s", id, now, elapsed);
        self.samples.push(elapsed);
        self.departed += 1;
        observer.on_departure(&self.visitors[id.index()]);
        Ok(())
    }

    fn visitor_mut(&mut self, id: VisitorId) -> SimResult<&mut Visitor> {
        self.visitors.get_mut(id.index()).ok_or(SimError::UnknownVisitor(id))
    }

    fn store_of(&self, id: VisitorId) -> SimResult<StoreId> {
        self.visitors
            .get(id.index())
            .ok_or(SimError::UnknownVisitor(id))?
            .store
            .ok_or(SimError::NoStore(id))
    }
}
