//! The `StoreSelector` trait — how an arriving visitor picks a store.

use cs_core::{SelectionStrategy, SimRng, StoreId};

use crate::Facility;

/// Pluggable store selection policy.
///
/// Implementations must be pure functions of the facility's queue counters
/// (and the RNG, if they draw from it): no mutation, no caching between
/// calls.  The visitor process calls `select` synchronously at the moment of
/// arrival, so every decision sees the live counters.
///
/// A [`Facility`] always has at least one store, so `select` is infallible.
pub trait StoreSelector {
    fn select(&self, facility: &Facility, rng: &mut SimRng) -> StoreId;

    /// Short label used in logs and reports.
    fn name(&self) -> &'static str;
}

/// Join the store with the fewest committed visitors.
///
/// Ties go to the lowest store index, regardless of RNG state.
#[derive(Copy, Clone, Debug, Default)]
pub struct ShortestQueue;

impl StoreSelector for ShortestQueue {
    fn select(&self, facility: &Facility, _rng: &mut SimRng) -> StoreId {
        // `min_by_key` keeps the first of several equal minima.
        facility
            .stores()
            .iter()
            .min_by_key(|s| s.queue_len())
            .map_or(StoreId(0), |s| s.id)
    }

    fn name(&self) -> &'static str {
        SelectionStrategy::ShortestQueue.as_str()
    }
}

/// Join a uniformly random store.
#[derive(Copy, Clone, Debug, Default)]
pub struct RandomStore;

impl StoreSelector for RandomStore {
    fn select(&self, facility: &Facility, rng: &mut SimRng) -> StoreId {
        rng.index(facility.store_count())
            .and_then(|i| StoreId::try_from(i).ok())
            .unwrap_or(StoreId(0))
    }

    fn name(&self) -> &'static str {
        SelectionStrategy::Random.as_str()
    }
}

/// The selector implementing a configured strategy.
pub fn selector_for(strategy: SelectionStrategy) -> Box<dyn StoreSelector> {
    match strategy {
        SelectionStrategy::ShortestQueue => Box::new(ShortestQueue),
        SelectionStrategy::Random => Box::new(RandomStore),
    }
}
