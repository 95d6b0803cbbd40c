//! Unit tests for cs-facility.

use cs_core::{SelectionStrategy, SimRng, SimTime, StoreId, VisitorId};
use cs_engine::Acquire;

use crate::{
    Facility, FacilityError, RandomStore, ShortestQueue, Stage, StoreSelector, Visitor, Wait,
    selector_for,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn facility(stores: u32) -> Facility {
    Facility::new(stores, 2, 1, 10).unwrap()
}

// ── Facility ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod facility_tests {
    use super::*;

    #[test]
    fn builds_stores_in_order() {
        let f = facility(3);
        assert_eq!(f.store_count(), 3);
        let ids: Vec<_> = f.stores().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![StoreId(0), StoreId(1), StoreId(2)]);
        assert_eq!(f.stores()[0].servers.capacity(), 2);
        assert_eq!(f.stores()[0].cashier.capacity(), 1);
        assert_eq!(f.seating.capacity(), 10);
        assert_eq!(f.queue_lens(), vec![0, 0, 0]);
    }

    #[test]
    fn zero_counts_rejected() {
        assert!(matches!(Facility::new(0, 1, 1, 1), Err(FacilityError::Config(_))));
        assert!(matches!(Facility::new(1, 0, 1, 1), Err(FacilityError::Engine(_))));
        assert!(Facility::new(1, 1, 0, 1).is_err());
        assert!(Facility::new(1, 1, 1, 0).is_err());
    }

    #[test]
    fn unknown_store() {
        let f = facility(2);
        assert!(matches!(f.store(StoreId(2)), Err(FacilityError::UnknownStore(StoreId(2)))));
    }

    #[test]
    fn queue_counter_join_and_leave() {
        let mut f = facility(1);
        let store = f.store_mut(StoreId(0)).unwrap();
        store.join();
        store.join();
        assert_eq!(store.queue_len(), 2);
        store.leave().unwrap();
        store.leave().unwrap();
        assert!(matches!(store.leave(), Err(FacilityError::CounterUnderflow(StoreId(0)))));
        assert_eq!(store.queue_len(), 0);
    }

    #[test]
    fn counter_is_independent_of_resources() {
        let mut f = facility(1);
        let store = f.store_mut(StoreId(0)).unwrap();
        store.join();
        assert_eq!(store.servers.in_use(), 0);
        assert_eq!(store.servers.acquire(VisitorId(0)).unwrap(), Acquire::Granted);
        assert_eq!(store.queue_len(), 1);
    }

    #[test]
    fn resource_for_each_stage() {
        let mut f = facility(2);
        assert_eq!(f.resource_mut(Stage::Ordering, StoreId(1)).unwrap().name(), "store 1 servers");
        assert_eq!(f.resource_mut(Stage::Paying, StoreId(0)).unwrap().name(), "store 0 cashier");
        assert_eq!(f.resource_mut(Stage::Seating, StoreId(1)).unwrap().name(), "seating");
        assert!(matches!(
            f.resource_mut(Stage::Arrived, StoreId(0)),
            Err(FacilityError::NoResource(Stage::Arrived))
        ));
        assert!(f.resource_mut(Stage::Departed, StoreId(0)).is_err());
    }
}

// ── Selectors ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod selector_tests {
    use super::*;

    #[test]
    fn shortest_queue_tie_goes_to_lowest_index() {
        let f = facility(2);
        for seed in 0..50 {
            let mut rng = SimRng::new(seed);
            assert_eq!(ShortestQueue.select(&f, &mut rng), StoreId(0));
        }
    }

    #[test]
    fn shortest_queue_picks_minimum() {
        let mut f = facility(3);
        f.store_mut(StoreId(0)).unwrap().join();
        f.store_mut(StoreId(0)).unwrap().join();
        f.store_mut(StoreId(1)).unwrap().join();
        f.store_mut(StoreId(2)).unwrap().join();
        // Counters: [2, 1, 1] → first of the minima.
        let mut rng = SimRng::new(0);
        assert_eq!(ShortestQueue.select(&f, &mut rng), StoreId(1));
    }

    #[test]
    fn shortest_queue_does_not_mutate() {
        let f = facility(2);
        let mut rng = SimRng::new(0);
        ShortestQueue.select(&f, &mut rng);
        assert_eq!(f.queue_lens(), vec![0, 0]);
    }

    #[test]
    fn random_covers_all_stores() {
        let f = facility(3);
        let mut rng = SimRng::new(7);
        let mut hits = [0usize; 3];
        for _ in 0..3_000 {
            hits[RandomStore.select(&f, &mut rng).index()] += 1;
        }
        for h in hits {
            assert!(h > 800, "uneven selection: {hits:?}");
        }
    }

    #[test]
    fn random_is_seed_deterministic() {
        let f = facility(4);
        let picks = |seed| {
            let mut rng = SimRng::new(seed);
            (0..20).map(|_| RandomStore.select(&f, &mut rng)).collect::<Vec<_>>()
        };
        assert_eq!(picks(99), picks(99));
    }

    #[test]
    fn selector_for_strategy() {
        assert_eq!(selector_for(SelectionStrategy::ShortestQueue).name(), "shortest_queue");
        assert_eq!(selector_for(SelectionStrategy::Random).name(), "random");
    }
}

// ── Visitor ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod visitor_tests {
    use super::*;

    #[test]
    fn new_visitor_is_arrived_and_ready() {
        let v = Visitor::new(VisitorId(3), SimTime(12.0));
        assert_eq!(v.stage, Stage::Arrived);
        assert_eq!(v.wait, Wait::Ready);
        assert_eq!(v.store, None);
        assert!(!v.has_departed());
        assert_eq!(v.elapsed(), None);
    }

    #[test]
    fn stages_advance_in_order() {
        let mut s = Stage::Arrived;
        let mut seen = vec![s];
        while s != Stage::Departed {
            s = s.next();
            seen.push(s);
        }
        assert_eq!(
            seen,
            vec![Stage::Arrived, Stage::Ordering, Stage::Paying, Stage::Seating, Stage::Departed]
        );
        assert_eq!(Stage::Departed.next(), Stage::Departed);
    }

    #[test]
    fn only_service_stages_hold_resources() {
        assert!(!Stage::Arrived.holds_resource());
        assert!(Stage::Ordering.holds_resource());
        assert!(Stage::Paying.holds_resource());
        assert!(Stage::Seating.holds_resource());
        assert!(!Stage::Departed.holds_resource());
    }

    #[test]
    fn elapsed_after_departure() {
        let mut v = Visitor::new(VisitorId(1), SimTime(1.0));
        v.stage = Stage::Departed;
        v.departure = Some(SimTime(45.0));
        assert_eq!(v.elapsed(), Some(44.0));
    }
}
