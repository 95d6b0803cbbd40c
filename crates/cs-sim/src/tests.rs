//! Integration tests for cs-sim.

use cs_core::{
    CafeteriaConfig, CountRange, SelectionStrategy, SimRng, SimTime, Span, StoreId, VisitorId,
};
use cs_engine::EngineError;
use cs_facility::{Facility, Stage, Visitor, Wait};

use crate::{
    Activity, ArrivalProcess, FixedArrivals, NoopObserver, PoissonArrivals, Sim, SimBuilder, SimError,
    SimObserver, SimOutcome,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// One store with one server and one cashier, fixed 10/5/20 s service times.
fn saturation_config(seats: u32) -> CafeteriaConfig {
    CafeteriaConfig {
        start_time_secs:    0.0,
        end_time_secs:      1_000.0,
        stores:             1,
        servers_per_store:  1,
        cashiers_per_store: 1,
        seating_capacity:   seats,
        visitors:           CountRange::new(3, 3),
        order_time:         Span::fixed(10.0),
        payment_time:       Span::fixed(5.0),
        eating_time:        Span::fixed(20.0),
        strategy:           SelectionStrategy::ShortestQueue,
        seed:               0,
    }
}

fn fixed_sim(config: CafeteriaConfig, times: Vec<f64>) -> Sim<FixedArrivals> {
    SimBuilder::new(config, FixedArrivals::new(times).unwrap())
        .build()
        .unwrap()
}

/// Default lunch configuration with a horizon long enough for everyone.
fn unbounded_config(seed: u64) -> CafeteriaConfig {
    CafeteriaConfig {
        end_time_secs: 41_400.0 + 1_000_000.0,
        seed,
        ..Default::default()
    }
}

fn run_default(config: CafeteriaConfig) -> SimOutcome {
    Sim::from_config(config).unwrap().run(&mut NoopObserver).unwrap()
}

/// Asserts the capacity, queue-counter, and monotonic-clock invariants after
/// every event.
#[derive(Default)]
struct InvariantChecker {
    last:       Option<SimTime>,
    events:     usize,
    arrivals:   usize,
    departures: usize,
}

impl SimObserver for InvariantChecker {
    fn on_arrival(&mut self, visitor: &Visitor) {
        assert_eq!(visitor.stage, Stage::Arrived);
        self.arrivals += 1;
    }

    fn on_departure(&mut self, visitor: &Visitor) {
        assert!(visitor.has_departed());
        assert!(visitor.elapsed().unwrap() >= 0.0);
        self.departures += 1;
    }

    fn on_event(&mut self, now: SimTime, facility: &Facility, visitors: &[Visitor]) {
        if let Some(last) = self.last {
            assert!(now >= last, "clock went backwards: {last} → {now}");
        }
        self.last = Some(now);
        self.events += 1;

        let holding = |stage: Stage, store: Option<StoreId>| {
            visitors
                .iter()
                .filter(|v| v.stage == stage && v.wait == Wait::Timer)
                .filter(|v| store.is_none() || v.store == store)
                .count()
        };

        for store in facility.stores() {
            assert!(store.servers.in_use() <= store.servers.capacity());
            assert!(store.cashier.in_use() <= store.cashier.capacity());
            assert_eq!(store.servers.in_use(), holding(Stage::Ordering, Some(store.id)));
            assert_eq!(store.cashier.in_use(), holding(Stage::Paying, Some(store.id)));

            let committed = visitors
                .iter()
                .filter(|v| v.store == Some(store.id))
                .filter(|v| matches!(v.stage, Stage::Ordering | Stage::Paying))
                .count();
            assert_eq!(store.queue_len() as usize, committed, "queue counter of {}", store.id);
        }
        assert!(facility.seating.in_use() <= facility.seating.capacity());
        assert_eq!(facility.seating.in_use(), holding(Stage::Seating, None));
        assert!(visitors.iter().all(|v| v.stage != Stage::Arrived));
    }
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_from_default_config() {
        let sim = Sim::from_config(CafeteriaConfig::default()).unwrap();
        assert_eq!(sim.state.facility.store_count(), 2);
        assert_eq!(sim.state.selector_name(), "shortest_queue");
        assert_eq!(sim.horizon(), SimTime(5_400.0));
        assert_eq!(sim.now(), SimTime::ZERO);
        assert!(sim.queue.is_empty(), "nothing is scheduled before the run starts");
    }

    #[test]
    fn invalid_config_rejected_before_run() {
        let config = CafeteriaConfig { seating_capacity: 0, ..Default::default() };
        let result = SimBuilder::new(config, FixedArrivals::default()).build();
        assert!(matches!(result, Err(SimError::Config(_))));

        let config = CafeteriaConfig {
            payment_time: Span::new(45.0, 20.0),
            ..Default::default()
        };
        assert!(Sim::from_config(config).is_err());
    }

    #[test]
    fn selector_override() {
        let sim = SimBuilder::new(CafeteriaConfig::default(), FixedArrivals::default())
            .selector(Box::new(cs_facility::RandomStore))
            .build()
            .unwrap();
        assert_eq!(sim.state.selector_name(), "random");
    }

    #[test]
    fn unsorted_fixed_arrivals_rejected() {
        assert!(FixedArrivals::new(vec![0.0, 2.0, 1.0]).is_err());
        assert!(FixedArrivals::new(vec![-1.0]).is_err());
    }

    #[test]
    fn poisson_arrivals_validate() {
        assert!(PoissonArrivals::new(CountRange::new(5, 1), 1.0).is_err());
        assert!(PoissonArrivals::new(CountRange::new(1, 5), 0.0).is_err());
        assert!(PoissonArrivals::new(CountRange::new(1, 5), 1.0).is_ok());
    }
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod scenario_tests {
    use super::*;

    #[test]
    fn single_server_saturation() {
        // Seating never contends: each visitor waits only for the server.
        let mut sim = fixed_sim(saturation_config(3), vec![0.0, 1.0, 2.0]);
        let mut checker = InvariantChecker::default();
        let outcome = sim.run(&mut checker).unwrap();

        assert_eq!(outcome.samples, vec![35.0, 44.0, 53.0]);
        let departures: Vec<_> = sim.state.visitors.iter().map(|v| v.departure).collect();
        assert_eq!(departures, vec![Some(SimTime(35.0)), Some(SimTime(45.0)), Some(SimTime(55.0))]);
        assert_eq!(outcome.abandoned, 0);
        assert_eq!(checker.arrivals, 3);
        assert_eq!(checker.departures, 3);
    }

    #[test]
    fn single_server_saturation_with_one_seat() {
        // The lone seat is held 15–35 by visitor 0, so visitor 1 sits at 35
        // and visitor 2 at 55.
        let mut sim = fixed_sim(saturation_config(1), vec![0.0, 1.0, 2.0]);
        let outcome = sim.run(&mut InvariantChecker::default()).unwrap();
        assert_eq!(outcome.samples, vec![35.0, 54.0, 73.0]);
        assert_eq!(sim.state.facility.seating.peak_queue(), 1);
    }

    #[test]
    fn shortest_queue_tie_break_prefers_store_zero() {
        let config = CafeteriaConfig { stores: 2, ..saturation_config(3) };
        for seed in 0..20 {
            let config = CafeteriaConfig { seed, ..config.clone() };
            let mut sim = fixed_sim(config, vec![0.0]);
            sim.run(&mut NoopObserver).unwrap();
            assert_eq!(sim.state.visitors[0].store, Some(StoreId(0)));
        }
    }

    #[test]
    fn shortest_queue_balances_simultaneous_arrivals() {
        let config = CafeteriaConfig { stores: 2, ..saturation_config(3) };
        let mut sim = fixed_sim(config, vec![0.0, 0.0, 0.0]);
        sim.run(&mut InvariantChecker::default()).unwrap();
        let stores: Vec<_> = sim.state.visitors.iter().map(|v| v.store).collect();
        assert_eq!(stores, vec![Some(StoreId(0)), Some(StoreId(1)), Some(StoreId(0))]);
    }

    #[test]
    fn released_slot_resumes_head_waiter_first() {
        let config = CafeteriaConfig {
            visitors:     CountRange::new(2, 2),
            payment_time: Span::fixed(10.0),
            ..saturation_config(3)
        };
        let mut sim = fixed_sim(config, vec![0.0, 0.0]);
        loop {
            match sim.step(&mut NoopObserver).unwrap() {
                Some(t) if t < SimTime(10.0) => continue,
                Some(t) => {
                    assert_eq!(t, SimTime(10.0));
                    break;
                }
                None => panic!("run ended before visitor 0 finished ordering"),
            }
        }

        // Visitor 1 took the server at t=10 and scheduled its order timer
        // before visitor 0 scheduled its payment timer.
        assert_eq!(sim.queue.len(), 2);
        assert_eq!(sim.queue.advance(), Some((SimTime(20.0), Activity::HoldDone(VisitorId(1)))));
        assert_eq!(sim.queue.advance(), Some((SimTime(20.0), Activity::HoldDone(VisitorId(0)))));
    }

    #[test]
    fn empty_population() {
        let config = CafeteriaConfig {
            visitors: CountRange::new(0, 0),
            ..Default::default()
        };
        let outcome = run_default(config);
        assert!(outcome.samples.is_empty());
        assert_eq!(outcome.population, 0);
        assert_eq!(outcome.spawned, 0);
        assert_eq!(outcome.events, 0);
        assert_eq!(outcome.final_time, SimTime::ZERO);
    }

    #[test]
    fn horizon_abandons_unfinished_visitors() {
        let config = CafeteriaConfig { end_time_secs: 45.0, ..saturation_config(3) };
        let mut sim = fixed_sim(config, vec![0.0, 1.0, 2.0]);
        let outcome = sim.run(&mut NoopObserver).unwrap();

        // Visitor 1 departs exactly at the horizon and still counts.
        assert_eq!(outcome.samples, vec![35.0, 44.0]);
        assert_eq!(outcome.abandoned, 1);
        assert_eq!(outcome.final_time, SimTime(45.0));

        // Visitor 2 is mid-meal and keeps its seat: nothing force-releases it.
        assert_eq!(outcome.seats_held, 1);
        assert_eq!(sim.state.facility.seating.in_use(), 1);
        assert_eq!(sim.state.visitors[2].stage, Stage::Seating);
        assert_eq!(sim.state.visitors[2].departure, None);
    }
}

// ── Whole-run properties ──────────────────────────────────────────────────────

#[cfg(test)]
mod property_tests {
    use super::*;

    #[test]
    fn deterministic_replay() {
        let a = run_default(CafeteriaConfig { seed: 7, ..Default::default() });
        let b = run_default(CafeteriaConfig { seed: 7, ..Default::default() });
        assert!(!a.samples.is_empty());
        assert_eq!(a, b);
    }

    #[test]
    fn deterministic_replay_random_strategy() {
        let config = CafeteriaConfig {
            strategy: SelectionStrategy::Random,
            seed: 11,
            ..Default::default()
        };
        assert_eq!(run_default(config.clone()).samples, run_default(config).samples);
    }

    #[test]
    fn different_seeds_differ() {
        let a = run_default(CafeteriaConfig { seed: 1, ..Default::default() });
        let b = run_default(CafeteriaConfig { seed: 2, ..Default::default() });
        assert_ne!(a.samples, b.samples);
    }

    #[test]
    fn injected_rng_matches_seeded_rng() {
        let config = CafeteriaConfig { seed: 5, ..Default::default() };
        let arrivals = PoissonArrivals::from_config(&config).unwrap();
        let mut sim = SimBuilder::new(config.clone(), arrivals)
            .rng(SimRng::new(5))
            .build()
            .unwrap();
        assert_eq!(sim.run(&mut NoopObserver).unwrap(), run_default(config));
    }

    #[test]
    fn conservation_without_horizon_pressure() {
        for strategy in [SelectionStrategy::ShortestQueue, SelectionStrategy::Random] {
            let config = CafeteriaConfig { strategy, ..unbounded_config(3) };
            let min_visit = config.min_visit_secs();
            let mut sim = Sim::from_config(config).unwrap();
            let mut checker = InvariantChecker::default();
            let outcome = sim.run(&mut checker).unwrap();

            assert!((200..=300).contains(&outcome.population));
            assert_eq!(outcome.spawned, outcome.population);
            assert_eq!(outcome.completed(), outcome.population as usize);
            assert_eq!(outcome.abandoned, 0);
            assert_eq!(outcome.seats_held, 0);
            assert_eq!(checker.departures, outcome.completed());
            assert!(outcome.samples.iter().all(|&s| s >= min_visit), "sample below stage minimum");

            // Everyone left: all resources idle, all counters back to zero.
            assert!(sim.queue.is_empty());
            assert_eq!(sim.state.facility.seating.in_use(), 0);
            assert_eq!(sim.state.facility.queue_lens(), vec![0, 0]);
        }
    }

    #[test]
    fn horizon_accounting() {
        let mut sim = Sim::from_config(CafeteriaConfig { seed: 9, ..Default::default() }).unwrap();
        let outcome = sim.run(&mut InvariantChecker::default()).unwrap();

        assert_eq!(outcome.spawned, sim.state.departed() + outcome.abandoned);
        assert_eq!(outcome.completed(), sim.state.departed() as usize);
        assert!(outcome.final_time <= sim.horizon());
        assert!(outcome.samples.iter().all(|&s| s <= 5_400.0));
        assert_eq!(sim.state.facility.seating.in_use(), outcome.seats_held);
    }

    #[test]
    fn step_matches_run() {
        let mut stepped = fixed_sim(saturation_config(1), vec![0.0, 1.0, 2.0]);
        let mut times = vec![];
        while let Some(t) = stepped.step(&mut NoopObserver).unwrap() {
            times.push(t);
        }
        assert!(times.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(times.last(), Some(&SimTime(75.0)));

        let mut ran = fixed_sim(saturation_config(1), vec![0.0, 1.0, 2.0]);
        ran.run(&mut NoopObserver).unwrap();
        assert_eq!(stepped.samples(), ran.samples());
    }
}

// ── Invariant violations ──────────────────────────────────────────────────────

#[cfg(test)]
mod fault_tests {
    use super::*;

    /// Produces a negative gap after the first visitor.
    struct Broken;

    impl ArrivalProcess for Broken {
        fn population(&mut self, _rng: &mut SimRng) -> u32 {
            2
        }

        fn gap_after(&mut self, _index: u32, _rng: &mut SimRng) -> f64 {
            -1.0
        }
    }

    /// Fixed population with a constant gap; counts gap draws.
    struct ConstantGaps {
        population: u32,
        gap:        f64,
        draws:      u32,
    }

    impl ArrivalProcess for ConstantGaps {
        fn population(&mut self, _rng: &mut SimRng) -> u32 {
            self.population
        }

        fn gap_after(&mut self, _index: u32, _rng: &mut SimRng) -> f64 {
            self.draws += 1;
            self.gap
        }
    }

    #[test]
    fn gap_drawn_after_every_spawn() {
        let arrivals = ConstantGaps { population: 3, gap: 0.0, draws: 0 };
        let mut sim = SimBuilder::new(saturation_config(3), arrivals).build().unwrap();
        let outcome = sim.run(&mut NoopObserver).unwrap();
        assert_eq!(outcome.spawned, 3);
        assert_eq!(sim.arrivals.draws, 3);
    }

    #[test]
    fn gap_after_last_visitor_is_never_scheduled() {
        let arrivals = ConstantGaps { population: 1, gap: -1.0, draws: 0 };
        let mut sim = SimBuilder::new(saturation_config(3), arrivals).build().unwrap();
        let outcome = sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.arrivals.draws, 1);
        assert_eq!(outcome.samples, vec![35.0]);
    }

    #[test]
    fn negative_delay_aborts_run() {
        let mut sim = SimBuilder::new(saturation_config(3), Broken).build().unwrap();
        let result = sim.run(&mut NoopObserver);
        assert!(matches!(
            result,
            Err(SimError::Engine(EngineError::InvalidDelay { delay })) if delay == -1.0
        ));
        assert!(sim.samples().is_empty());
    }
}
