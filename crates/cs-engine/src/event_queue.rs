//! `EventQueue` — the run's clock plus its ordered timeline of pending events.
//!
//! # Ordering
//!
//! Events are keyed by `(due, seq)` where `seq` is a counter assigned at
//! scheduling time.  Two events due at the same instant therefore pop in the
//! order they were scheduled, which is what makes a run with a fixed seed
//! reproducible.
//!
//! # Performance note
//!
//! `BTreeMap` gives O(log E) insert and O(log E) pop where E = number of
//! pending events.  A lunch period holds at most one pending event per
//! visitor plus the arrival generator, so E stays in the hundreds.

use std::collections::BTreeMap;

use cs_core::{SimClock, SimTime};

use crate::{EngineError, EngineResult};

/// Position of one event in the timeline.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct EventKey {
    pub due: SimTime,
    pub seq: u64,
}

/// A priority queue of `E` payloads that owns the simulation clock.
///
/// The clock only moves when an event is popped ([`advance`][Self::advance])
/// or when [`run_until`][Self::run_until] halts at its horizon.
pub struct EventQueue<E> {
    clock:    SimClock,
    pending:  BTreeMap<EventKey, E>,
    next_seq: u64,
}

impl<E> EventQueue<E> {
    pub fn new(clock: SimClock) -> Self {
        Self { clock, pending: BTreeMap::new(), next_seq: 0 }
    }

    #[inline]
    pub fn now(&self) -> SimTime {
        self.clock.now()
    }

    #[inline]
    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    /// Schedule `event` to fire `delay` seconds from now.
    ///
    /// A negative, NaN, or infinite delay is a programming error and is
    /// reported as [`EngineError::InvalidDelay`]; it is never clamped.
    pub fn schedule(&mut self, delay: f64, event: E) -> EngineResult<EventKey> {
        if !delay.is_finite() || delay < 0.0 {
            return Err(EngineError::InvalidDelay { delay });
        }
        let key = EventKey { due: self.clock.now() + delay, seq: self.next_seq };
        self.next_seq += 1;
        self.pending.insert(key, event);
        Ok(key)
    }

    /// Pop the earliest event, move the clock to its due time, and return it.
    ///
    /// Returns `None` when nothing is pending.
    pub fn advance(&mut self) -> Option<(SimTime, E)> {
        let (key, event) = self.pending.pop_first()?;
        // Keys are never earlier than `now` (delays are non-negative), so the
        // clock cannot refuse this move.
        self.clock.advance_to(key.due);
        Some((key.due, event))
    }

    /// Like [`advance`][Self::advance], but leaves the queue untouched if the
    /// earliest event is due after `horizon`.
    pub fn advance_until(&mut self, horizon: SimTime) -> Option<(SimTime, E)> {
        match self.peek_time() {
            Some(due) if due <= horizon => self.advance(),
            _ => None,
        }
    }

    /// Repeatedly pop events due at or before `horizon` and hand each to
    /// `handler`, which may schedule further events through the `&mut Self`
    /// it receives.
    ///
    /// Stops when the queue is empty or the next event lies beyond the
    /// horizon; in the latter case the clock is moved to `horizon`.  The first
    /// handler error aborts the loop and is returned unchanged.
    ///
    /// Returns the number of events dispatched.
    pub fn run_until<F, Err>(&mut self, horizon: SimTime, mut handler: F) -> Result<usize, Err>
    where
        F: FnMut(&mut Self, SimTime, E) -> Result<(), Err>,
    {
        let mut dispatched = 0;
        while let Some((due, event)) = self.advance_until(horizon) {
            handler(self, due, event)?;
            dispatched += 1;
        }
        if !self.pending.is_empty() {
            self.clock.advance_to(horizon);
        }
        Ok(dispatched)
    }

    /// Due time of the earliest pending event, or `None` if empty.
    pub fn peek_time(&self) -> Option<SimTime> {
        self.pending.keys().next().map(|k| k.due)
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Total events ever scheduled on this queue.
    pub fn scheduled_total(&self) -> u64 {
        self.next_seq
    }
}
