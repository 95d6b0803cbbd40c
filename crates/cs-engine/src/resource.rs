//! `Resource` — a capacity-limited contention point with FIFO grants.
//!
//! A resource never invokes anything itself.  `acquire` tells the caller
//! whether it may proceed now; `release` hands back the waiter (if any) that
//! has just been granted the freed slot, and the caller is responsible for
//! resuming it at the current instant.  Keeping continuations out of the
//! resource lets the simulation driver own all control flow.

use std::collections::VecDeque;

use crate::{EngineError, EngineResult};

/// Outcome of [`Resource::acquire`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Acquire {
    /// A slot was free and is now held by the caller.
    Granted,
    /// All slots are busy; the waiter sits at `position` (0 = next in line).
    Queued { position: usize },
}

/// A resource with `capacity` identical slots and a FIFO wait list of `W`.
///
/// Invariant: `in_use <= capacity`, and the wait list is non-empty only
/// while every slot is held.
#[derive(Debug)]
pub struct Resource<W> {
    name:       String,
    capacity:   usize,
    in_use:     usize,
    waiting:    VecDeque<W>,
    grants:     u64,
    peak_queue: usize,
}

impl<W> Resource<W> {
    /// Create an idle resource.  `capacity == 0` is rejected.
    pub fn new(name: impl Into<String>, capacity: u32) -> EngineResult<Self> {
        let name = name.into();
        if capacity == 0 {
            return Err(EngineError::ZeroCapacity { resource: name });
        }
        Ok(Self {
            name,
            capacity: capacity as usize,
            in_use: 0,
            waiting: VecDeque::new(),
            grants: 0,
            peak_queue: 0,
        })
    }

    /// Request one slot for `waiter`.
    ///
    /// Grants immediately if a slot is free (no clock advance); otherwise
    /// appends `waiter` to the back of the wait list.
    pub fn acquire(&mut self, waiter: W) -> EngineResult<Acquire> {
        if self.in_use < self.capacity {
            self.grant()?;
            return Ok(Acquire::Granted);
        }
        self.waiting.push_back(waiter);
        self.peak_queue = self.peak_queue.max(self.waiting.len());
        Ok(Acquire::Queued { position: self.waiting.len() - 1 })
    }

    /// Give one slot back.
    ///
    /// If anyone is waiting, the head of the wait list is granted the freed
    /// slot and returned; the caller must resume it before the clock moves.
    pub fn release(&mut self) -> EngineResult<Option<W>> {
        if self.in_use == 0 {
            return Err(EngineError::ReleaseIdle { resource: self.name.clone() });
        }
        self.in_use -= 1;
        let next = self.waiting.pop_front();
        if next.is_some() {
            self.grant()?;
        }
        Ok(next)
    }

    fn grant(&mut self) -> EngineResult<()> {
        if self.in_use >= self.capacity {
            return Err(EngineError::OverCapacity {
                resource: self.name.clone(),
                capacity: self.capacity,
            });
        }
        self.in_use += 1;
        self.grants += 1;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn force_in_use(&mut self, in_use: usize) {
        self.in_use = in_use;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn in_use(&self) -> usize {
        self.in_use
    }

    /// Number of waiters not yet granted.
    pub fn queued(&self) -> usize {
        self.waiting.len()
    }

    pub fn is_saturated(&self) -> bool {
        self.in_use == self.capacity
    }

    /// Waiters in grant order.
    pub fn waiters(&self) -> impl Iterator<Item = &W> {
        self.waiting.iter()
    }

    /// Slots granted over the resource's lifetime.
    pub fn grants_total(&self) -> u64 {
        self.grants
    }

    /// Longest the wait list has ever been.
    pub fn peak_queue(&self) -> usize {
        self.peak_queue
    }
}
