//! Per-visitor state: lifecycle stage and suspension marker.

use std::fmt;

use cs_core::{SimTime, StoreId, VisitorId};

/// Where a visitor is in its trip through the cafeteria.
///
/// Stages only ever advance in declaration order; `Arrived` is the initial
/// stage and `Departed` the terminal one.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Arrived,
    Ordering,
    Paying,
    Seating,
    Departed,
}

impl Stage {
    /// The stage that follows `self`.  `Departed` is absorbing.
    pub fn next(self) -> Stage {
        match self {
            Stage::Arrived  => Stage::Ordering,
            Stage::Ordering => Stage::Paying,
            Stage::Paying   => Stage::Seating,
            Stage::Seating | Stage::Departed => Stage::Departed,
        }
    }

    /// `true` for the three stages that occupy a resource slot.
    pub fn holds_resource(self) -> bool {
        matches!(self, Stage::Ordering | Stage::Paying | Stage::Seating)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Arrived  => "arrived",
            Stage::Ordering => "ordering",
            Stage::Paying   => "paying",
            Stage::Seating  => "seating",
            Stage::Departed => "departed",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a visitor is currently suspended on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Wait {
    /// Not suspended: about to request the current stage's resource.
    Ready,
    /// Queued on the current stage's resource.
    Resource,
    /// Holding the current stage's resource until a timer fires.
    Timer,
}

/// One visitor's record.
///
/// Created by the arrival process and mutated only by its own visitor
/// process.  Once `Departed`, the only thing that matters is
/// [`elapsed`][Self::elapsed].
#[derive(Clone, Debug)]
pub struct Visitor {
    pub id:        VisitorId,
    pub arrival:   SimTime,
    /// Set when the visitor leaves `Arrived`.
    pub store:     Option<StoreId>,
    pub stage:     Stage,
    pub wait:      Wait,
    pub departure: Option<SimTime>,
}

impl Visitor {
    pub fn new(id: VisitorId, arrival: SimTime) -> Self {
        Self {
            id,
            arrival,
            store:     None,
            stage:     Stage::Arrived,
            wait:      Wait::Ready,
            departure: None,
        }
    }

    pub fn has_departed(&self) -> bool {
        self.stage == Stage::Departed
    }

    /// Total seconds spent in the cafeteria, once departed.
    pub fn elapsed(&self) -> Option<f64> {
        self.departure.map(|d| d.since(self.arrival))
    }
}
