//! Simulation time model.
//!
//! # Design
//!
//! Time is a continuous scalar: seconds since the start of the run, stored as
//! `f64` inside [`SimTime`].  Service durations are drawn from continuous
//! distributions, so an integer tick would either lose precision or force an
//! arbitrary resolution on every configuration.
//!
//! `SimTime` is totally ordered via [`f64::total_cmp`] so it can key a
//! `BTreeMap`.  Constructors never produce NaN; the event queue rejects
//! non-finite delays before they reach the clock.
//!
//! The mapping to time of day is held in [`SimClock`]:
//!
//!   wall_secs = start_secs + now
//!
//! where `start_secs` is seconds after midnight (41 400 = 11:30).

use std::cmp::Ordering;
use std::fmt;

// ── SimTime ──────────────────────────────────────────────────────────────────

/// An absolute simulation instant, in seconds since the run started.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    #[inline]
    pub fn secs(self) -> f64 {
        self.0
    }

    /// Seconds elapsed from `earlier` to `self`.  Negative if `earlier` is
    /// actually later.
    #[inline]
    pub fn since(self, earlier: SimTime) -> f64 {
        self.0 - earlier.0
    }
}

impl Eq for SimTime {}

impl PartialOrd for SimTime {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SimTime {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl std::ops::Add<f64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: f64) -> SimTime {
        SimTime(self.0 + rhs)
    }
}

impl std::ops::Sub for SimTime {
    type Output = f64;
    #[inline]
    fn sub(self, rhs: SimTime) -> f64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={:.3}s", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// The run's virtual clock.
///
/// Only the event queue moves it (via [`advance_to`][Self::advance_to]); every
/// other component reads `now`.
#[derive(Clone, Debug)]
pub struct SimClock {
    /// Seconds after midnight that `SimTime::ZERO` corresponds to.
    pub start_secs: f64,
    now: SimTime,
}

impl SimClock {
    pub fn new(start_secs: f64) -> Self {
        Self { start_secs, now: SimTime::ZERO }
    }

    #[inline]
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Move the clock forward to `t`.
    ///
    /// Returns `false` (and leaves the clock untouched) if `t` lies in the
    /// past — the clock is monotonically non-decreasing.
    #[inline]
    pub fn advance_to(&mut self, t: SimTime) -> bool {
        if t < self.now {
            return false;
        }
        self.now = t;
        true
    }

    /// Seconds after midnight corresponding to `now`.
    #[inline]
    pub fn wall_secs(&self) -> f64 {
        self.start_secs + self.now.0
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", hms(self.wall_secs()), self.now)
    }
}

/// Render seconds as `h:mm:ss`, truncating fractional seconds.
///
/// Negative inputs are clamped to zero.
pub fn hms(secs: f64) -> String {
    let total = secs.max(0.0) as u64;
    let hours = total / 3_600;
    let minutes = (total % 3_600) / 60;
    let seconds = total % 60;
    format!("{hours}:{minutes:02}:{seconds:02}")
}
