//! Run configuration.
//!
//! `CafeteriaConfig` is a flat, read-only parameter set.  It is typically
//! loaded from a JSON file by the application crate (enable the `serde`
//! feature) and must pass [`CafeteriaConfig::validate`] before a run starts —
//! every configuration fault is a startup error, never a mid-run surprise.

use std::fmt;
use std::str::FromStr;

use crate::{CoreError, CoreResult};

// ── Span ──────────────────────────────────────────────────────────────────────

/// A closed `[min, max]` range of seconds for a uniformly drawn duration.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub min: f64,
    pub max: f64,
}

impl Span {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// A degenerate span that always yields `secs`.
    pub const fn fixed(secs: f64) -> Self {
        Self { min: secs, max: secs }
    }

    fn check(&self, what: &str) -> CoreResult<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(CoreError::Config(format!("{what} range must be finite")));
        }
        if self.min < 0.0 {
            return Err(CoreError::Config(format!(
                "{what} range minimum {} is negative",
                self.min
            )));
        }
        if self.min > self.max {
            return Err(CoreError::Config(format!(
                "{what} range is inverted ({} > {})",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

// ── CountRange ────────────────────────────────────────────────────────────────

/// An inclusive integer range for the per-run visitor population.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CountRange {
    pub min: u32,
    pub max: u32,
}

impl CountRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }
}

impl fmt::Display for CountRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

// ── SelectionStrategy ─────────────────────────────────────────────────────────

/// How an arriving visitor picks a store.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
///
/// With the `serde` feature the strategy (de)serializes as its string form,
/// parsed through [`FromStr`], so an unknown name fails the config load.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub enum SelectionStrategy {
    /// Store with the fewest committed visitors; ties go to the lowest index.
    #[default]
    ShortestQueue,
    /// Uniformly random store.
    Random,
}

impl SelectionStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            SelectionStrategy::ShortestQueue => "shortest_queue",
            SelectionStrategy::Random => "random",
        }
    }
}

impl fmt::Display for SelectionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SelectionStrategy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "shortest_queue" => Ok(SelectionStrategy::ShortestQueue),
            "random" => Ok(SelectionStrategy::Random),
            other => Err(CoreError::UnknownStrategy(other.to_owned())),
        }
    }
}

impl TryFrom<String> for SelectionStrategy {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<SelectionStrategy> for String {
    fn from(strategy: SelectionStrategy) -> String {
        strategy.as_str().to_owned()
    }
}

// ── CafeteriaConfig ───────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// `Default` reproduces the reference lunch period: 11:30–13:00, two stores
/// with two servers and one cashier each, 100 seats, 200–300 visitors.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CafeteriaConfig {
    /// Seconds after midnight at which the run starts.
    pub start_time_secs: f64,
    /// Seconds after midnight at which the run is cut off.
    pub end_time_secs: f64,

    pub stores: u32,
    pub servers_per_store: u32,
    pub cashiers_per_store: u32,
    pub seating_capacity: u32,

    /// Total visitor count is drawn once per run from this inclusive range.
    pub visitors: CountRange,

    pub order_time: Span,
    pub payment_time: Span,
    pub eating_time: Span,

    pub strategy: SelectionStrategy,

    /// Master RNG seed.  The same seed always produces identical samples.
    pub seed: u64,
}

impl Default for CafeteriaConfig {
    fn default() -> Self {
        Self {
            start_time_secs: 41_400.0,
            end_time_secs: 46_800.0,
            stores: 2,
            servers_per_store: 2,
            cashiers_per_store: 1,
            seating_capacity: 100,
            visitors: CountRange::new(200, 300),
            order_time: Span::new(30.0, 60.0),
            payment_time: Span::new(20.0, 45.0),
            eating_time: Span::new(900.0, 1_800.0),
            strategy: SelectionStrategy::ShortestQueue,
            seed: 42,
        }
    }
}

impl CafeteriaConfig {
    /// Length of the simulated period in seconds (`end − start`).
    #[inline]
    pub fn horizon_secs(&self) -> f64 {
        self.end_time_secs - self.start_time_secs
    }

    /// Shortest possible order + payment + eating time for one visitor.
    pub fn min_visit_secs(&self) -> f64 {
        self.order_time.min + self.payment_time.min + self.eating_time.min
    }

    /// Reject every configuration fault up front.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.start_time_secs.is_finite() || !self.end_time_secs.is_finite() {
            return Err(CoreError::Config("start/end time must be finite".into()));
        }
        if self.end_time_secs <= self.start_time_secs {
            return Err(CoreError::Config(format!(
                "end time {} must be after start time {}",
                self.end_time_secs, self.start_time_secs
            )));
        }
        for (value, what) in [
            (self.stores, "store count"),
            (self.servers_per_store, "servers per store"),
            (self.cashiers_per_store, "cashiers per store"),
            (self.seating_capacity, "seating capacity"),
        ] {
            if value == 0 {
                return Err(CoreError::Config(format!("{what} must be positive")));
            }
        }
        if self.visitors.min > self.visitors.max {
            return Err(CoreError::Config(format!(
                "visitor range is inverted ({} > {})",
                self.visitors.min, self.visitors.max
            )));
        }
        self.order_time.check("order time")?;
        self.payment_time.check("payment time")?;
        self.eating_time.check("eating time")?;
        Ok(())
    }
}
