//! Arrival processes — how many visitors come, and when.

use rand_distr::Exp;

use cs_core::{CafeteriaConfig, CoreError, CountRange, SimRng};

use crate::SimResult;

/// Drives the arrival generator.
///
/// The driver calls [`population`][Self::population] exactly once when the
/// run starts, spawns visitor 0 after [`first_delay`][Self::first_delay],
/// and after spawning visitor `i` waits [`gap_after`][Self::gap_after]`(i)`
/// before spawning `i + 1`, until `population` visitors exist.
pub trait ArrivalProcess {
    /// Total number of visitors for this run.
    fn population(&mut self, rng: &mut SimRng) -> u32;

    /// Delay between the start of the run and the first arrival.
    fn first_delay(&mut self, _rng: &mut SimRng) -> f64 {
        0.0
    }

    /// Delay between spawning visitor `index` and visitor `index + 1`.
    fn gap_after(&mut self, index: u32, rng: &mut SimRng) -> f64;
}

// ── PoissonArrivals ───────────────────────────────────────────────────────────

/// Uniformly drawn population, exponential inter-arrival gaps.
#[derive(Clone, Debug)]
pub struct PoissonArrivals {
    range: CountRange,
    gaps:  Exp<f64>,
}

impl PoissonArrivals {
    /// `rate` is arrivals per simulated second; it must be positive.
    pub fn new(range: CountRange, rate: f64) -> SimResult<Self> {
        if range.min > range.max {
            return Err(CoreError::Config(format!(
                "visitor range is inverted ({} > {})",
                range.min, range.max
            ))
            .into());
        }
        let gaps = Exp::new(rate)
            .map_err(|e| CoreError::Distribution(format!("arrival rate {rate}: {e}")))?;
        Ok(Self { range, gaps })
    }

    /// Population from `config.visitors`, one arrival per second on average.
    pub fn from_config(config: &CafeteriaConfig) -> SimResult<Self> {
        Self::new(config.visitors, 1.0)
    }
}

impl ArrivalProcess for PoissonArrivals {
    fn population(&mut self, rng: &mut SimRng) -> u32 {
        rng.gen_range(self.range.min..=self.range.max)
    }

    fn gap_after(&mut self, _index: u32, rng: &mut SimRng) -> f64 {
        rng.sample(&self.gaps)
    }
}

// ── FixedArrivals ─────────────────────────────────────────────────────────────

/// Visitors arrive at explicit instants.  Consumes no randomness.
#[derive(Clone, Debug, Default)]
pub struct FixedArrivals {
    times: Vec<f64>,
    count: u32,
}

impl FixedArrivals {
    /// `times` are absolute arrival instants in seconds; they must be finite,
    /// non-negative, and sorted.
    pub fn new(times: Vec<f64>) -> SimResult<Self> {
        if times.iter().any(|t| !t.is_finite() || *t < 0.0) {
            return Err(CoreError::Config("arrival times must be finite and non-negative".into()).into());
        }
        if times.windows(2).any(|w| w[1] < w[0]) {
            return Err(CoreError::Config("arrival times must be sorted".into()).into());
        }
        let count = u32::try_from(times.len())
            .map_err(|_| CoreError::Config(format!("{} arrival times is too many", times.len())))?;
        Ok(Self { times, count })
    }
}

impl ArrivalProcess for FixedArrivals {
    fn population(&mut self, _rng: &mut SimRng) -> u32 {
        self.count
    }

    fn first_delay(&mut self, _rng: &mut SimRng) -> f64 {
        self.times.first().copied().unwrap_or(0.0)
    }

    fn gap_after(&mut self, index: u32, _rng: &mut SimRng) -> f64 {
        let i = index as usize;
        match (self.times.get(i), self.times.get(i + 1)) {
            (Some(now), Some(next)) => next - now,
            _ => 0.0,
        }
    }
}
