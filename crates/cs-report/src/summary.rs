//! Descriptive statistics over a sample set of elapsed times.

/// Statistics of one run's samples, all in seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Summary {
    pub count:   usize,
    pub mean:    f64,
    pub median:  f64,
    /// Population standard deviation.
    pub std_dev: f64,
    pub min:     f64,
    pub max:     f64,
    /// 95th percentile, linearly interpolated.
    pub p95:     f64,
}

impl Summary {
    /// `None` for an empty sample set.
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        let mut sorted = samples.to_vec();
        sorted.sort_by(f64::total_cmp);

        let n = sorted.len() as f64;
        let mean = sorted.iter().sum::<f64>() / n;
        let variance = sorted.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n;

        Some(Self {
            count:   sorted.len(),
            mean,
            median:  percentile_sorted(&sorted, 50.0)?,
            std_dev: variance.sqrt(),
            min:     sorted[0],
            max:     sorted[sorted.len() - 1],
            p95:     percentile_sorted(&sorted, 95.0)?,
        })
    }
}

/// The `q`-th percentile (0–100) of `samples`, interpolating linearly
/// between the two nearest ranks.
pub fn percentile(samples: &[f64], q: f64) -> Option<f64> {
    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);
    percentile_sorted(&sorted, q)
}

fn percentile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=100.0).contains(&q) {
        return None;
    }
    let rank = q / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Trailing mean over every full `window` of consecutive samples.
///
/// Yields `len - window + 1` values; empty when `window` is zero or longer
/// than the series.
pub fn moving_average(samples: &[f64], window: usize) -> Vec<f64> {
    if window == 0 {
        return Vec::new();
    }
    samples
        .windows(window)
        .map(|w| w.iter().sum::<f64>() / window as f64)
        .collect()
}

/// Departures per simulated minute over a horizon of `horizon_secs`.
pub fn service_rate_per_minute(departures: usize, horizon_secs: f64) -> f64 {
    if horizon_secs <= 0.0 {
        return 0.0;
    }
    departures as f64 / (horizon_secs / 60.0)
}
