//! Plain-text run report.

use std::fmt;

use cs_core::{CafeteriaConfig, hms};

use crate::summary::{Summary, moving_average, service_rate_per_minute};

/// Window of the arrival-order moving average shown in the report.
pub const MOVING_WINDOW: usize = 10;

/// A printable report: the configuration block followed by the results
/// block, or "no data" when nobody departed.
pub struct Report<'a> {
    pub config:  &'a CafeteriaConfig,
    pub samples: &'a [f64],
}

impl<'a> Report<'a> {
    pub fn new(config: &'a CafeteriaConfig, samples: &'a [f64]) -> Self {
        Self { config, samples }
    }
}

/// Render the report for one run as a string.
pub fn render_report(config: &CafeteriaConfig, samples: &[f64]) -> String {
    Report::new(config, samples).to_string()
}

/// `"20.1 min (1206 sec)"`
struct Minutes(f64);

impl fmt::Display for Minutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} min ({:.0} sec)", self.0 / 60.0, self.0)
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.config;
        writeln!(f, "=== Simulation Summary ===")?;
        writeln!(f, "Simulation Configuration:")?;
        writeln!(f, "Time: {} - {}", hms(c.start_time_secs), hms(c.end_time_secs))?;
        writeln!(f, "Stores: {}", c.stores)?;
        writeln!(f, "Servers per store: {}", c.servers_per_store)?;
        writeln!(f, "Cashiers per store: {}", c.cashiers_per_store)?;
        writeln!(f, "Seating capacity: {}", c.seating_capacity)?;
        writeln!(f, "Visitors range: {}", c.visitors)?;
        writeln!(f, "Queue strategy: {}", c.strategy)?;
        writeln!(f, "Seed: {}", c.seed)?;
        writeln!(f)?;
        writeln!(f, "Service Times (seconds):")?;
        writeln!(f, "Order time: {}", c.order_time)?;
        writeln!(f, "Payment time: {}", c.payment_time)?;
        writeln!(f, "Eating time: {}", c.eating_time)?;
        writeln!(f)?;
        writeln!(f, "Simulation Results:")?;
        writeln!(f)?;

        let Some(s) = Summary::from_samples(self.samples) else {
            return writeln!(f, "no data");
        };
        writeln!(f, "Visitors served: {}", s.count)?;
        writeln!(f, "Average wait: {}", Minutes(s.mean))?;
        writeln!(f, "Median wait: {}", Minutes(s.median))?;
        writeln!(f, "Std deviation: {}", Minutes(s.std_dev))?;
        writeln!(f, "Min wait: {}", Minutes(s.min))?;
        writeln!(f, "Max wait: {}", Minutes(s.max))?;
        writeln!(f, "95th percentile: {}", Minutes(s.p95))?;

        let trend = moving_average(self.samples, MOVING_WINDOW);
        if let (Some(first), Some(last)) = (trend.first(), trend.last()) {
            writeln!(
                f,
                "{MOVING_WINDOW}-visitor moving average: {:.1} min → {:.1} min",
                first / 60.0,
                last / 60.0
            )?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "Service Rate: {:.2} visitors/minute",
            service_rate_per_minute(s.count, c.horizon_secs())
        )
    }
}
