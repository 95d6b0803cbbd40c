//! Plain data row types written by output backends.

use cs_facility::Visitor;

/// One departed visitor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepartureRow {
    pub visitor_id:     u32,
    /// `u32::MAX` if the visitor never chose a store.
    pub store_id:       u32,
    /// Simulated seconds since the start of the run.
    pub arrival_secs:   f64,
    pub departure_secs: f64,
    pub elapsed_secs:   f64,
}

impl DepartureRow {
    /// `None` while the visitor is still inside.
    pub fn from_visitor(visitor: &Visitor) -> Option<Self> {
        let departure = visitor.departure?;
        Some(Self {
            visitor_id:     visitor.id.0,
            store_id:       visitor.store.map_or(u32::MAX, |s| s.0),
            arrival_secs:   visitor.arrival.secs(),
            departure_secs: departure.secs(),
            elapsed_secs:   departure.since(visitor.arrival),
        })
    }
}
