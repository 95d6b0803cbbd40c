//! `cs-core` — foundational types for the `cafsim` cafeteria simulator.
//!
//! This crate is a dependency of every other `cs-*` crate.  It has no `cs-*`
//! dependencies and minimal external ones (`rand`, `rand_distr`, `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                 |
//! |-------------|----------------------------------------------------------|
//! | [`ids`]     | `VisitorId`, `StoreId`                                   |
//! | [`time`]    | `SimTime`, `SimClock`, `hms`                             |
//! | [`rng`]     | `SimRng` (the run's single injectable RNG)               |
//! | [`config`]  | `CafeteriaConfig`, `Span`, `CountRange`, `SelectionStrategy` |
//! | [`error`]   | `CoreError`, `CoreResult`                                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{CafeteriaConfig, CountRange, SelectionStrategy, Span};
pub use error::{CoreError, CoreResult};
pub use ids::{StoreId, VisitorId};
pub use rng::SimRng;
pub use time::{SimClock, SimTime, hms};
