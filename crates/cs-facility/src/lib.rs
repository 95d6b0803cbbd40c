//! `cs-facility` — the cafeteria being simulated.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`facility`]   | `Store` (servers, cashier, queue counter), `Facility`     |
//! | [`selector`]   | `StoreSelector` trait, `ShortestQueue`, `RandomStore`     |
//! | [`visitor`]    | `Visitor`, `Stage`, `Wait`                                |
//! | [`error`]      | `FacilityError`, `FacilityResult<T>`                      |
//!
//! # Design notes
//!
//! Nothing in this crate advances time.  The facility is a passive set of
//! resources and counters; `cs-sim` drives visitors through it one event at
//! a time, which keeps every mutation here single-threaded and ordered.

pub mod error;
pub mod facility;
pub mod selector;
pub mod visitor;

#[cfg(test)]
mod tests;

pub use error::{FacilityError, FacilityResult};
pub use facility::{Facility, Store};
pub use selector::{RandomStore, ShortestQueue, StoreSelector, selector_for};
pub use visitor::{Stage, Visitor, Wait};
