//! `cs-engine` — the discrete-event core: clock, event queue, and resources.
//!
//! # Crate layout
//!
//! | Module           | Contents                                          |
//! |------------------|---------------------------------------------------|
//! | [`event_queue`]  | `EventQueue<E>` (`BTreeMap<(SimTime, seq), E>`), `EventKey` |
//! | [`resource`]     | `Resource<W>`, `Acquire`                          |
//! | [`error`]        | `EngineError`, `EngineResult<T>`                  |
//!
//! # Execution model (summary)
//!
//! ```text
//! loop:
//!   (t, event) = queue.advance()      // clock := t
//!   dispatch(event)                   // may acquire/release resources and
//!                                     // schedule(delay, next_event)
//! ```
//!
//! Everything runs on one thread of control.  Between two pops nothing else
//! can observe or mutate state, so resources need no locking and the whole
//! run is deterministic for a fixed scheduling order.

pub mod error;
pub mod event_queue;
pub mod resource;


pub use error::{EngineError, EngineResult};
pub use event_queue::{EventKey, EventQueue};
pub use resource::{Acquire, Resource};
