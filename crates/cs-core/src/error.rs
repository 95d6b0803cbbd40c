//! Core error type.
//!
//! Downstream crates either wrap `CoreError` as one variant of their own enum
//! (see `cs_sim::SimError`) or return it directly.

use thiserror::Error;

/// Errors raised by `cs-core` — almost exclusively configuration faults,
/// which must be rejected before a run starts.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("unknown selection strategy {0:?} (expected \"shortest_queue\" or \"random\")")]
    UnknownStrategy(String),

    #[error("invalid distribution parameter: {0}")]
    Distribution(String),
}

/// Shorthand result type for `cs-core`.
pub type CoreResult<T> = Result<T, CoreError>;
