use thiserror::Error;

/// Invariant violations inside the engine.
///
/// None of these are recoverable: they indicate a bug in the caller, and the
/// simulation driver aborts the run as soon as one surfaces.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("cannot schedule with delay {delay} (must be finite and non-negative)")]
    InvalidDelay { delay: f64 },

    #[error("resource {resource:?} must have a positive capacity")]
    ZeroCapacity { resource: String },

    #[error("resource {resource:?} would exceed its capacity of {capacity}")]
    OverCapacity { resource: String, capacity: usize },

    #[error("resource {resource:?} released while no slot was held")]
    ReleaseIdle { resource: String },
}

pub type EngineResult<T> = Result<T, EngineError>;
