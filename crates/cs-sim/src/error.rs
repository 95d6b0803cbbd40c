use cs_core::{CoreError, VisitorId};
use cs_engine::EngineError;
use cs_facility::FacilityError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] CoreError),

    #[error("engine invariant violated: {0}")]
    Engine(#[from] EngineError),

    #[error("facility error: {0}")]
    Facility(#[from] FacilityError),

    #[error("{0} is not a spawned visitor")]
    UnknownVisitor(VisitorId),

    #[error("{0} reached a service stage without choosing a store")]
    NoStore(VisitorId),
}

pub type SimResult<T> = Result<T, SimError>;
