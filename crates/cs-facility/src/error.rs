use cs_core::StoreId;
use cs_engine::EngineError;
use thiserror::Error;

use crate::Stage;

#[derive(Debug, Error)]
pub enum FacilityError {
    #[error("facility configuration error: {0}")]
    Config(String),

    #[error("{0} does not exist")]
    UnknownStore(StoreId),

    #[error("stage {0} does not hold a resource")]
    NoResource(Stage),

    #[error("queue counter of {0} would drop below zero")]
    CounterUnderflow(StoreId),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

pub type FacilityResult<T> = Result<T, FacilityError>;
