use bd_cabin::CabinError;
use bd_core::PassengerId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PassengerError {
    #[error("passenger {0} not found")]
    NotFound(PassengerId),

    #[error("passenger {0} is not on the grid")]
    NotOnGrid(PassengerId),

    #[error("profile configuration error: {0}")]
    Config(String),

    #[error("cabin invariant violated: {0}")]
    Cabin(#[from] CabinError),
}

pub type PassengerResult<T> = Result<T, PassengerError>;
