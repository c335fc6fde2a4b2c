use thiserror::Error;

//errors raised before a simulation is allowed to start
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl SimulationError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        SimulationError::InvalidArgument(message.into())
    }
}

pub type Result<T> = std::result::Result<T, SimulationError>;
