use fdm_agent::AgentError;
use fdm_behavior::BehaviorError;
use fdm_core::FdmError;
use fdm_hazard::HazardError;
use fdm_spatial::SpatialError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("{what} length {got} does not match household count {expected}")]
    AgentCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error(transparent)]
    Core(#[from] FdmError),

    #[error(transparent)]
    Spatial(#[from] SpatialError),

    #[error(transparent)]
    Hazard(#[from] HazardError),

    #[error("household state: {0}")]
    Agent(#[from] AgentError),

    #[error(transparent)]
    Behavior(#[from] BehaviorError),
}

pub type SimResult<T> = Result<T, SimError>;
