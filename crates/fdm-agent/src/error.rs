use fdm_core::{AgentId, FdmError};
use thiserror::Error;

use crate::Status;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("household record {index}: {source}")]
    InvalidRecord {
        index:  usize,
        #[source]
        source: FdmError,
    },

    #[error("{agent}: {field} = {value} is outside [0, 1]")]
    OutOfUnitRange {
        agent: AgentId,
        field: &'static str,
        value: f64,
    },

    #[error("{agent}: displacement_time {years} does not match status {status}")]
    DisplacementOutOfSync {
        agent:  AgentId,
        status: Status,
        years:  u32,
    },

    #[error(transparent)]
    Core(#[from] FdmError),
}

pub type AgentResult<T> = Result<T, AgentError>;
