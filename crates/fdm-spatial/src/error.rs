//! Spatial-subsystem error type.

use thiserror::Error;

use fdm_core::{AgentId, GeoPoint};

/// Errors produced by `fdm-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("household {agent} has a non-finite position {pos}")]
    NonFinitePosition { agent: AgentId, pos: GeoPoint },

    #[error("neighbour radius {0} must be finite and non-negative")]
    InvalidRadius(f32),

    #[error("neighbour list of {agent} references {neighbour}, outside a population of {count}")]
    NeighbourOutOfRange {
        agent:     AgentId,
        neighbour: AgentId,
        count:     usize,
    },

    #[error("neighbour list of {0} contains the household itself")]
    SelfNeighbour(AgentId),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
