use fdm_core::{EventId, FdmError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HazardError {
    #[error("damage curve {name}: {reason}")]
    Curve {
        name:   &'static str,
        reason: String,
    },

    #[error("flood event {event} carries {got} water levels for {expected} households")]
    DepthCountMismatch {
        event:    EventId,
        expected: usize,
        got:      usize,
    },

    #[error("scenario {name:?}: end year {end} is not after start year {start}")]
    EmptyScenario {
        name:  String,
        start: i32,
        end:   i32,
    },

    #[error(transparent)]
    Core(#[from] FdmError),
}

pub type HazardResult<T> = Result<T, HazardError>;
