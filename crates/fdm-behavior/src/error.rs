use fdm_core::FdmError;
use fdm_hazard::HazardError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error("low damage threshold {low} must be below high damage threshold {high}")]
    ThresholdOrder { low: f64, high: f64 },

    #[error(transparent)]
    Core(#[from] FdmError),

    #[error(transparent)]
    Hazard(#[from] HazardError),
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
