//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `FdmError` as one
//! variant via `#[from]`, so configuration problems found in `fdm-core`
//! types surface unchanged at the builder that rejected them.

use thiserror::Error;

/// The top-level error type for `fdm-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum FdmError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("{name} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        name:  &'static str,
        value: f64,
        min:   f64,
        max:   f64,
    },

    #[error("unknown {kind} key {key:?}")]
    UnknownKey {
        kind: &'static str,
        key:  String,
    },
}

impl FdmError {
    /// Reject `value` unless it is finite and lies in `[min, max]`.
    pub fn check_range(name: &'static str, value: f64, min: f64, max: f64) -> FdmResult<()> {
        if value.is_finite() && (min..=max).contains(&value) {
            Ok(())
        } else {
            Err(FdmError::OutOfRange { name, value, min, max })
        }
    }

    /// Shorthand for a unit-interval check (probabilities, rates, thresholds).
    pub fn check_unit(name: &'static str, value: f64) -> FdmResult<()> {
        Self::check_range(name, value, 0.0, 1.0)
    }
}

/// Shorthand result type for all `fdm-*` crates.
pub type FdmResult<T> = Result<T, FdmError>;
