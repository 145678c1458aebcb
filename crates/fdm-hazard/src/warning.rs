//! Early-warning emission.
//!
//! The warning authority is imperfect: in a flood year it stays silent with
//! probability `false_negative_rate`; in a dry year it raises a false alarm
//! with probability `false_alarm_rate`.

use std::fmt;
use std::str::FromStr;

use fdm_core::{FdmError, FdmResult, SimRng};

/// Configuration of the early-warning system for one run.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EarlyWarningSystem {
    pub enabled:             bool,
    pub false_alarm_rate:    f64,
    pub false_negative_rate: f64,
}

impl EarlyWarningSystem {
    pub fn validate(&self) -> FdmResult<()> {
        FdmError::check_unit("false_alarm_rate", self.false_alarm_rate)?;
        FdmError::check_unit("false_negative_rate", self.false_negative_rate)?;
        Ok(())
    }

    /// Decide whether a warning goes out this year.
    ///
    /// Draws from `rng` only when the system is enabled.
    pub fn emit(&self, flood_this_year: bool, rng: &mut SimRng) -> bool {
        if !self.enabled {
            return false;
        }
        if flood_this_year {
            rng.gen_bool(1.0 - self.false_negative_rate)
        } else {
            rng.gen_bool(self.false_alarm_rate)
        }
    }
}

// ── Named presets ─────────────────────────────────────────────────────────────

/// The early-warning configurations compared in policy runs.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EwsMode {
    NoEws,
    BadEws,
    GoodEws,
    PerfectEws,
}

impl EwsMode {
    pub const ALL: [EwsMode; 4] = [EwsMode::NoEws, EwsMode::BadEws, EwsMode::GoodEws, EwsMode::PerfectEws];

    pub fn as_str(self) -> &'static str {
        match self {
            EwsMode::NoEws      => "no_ews",
            EwsMode::BadEws     => "bad_ews",
            EwsMode::GoodEws    => "good_ews",
            EwsMode::PerfectEws => "perfect_ews",
        }
    }

    pub fn system(self) -> EarlyWarningSystem {
        let (enabled, false_alarm_rate, false_negative_rate) = match self {
            EwsMode::NoEws      => (false, 0.0, 0.0),
            EwsMode::BadEws     => (true, 0.3, 0.3),
            EwsMode::GoodEws    => (true, 0.1, 0.1),
            EwsMode::PerfectEws => (true, 0.0, 0.0),
        };
        EarlyWarningSystem { enabled, false_alarm_rate, false_negative_rate }
    }
}

impl fmt::Display for EwsMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EwsMode {
    type Err = FdmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EwsMode::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| FdmError::UnknownKey { kind: "early-warning mode", key: s.to_owned() })
    }
}
