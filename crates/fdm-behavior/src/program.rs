//! Government programs active during a run.

use std::fmt;
use std::str::FromStr;

use fdm_core::{FdmError, FdmResult};
use fdm_hazard::{EarlyWarningSystem, EwsMode};

use crate::DecisionParams;

/// Run-constant program configuration.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProgramConfig {
    pub early_warning:             EarlyWarningSystem,
    /// Chance per year that a severely damaged house is fully repaired.
    pub house_repair_program:      f64,
    /// Repaired houses are rebuilt in the best construction class.
    pub house_improvement_program: bool,
    pub basic_income_program:      bool,
    pub awareness_program:         bool,
    /// Run the evacuation / preparedness contagion stage after the
    /// early-warning stage.
    pub evacuation_contagion:      bool,
}

impl ProgramConfig {
    /// Programs from a named warning mode and repair level.
    pub fn from_presets(ews: EwsMode, repair: RepairLevel) -> Self {
        let (house_repair_program, house_improvement_program) = repair.settings();
        Self {
            early_warning: ews.system(),
            house_repair_program,
            house_improvement_program,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> FdmResult<()> {
        self.early_warning.validate()?;
        FdmError::check_unit("house_repair_program", self.house_repair_program)?;
        Ok(())
    }

    /// Income the basic-income program adds, or 0.
    pub fn basic_income(&self, params: &DecisionParams) -> f64 {
        if self.basic_income_program { params.basic_income_amount } else { 0.0 }
    }

    /// Lower bound on awareness and fear.
    pub fn sentiment_floor(&self, params: &DecisionParams) -> f64 {
        if self.awareness_program {
            params.awareness_program_floor
        } else {
            params.sentiment_floor
        }
    }
}

// ── Repair levels ─────────────────────────────────────────────────────────────

/// Named house-repair program levels.  `_hi` levels also upgrade the
/// material of repaired houses.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RepairLevel {
    Hrp00,
    Hrp30,
    Hrp60,
    Hrp90,
    Hrp30Hi,
    Hrp60Hi,
    Hrp90Hi,
}

impl RepairLevel {
    pub const ALL: [RepairLevel; 7] = [
        RepairLevel::Hrp00,
        RepairLevel::Hrp30,
        RepairLevel::Hrp60,
        RepairLevel::Hrp90,
        RepairLevel::Hrp30Hi,
        RepairLevel::Hrp60Hi,
        RepairLevel::Hrp90Hi,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RepairLevel::Hrp00   => "hrp_00",
            RepairLevel::Hrp30   => "hrp_30",
            RepairLevel::Hrp60   => "hrp_60",
            RepairLevel::Hrp90   => "hrp_90",
            RepairLevel::Hrp30Hi => "hrp_30_hi",
            RepairLevel::Hrp60Hi => "hrp_60_hi",
            RepairLevel::Hrp90Hi => "hrp_90_hi",
        }
    }

    /// `(repair probability, house improvement)`.
    pub fn settings(self) -> (f64, bool) {
        match self {
            RepairLevel::Hrp00   => (0.0, false),
            RepairLevel::Hrp30   => (0.3, false),
            RepairLevel::Hrp60   => (0.6, false),
            RepairLevel::Hrp90   => (0.9, false),
            RepairLevel::Hrp30Hi => (0.3, true),
            RepairLevel::Hrp60Hi => (0.6, true),
            RepairLevel::Hrp90Hi => (0.9, true),
        }
    }
}

impl fmt::Display for RepairLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RepairLevel {
    type Err = FdmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RepairLevel::ALL
            .into_iter()
            .find(|l| l.as_str() == s)
            .ok_or_else(|| FdmError::UnknownKey { kind: "house-repair level", key: s.to_owned() })
    }
}
