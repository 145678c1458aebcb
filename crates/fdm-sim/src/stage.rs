//! The named stages of a simulated year.

use std::fmt;

use fdm_behavior::ProgramConfig;

/// One step of the yearly pipeline.  Every household finishes a stage
/// before any household starts the next one.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Stage {
    RefreshTrappedProbability,
    ReturnDecision,
    ResetFlags,
    CheckForEarlyWarning,
    /// Only in the pipeline when `ProgramConfig::evacuation_contagion` is set.
    CheckNeighboursForEvacuation,
    ReactToFlood,
    DisplacementDecision,
    CheckNeighboursForDisplacement,
    UpdateSentiments,
    FixDamage,
    FixNeighboursDamage,
}

impl Stage {
    pub const DEFAULT_PIPELINE: [Stage; 10] = [
        Stage::RefreshTrappedProbability,
        Stage::ReturnDecision,
        Stage::ResetFlags,
        Stage::CheckForEarlyWarning,
        Stage::ReactToFlood,
        Stage::DisplacementDecision,
        Stage::CheckNeighboursForDisplacement,
        Stage::UpdateSentiments,
        Stage::FixDamage,
        Stage::FixNeighboursDamage,
    ];

    /// The pipeline for a run under `programs`.
    pub fn pipeline(programs: &ProgramConfig) -> Vec<Stage> {
        let mut stages = Vec::with_capacity(Self::DEFAULT_PIPELINE.len() + 1);
        for stage in Self::DEFAULT_PIPELINE {
            stages.push(stage);
            if stage == Stage::CheckForEarlyWarning && programs.evacuation_contagion {
                stages.push(Stage::CheckNeighboursForEvacuation);
            }
        }
        stages
    }

    /// Stages that read neighbour status from the stage-start snapshot.
    pub fn reads_snapshot(self) -> bool {
        matches!(self, Stage::CheckNeighboursForEvacuation | Stage::CheckNeighboursForDisplacement)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::RefreshTrappedProbability      => "refresh_trapped_probability",
            Stage::ReturnDecision                 => "return_decision",
            Stage::ResetFlags                     => "reset_flags",
            Stage::CheckForEarlyWarning           => "check_for_early_warning",
            Stage::CheckNeighboursForEvacuation   => "check_neighbours_for_evacuation",
            Stage::ReactToFlood                   => "react_to_flood",
            Stage::DisplacementDecision           => "displacement_decision",
            Stage::CheckNeighboursForDisplacement => "check_neighbours_for_displacement",
            Stage::UpdateSentiments               => "update_sentiments",
            Stage::FixDamage                      => "fix_damage",
            Stage::FixNeighboursDamage            => "fix_neighbours_damage",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
