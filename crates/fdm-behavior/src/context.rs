//! Read-only run state passed to every stage operation.

use fdm_agent::TrappedProbabilityModel;
use fdm_core::Year;
use fdm_hazard::{DamageCurves, FloodField, LivelihoodCurve};
use fdm_spatial::NeighborTable;

use crate::{DecisionParams, ProgramConfig};

/// Everything a stage reads besides the household store itself.
///
/// Built once per simulated year by `fdm-sim` and shared by every stage of
/// that year.  Nothing reachable from here is mutated while it is live.
pub struct StageContext<'a> {
    /// The year being simulated.
    pub year: Year,

    /// A flood event occurs this year.
    pub flood_event: bool,

    /// An early warning went out this year (possibly a false alarm).
    pub early_warning: bool,

    pub params:   &'a DecisionParams,
    pub programs: &'a ProgramConfig,

    /// Neighbour lists, computed once at model construction.
    pub neighbours: &'a NeighborTable,

    /// Water level per household for this year.
    pub flood: &'a dyn FloodField,

    pub curves:     &'a DamageCurves,
    pub livelihood: &'a LivelihoodCurve,
    pub trapped:    &'a TrappedProbabilityModel,
}
