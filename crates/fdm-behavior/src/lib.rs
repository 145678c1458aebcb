//! `fdm-behavior`: the household decision engine.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                        |
//! |---------------|-----------------------------------------------------------------|
//! | [`params`]    | `DecisionParams`: thresholds and step sizes                    |
//! | [`program`]   | `ProgramConfig`, named `RepairLevel` presets                    |
//! | [`context`]   | `StageContext<'a>`: read-only year state shared by all stages  |
//! | [`social`]    | Neighbour-fraction rules                                        |
//! | [`decision`]  | Return, early-warning, and displacement decisions; `relocate`   |
//! | [`contagion`] | Snapshot-based evacuation and displacement contagion            |
//! | [`flood`]     | `react_to_flood`                                                |
//! | [`sentiment`] | `update_sentiments`                                             |
//! | [`recovery`]  | `fix_damage`, `fix_neighbours_damage`                           |
//! | [`error`]     | `BehaviorError`, `BehaviorResult<T>`                            |
//!
//! # Design notes
//!
//! Every operation here acts on one household, identified by `AgentId`,
//! and takes the whole [`HouseholdStore`][fdm_agent::HouseholdStore] so it
//! can read neighbour state.  Operations never run concurrently: `fdm-sim`
//! calls them one household at a time, stage by stage, and every household
//! finishes a stage before any household starts the next one.
//!
//! Probabilistic operations take the run's `&mut SimRng`; none of them
//! create their own randomness.

pub mod contagion;
pub mod context;
pub mod decision;
pub mod error;
pub mod flood;
pub mod params;
pub mod program;
pub mod recovery;
pub mod sentiment;
pub mod social;

#[cfg(test)]
mod tests;

pub use contagion::{check_neighbours_for_displacement, check_neighbours_for_evacuation, StatusSnapshot};
pub use context::StageContext;
pub use decision::{
    check_for_early_warning, displacement_decision, refresh_trapped_probability, relocate,
    return_decision,
};
pub use error::{BehaviorError, BehaviorResult};
pub use flood::{react_to_flood, FloodImpact};
pub use params::{DecisionParams, MaterialRecovery};
pub use program::{ProgramConfig, RepairLevel};
pub use recovery::{fix_damage, fix_neighbours_damage, RepairOutcome};
pub use sentiment::update_sentiments;
