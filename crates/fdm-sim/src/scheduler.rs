//! Barrier-synchronised staged activation.
//!
//! ```text
//! for stage in pipeline:
//!     shuffle(order)                    ← fresh order per stage per year
//!     snapshot status/prepared          ← contagion stages only
//!     for agent in order: stage(agent)
//!     ── barrier ──                     ← invariants checked in debug builds
//! ```
//!
//! A single run is sequential: every household finishes a stage before any
//! household begins the next, and all randomness comes from the one `SimRng`.

use tracing::debug;

use fdm_agent::{HouseholdStore, StatusCounts, Transition};
use fdm_behavior::{
    check_for_early_warning, check_neighbours_for_displacement, check_neighbours_for_evacuation,
    displacement_decision, fix_damage, fix_neighbours_damage, react_to_flood,
    refresh_trapped_probability, return_decision, update_sentiments, RepairOutcome, StageContext,
    StatusSnapshot,
};
use fdm_core::{AgentId, SimRng};

use crate::Stage;

/// What happened during one simulated year, summed over all stages.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct YearActivity {
    /// Status entries: how many households moved into each status.
    pub entered:           StatusCounts,
    /// Households hit by water this year.
    pub flooded:           usize,
    /// Houses fully repaired by the repair program.
    pub repaired:          usize,
    /// Houses partly repaired by their owners.
    pub recovered:         usize,
    /// Neighbour houses reduced by mutual aid (one per helper/neighbour pair).
    pub neighbour_repairs: usize,
}

impl YearActivity {
    fn record(&mut self, transition: Transition) -> bool {
        match transition.target() {
            Some(status) => {
                self.entered.add(status);
                true
            }
            None => false,
        }
    }
}

/// Runs the yearly pipeline over a household population.
pub struct StagedScheduler {
    stages:   Vec<Stage>,
    order:    Vec<AgentId>,
    snapshot: StatusSnapshot,
}

impl StagedScheduler {
    pub fn new(stages: Vec<Stage>, population: usize) -> Self {
        Self {
            stages,
            order:    (0..population as u32).map(AgentId).collect(),
            snapshot: StatusSnapshot::default(),
        }
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Run every stage once over the whole population.
    pub fn run_year(
        &mut self,
        store: &mut HouseholdStore,
        ctx:   &StageContext<'_>,
        rng:   &mut SimRng,
    ) -> YearActivity {
        debug_assert_eq!(self.order.len(), store.count, "scheduler built for a different population");

        let mut activity = YearActivity::default();
        for i in 0..self.stages.len() {
            let stage = self.stages[i];
            let transitions = self.run_stage(stage, store, ctx, rng, &mut activity);
            debug!(year = %ctx.year, %stage, transitions, "stage complete");
            check_invariants(stage, store);
        }
        activity
    }

    /// Run one stage; returns the number of status transitions it caused.
    pub fn run_stage(
        &mut self,
        stage:    Stage,
        store:    &mut HouseholdStore,
        ctx:      &StageContext<'_>,
        rng:      &mut SimRng,
        activity: &mut YearActivity,
    ) -> usize {
        rng.shuffle(&mut self.order);
        if stage.reads_snapshot() {
            self.snapshot.recapture(store);
        }

        let mut transitions = 0;
        for &agent in &self.order {
            let transition = match stage {
                Stage::RefreshTrappedProbability => {
                    refresh_trapped_probability(store, agent, ctx);
                    Transition::Unchanged
                }
                Stage::ReturnDecision => return_decision(store, agent, ctx, rng),
                Stage::ResetFlags => {
                    store.reset_yearly_flags(agent);
                    Transition::Unchanged
                }
                Stage::CheckForEarlyWarning => check_for_early_warning(store, agent, ctx, rng),
                Stage::CheckNeighboursForEvacuation => {
                    check_neighbours_for_evacuation(store, agent, &self.snapshot, ctx, rng)
                }
                Stage::ReactToFlood => {
                    if react_to_flood(store, agent, ctx).water_mm > 0.0 {
                        activity.flooded += 1;
                    }
                    Transition::Unchanged
                }
                Stage::DisplacementDecision => displacement_decision(store, agent, ctx, rng),
                Stage::CheckNeighboursForDisplacement => {
                    check_neighbours_for_displacement(store, agent, &self.snapshot, ctx, rng)
                }
                Stage::UpdateSentiments => {
                    update_sentiments(store, agent, ctx, rng);
                    Transition::Unchanged
                }
                Stage::FixDamage => {
                    match fix_damage(store, agent, ctx, rng) {
                        RepairOutcome::Repaired  => activity.repaired += 1,
                        RepairOutcome::Recovered => activity.recovered += 1,
                        RepairOutcome::Untouched => {}
                    }
                    Transition::Unchanged
                }
                Stage::FixNeighboursDamage => {
                    activity.neighbour_repairs += fix_neighbours_damage(store, agent, ctx);
                    Transition::Unchanged
                }
            };
            if activity.record(transition) {
                transitions += 1;
            }
        }
        transitions
    }
}

#[cfg(debug_assertions)]
fn check_invariants(stage: Stage, store: &HouseholdStore) {
    if let Err(e) = store.check_unit_ranges() {
        panic!("after {stage}: {e}");
    }
    if stage == Stage::ReturnDecision {
        if let Err(e) = store.check_displacement_time() {
            panic!("after {stage}: {e}");
        }
    }
}

#[cfg(not(debug_assertions))]
#[inline]
fn check_invariants(_stage: Stage, _store: &HouseholdStore) {}
