//! Neighbour contagion stages.
//!
//! Both stages read neighbour state from a [`StatusSnapshot`] taken when the
//! stage begins, so a household that follows its neighbours this stage is
//! not itself counted by households processed later in the same stage.
//! Only the household being processed is written.

use fdm_agent::{HouseholdStore, Status, Transition};
use fdm_core::{AgentId, SimRng};

use crate::social::fraction_exceeds;
use crate::{relocate, StageContext};

/// Status and preparedness of every household at the start of a stage.
#[derive(Clone, Debug, Default)]
pub struct StatusSnapshot {
    pub status:   Vec<Status>,
    pub prepared: Vec<bool>,
}

impl StatusSnapshot {
    pub fn capture(store: &HouseholdStore) -> Self {
        Self { status: store.status.clone(), prepared: store.prepared.clone() }
    }

    /// Refresh in place, reusing the allocations.
    pub fn recapture(&mut self, store: &HouseholdStore) {
        self.status.clone_from(&store.status);
        self.prepared.clone_from(&store.prepared);
    }
}

/// In a warning year, a household at home copies a majority of prepared
/// neighbours (it prepares) and of evacuated neighbours (it evacuates).
pub fn check_neighbours_for_evacuation(
    store:    &mut HouseholdStore,
    agent:    AgentId,
    snapshot: &StatusSnapshot,
    ctx:      &StageContext<'_>,
    rng:      &mut SimRng,
) -> Transition {
    let i = agent.index();
    if !ctx.early_warning || snapshot.status[i] != Status::Normal {
        return Transition::Unchanged;
    }
    let neighbours = ctx.neighbours.neighbours(agent);
    let threshold = ctx.params.evacuation_contagion_fraction;

    if fraction_exceeds(neighbours, threshold, |n| snapshot.prepared[n.index()]) {
        store.prepared[i] = true;
    }
    if fraction_exceeds(neighbours, threshold, |n| snapshot.status[n.index()] == Status::Evacuated) {
        return relocate(store, agent, Status::Evacuated, ctx.params, rng);
    }
    Transition::Unchanged
}

/// A household at home whose own perception already clears the threshold
/// leaves when more than the contagion fraction of its neighbours are
/// displaced.
pub fn check_neighbours_for_displacement(
    store:    &mut HouseholdStore,
    agent:    AgentId,
    snapshot: &StatusSnapshot,
    ctx:      &StageContext<'_>,
    rng:      &mut SimRng,
) -> Transition {
    let i = agent.index();
    if snapshot.status[i] != Status::Normal
        || store.perception(agent) < ctx.params.risk_perception_threshold
    {
        return Transition::Unchanged;
    }
    let neighbours = ctx.neighbours.neighbours(agent);
    let displaced = fraction_exceeds(neighbours, ctx.params.displacement_contagion_fraction, |n| {
        snapshot.status[n.index()] == Status::Displaced
    });
    if displaced {
        relocate(store, agent, Status::Displaced, ctx.params, rng)
    } else {
        Transition::Unchanged
    }
}
