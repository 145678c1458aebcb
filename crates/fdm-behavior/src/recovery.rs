//! Own recovery, government repair, and neighbour mutual aid.

use fdm_agent::{HouseholdStore, Material};
use fdm_core::{AgentId, SimRng};

use crate::StageContext;

/// What [`fix_damage`] did to a house.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum RepairOutcome {
    Untouched,
    /// Fully repaired by the house-repair program.
    Repaired,
    /// Reduced by the household's own means.
    Recovered,
}

/// Yearly recovery of one household.
///
/// A severely damaged house is fully repaired with the repair program's
/// probability (and upgraded to the best material when the improvement
/// program runs).  Otherwise a non-poor household living at home repairs
/// `base_recovery * surplus * material_multiplier` of its damage, where
/// `surplus = min(1, (income - poverty_line) / poverty_line)`.
///
/// Every household, at home or away, recovers `livelihood_recovery` of its
/// livelihood damage.
pub fn fix_damage(
    store: &mut HouseholdStore,
    agent: AgentId,
    ctx:   &StageContext<'_>,
    rng:   &mut SimRng,
) -> RepairOutcome {
    let p = ctx.params;
    let programs = ctx.programs;
    let i = agent.index();

    let mut outcome = RepairOutcome::Untouched;
    if programs.house_repair_program > 0.0
        && store.house_damage[i] > p.high_damage_threshold
        && rng.gen_bool(programs.house_repair_program)
    {
        store.house_damage[i] = 0.0;
        if programs.house_improvement_program {
            store.material[i] = Material::BEST;
        }
        outcome = RepairOutcome::Repaired;
    }

    store.livelihood_damage[i] = (store.livelihood_damage[i] - p.livelihood_recovery).max(0.0);
    if store.status[i].is_away() {
        return outcome;
    }

    let income = store.income(agent);
    if outcome == RepairOutcome::Untouched && income > p.poverty_line && store.house_damage[i] > 0.0 {
        let surplus = ((income - p.poverty_line) / p.poverty_line).min(1.0);
        let rate = p.base_recovery * surplus * p.material_recovery.multiplier(store.material[i]);
        store.house_damage[i] = (store.house_damage[i] - rate).max(0.0);
        outcome = RepairOutcome::Recovered;
    }
    outcome
}

/// Mutual aid: a household at home that was not flooded this year and whose
/// own house is sound (damage `<` the low threshold) removes
/// `neighbour_repair` from every damaged neighbour.
///
/// Neighbours are written in place, so a neighbour processed later in the
/// same stage sees the reduced value.  Returns the number of neighbours
/// helped.
pub fn fix_neighbours_damage(store: &mut HouseholdStore, agent: AgentId, ctx: &StageContext<'_>) -> usize {
    let p = ctx.params;
    let i = agent.index();
    if store.status[i].is_away()
        || store.received_flood[i]
        || store.house_damage[i] >= p.low_damage_threshold
    {
        return 0;
    }

    let mut helped = 0;
    for &n in ctx.neighbours.neighbours(agent) {
        let damage = &mut store.house_damage[n.index()];
        if *damage > 0.0 {
            *damage = (*damage - p.neighbour_repair).max(0.0);
            helped += 1;
        }
    }
    helped
}
