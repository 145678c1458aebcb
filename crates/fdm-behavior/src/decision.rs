//! Status decisions: return, early-warning response, and damage-driven
//! displacement.
//!
//! Every decision to leave goes through [`relocate`], which weighs the
//! household's trapped probability before committing to a destination.

use tracing::trace;

use fdm_agent::{HouseholdStore, Status, Transition};
use fdm_core::{AgentId, SimRng};

use crate::{DecisionParams, StageContext};

/// Try to move `agent` to `destination`; with the (obstacle-adjusted)
/// trapped probability the household ends up `Trapped` instead.
pub fn relocate(
    store:       &mut HouseholdStore,
    agent:       AgentId,
    destination: Status,
    params:      &DecisionParams,
    rng:         &mut SimRng,
) -> Transition {
    let i = agent.index();
    let mut p = store.trapped_probability[i];
    if store.obstacles_to_movement[i] {
        p += (1.0 - p) * params.obstacle_penalty;
    }
    let to = if rng.gen_bool(p) { Status::Trapped } else { destination };
    trace!(%agent, %destination, %to, "relocation");
    store.transition(agent, to)
}

/// Refresh the trapped probability from this year's covariates.
pub fn refresh_trapped_probability(store: &mut HouseholdStore, agent: AgentId, ctx: &StageContext<'_>) {
    ctx.trapped.refresh(store, agent);
}

/// Evacuated households return or become displaced; displaced households
/// return once their house is habitable.  Updates `displacement_time`.
///
/// A poor evacuee sent to `Displaced` keeps the stricter low threshold until
/// it returns, so a second call in the same year changes nothing.
pub fn return_decision(
    store: &mut HouseholdStore,
    agent: AgentId,
    ctx:   &StageContext<'_>,
    rng:   &mut SimRng,
) -> Transition {
    let p = ctx.params;
    let i = agent.index();
    let damage = store.house_damage[i];

    let outcome = match store.status[i] {
        Status::Evacuated => {
            // Poor households need a sounder house before they come back.
            let poor = p.is_poor(store.income(agent));
            let threshold = if poor { p.low_damage_threshold } else { p.high_damage_threshold };
            if damage < threshold {
                store.transition(agent, Status::Normal)
            } else {
                let t = relocate(store, agent, Status::Displaced, p, rng);
                store.strict_return[i] = poor && store.status[i] == Status::Displaced;
                t
            }
        }
        Status::Displaced => {
            let threshold = if store.strict_return[i] {
                p.low_damage_threshold
            } else {
                p.high_damage_threshold
            };
            if damage < threshold {
                store.transition(agent, Status::Normal)
            } else {
                Transition::Unchanged
            }
        }
        Status::Normal | Status::Trapped => Transition::Unchanged,
    };

    if store.status[i] == Status::Displaced {
        store.displacement_time[i] += 1;
    } else {
        store.displacement_time[i] = 0;
        store.strict_return[i] = false;
    }
    outcome
}

/// Response of a flood-prone household at home to this year's warning.
///
/// Trusting, non-poor households evacuate when their perception clears the
/// threshold and prepare otherwise.  Trapped households cannot evacuate.
pub fn check_for_early_warning(
    store: &mut HouseholdStore,
    agent: AgentId,
    ctx:   &StageContext<'_>,
    rng:   &mut SimRng,
) -> Transition {
    let p = ctx.params;
    let i = agent.index();
    if !ctx.early_warning || !store.flood_prone[i] || store.status[i].is_away() {
        return Transition::Unchanged;
    }

    store.alerted[i] = true;
    if store.trust[i] < p.trust_threshold
        || store.status[i] == Status::Trapped
        || p.is_poor(store.income(agent))
    {
        return Transition::Unchanged;
    }

    if store.perception(agent) >= p.risk_perception_threshold {
        relocate(store, agent, Status::Evacuated, p, rng)
    } else {
        store.prepared[i] = true;
        Transition::Unchanged
    }
}

/// Damage-driven displacement of households at home.
///
/// ```text
/// house or livelihood  > high  → leave
/// house and livelihood <= low  → stay
/// otherwise                    → leave iff perception >= threshold
/// ```
pub fn displacement_decision(
    store: &mut HouseholdStore,
    agent: AgentId,
    ctx:   &StageContext<'_>,
    rng:   &mut SimRng,
) -> Transition {
    let p = ctx.params;
    let i = agent.index();
    if store.status[i].is_away() {
        return Transition::Unchanged;
    }

    let house = store.house_damage[i];
    let livelihood = store.livelihood_damage[i];

    let leave = if house > p.high_damage_threshold || livelihood > p.high_damage_threshold {
        true
    } else if house <= p.low_damage_threshold && livelihood <= p.low_damage_threshold {
        false
    } else {
        store.perception(agent) >= p.risk_perception_threshold
    };

    if leave {
        relocate(store, agent, Status::Displaced, p, rng)
    } else {
        Transition::Unchanged
    }
}
