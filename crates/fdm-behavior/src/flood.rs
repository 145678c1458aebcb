//! Flood impact on one household.

use fdm_agent::HouseholdStore;
use fdm_core::AgentId;
use fdm_hazard::sanitize_water_level;

use crate::StageContext;

/// Damage done by this year's flood, as applied by [`react_to_flood`].
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct FloodImpact {
    pub water_mm:   f64,
    /// Increase of the house-damage high-water mark.
    pub house:      f64,
    /// Livelihood damage added this year.
    pub livelihood: f64,
}

/// Apply the water level at `agent` to its house and livelihood.
///
/// House damage is a high-water mark: the larger of the current value and
/// the curve value for this flood.  Livelihood damage accumulates, clipped
/// to 1, and is reduced for prepared households.  A dry household is left
/// untouched.
pub fn react_to_flood(store: &mut HouseholdStore, agent: AgentId, ctx: &StageContext<'_>) -> FloodImpact {
    if !ctx.flood_event {
        return FloodImpact::default();
    }
    let water_mm = sanitize_water_level(ctx.flood.water_level_at(agent, ctx.year));
    if water_mm <= 0.0 {
        return FloodImpact::default();
    }

    let i = agent.index();
    store.received_flood[i] = true;
    store.flood_exposure[i] += 1;

    let old_house = store.house_damage[i];
    let new_house = old_house.max(ctx.curves.house_damage(water_mm, store.material[i]));
    store.house_damage[i] = new_house;
    store.last_house_damage[i] = new_house - old_house;

    let mut hit = ctx.livelihood.damage(water_mm);
    if store.prepared[i] {
        hit *= ctx.params.prepared_livelihood_factor;
    }
    let old_livelihood = store.livelihood_damage[i];
    let new_livelihood = (old_livelihood + hit).min(1.0);
    store.livelihood_damage[i] = new_livelihood;
    store.last_livelihood_damage[i] = new_livelihood - old_livelihood;

    FloodImpact {
        water_mm,
        house:      new_house - old_house,
        livelihood: new_livelihood - old_livelihood,
    }
}
