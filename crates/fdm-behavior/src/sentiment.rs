//! Yearly update of trust, fear, and awareness.
//!
//! ```text
//! nobody flooded (self or neighbours):
//!     awareness -= decrease, fear -= fear_change      (floored)
//!     alerted → trust -= trust_change                 (false alarm)
//! someone flooded:
//!     own peak damage > low            → awareness += increase
//!     > 25 % neighbours badly damaged  → near miss: awareness += increase
//!                                        with probability = awareness,
//!                                        else awareness -= decrease
//!     otherwise                        → awareness -= decrease
//!     alerted   → trust = 1
//!     unalerted → trust -= trust_change, fear += fear_change
//! ```
//!
//! The near-miss draw makes awareness self-reinforcing; it draws from the
//! run's `SimRng`.

use fdm_agent::HouseholdStore;
use fdm_core::{AgentId, SimRng};

use crate::social::{any_neighbour, fraction_exceeds};
use crate::StageContext;

/// Update the sentiments of households at home, and of households that
/// left home this year.  Returns `false` for skipped households.
pub fn update_sentiments(
    store: &mut HouseholdStore,
    agent: AgentId,
    ctx:   &StageContext<'_>,
    rng:   &mut SimRng,
) -> bool {
    let p = ctx.params;
    let i = agent.index();
    if !(store.status[i].is_home() || store.status_changed[i]) {
        return false;
    }

    let neighbours = ctx.neighbours.neighbours(agent);
    let floor = ctx.programs.sentiment_floor(p);
    let anyone_flooded =
        store.received_flood[i] || any_neighbour(neighbours, |n| store.received_flood[n.index()]);

    let mut awareness = store.awareness[i];
    let mut fear = store.fear[i];
    let mut trust = store.trust[i];

    if !anyone_flooded {
        awareness -= p.awareness_decrease;
        fear -= p.fear_change;
        if store.alerted[i] {
            trust -= p.trust_change;
        }
    } else {
        let near_miss = fraction_exceeds(neighbours, p.neighbours_high_damage_fraction, |n| {
            store.house_damage[n.index()] > p.high_damage_threshold
        });
        if store.peak_damage(agent) > p.low_damage_threshold {
            awareness += p.awareness_increase;
        } else if near_miss {
            if rng.gen_bool(awareness) {
                awareness += p.awareness_increase;
            } else {
                awareness -= p.awareness_decrease;
            }
        } else {
            awareness -= p.awareness_decrease;
        }

        if store.alerted[i] {
            trust = 1.0;
        } else {
            trust -= p.trust_change;
            fear += p.fear_change;
        }
    }

    store.awareness[i] = awareness.clamp(floor, 1.0);
    store.fear[i] = fear.clamp(floor, 1.0);
    store.trust[i] = trust.clamp(0.0, 1.0);
    true
}
