//! Plain data row types handed to report sinks.

use fdm_agent::{HouseholdStore, Status, Village};
use fdm_core::{AgentId, Year};

/// One household's reported state at the end of a year.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HouseholdSnapshot {
    pub year:              u32,
    pub agent_id:          u32,
    pub village:           Village,
    pub status:            Status,
    pub house_damage:      f64,
    pub livelihood_damage: f64,
    pub trust:             f64,
    pub fear:              f64,
    pub awareness:         f64,
    pub perception:        f64,
    pub income:            f64,
    pub displacement_time: u32,
    pub received_flood:    bool,
    pub alerted:           bool,
}

impl HouseholdSnapshot {
    pub fn of(year: Year, store: &HouseholdStore, agent: AgentId) -> Self {
        let i = agent.index();
        Self {
            year:              year.0,
            agent_id:          agent.0,
            village:           store.village[i],
            status:            store.status[i],
            house_damage:      store.house_damage[i],
            livelihood_damage: store.livelihood_damage[i],
            trust:             store.trust[i],
            fear:              store.fear[i],
            awareness:         store.awareness[i],
            perception:        store.perception(agent),
            income:            store.income(agent),
            displacement_time: store.displacement_time[i],
            received_flood:    store.received_flood[i],
            alerted:           store.alerted[i],
        }
    }

    /// Rows for every household, in `AgentId` order.
    pub fn all(year: Year, store: &HouseholdStore) -> Vec<Self> {
        store.agent_ids().map(|a| Self::of(year, store, a)).collect()
    }
}
