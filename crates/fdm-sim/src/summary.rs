//! Population-level reporters collected after every year.

use fdm_agent::{HouseholdStore, Status, StatusCounts};
use fdm_core::Year;

/// Model-level statistics of one year.
///
/// Means are scaled ×100 so that damage and sentiment read as percentages.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct YearSummary {
    pub year:          Year,
    pub calendar_year: i32,
    pub flood_event:   bool,
    pub early_warning: bool,

    pub counts: StatusCounts,

    pub mean_house_damage:      f64,
    pub mean_livelihood_damage: f64,
    pub mean_trust:             f64,
    pub mean_perception:        f64,
    pub mean_income:            f64,
    pub mean_awareness:         f64,
    pub mean_fear:              f64,

    /// Displaced for 1–2 years.
    pub displaced_short:  usize,
    /// Displaced for 3–5 years.
    pub displaced_medium: usize,
    /// Displaced for more than 5 years.
    pub displaced_long:   usize,

    /// People (household-size weighted) in flooded households.
    pub flooded_population:  u64,
    /// People in flooded households that stayed at home (normal or trapped).
    pub affected_population: u64,
}

impl YearSummary {
    pub fn collect(
        year:          Year,
        calendar_year: i32,
        flood_event:   bool,
        early_warning: bool,
        store:         &HouseholdStore,
    ) -> Self {
        let mut summary = YearSummary {
            year,
            calendar_year,
            flood_event,
            early_warning,
            counts: store.status_counts(),
            ..YearSummary::default()
        };
        if store.is_empty() {
            return summary;
        }

        let scale = 100.0 / store.count as f64;
        let mean = |values: &[f64]| values.iter().sum::<f64>() * scale;
        summary.mean_house_damage = mean(&store.house_damage);
        summary.mean_livelihood_damage = mean(&store.livelihood_damage);
        summary.mean_trust = mean(&store.trust);
        summary.mean_awareness = mean(&store.awareness);
        summary.mean_fear = mean(&store.fear);
        summary.mean_perception = store.agent_ids().map(|a| store.perception(a)).sum::<f64>() * scale;
        summary.mean_income = store.agent_ids().map(|a| store.income(a)).sum::<f64>() * scale;

        for (i, &years) in store.displacement_time.iter().enumerate() {
            match years {
                0 => {}
                1..=2 => summary.displaced_short += 1,
                3..=5 => summary.displaced_medium += 1,
                _ => summary.displaced_long += 1,
            }
            if store.received_flood[i] {
                let people = store.household_size[i] as u64;
                summary.flooded_population += people;
                if store.status[i].is_home() {
                    summary.affected_population += people;
                }
            }
        }
        summary
    }

    /// Share of households in `status`, in [0, 1].
    pub fn share(&self, status: Status) -> f64 {
        match self.counts.total() {
            0 => 0.0,
            n => self.counts.get(status) as f64 / n as f64,
        }
    }
}
