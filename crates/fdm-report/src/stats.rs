//! Per-run displacement statistics for comparing policies.

use fdm_agent::{HouseholdStore, Status};
use fdm_core::Year;
use fdm_sim::{SimObserver, YearActivity, YearSummary};

/// Households by the longest displacement they went through in a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisplacementDistribution {
    pub never:       usize,
    pub up_to_2:     usize,
    pub up_to_5:     usize,
    pub more_than_5: usize,
}

impl DisplacementDistribution {
    pub fn total(&self) -> usize {
        self.never + self.up_to_2 + self.up_to_5 + self.more_than_5
    }
}

/// Metrics accumulated over one run.  Also usable on its own as a
/// [`SimObserver`].
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunStatistics {
    /// Years simulated (excluding the initial state).
    pub years:                   u32,
    pub flood_years:             u32,
    pub warning_years:           u32,
    /// Entries into `Displaced`.
    pub displacement_episodes:   usize,
    /// Entries into `Evacuated` in years with a flood.
    pub flood_evacuations:       usize,
    /// Entries into `Evacuated` in years without a flood.
    pub false_alarm_evacuations: usize,
    /// Entries into `Trapped`.
    pub trapped_episodes:        usize,
    /// Largest number of households displaced at the end of any year.
    pub peak_displaced:          usize,
    /// Households displaced at the end of the final year.
    pub final_displaced:         usize,
    /// People in flooded households, summed over years.
    pub flooded_population:      u64,
    /// People in flooded households that stayed home, summed over years.
    pub affected_population:     u64,
    /// Longest `displacement_time` seen per household.
    max_displacement:            Vec<u32>,
}

impl RunStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold in one year.  The initial state (`Year(0)`) only sizes the
    /// per-household table.
    pub fn record_year(&mut self, summary: &YearSummary, activity: &YearActivity, households: &HouseholdStore) {
        if self.max_displacement.len() != households.count {
            self.max_displacement = vec![0; households.count];
        }
        for (max, &t) in self.max_displacement.iter_mut().zip(&households.displacement_time) {
            *max = (*max).max(t);
        }
        if summary.year == Year::ZERO {
            return;
        }

        self.years += 1;
        self.flood_years += summary.flood_event as u32;
        self.warning_years += summary.early_warning as u32;
        self.displacement_episodes += activity.entered.displaced;
        self.trapped_episodes += activity.entered.trapped;
        if summary.flood_event {
            self.flood_evacuations += activity.entered.evacuated;
        } else {
            self.false_alarm_evacuations += activity.entered.evacuated;
        }
        self.peak_displaced = self.peak_displaced.max(summary.counts.displaced);
        self.final_displaced = summary.counts.displaced;
        self.flooded_population += summary.flooded_population;
        self.affected_population += summary.affected_population;
    }

    pub fn displacement_distribution(&self) -> DisplacementDistribution {
        let mut d = DisplacementDistribution::default();
        for &t in &self.max_displacement {
            match t {
                0 => d.never += 1,
                1..=2 => d.up_to_2 += 1,
                3..=5 => d.up_to_5 += 1,
                _ => d.more_than_5 += 1,
            }
        }
        d
    }

    /// Longest displacement of each household, in `AgentId` order.
    pub fn max_displacement(&self) -> &[u32] {
        &self.max_displacement
    }

    /// Households displaced in `households` right now.
    pub fn displaced_now(households: &HouseholdStore) -> usize {
        households.status.iter().filter(|&&s| s == Status::Displaced).count()
    }
}

impl SimObserver for RunStatistics {
    fn on_year_end(&mut self, summary: &YearSummary, activity: &YearActivity, households: &HouseholdStore) {
        self.record_year(summary, activity, households);
    }

    fn on_sim_end(&mut self, _final_year: Year, households: &HouseholdStore) {
        self.final_displaced = Self::displaced_now(households);
    }
}
