//! `HouseholdStore`: Structure-of-Arrays storage for every household.
//!
//! Every `Vec` field has exactly `count` elements and the `AgentId` value is
//! the index into all of them:
//!
//! ```ignore
//! let damage = store.house_damage[agent.index()];
//! ```
//!
//! Static covariates are copied from the [`HouseholdRecord`]s once at
//! construction.  Dynamic state is mutated only by the yearly stages in
//! `fdm-behavior`; status changes go through [`HouseholdStore::transition`]
//! so the outcome is visible at the call site.
//!
//! [`HouseholdRecord`]: crate::HouseholdRecord

use fdm_core::{AgentId, GeoPoint};

use crate::{AgentError, AgentResult, Material, Status, StatusCounts, Transition, Village};

pub struct HouseholdStore {
    /// Number of households.  Equals the length of every SoA `Vec`.
    pub count: usize,

    /// Amount added to every household's income.  Starts at 0; the
    /// simulation builder sets it from the basic-income program.
    pub basic_income: f64,

    // ── Static covariates ─────────────────────────────────────────────────
    pub position:              Vec<GeoPoint>,
    pub village:               Vec<Village>,
    pub base_income:           Vec<f64>,
    pub household_size:        Vec<u32>,
    pub vulnerability:         Vec<f64>,
    pub livestock:             Vec<f64>,
    pub house_ownership:       Vec<f64>,
    pub cropland:              Vec<f64>,
    pub obstacles_to_movement: Vec<bool>,
    pub flood_prone:           Vec<bool>,

    // ── Status ────────────────────────────────────────────────────────────
    pub status:            Vec<Status>,
    /// Set when the household left `Normal` this year; cleared by the
    /// flag-reset stage.
    pub status_changed:    Vec<bool>,
    /// Consecutive years spent `Displaced`.
    pub displacement_time: Vec<u32>,
    /// Displaced after an evacuation while poor: returns only below the low
    /// damage threshold.  Cleared on leaving `Displaced`.
    pub strict_return:     Vec<bool>,

    // ── Damage ────────────────────────────────────────────────────────────
    /// Construction material.  Upgraded by house-improvement programs.
    pub material:               Vec<Material>,
    /// Structural damage, a high-water mark in [0, 1].
    pub house_damage:           Vec<f64>,
    /// Accumulated livelihood loss in [0, 1].
    pub livelihood_damage:      Vec<f64>,
    /// This year's increase in `house_damage`.
    pub last_house_damage:      Vec<f64>,
    /// This year's increase in `livelihood_damage`.
    pub last_livelihood_damage: Vec<f64>,
    /// Floods experienced, including those before the run.
    pub flood_exposure:         Vec<u32>,

    // ── Sentiment ─────────────────────────────────────────────────────────
    pub trust:     Vec<f64>,
    pub fear:      Vec<f64>,
    pub awareness: Vec<f64>,

    // ── Yearly flags ──────────────────────────────────────────────────────
    pub alerted:        Vec<bool>,
    pub received_flood: Vec<bool>,
    pub prepared:       Vec<bool>,

    /// Chance the household cannot move even when it decides to, refreshed
    /// once per year.
    pub trapped_probability: Vec<f64>,
}

impl HouseholdStore {
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterator over all `AgentId`s in ascending index order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.count as u32).map(AgentId)
    }

    // ── Derived quantities ────────────────────────────────────────────────

    /// Risk perception: the mean of awareness and fear.
    #[inline]
    pub fn perception(&self, agent: AgentId) -> f64 {
        let i = agent.index();
        (self.awareness[i] + self.fear[i]) / 2.0
    }

    /// Current income: base income reduced by livelihood losses, plus any
    /// basic income.
    #[inline]
    pub fn income(&self, agent: AgentId) -> f64 {
        let i = agent.index();
        self.base_income[i] * (1.0 - self.livelihood_damage[i]) + self.basic_income
    }

    /// The larger of house and livelihood damage.
    #[inline]
    pub fn peak_damage(&self, agent: AgentId) -> f64 {
        let i = agent.index();
        self.house_damage[i].max(self.livelihood_damage[i])
    }

    pub fn status_counts(&self) -> StatusCounts {
        self.status.iter().copied().collect()
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Move `agent` to `to`.
    ///
    /// Leaving `Normal` sets `status_changed`, which keeps the household in
    /// this year's sentiment update.
    pub fn transition(&mut self, agent: AgentId, to: Status) -> Transition {
        let i = agent.index();
        let from = self.status[i];
        if from == to {
            return Transition::Unchanged;
        }
        self.status[i] = to;
        if from == Status::Normal {
            self.status_changed[i] = true;
        }
        Transition::into_status(to)
    }

    /// Clear the per-year flags and damage deltas of `agent`.
    pub fn reset_yearly_flags(&mut self, agent: AgentId) {
        let i = agent.index();
        self.alerted[i] = false;
        self.prepared[i] = false;
        self.received_flood[i] = false;
        self.status_changed[i] = false;
        self.last_house_damage[i] = 0.0;
        self.last_livelihood_damage[i] = 0.0;
    }

    // ── Invariant checks ──────────────────────────────────────────────────

    /// Every damage, sentiment, and probability value lies in [0, 1].
    pub fn check_unit_ranges(&self) -> AgentResult<()> {
        let fields: [(&'static str, &[f64]); 8] = [
            ("house_damage", self.house_damage.as_slice()),
            ("livelihood_damage", self.livelihood_damage.as_slice()),
            ("last_house_damage", self.last_house_damage.as_slice()),
            ("last_livelihood_damage", self.last_livelihood_damage.as_slice()),
            ("trust", self.trust.as_slice()),
            ("fear", self.fear.as_slice()),
            ("awareness", self.awareness.as_slice()),
            ("trapped_probability", self.trapped_probability.as_slice()),
        ];
        for (field, values) in fields {
            if let Some(i) = values.iter().position(|v| !(0.0..=1.0).contains(v)) {
                return Err(AgentError::OutOfUnitRange {
                    agent: AgentId(i as u32),
                    field,
                    value: values[i],
                });
            }
        }
        Ok(())
    }

    /// `displacement_time > 0` exactly for `Displaced` households, and only
    /// `Displaced` households carry `strict_return`.  Holds right after the
    /// return decision.
    pub fn check_displacement_time(&self) -> AgentResult<()> {
        for (i, (&status, &years)) in self.status.iter().zip(&self.displacement_time).enumerate() {
            let displaced = status == Status::Displaced;
            if (years > 0) != displaced || (self.strict_return[i] && !displaced) {
                return Err(AgentError::DisplacementOutOfSync {
                    agent: AgentId(i as u32),
                    status,
                    years,
                });
            }
        }
        Ok(())
    }

    // ── Crate-private constructor used by HouseholdStoreBuilder ───────────

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            count: 0,
            basic_income: 0.0,
            position:               Vec::with_capacity(capacity),
            village:                Vec::with_capacity(capacity),
            base_income:            Vec::with_capacity(capacity),
            household_size:         Vec::with_capacity(capacity),
            vulnerability:          Vec::with_capacity(capacity),
            livestock:              Vec::with_capacity(capacity),
            house_ownership:        Vec::with_capacity(capacity),
            cropland:               Vec::with_capacity(capacity),
            obstacles_to_movement:  Vec::with_capacity(capacity),
            flood_prone:            Vec::with_capacity(capacity),
            status:                 Vec::with_capacity(capacity),
            status_changed:         Vec::with_capacity(capacity),
            displacement_time:      Vec::with_capacity(capacity),
            strict_return:          Vec::with_capacity(capacity),
            material:               Vec::with_capacity(capacity),
            house_damage:           Vec::with_capacity(capacity),
            livelihood_damage:      Vec::with_capacity(capacity),
            last_house_damage:      Vec::with_capacity(capacity),
            last_livelihood_damage: Vec::with_capacity(capacity),
            flood_exposure:         Vec::with_capacity(capacity),
            trust:                  Vec::with_capacity(capacity),
            fear:                   Vec::with_capacity(capacity),
            awareness:              Vec::with_capacity(capacity),
            alerted:                Vec::with_capacity(capacity),
            received_flood:         Vec::with_capacity(capacity),
            prepared:               Vec::with_capacity(capacity),
            trapped_probability:    Vec::with_capacity(capacity),
        }
    }
}
