//! Fluent builder for constructing a `HouseholdStore` from population records.
//!
//! # Usage
//!
//! ```rust,ignore
//! let store = HouseholdStoreBuilder::new()
//!     .initial_trust(0.75)
//!     .active_villages([Village::AlGaili, Village::WadRamli])
//!     .extend(records)
//!     .build()?;
//! ```
//!
//! Records from villages outside the active set are skipped; the remaining
//! households get dense `AgentId`s in record order.

use tracing::debug;

use fdm_core::FdmError;

use crate::{AgentError, AgentResult, HouseholdRecord, HouseholdStore, Status, Village};

/// Fluent builder for [`HouseholdStore`].
pub struct HouseholdStoreBuilder {
    records:       Vec<HouseholdRecord>,
    initial_trust: f64,
    villages:      Option<Vec<Village>>,
}

impl Default for HouseholdStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HouseholdStoreBuilder {
    pub fn new() -> Self {
        Self {
            records:       Vec::new(),
            initial_trust: 0.5,
            villages:      None,
        }
    }

    /// Trust every household starts with.  Run-level parameter.
    pub fn initial_trust(mut self, trust: f64) -> Self {
        self.initial_trust = trust;
        self
    }

    /// Restrict the population to households of these villages.
    pub fn active_villages(mut self, villages: impl IntoIterator<Item = Village>) -> Self {
        self.villages = Some(villages.into_iter().collect());
        self
    }

    pub fn push(mut self, record: HouseholdRecord) -> Self {
        self.records.push(record);
        self
    }

    pub fn extend(mut self, records: impl IntoIterator<Item = HouseholdRecord>) -> Self {
        self.records.extend(records);
        self
    }

    /// Validate every record and lay the population out in SoA form.
    pub fn build(self) -> AgentResult<HouseholdStore> {
        FdmError::check_unit("initial_trust", self.initial_trust)?;

        let mut store = HouseholdStore::with_capacity(self.records.len());
        let mut skipped = 0usize;

        for (index, r) in self.records.into_iter().enumerate() {
            r.validate().map_err(|source| AgentError::InvalidRecord { index, source })?;
            if let Some(active) = &self.villages {
                if !active.contains(&r.village) {
                    skipped += 1;
                    continue;
                }
            }

            store.position.push(r.position);
            store.village.push(r.village);
            store.base_income.push(r.base_income);
            store.household_size.push(r.household_size);
            store.vulnerability.push(r.vulnerability);
            store.livestock.push(r.livestock);
            store.house_ownership.push(r.house_ownership);
            store.cropland.push(r.cropland);
            store.obstacles_to_movement.push(r.obstacles_to_movement);
            store.flood_prone.push(r.flood_prone);

            store.status.push(Status::Normal);
            store.status_changed.push(false);
            store.displacement_time.push(0);
            store.strict_return.push(false);

            store.material.push(r.material);
            store.house_damage.push(0.0);
            store.livelihood_damage.push(0.0);
            store.last_house_damage.push(0.0);
            store.last_livelihood_damage.push(0.0);
            store.flood_exposure.push(r.flood_exposure);

            store.trust.push(self.initial_trust);
            store.fear.push(r.fear);
            store.awareness.push(r.awareness);

            store.alerted.push(false);
            store.received_flood.push(false);
            store.prepared.push(false);
            store.trapped_probability.push(0.0);

            store.count += 1;
        }

        debug!(households = store.count, skipped, "household store built");
        Ok(store)
    }
}
