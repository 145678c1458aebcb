//! Logistic model of the chance a household is trapped.
//!
//! ```text
//! z     = (income - mean_base_income) / sd_base_income
//! x     = b_income * z + b_income_sq * z²
//!       + b_flood * min(flood_exposure, exposure_cap)
//!       + b_vuln * vulnerability + b_livestock * livestock
//!       + b_house * house_ownership + b_cropland * cropland
//!       + village_effect[village]
//! p     = σ(x) = exp(x) / (1 + exp(x))
//! ```
//!
//! Income is the household's *current* income, so livelihood losses and
//! basic income feed through.  Standardization constants come from the base
//! incomes of the population the model was fitted on.

use fdm_core::{AgentId, FdmError, FdmResult};

use crate::{HouseholdStore, Village};

/// Regression coefficients.  Defaults are the survey estimates.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrappedCoefficients {
    pub income:          f64,
    pub income_squared:  f64,
    pub flood_exposure:  f64,
    pub vulnerability:   f64,
    pub livestock:       f64,
    pub house_ownership: f64,
    pub cropland:        f64,
    /// Fixed effect per village, indexed by [`Village::index`].
    pub village_effects: [f64; Village::COUNT],
    /// Exposure counts above this are treated as this.
    pub exposure_cap:    u32,
}

impl Default for TrappedCoefficients {
    fn default() -> Self {
        let mut village_effects = [0.0; Village::COUNT];
        village_effects[Village::AlGaili.index()] = -0.0651;
        village_effects[Village::WawiseGarb.index()] = -0.798;
        village_effects[Village::Eltomaniat.index()] = -2.0;
        village_effects[Village::AlShuhada.index()] = 0.859;
        village_effects[Village::WawiseOumOjaija.index()] = 1.906;
        village_effects[Village::WadRamli.index()] = -0.82;
        Self {
            income:          -1.0,
            income_squared:  0.584,
            flood_exposure:  -0.32,
            vulnerability:   -0.801,
            livestock:       0.585,
            house_ownership: -0.619,
            cropland:        -0.514,
            village_effects,
            exposure_cap:    2,
        }
    }
}

impl TrappedCoefficients {
    pub fn validate(&self) -> FdmResult<()> {
        let named = [
            ("trapped.income", self.income),
            ("trapped.income_squared", self.income_squared),
            ("trapped.flood_exposure", self.flood_exposure),
            ("trapped.vulnerability", self.vulnerability),
            ("trapped.livestock", self.livestock),
            ("trapped.house_ownership", self.house_ownership),
            ("trapped.cropland", self.cropland),
        ];
        for (name, value) in named {
            FdmError::check_range(name, value, f64::MIN, f64::MAX)?;
        }
        for value in self.village_effects {
            FdmError::check_range("trapped.village_effects", value, f64::MIN, f64::MAX)?;
        }
        Ok(())
    }

    #[inline]
    pub fn village_effect(&self, village: Village) -> f64 {
        self.village_effects[village.index()]
    }
}

/// Numerically stable logistic function.  NaN maps to 0.
pub fn logistic(x: f64) -> f64 {
    if x.is_nan() {
        0.0
    } else if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Coefficients plus the income standardization of one population.
#[derive(Clone, Debug)]
pub struct TrappedProbabilityModel {
    pub coefficients: TrappedCoefficients,
    income_mean:      f64,
    income_sd:        f64,
}

impl TrappedProbabilityModel {
    /// Fit the income standardization to `store`'s base incomes.
    ///
    /// A constant (or empty) income column standardizes with sd 1.
    pub fn for_population(store: &HouseholdStore, coefficients: TrappedCoefficients) -> Self {
        let n = store.base_income.len();
        if n == 0 {
            return Self { coefficients, income_mean: 0.0, income_sd: 1.0 };
        }
        let mean = store.base_income.iter().sum::<f64>() / n as f64;
        let var = store.base_income.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n as f64;
        let sd = var.sqrt();
        let income_sd = if sd > f64::EPSILON { sd } else { 1.0 };
        Self { coefficients, income_mean: mean, income_sd }
    }

    pub fn income_mean(&self) -> f64 {
        self.income_mean
    }

    pub fn income_sd(&self) -> f64 {
        self.income_sd
    }

    /// Linear predictor for `agent`.
    pub fn linear_predictor(&self, store: &HouseholdStore, agent: AgentId) -> f64 {
        let c = &self.coefficients;
        let i = agent.index();
        let z = (store.income(agent) - self.income_mean) / self.income_sd;
        let exposure = store.flood_exposure[i].min(c.exposure_cap) as f64;
        c.income * z
            + c.income_squared * z * z
            + c.flood_exposure * exposure
            + c.vulnerability * store.vulnerability[i]
            + c.livestock * store.livestock[i]
            + c.house_ownership * store.house_ownership[i]
            + c.cropland * store.cropland[i]
            + c.village_effect(store.village[i])
    }

    pub fn probability(&self, store: &HouseholdStore, agent: AgentId) -> f64 {
        logistic(self.linear_predictor(store, agent))
    }

    /// Recompute and store `agent`'s trapped probability.
    pub fn refresh(&self, store: &mut HouseholdStore, agent: AgentId) -> f64 {
        let p = self.probability(store, agent);
        store.trapped_probability[agent.index()] = p;
        p
    }
}
