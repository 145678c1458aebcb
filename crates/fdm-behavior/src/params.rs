//! Numeric thresholds and step sizes of the decision rules.

use fdm_core::FdmError;
use fdm_hazard::Material;

use crate::{BehaviorError, BehaviorResult};

/// How fast each construction class recovers, as a multiplier on the base
/// recovery rate.  Better materials recover faster.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MaterialRecovery {
    pub concrete:  f64,
    pub mud_brick: f64,
    pub informal:  f64,
}

impl Default for MaterialRecovery {
    fn default() -> Self {
        Self { concrete: 0.7, mud_brick: 0.6, informal: 0.5 }
    }
}

impl MaterialRecovery {
    #[inline]
    pub fn multiplier(&self, material: Material) -> f64 {
        match material {
            Material::Concrete           => self.concrete,
            Material::MudBrick           => self.mud_brick,
            Material::InformalSettlement => self.informal,
        }
    }
}

/// Every tunable number the household rules read.
///
/// Damage thresholds follow one boundary convention: a value `<=` the low
/// threshold is safe, a value `>` the high threshold is severe.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DecisionParams {
    /// Income below this is poor; above it households can self-repair.
    pub poverty_line:              f64,
    pub trust_threshold:           f64,
    pub risk_perception_threshold: f64,
    pub low_damage_threshold:      f64,
    pub high_damage_threshold:     f64,

    // ── Sentiment steps ──────────────────────────────────────────────────
    pub trust_change:       f64,
    pub fear_change:        f64,
    pub awareness_increase: f64,
    pub awareness_decrease: f64,
    /// Lower bound on awareness and fear without an awareness program.
    pub sentiment_floor:         f64,
    /// Lower bound on awareness and fear while an awareness program runs.
    pub awareness_program_floor: f64,

    // ── Social influence ─────────────────────────────────────────────────
    /// Share of badly damaged neighbours above which the near-miss draw
    /// happens.
    pub neighbours_high_damage_fraction: f64,
    /// Share of displaced neighbours above which a household follows them.
    pub displacement_contagion_fraction: f64,
    /// Share of evacuated / prepared neighbours above which a household
    /// follows them.
    pub evacuation_contagion_fraction:   f64,

    // ── Relocation ───────────────────────────────────────────────────────
    /// Extra trapped weight for households reporting obstacles to movement:
    /// `p' = p + (1 - p) * obstacle_penalty`.
    pub obstacle_penalty: f64,

    // ── Damage and recovery ──────────────────────────────────────────────
    /// Factor applied to this year's livelihood damage of prepared
    /// households.
    pub prepared_livelihood_factor: f64,
    pub base_recovery:              f64,
    pub material_recovery:          MaterialRecovery,
    /// Livelihood damage recovered per year by households living at home.
    pub livelihood_recovery:        f64,
    /// House damage a recovered household removes from each neighbour.
    pub neighbour_repair:           f64,
    /// Income paid per year by a basic-income program.
    pub basic_income_amount:        f64,
}

impl Default for DecisionParams {
    fn default() -> Self {
        Self {
            poverty_line:                    1.0,
            trust_threshold:                 0.5,
            risk_perception_threshold:       0.5,
            low_damage_threshold:            0.25,
            high_damage_threshold:           0.60,
            trust_change:                    0.1,
            fear_change:                     0.1,
            awareness_increase:              0.4,
            awareness_decrease:              0.1,
            sentiment_floor:                 0.0,
            awareness_program_floor:         0.5,
            neighbours_high_damage_fraction: 0.25,
            displacement_contagion_fraction: 0.75,
            evacuation_contagion_fraction:   0.5,
            obstacle_penalty:                0.5,
            prepared_livelihood_factor:      0.5,
            base_recovery:                   0.30,
            material_recovery:               MaterialRecovery::default(),
            livelihood_recovery:             0.2,
            neighbour_repair:                0.05,
            basic_income_amount:             1.0,
        }
    }
}

impl DecisionParams {
    /// Fail fast on values the rules cannot work with.
    pub fn validate(&self) -> BehaviorResult<()> {
        FdmError::check_range("poverty_line", self.poverty_line, f64::MIN_POSITIVE, f64::MAX)?;
        FdmError::check_range("basic_income_amount", self.basic_income_amount, 0.0, f64::MAX)?;

        let unit = [
            ("trust_threshold", self.trust_threshold),
            ("risk_perception_threshold", self.risk_perception_threshold),
            ("low_damage_threshold", self.low_damage_threshold),
            ("high_damage_threshold", self.high_damage_threshold),
            ("trust_change", self.trust_change),
            ("fear_change", self.fear_change),
            ("awareness_increase", self.awareness_increase),
            ("awareness_decrease", self.awareness_decrease),
            ("sentiment_floor", self.sentiment_floor),
            ("awareness_program_floor", self.awareness_program_floor),
            ("neighbours_high_damage_fraction", self.neighbours_high_damage_fraction),
            ("displacement_contagion_fraction", self.displacement_contagion_fraction),
            ("evacuation_contagion_fraction", self.evacuation_contagion_fraction),
            ("obstacle_penalty", self.obstacle_penalty),
            ("prepared_livelihood_factor", self.prepared_livelihood_factor),
            ("base_recovery", self.base_recovery),
            ("material_recovery.concrete", self.material_recovery.concrete),
            ("material_recovery.mud_brick", self.material_recovery.mud_brick),
            ("material_recovery.informal", self.material_recovery.informal),
            ("livelihood_recovery", self.livelihood_recovery),
            ("neighbour_repair", self.neighbour_repair),
        ];
        for (name, value) in unit {
            FdmError::check_unit(name, value)?;
        }

        if self.low_damage_threshold >= self.high_damage_threshold {
            return Err(BehaviorError::ThresholdOrder {
                low:  self.low_damage_threshold,
                high: self.high_damage_threshold,
            });
        }
        Ok(())
    }

    #[inline]
    pub fn is_poor(&self, income: f64) -> bool {
        income < self.poverty_line
    }
}
