//! Depth-damage functions.
//!
//! House damage is a piecewise-linear lookup over a material-specific curve
//! of `(water level mm, damage fraction)` points.  Below the first point the
//! curve reads 0; above the last point it holds the last value.  Livelihood
//! damage is a single linear ramp shared by every household.

use std::fmt;
use std::str::FromStr;

use fdm_core::FdmError;

use crate::{HazardError, HazardResult};

// ── Material ──────────────────────────────────────────────────────────────────

/// Construction class of a dwelling.  Each class has its own damage curve
/// and recovery multiplier.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Material {
    /// Reinforced concrete or stone bricks.  Best-performing class.
    Concrete,
    /// Mud bricks or wood.
    #[default]
    MudBrick,
    /// Informal settlement (tents, straw, scrap).
    InformalSettlement,
}

impl Material {
    /// The class house-improvement programs upgrade to.
    pub const BEST: Material = Material::Concrete;

    pub fn as_str(self) -> &'static str {
        match self {
            Material::Concrete           => "concrete",
            Material::MudBrick           => "mud_brick",
            Material::InformalSettlement => "informal_settlement",
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Material {
    type Err = FdmError;

    /// Accepts the survey labels as well as the `as_str` names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "concrete" | "stone bricks" | "stone_bricks" | "reinforced" => Ok(Material::Concrete),
            "mud bricks" | "mud_bricks" | "mud_brick" | "wood"          => Ok(Material::MudBrick),
            "informal settlement" | "informal_settlement"              => Ok(Material::InformalSettlement),
            _ => Err(FdmError::UnknownKey { kind: "material", key: s.to_owned() }),
        }
    }
}

// ── DamageCurve ───────────────────────────────────────────────────────────────

/// A monotonically non-decreasing piecewise-linear curve.
///
/// Serialized as its list of points; deserializing runs the same checks as
/// [`DamageCurve::new`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<(f64, f64)>", into = "Vec<(f64, f64)>"))]
pub struct DamageCurve {
    /// `(water level mm, damage)` pairs, water strictly increasing.
    points: Vec<(f64, f64)>,
}

impl DamageCurve {
    /// Validate and build a curve.
    ///
    /// Requirements: at least one point; water levels finite and strictly
    /// increasing; damage values in [0, 1] and non-decreasing.
    pub fn new(name: &'static str, points: Vec<(f64, f64)>) -> HazardResult<Self> {
        let fail = |reason: String| HazardError::Curve { name, reason };
        if points.is_empty() {
            return Err(fail("curve has no points".into()));
        }
        for (i, &(w, d)) in points.iter().enumerate() {
            if !w.is_finite() {
                return Err(fail(format!("water level {w} at point {i} is not finite")));
            }
            if !(0.0..=1.0).contains(&d) {
                return Err(fail(format!("damage {d} at point {i} is outside [0, 1]")));
            }
            if i > 0 {
                let (pw, pd) = points[i - 1];
                if w <= pw {
                    return Err(fail(format!("water levels not increasing at point {i}")));
                }
                if d < pd {
                    return Err(fail(format!("damage decreases at point {i}")));
                }
            }
        }
        Ok(Self { points })
    }

    /// Interpolated damage at `water_mm`.  Callers pass sanitized levels.
    pub fn eval(&self, water_mm: f64) -> f64 {
        let Some(&first) = self.points.first() else {
            return 0.0;
        };
        if water_mm < first.0 {
            return 0.0;
        }
        // First point whose water level exceeds the query.
        let upper = self.points.partition_point(|&(w, _)| w <= water_mm);
        if upper == self.points.len() {
            return self.points[upper - 1].1;
        }
        let (w0, d0) = self.points[upper - 1];
        let (w1, d1) = self.points[upper];
        d0 + (d1 - d0) * (water_mm - w0) / (w1 - w0)
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }
}

impl TryFrom<Vec<(f64, f64)>> for DamageCurve {
    type Error = HazardError;

    fn try_from(points: Vec<(f64, f64)>) -> HazardResult<Self> {
        DamageCurve::new("loaded", points)
    }
}

impl From<DamageCurve> for Vec<(f64, f64)> {
    fn from(curve: DamageCurve) -> Self {
        curve.points
    }
}

// ── DamageCurves ──────────────────────────────────────────────────────────────

/// One house-damage curve per [`Material`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageCurves {
    pub concrete:  DamageCurve,
    pub mud_brick: DamageCurve,
    pub informal:  DamageCurve,
}

impl DamageCurves {
    /// Structural damage for `water_mm` on a house of `material`.
    ///
    /// Returns 0 for dry (or NaN / negative) water levels.
    pub fn house_damage(&self, water_mm: f64, material: Material) -> f64 {
        if water_mm.is_nan() || water_mm <= 0.0 {
            return 0.0;
        }
        self.curve(material).eval(water_mm)
    }

    /// Re-check every curve, e.g. after loading them from a run file.
    pub fn validate(&self) -> HazardResult<()> {
        DamageCurve::new("concrete", self.concrete.points.clone())?;
        DamageCurve::new("mud_brick", self.mud_brick.points.clone())?;
        DamageCurve::new("informal", self.informal.points.clone())?;
        Ok(())
    }

    pub fn curve(&self, material: Material) -> &DamageCurve {
        match material {
            Material::Concrete           => &self.concrete,
            Material::MudBrick           => &self.mud_brick,
            Material::InformalSettlement => &self.informal,
        }
    }
}

impl Default for DamageCurves {
    /// Residential curves ordered by construction quality: at every
    /// positive depth, concrete < mud brick < informal settlement.
    fn default() -> Self {
        // Literal points satisfy `DamageCurve::new`'s checks.
        Self {
            concrete: DamageCurve {
                points: vec![
                    (0.0, 0.0), (250.0, 0.05), (500.0, 0.15), (1_000.0, 0.35),
                    (1_500.0, 0.50), (2_000.0, 0.60), (3_000.0, 0.75), (6_000.0, 0.90),
                ],
            },
            mud_brick: DamageCurve {
                points: vec![
                    (0.0, 0.0), (250.0, 0.15), (500.0, 0.35), (1_000.0, 0.60),
                    (1_500.0, 0.75), (2_000.0, 0.85), (3_000.0, 0.95), (6_000.0, 1.0),
                ],
            },
            informal: DamageCurve {
                points: vec![
                    (0.0, 0.0), (250.0, 0.30), (500.0, 0.55), (1_000.0, 0.80),
                    (1_500.0, 0.90), (2_000.0, 1.0),
                ],
            },
        }
    }
}

// ── LivelihoodCurve ───────────────────────────────────────────────────────────

/// Linear ramp from `threshold_mm` (no effect) to `saturation_mm` (total
/// loss of this year's livelihood).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LivelihoodCurve {
    pub threshold_mm:  f64,
    pub saturation_mm: f64,
}

impl Default for LivelihoodCurve {
    fn default() -> Self {
        Self { threshold_mm: 100.0, saturation_mm: 1_000.0 }
    }
}

impl LivelihoodCurve {
    pub fn validate(&self) -> HazardResult<()> {
        FdmError::check_range("livelihood.threshold_mm", self.threshold_mm, 0.0, f64::MAX)?;
        if !self.saturation_mm.is_finite() || self.saturation_mm <= self.threshold_mm {
            return Err(HazardError::Curve {
                name:   "livelihood",
                reason: format!(
                    "saturation {} must be finite and above threshold {}",
                    self.saturation_mm, self.threshold_mm
                ),
            });
        }
        Ok(())
    }

    /// Livelihood damage fraction for `water_mm`.
    pub fn damage(&self, water_mm: f64) -> f64 {
        if water_mm.is_nan() || water_mm <= self.threshold_mm {
            return 0.0;
        }
        if water_mm >= self.saturation_mm {
            return 1.0;
        }
        (water_mm - self.threshold_mm) / (self.saturation_mm - self.threshold_mm)
    }
}
