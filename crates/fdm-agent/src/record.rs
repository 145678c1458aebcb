//! One row of population data.

use fdm_core::{FdmError, FdmResult, GeoPoint};

use crate::{Material, Village};

/// Static covariates and initial sentiment of one household, as supplied by
/// the population loader.
///
/// The vulnerability and ownership indices are expected pre-standardized;
/// income is standardized by the trapped-probability model itself.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HouseholdRecord {
    pub position:              GeoPoint,
    pub village:               Village,
    pub material:              Material,
    /// Income before livelihood losses, in poverty-line units.
    pub base_income:           f64,
    pub household_size:        u32,
    pub vulnerability:         f64,
    pub livestock:             f64,
    pub house_ownership:       f64,
    pub cropland:              f64,
    pub obstacles_to_movement: bool,
    pub flood_prone:           bool,
    pub awareness:             f64,
    pub fear:                  f64,
    /// Floods experienced before the run started.
    #[cfg_attr(feature = "serde", serde(default))]
    pub flood_exposure:        u32,
}

impl HouseholdRecord {
    /// Reject records that would put a household outside the model's domain.
    pub fn validate(&self) -> FdmResult<()> {
        if !self.position.is_finite() {
            return Err(FdmError::Config(format!(
                "position ({}, {}) is not finite",
                self.position.lat, self.position.lon
            )));
        }
        if self.household_size == 0 {
            return Err(FdmError::Config("household_size must be at least 1".into()));
        }
        FdmError::check_range("base_income", self.base_income, 0.0, f64::MAX)?;
        FdmError::check_range("vulnerability", self.vulnerability, f64::MIN, f64::MAX)?;
        FdmError::check_range("livestock", self.livestock, f64::MIN, f64::MAX)?;
        FdmError::check_range("house_ownership", self.house_ownership, f64::MIN, f64::MAX)?;
        FdmError::check_range("cropland", self.cropland, f64::MIN, f64::MAX)?;
        FdmError::check_unit("awareness", self.awareness)?;
        FdmError::check_unit("fear", self.fear)?;
        Ok(())
    }
}
