//! `fdm-hazard`: everything the household engine needs to know about water.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                       |
//! |--------------|----------------------------------------------------------------|
//! | [`curves`]   | `Material`, `DamageCurve`, `DamageCurves`, `LivelihoodCurve`   |
//! | [`field`]    | `FloodField` / `EventCalendar` traits, `FloodEvent`, `FloodCalendar`, `Scenario` |
//! | [`warning`]  | `EarlyWarningSystem`, named `EwsMode` presets                   |
//! | [`error`]    | `HazardError`, `HazardResult<T>`                                |
//!
//! Raster parsing and coordinate-to-cell mapping happen outside this crate:
//! a [`FloodEvent`] arrives with one pre-sampled water level per household.

pub mod curves;
pub mod error;
pub mod field;
pub mod warning;


pub use curves::{DamageCurve, DamageCurves, LivelihoodCurve, Material};
pub use error::{HazardError, HazardResult};
pub use field::{sanitize_water_level, EventCalendar, FloodCalendar, FloodEvent, FloodField, Scenario};
pub use warning::{EarlyWarningSystem, EwsMode};
