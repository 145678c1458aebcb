//! `fdm-core`: foundational types for the flood displacement model.
//!
//! This crate is a dependency of every other `fdm-*` crate.  It has no
//! `fdm-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `EventId`                                  |
//! | [`geo`]         | `GeoPoint`, haversine distance                        |
//! | [`time`]        | `Year`, `SimClock`, `SimConfig`                       |
//! | [`rng`]         | `SimRng` (the single per-run draw source)             |
//! | [`error`]       | `FdmError`, `FdmResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{FdmError, FdmResult};
pub use geo::GeoPoint;
pub use ids::{AgentId, EventId};
pub use rng::SimRng;
pub use time::{SimClock, SimConfig, Year};
