//! `fdm-sim`: yearly loop orchestrator for the flood displacement model.
//!
//! # Staged yearly loop
//!
//! ```text
//! for year in 1..=config.total_years:
//!   ① Hazard:  flood event this year?  draw the early warning.
//!   ② Stages:  for each stage of the pipeline, in order:
//!                  shuffle households, run the stage for every household,
//!                  barrier.
//!   ③ Report:  YearSummary → observer; household snapshot at intervals.
//! ```
//!
//! Default pipeline:
//!
//! | # | Stage                               |
//! |---|-------------------------------------|
//! | 1 | refresh trapped probability         |
//! | 2 | return decision                     |
//! | 3 | reset yearly flags                  |
//! | 4 | early-warning check                 |
//! |   | (evacuation contagion, if enabled)  |
//! | 5 | flood reaction                      |
//! | 6 | displacement decision               |
//! | 7 | neighbour displacement contagion    |
//! | 8 | sentiment update                    |
//! | 9 | own recovery and repair programs    |
//! | 10| neighbour mutual aid                |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs independent replicas on Rayon's thread pool.      |
//! | `serde`    | Derives Serialize/Deserialize on `Stage`, `YearSummary`.|
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use fdm_agent::HouseholdStoreBuilder;
//! use fdm_core::SimConfig;
//! use fdm_hazard::FloodCalendar;
//! use fdm_sim::{NoopObserver, SimBuilder};
//!
//! let households = HouseholdStoreBuilder::new().extend(records).build()?;
//! let calendar = FloodCalendar::empty(households.count);
//! let mut sim = SimBuilder::new(SimConfig::default(), households, calendar).build()?;
//! let last = sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod replica;
pub mod scheduler;
pub mod sim;
pub mod stage;
pub mod summary;


pub use builder::{SimBuilder, DEFAULT_NEIGHBOUR_RADIUS};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use replica::{replica_seeds, run_replicas, run_replicas_observed};
pub use scheduler::{StagedScheduler, YearActivity};
pub use sim::Sim;
pub use stage::Stage;
pub use summary::YearSummary;
