//! `fdm-report`: data collection for the flood displacement model.
//!
//! [`ReportObserver`] implements `fdm_sim::SimObserver`.  After every year
//! it hands the [`YearSummary`][fdm_sim::YearSummary] to a [`ReportSink`];
//! at snapshot intervals it adds one [`HouseholdSnapshot`] per household.
//! It also folds every year into [`RunStatistics`] for policy comparison.
//!
//! | Sink              | Feature  | Output                              |
//! |-------------------|----------|-------------------------------------|
//! | [`MemorySink`]    | *(none)* | `Vec`s kept in memory               |
//! | `JsonLinesSink`   | `json`   | one JSON object per line, any `Write` |
//!
//! # Usage
//!
//! ```rust,ignore
//! use fdm_report::{MemorySink, ReportObserver};
//!
//! let mut obs = ReportObserver::new(MemorySink::new());
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() { eprintln!("report error: {e}"); }
//! let (sink, stats) = obs.into_parts();
//! ```

pub mod error;
pub mod observer;
pub mod row;
pub mod stats;
pub mod writer;

#[cfg(feature = "json")]
pub mod json;

#[cfg(test)]
mod tests;

pub use error::{ReportError, ReportResult};
pub use observer::ReportObserver;
pub use row::HouseholdSnapshot;
pub use stats::{DisplacementDistribution, RunStatistics};
pub use writer::{MemorySink, ReportSink};

#[cfg(feature = "json")]
pub use json::JsonLinesSink;
