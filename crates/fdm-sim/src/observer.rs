//! Simulation observer trait for progress reporting and data collection.

use fdm_agent::HouseholdStore;
use fdm_core::Year;

use crate::{YearActivity, YearSummary};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// yearly loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter;
///
/// impl SimObserver for ProgressPrinter {
///     fn on_year_end(&mut self, summary: &YearSummary, _: &YearActivity, _: &HouseholdStore) {
///         println!("{}: {} displaced", summary.year, summary.counts.displaced);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the start of each simulated year, before the early warning
    /// is drawn.
    fn on_year_start(&mut self, _year: Year) {}

    /// Called after the last stage of each year, and once for `Year(0)` with
    /// the initial state and an empty `activity`.
    fn on_year_end(
        &mut self,
        _summary:    &YearSummary,
        _activity:   &YearActivity,
        _households: &HouseholdStore,
    ) {}

    /// Called at snapshot intervals (every `config.snapshot_interval_years`
    /// years, including `Year(0)`) with read-only access to every household.
    fn on_snapshot(&mut self, _year: Year, _households: &HouseholdStore) {}

    /// Called once after the final year completes.
    fn on_sim_end(&mut self, _final_year: Year, _households: &HouseholdStore) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// Forward every callback to two observers in turn.
impl<A: SimObserver, B: SimObserver> SimObserver for (A, B) {
    fn on_year_start(&mut self, year: Year) {
        self.0.on_year_start(year);
        self.1.on_year_start(year);
    }

    fn on_year_end(&mut self, summary: &YearSummary, activity: &YearActivity, households: &HouseholdStore) {
        self.0.on_year_end(summary, activity, households);
        self.1.on_year_end(summary, activity, households);
    }

    fn on_snapshot(&mut self, year: Year, households: &HouseholdStore) {
        self.0.on_snapshot(year, households);
        self.1.on_snapshot(year, households);
    }

    fn on_sim_end(&mut self, final_year: Year, households: &HouseholdStore) {
        self.0.on_sim_end(final_year, households);
        self.1.on_sim_end(final_year, households);
    }
}
