//! `ReportObserver<S>`: bridges `SimObserver` to a `ReportSink`.

use tracing::warn;

use fdm_agent::HouseholdStore;
use fdm_core::Year;
use fdm_sim::{SimObserver, YearActivity, YearSummary};

use crate::{HouseholdSnapshot, ReportError, ReportResult, ReportSink, RunStatistics};

/// A [`SimObserver`] that writes year summaries and household snapshots to
/// any [`ReportSink`] and accumulates [`RunStatistics`].
///
/// Errors from the sink are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct ReportObserver<S: ReportSink> {
    sink:       S,
    stats:      RunStatistics,
    households: bool,
    last_error: Option<ReportError>,
}

impl<S: ReportSink> ReportObserver<S> {
    /// Observer writing summaries and household snapshots to `sink`.
    pub fn new(sink: S) -> Self {
        Self { sink, stats: RunStatistics::new(), households: true, last_error: None }
    }

    /// Skip per-household rows; only year summaries reach the sink.
    pub fn summaries_only(mut self) -> Self {
        self.households = false;
        self
    }

    pub fn stats(&self) -> &RunStatistics {
        &self.stats
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Take the stored sink error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<ReportError> {
        self.last_error.take()
    }

    /// Unwrap the sink and the statistics.
    pub fn into_parts(self) -> (S, RunStatistics) {
        (self.sink, self.stats)
    }

    fn store_err(&mut self, result: ReportResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                warn!(error = %e, "report sink failed");
                self.last_error = Some(e);
            }
        }
    }
}

impl<S: ReportSink> SimObserver for ReportObserver<S> {
    fn on_year_end(&mut self, summary: &YearSummary, activity: &YearActivity, households: &HouseholdStore) {
        self.stats.record_year(summary, activity, households);
        let result = self.sink.write_summary(summary);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, year: Year, households: &HouseholdStore) {
        if !self.households || households.is_empty() {
            return;
        }
        let rows = HouseholdSnapshot::all(year, households);
        let result = self.sink.write_snapshots(&rows);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, final_year: Year, households: &HouseholdStore) {
        self.stats.on_sim_end(final_year, households);
        let result = self.sink.finish();
        self.store_err(result);
    }
}
