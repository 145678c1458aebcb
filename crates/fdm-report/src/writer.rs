//! The `ReportSink` trait and the in-memory sink.

use fdm_sim::YearSummary;

use crate::{HouseholdSnapshot, ReportError, ReportResult};

/// Destination for collected reports.
///
/// All methods are infallible from the observer's perspective: errors are
/// stored internally and retrieved with
/// [`ReportObserver::take_error`][crate::ReportObserver::take_error].
pub trait ReportSink {
    /// Write one model-level row.
    fn write_summary(&mut self, summary: &YearSummary) -> ReportResult<()>;

    /// Write a batch of household rows.
    fn write_snapshots(&mut self, rows: &[HouseholdSnapshot]) -> ReportResult<()>;

    /// Flush any buffered output.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> ReportResult<()>;
}

/// Keeps every row in memory, for tests and in-process analysis.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    pub summaries: Vec<YearSummary>,
    pub snapshots: Vec<HouseholdSnapshot>,
    finished:      bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Household rows of one year.
    pub fn snapshots_of(&self, year: u32) -> impl Iterator<Item = &HouseholdSnapshot> + '_ {
        self.snapshots.iter().filter(move |r| r.year == year)
    }
}

impl ReportSink for MemorySink {
    fn write_summary(&mut self, summary: &YearSummary) -> ReportResult<()> {
        if self.finished {
            return Err(ReportError::Finished);
        }
        self.summaries.push(summary.clone());
        Ok(())
    }

    fn write_snapshots(&mut self, rows: &[HouseholdSnapshot]) -> ReportResult<()> {
        if self.finished {
            return Err(ReportError::Finished);
        }
        self.snapshots.extend_from_slice(rows);
        Ok(())
    }

    fn finish(&mut self) -> ReportResult<()> {
        self.finished = true;
        Ok(())
    }
}
