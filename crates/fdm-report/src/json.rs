//! JSON-lines sink: one tagged object per row.
//!
//! ```text
//! {"kind":"summary","year":1,"calendar_year":2001,...}
//! {"kind":"household","year":1,"agent_id":0,"village":"AlGaili",...}
//! ```

use std::io::{BufWriter, Write};

use fdm_sim::YearSummary;
use serde::Serialize;

use crate::{HouseholdSnapshot, ReportResult, ReportSink};

#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum Line<'a> {
    Summary(&'a YearSummary),
    Household(&'a HouseholdSnapshot),
}

/// Writes rows as JSON lines to any writer (a file, stdout, a `Vec<u8>`).
pub struct JsonLinesSink<W: Write> {
    out: BufWriter<W>,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(inner: W) -> Self {
        Self { out: BufWriter::new(inner) }
    }

    /// Flush and return the inner writer.
    pub fn into_inner(self) -> ReportResult<W> {
        self.out.into_inner().map_err(|e| e.into_error().into())
    }

    fn line(&mut self, line: &Line<'_>) -> ReportResult<()> {
        serde_json::to_writer(&mut self.out, line)?;
        self.out.write_all(b"\n")?;
        Ok(())
    }
}

impl<W: Write> ReportSink for JsonLinesSink<W> {
    fn write_summary(&mut self, summary: &YearSummary) -> ReportResult<()> {
        self.line(&Line::Summary(summary))
    }

    fn write_snapshots(&mut self, rows: &[HouseholdSnapshot]) -> ReportResult<()> {
        for row in rows {
            self.line(&Line::Household(row))?;
        }
        Ok(())
    }

    fn finish(&mut self) -> ReportResult<()> {
        self.out.flush()?;
        Ok(())
    }
}
