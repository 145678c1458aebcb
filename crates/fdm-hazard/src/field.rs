//! Flood field and event calendar.
//!
//! The engine asks two questions of the outside world each year: "is there
//! a flood this year?" ([`EventCalendar`]) and "how deep is the water at this
//! household?" ([`FloodField`]).  [`FloodCalendar`] answers both from a list
//! of [`FloodEvent`]s whose water levels were sampled per household by the
//! raster layer.

use std::collections::BTreeMap;

use tracing::warn;

use fdm_core::{AgentId, EventId, Year};

use crate::{HazardError, HazardResult};

// ── Traits ────────────────────────────────────────────────────────────────────

/// Per-household water level for a given year.
pub trait FloodField {
    /// Water level in millimetres at `agent` during `year`.
    ///
    /// Must be finite and non-negative; absence of data reads as 0.
    fn water_level_at(&self, agent: AgentId, year: Year) -> f64;
}

/// Which years carry a flood event.
pub trait EventCalendar {
    fn has_flood_event(&self, year: Year) -> bool;
}

/// Map raw raster samples onto the field contract: NaN, infinite, and
/// negative values (nodata sentinels) all read as dry.
#[inline]
pub fn sanitize_water_level(raw: f64) -> f64 {
    if raw.is_finite() && raw > 0.0 { raw } else { 0.0 }
}

// ── FloodEvent ────────────────────────────────────────────────────────────────

/// One flood event from the external event calendar.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FloodEvent {
    pub id:            EventId,
    /// Calendar year the event occurred in.
    pub calendar_year: i32,
    /// Return period (years) of the event, for reporting only.
    pub return_period: f32,
    /// Water level in mm at each household, indexed by `AgentId`.
    pub depths:        Vec<f32>,
}

// ── Scenario ──────────────────────────────────────────────────────────────────

/// A window `[start_year, end_year)` of the event calendar replayed as one
/// run.  The first calendar year of the window is simulated as `Year(1)`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scenario {
    pub name:       String,
    pub start_year: i32,
    pub end_year:   i32,
}

impl Scenario {
    pub fn new(name: impl Into<String>, start_year: i32, end_year: i32) -> HazardResult<Self> {
        let name = name.into();
        if end_year <= start_year {
            return Err(HazardError::EmptyScenario { name, start: start_year, end: end_year });
        }
        Ok(Self { name, start_year, end_year })
    }

    /// Number of simulated years the window covers.
    pub fn years(&self) -> u32 {
        (self.end_year - self.start_year) as u32
    }

    /// Calendar year of the initial state (`Year::ZERO`), for `SimConfig`.
    pub fn initial_calendar_year(&self) -> i32 {
        self.start_year - 1
    }

    /// Run year of `calendar_year`, or `None` if it falls outside the window.
    pub fn run_year(&self, calendar_year: i32) -> Option<Year> {
        (self.start_year..self.end_year)
            .contains(&calendar_year)
            .then(|| Year((calendar_year - self.start_year) as u32 + 1))
    }
}

// ── FloodCalendar ─────────────────────────────────────────────────────────────

/// In-memory [`FloodField`] + [`EventCalendar`].
///
/// Several events in the same year combine by taking, per household, the
/// maximum water level over those events.
#[derive(Clone, Debug, Default)]
pub struct FloodCalendar {
    households: usize,
    /// Combined per-household depth (mm) for every flooded year.
    years:      BTreeMap<Year, Vec<f32>>,
    /// Events contributing to each year.
    events:     BTreeMap<Year, Vec<EventId>>,
}

impl FloodCalendar {
    /// A calendar with no flood events for `households` households.
    pub fn empty(households: usize) -> Self {
        Self { households, ..Self::default() }
    }

    /// Replay the events of `scenario`'s window; events outside it are
    /// dropped.
    pub fn for_scenario<I>(households: usize, scenario: &Scenario, events: I) -> HazardResult<Self>
    where
        I: IntoIterator<Item = FloodEvent>,
    {
        let mut calendar = Self::empty(households);
        for event in events {
            if let Some(year) = scenario.run_year(event.calendar_year) {
                calendar.add_event(year, event)?;
            }
        }
        Ok(calendar)
    }

    /// Register `event` as occurring in run year `year`.
    pub fn add_event(&mut self, year: Year, event: FloodEvent) -> HazardResult<()> {
        if event.depths.len() != self.households {
            return Err(HazardError::DepthCountMismatch {
                event:    event.id,
                expected: self.households,
                got:      event.depths.len(),
            });
        }
        let invalid = event.depths.iter().filter(|d| !d.is_finite()).count();
        if invalid > 0 {
            warn!(event = %event.id, invalid, "flood event has non-finite water levels; treating them as dry");
        }

        let combined = self
            .years
            .entry(year)
            .or_insert_with(|| vec![0.0; self.households]);
        for (slot, &depth) in combined.iter_mut().zip(&event.depths) {
            let depth = sanitize_water_level(depth as f64) as f32;
            if depth > *slot {
                *slot = depth;
            }
        }
        self.events.entry(year).or_default().push(event.id);
        Ok(())
    }

    /// Number of households the calendar covers.
    pub fn households(&self) -> usize {
        self.households
    }

    /// Flooded years in ascending order.
    pub fn flood_years(&self) -> impl Iterator<Item = Year> + '_ {
        self.years.keys().copied()
    }

    /// Events contributing to `year` (empty when dry).
    pub fn events_in(&self, year: Year) -> &[EventId] {
        self.events.get(&year).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl FloodField for FloodCalendar {
    fn water_level_at(&self, agent: AgentId, year: Year) -> f64 {
        self.years
            .get(&year)
            .and_then(|depths| depths.get(agent.index()))
            .map(|&d| sanitize_water_level(d as f64))
            .unwrap_or(0.0)
    }
}

impl EventCalendar for FloodCalendar {
    fn has_flood_event(&self, year: Year) -> bool {
        self.years.contains_key(&year)
    }
}
