//! Simulation time model.
//!
//! # Design
//!
//! Time advances in whole simulated years.  A run step is a `Year` counter
//! starting at 0 (the initial state, before any stage has run); the first
//! simulated year is `Year(1)`.  The mapping to calendar years is held in
//! `SimClock`:
//!
//!   calendar_year = start_year + year
//!
//! Flood calendars and scenario windows are indexed by the run-relative
//! `Year`, so the same calendar can be replayed from any start year.

use std::fmt;

// ── Year ─────────────────────────────────────────────────────────────────────

/// A run-relative simulated year.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Year(pub u32);

impl Year {
    pub const ZERO: Year = Year(0);

    /// Return the year `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u32) -> Year {
        Year(self.0 + n)
    }

    /// Years elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: Year) -> u32 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<u32> for Year {
    type Output = Year;
    #[inline]
    fn add(self, rhs: u32) -> Year {
        Year(self.0 + rhs)
    }
}

impl std::ops::Sub for Year {
    type Output = u32;
    #[inline]
    fn sub(self, rhs: Year) -> u32 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Y{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Tracks the current run year and maps it to a calendar year.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Calendar year of `Year::ZERO`.
    pub start_year:   i32,
    /// The current year: advanced by `SimClock::advance()` before each
    /// simulated year runs.
    pub current_year: Year,
}

impl SimClock {
    pub fn new(start_year: i32) -> Self {
        Self { start_year, current_year: Year::ZERO }
    }

    /// Advance the clock by one year.
    #[inline]
    pub fn advance(&mut self) {
        self.current_year = Year(self.current_year.0 + 1);
    }

    /// Calendar year corresponding to `current_year`.
    #[inline]
    pub fn calendar_year(&self) -> i32 {
        self.start_year + self.current_year.0 as i32
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.current_year, self.calendar_year())
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level run configuration.
///
/// Typically loaded from a JSON file by the application crate and passed to
/// the simulation builder.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Calendar year of the initial state.
    pub start_year: i32,

    /// Number of years to simulate.  Studies of the villages ran 23–30 years.
    pub total_years: u32,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Report a household snapshot every N years.  1 = every year; 0 = never.
    pub snapshot_interval_years: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            start_year:              0,
            total_years:             30,
            seed:                    0,
            snapshot_interval_years: 1,
        }
    }
}

impl SimConfig {
    /// The last year the simulation runs (inclusive).
    #[inline]
    pub fn end_year(&self) -> Year {
        Year(self.total_years)
    }

    /// `true` if a household snapshot is due at `year`.
    #[inline]
    pub fn snapshot_due(&self, year: Year) -> bool {
        self.snapshot_interval_years > 0 && year.0.is_multiple_of(self.snapshot_interval_years)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.start_year)
    }
}
