//! The `Sim` struct and its yearly loop.

use tracing::{info, warn};

use fdm_agent::{HouseholdStore, TrappedProbabilityModel};
use fdm_behavior::{DecisionParams, ProgramConfig, StageContext};
use fdm_core::{SimClock, SimConfig, SimRng, Year};
use fdm_hazard::{DamageCurves, EventCalendar, FloodField, LivelihoodCurve};
use fdm_spatial::NeighborTable;

use crate::{SimObserver, SimResult, StagedScheduler, YearActivity, YearSummary};

/// The main simulation runner.
///
/// `Sim<H>` holds the household population, the flood hazard `H`, and the
/// run configuration, and advances them one simulated year at a time:
///
/// 1. **Hazard**: ask the calendar whether a flood occurs this year and
///    draw the early warning (false alarms and misses included).
/// 2. **Stages**: run the [`StagedScheduler`] pipeline over every household.
/// 3. **Report**: collect a [`YearSummary`] and notify the observer.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<H: FloodField + EventCalendar> {
    /// Years, seed, start year, snapshot interval.
    pub config: SimConfig,

    /// Run-relative year and its calendar-year mapping.
    pub clock: SimClock,

    /// Household state (SoA arrays).
    pub households: HouseholdStore,

    /// Flood field and event calendar.
    pub hazard: H,

    /// Neighbour lists, computed once at construction.
    pub neighbours: NeighborTable,

    pub params:     DecisionParams,
    pub programs:   ProgramConfig,
    pub curves:     DamageCurves,
    pub livelihood: LivelihoodCurve,
    pub trapped:    TrappedProbabilityModel,

    pub scheduler: StagedScheduler,

    /// The run's single draw source.
    pub rng: SimRng,
}

impl<H: FloodField + EventCalendar> Sim<H> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run from the current year to `config.end_year()` and return the
    /// summary of the last year.
    ///
    /// When called on a fresh simulation the initial state is reported first
    /// as `Year(0)`.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<YearSummary> {
        if self.households.is_empty() {
            warn!("running a simulation with no households");
        }
        let mut last = self.report_initial(observer);
        while self.clock.current_year < self.config.end_year() {
            last = self.step_observed(observer)?;
        }
        observer.on_sim_end(self.clock.current_year, &self.households);
        Ok(last)
    }

    /// Run exactly `n` years from the current position (ignores `end_year`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_years<O: SimObserver>(&mut self, n: u32, observer: &mut O) -> SimResult<YearSummary> {
        let mut last = self.report_initial(observer);
        for _ in 0..n {
            last = self.step_observed(observer)?;
        }
        Ok(last)
    }

    /// Advance one year without observer callbacks.
    pub fn step(&mut self) -> SimResult<(YearSummary, YearActivity)> {
        self.clock.advance();
        let year = self.clock.current_year;

        let flood_event = self.hazard.has_flood_event(year);
        let early_warning = self.programs.early_warning.emit(flood_event, &mut self.rng);

        // Explicit field borrows so the borrow checker sees disjoint access.
        let ctx = StageContext {
            year,
            flood_event,
            early_warning,
            params:     &self.params,
            programs:   &self.programs,
            neighbours: &self.neighbours,
            flood:      &self.hazard,
            curves:     &self.curves,
            livelihood: &self.livelihood,
            trapped:    &self.trapped,
        };
        let activity = self.scheduler.run_year(&mut self.households, &ctx, &mut self.rng);

        self.households.check_unit_ranges()?;

        let summary = YearSummary::collect(
            year,
            self.clock.calendar_year(),
            flood_event,
            early_warning,
            &self.households,
        );
        info!(
            %year,
            calendar_year = summary.calendar_year,
            flood_event,
            early_warning,
            normal    = summary.counts.normal,
            evacuated = summary.counts.evacuated,
            displaced = summary.counts.displaced,
            trapped   = summary.counts.trapped,
            flooded   = activity.flooded,
            "year complete"
        );
        Ok((summary, activity))
    }

    /// Summary of the current state, without advancing.
    pub fn summary(&self) -> YearSummary {
        YearSummary::collect(
            self.clock.current_year,
            self.clock.calendar_year(),
            false,
            false,
            &self.households,
        )
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn report_initial<O: SimObserver>(&self, observer: &mut O) -> YearSummary {
        let summary = self.summary();
        if self.clock.current_year == Year::ZERO {
            observer.on_year_end(&summary, &YearActivity::default(), &self.households);
            if self.config.snapshot_due(Year::ZERO) {
                observer.on_snapshot(Year::ZERO, &self.households);
            }
        }
        summary
    }

    fn step_observed<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<YearSummary> {
        observer.on_year_start(self.clock.current_year + 1);
        let (summary, activity) = self.step()?;
        observer.on_year_end(&summary, &activity, &self.households);
        if self.config.snapshot_due(summary.year) {
            observer.on_snapshot(summary.year, &self.households);
        }
        Ok(summary)
    }
}
