//! Fluent builder for constructing a [`Sim`].

use tracing::{debug, warn};

use fdm_agent::{HouseholdStore, TrappedCoefficients, TrappedProbabilityModel};
use fdm_behavior::{DecisionParams, ProgramConfig};
use fdm_core::{SimConfig, SimRng};
use fdm_hazard::{DamageCurves, EventCalendar, FloodField, LivelihoodCurve};
use fdm_spatial::{NeighborTable, RTreeIndex};

use crate::{Sim, SimError, SimResult, Stage, StagedScheduler};

/// Default neighbourhood radius in degrees (about 220 m at the equator).
pub const DEFAULT_NEIGHBOUR_RADIUS: f32 = 0.002;

/// Fluent builder for [`Sim<H>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: years, seed, start year, snapshot interval
/// - [`HouseholdStore`]: from [`fdm_agent::HouseholdStoreBuilder`]
/// - `H: FloodField + EventCalendar`: the hazard, e.g. [`fdm_hazard::FloodCalendar`]
///
/// # Optional inputs (have defaults)
///
/// | Method                       | Default                               |
/// |------------------------------|---------------------------------------|
/// | `.params(p)`                 | `DecisionParams::default()`           |
/// | `.programs(p)`               | `ProgramConfig::default()`            |
/// | `.curves(c)`                 | `DamageCurves::default()`             |
/// | `.livelihood(c)`             | `LivelihoodCurve::default()`          |
/// | `.trapped_coefficients(c)`   | `TrappedCoefficients::default()`      |
/// | `.neighbour_radius(r)`       | [`DEFAULT_NEIGHBOUR_RADIUS`]          |
/// | `.neighbours(t)`             | R-tree query at the neighbour radius  |
///
/// # Example
///
/// ```rust,ignore
/// let households = HouseholdStoreBuilder::new().extend(records).build()?;
/// let calendar = FloodCalendar::for_scenario(households.count, &scenario, events)?;
/// let mut sim = SimBuilder::new(config, households, calendar)
///     .programs(ProgramConfig::from_presets(EwsMode::GoodEws, RepairLevel::Hrp60))
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<H: FloodField + EventCalendar> {
    config:       SimConfig,
    households:   HouseholdStore,
    hazard:       H,
    params:       DecisionParams,
    programs:     ProgramConfig,
    curves:       DamageCurves,
    livelihood:   LivelihoodCurve,
    coefficients: TrappedCoefficients,
    radius:       f32,
    neighbours:   Option<NeighborTable>,
}

impl<H: FloodField + EventCalendar> SimBuilder<H> {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, households: HouseholdStore, hazard: H) -> Self {
        Self {
            config,
            households,
            hazard,
            params:       DecisionParams::default(),
            programs:     ProgramConfig::default(),
            curves:       DamageCurves::default(),
            livelihood:   LivelihoodCurve::default(),
            coefficients: TrappedCoefficients::default(),
            radius:       DEFAULT_NEIGHBOUR_RADIUS,
            neighbours:   None,
        }
    }

    pub fn params(mut self, params: DecisionParams) -> Self {
        self.params = params;
        self
    }

    pub fn programs(mut self, programs: ProgramConfig) -> Self {
        self.programs = programs;
        self
    }

    pub fn curves(mut self, curves: DamageCurves) -> Self {
        self.curves = curves;
        self
    }

    pub fn livelihood(mut self, livelihood: LivelihoodCurve) -> Self {
        self.livelihood = livelihood;
        self
    }

    pub fn trapped_coefficients(mut self, coefficients: TrappedCoefficients) -> Self {
        self.coefficients = coefficients;
        self
    }

    /// Radius (degrees) of the neighbourhood queried from household
    /// positions.  Ignored when [`neighbours`](Self::neighbours) is given.
    pub fn neighbour_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    /// Supply precomputed neighbour lists (must cover every household).
    pub fn neighbours(mut self, table: NeighborTable) -> Self {
        self.neighbours = Some(table);
        self
    }

    /// Validate every input, compute neighbour lists and the trapped model,
    /// and return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<H>> {
        let count = self.households.count;

        // ── Validate configuration ────────────────────────────────────────
        self.params.validate()?;
        self.programs.validate()?;
        self.curves.validate()?;
        self.livelihood.validate()?;
        self.coefficients.validate()?;
        if self.neighbours.is_none() && !(self.radius.is_finite() && self.radius >= 0.0) {
            return Err(SimError::Config(format!(
                "neighbour radius must be finite and non-negative, got {}",
                self.radius
            )));
        }
        self.households.check_unit_ranges()?;
        if count == 0 {
            warn!("building a simulation with no households");
        }

        // ── Neighbour lists ───────────────────────────────────────────────
        let neighbours = match self.neighbours {
            Some(table) => {
                if table.len() != count {
                    return Err(SimError::AgentCountMismatch {
                        expected: count,
                        got:      table.len(),
                        what:     "neighbour table",
                    });
                }
                table
            }
            None if count == 0 => NeighborTable::isolated(0),
            None => {
                let index = RTreeIndex::new(&self.households.position)?;
                NeighborTable::from_index(&index, self.radius)?
            }
        };
        debug!(households = count, links = neighbours.link_count(), "neighbour table ready");

        // ── Households under this run's programs ──────────────────────────
        let mut households = self.households;
        households.basic_income = self.programs.basic_income(&self.params);
        let trapped = TrappedProbabilityModel::for_population(&households, self.coefficients);
        for agent in 0..count as u32 {
            trapped.refresh(&mut households, fdm_core::AgentId(agent));
        }

        let scheduler = StagedScheduler::new(Stage::pipeline(&self.programs), count);
        debug!(stages = ?scheduler.stages(), "pipeline");

        Ok(Sim {
            clock:      self.config.make_clock(),
            rng:        SimRng::new(self.config.seed),
            config:     self.config,
            households,
            hazard:     self.hazard,
            neighbours,
            params:     self.params,
            programs:   self.programs,
            curves:     self.curves,
            livelihood: self.livelihood,
            trapped,
            scheduler,
        })
    }
}
