//! The JSON run file.
//!
//! Every field is optional; missing fields take the defaults below.
//!
//! ```json
//! {
//!   "scenario": { "name": "blue_nile", "start_year": 1990, "end_year": 2020 },
//!   "seed": 7,
//!   "replicas": 20,
//!   "households_per_village": 60,
//!   "ews_modes": ["no_ews", "perfect_ews"],
//!   "repair_levels": ["hrp_00", "hrp_90_hi"],
//!   "params": { "trust_threshold": 0.6 }
//! }
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use fdm_agent::{TrappedCoefficients, Village};
use fdm_behavior::{DecisionParams, RepairLevel};
use fdm_core::SimConfig;
use fdm_hazard::{EwsMode, Scenario};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RunFile {
    /// Calendar window of the synthetic flood record to replay.
    pub scenario:                Scenario,
    /// Root seed; replica seeds derive from it.
    pub seed:                    u64,
    pub replicas:                usize,
    pub households_per_village:  usize,
    /// Villages to simulate; empty means all seven.
    pub villages:                Vec<Village>,
    pub initial_trust:           f64,
    /// Snapshot interval for the JSON-lines baseline report.
    pub snapshot_interval_years: u32,
    pub ews_modes:               Vec<String>,
    pub repair_levels:           Vec<String>,
    pub basic_income_program:    bool,
    pub awareness_program:       bool,
    pub evacuation_contagion:    bool,
    pub params:                  DecisionParams,
    pub trapped:                 TrappedCoefficients,
}

impl Default for RunFile {
    fn default() -> Self {
        Self {
            scenario: Scenario { name: "synthetic".into(), start_year: 1991, end_year: 2021 },
            seed: 42,
            replicas: 10,
            households_per_village: 40,
            villages: Vec::new(),
            initial_trust: 0.5,
            snapshot_interval_years: 5,
            ews_modes: EwsMode::ALL.iter().map(|m| m.as_str().to_owned()).collect(),
            repair_levels: ["hrp_00", "hrp_30", "hrp_90", "hrp_90_hi"].map(String::from).to_vec(),
            basic_income_program: false,
            awareness_program: false,
            evacuation_contagion: false,
            params: DecisionParams::default(),
            trapped: TrappedCoefficients::default(),
        }
    }
}

impl RunFile {
    /// Read `path`, or use the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading run file {}", path.display()))?;
        let file: RunFile = serde_json::from_str(&text)
            .with_context(|| format!("parsing run file {}", path.display()))?;
        // Re-check the window; deserialization bypasses `Scenario::new`.
        Scenario::new(file.scenario.name.clone(), file.scenario.start_year, file.scenario.end_year)?;
        Ok(file)
    }

    /// Seed-less run configuration covering the scenario window.
    pub fn sim_config(&self) -> SimConfig {
        SimConfig {
            start_year:              self.scenario.initial_calendar_year(),
            total_years:             self.scenario.years(),
            seed:                    self.seed,
            snapshot_interval_years: self.snapshot_interval_years,
        }
    }

    pub fn active_villages(&self) -> Vec<Village> {
        if self.villages.is_empty() { Village::ALL.to_vec() } else { self.villages.clone() }
    }

    /// Parsed EWS modes; unknown keys are errors.
    pub fn ews_modes(&self) -> Result<Vec<EwsMode>> {
        self.ews_modes
            .iter()
            .map(|s| s.parse::<EwsMode>().with_context(|| format!("in ews_modes: {s:?}")))
            .collect()
    }

    /// Parsed repair levels; unknown keys are errors.
    pub fn repair_levels(&self) -> Result<Vec<RepairLevel>> {
        self.repair_levels
            .iter()
            .map(|s| s.parse::<RepairLevel>().with_context(|| format!("in repair_levels: {s:?}")))
            .collect()
    }
}
