//! villages: policy comparison over a synthetic seven-village population.
//!
//! Replays one synthetic flood record under every combination of
//! early-warning mode and house-repair level, runs independent replicas of
//! each, and prints mean per-run displacement statistics.
//!
//! ```text
//! cargo run -p villages -- [run.json]
//! RUST_LOG=fdm_sim=info cargo run -p villages --features parallel
//! ```

mod config;
mod population;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use fdm_agent::{HouseholdRecord, HouseholdStoreBuilder};
use fdm_behavior::{ProgramConfig, RepairLevel};
use fdm_core::SimConfig;
use fdm_hazard::{EwsMode, FloodCalendar};
use fdm_report::RunStatistics;
use fdm_sim::{run_replicas_observed, Sim, SimBuilder, SimResult};

use config::RunFile;

/// Inputs shared by every run of one policy combination.
struct World<'a> {
    file:     &'a RunFile,
    config:   SimConfig,
    records:  &'a [HouseholdRecord],
    calendar: &'a FloodCalendar,
}

impl World<'_> {
    fn build(&self, programs: &ProgramConfig, seed: u64) -> SimResult<Sim<FloodCalendar>> {
        let households = HouseholdStoreBuilder::new()
            .initial_trust(self.file.initial_trust)
            .extend(self.records.iter().cloned())
            .build()?;
        let config = SimConfig { seed, ..self.config.clone() };
        SimBuilder::new(config, households, self.calendar.clone())
            .params(self.file.params.clone())
            .programs(programs.clone())
            .trapped_coefficients(self.file.trapped.clone())
            .build()
    }

    fn programs(&self, ews: EwsMode, repair: RepairLevel) -> ProgramConfig {
        ProgramConfig {
            basic_income_program: self.file.basic_income_program,
            awareness_program:    self.file.awareness_program,
            evacuation_contagion: self.file.evacuation_contagion,
            ..ProgramConfig::from_presets(ews, repair)
        }
    }
}

/// Means over the replicas of one policy combination.
struct Row {
    displacements:     f64,
    flood_evacuations: f64,
    false_alarms:      f64,
    trapped:           f64,
    long_displaced:    f64,
    final_displaced:   f64,
}

impl Row {
    fn mean_of(stats: &[RunStatistics]) -> Self {
        let n = stats.len().max(1) as f64;
        let mean = |f: fn(&RunStatistics) -> usize| stats.iter().map(f).sum::<usize>() as f64 / n;
        Row {
            displacements:     mean(|s| s.displacement_episodes),
            flood_evacuations: mean(|s| s.flood_evacuations),
            false_alarms:      mean(|s| s.false_alarm_evacuations),
            trapped:           mean(|s| s.trapped_episodes),
            long_displaced:    mean(|s| s.displacement_distribution().more_than_5),
            final_displaced:   mean(|s| s.final_displaced),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::args_os().nth(1).map(PathBuf::from);
    let file = RunFile::load(path.as_deref())?;
    let ews_modes = file.ews_modes()?;
    let repair_levels = file.repair_levels()?;

    // Flood depths are indexed by position in `records`.
    let active = file.active_villages();
    let records: Vec<HouseholdRecord> = population::households(file.households_per_village, file.seed)
        .into_iter()
        .filter(|r| active.contains(&r.village))
        .collect();
    let events = population::flood_record(&records, &file.scenario, file.seed);
    let calendar = FloodCalendar::for_scenario(records.len(), &file.scenario, events)?;

    println!("=== villages — flood displacement policy comparison ===");
    println!(
        "Scenario {} ({}..{})  |  Households: {}  |  Flood years: {}  |  Replicas: {}",
        file.scenario.name,
        file.scenario.start_year,
        file.scenario.end_year,
        records.len(),
        calendar.flood_years().count(),
        file.replicas,
    );
    println!();

    let world = World { file: &file, config: file.sim_config(), records: &records, calendar: &calendar };

    #[cfg(feature = "json")]
    write_baseline(&world)?;

    println!(
        "{:<12} {:<10} {:>9} {:>9} {:>9} {:>9} {:>9} {:>9}",
        "EWS", "Repair", "Displ.", "Evac.", "False", "Trapped", ">5 yrs", "Final"
    );
    println!("{}", "-".repeat(82));

    let t0 = Instant::now();
    for &ews in &ews_modes {
        for &repair in &repair_levels {
            let programs = world.programs(ews, repair);
            let runs = run_replicas_observed(file.seed, file.replicas, |seed| {
                Ok((world.build(&programs, seed)?, RunStatistics::new()))
            })?;
            let stats: Vec<RunStatistics> = runs.into_iter().map(|(_, s)| s).collect();
            let row = Row::mean_of(&stats);
            info!(%ews, %repair, displacements = row.displacements, "policy complete");
            println!(
                "{:<12} {:<10} {:>9.1} {:>9.1} {:>9.1} {:>9.1} {:>9.1} {:>9.1}",
                ews.as_str(),
                repair.as_str(),
                row.displacements,
                row.flood_evacuations,
                row.false_alarms,
                row.trapped,
                row.long_displaced,
                row.final_displaced,
            );
        }
    }
    println!();
    println!(
        "{} runs in {:.2} s",
        ews_modes.len() * repair_levels.len() * file.replicas,
        t0.elapsed().as_secs_f64()
    );

    Ok(())
}

/// One run without programs, written to `output/villages/baseline.jsonl`.
#[cfg(feature = "json")]
fn write_baseline(world: &World<'_>) -> Result<()> {
    use std::fs::File;

    use fdm_report::{JsonLinesSink, ReportObserver};

    std::fs::create_dir_all("output/villages")?;
    let out = File::create("output/villages/baseline.jsonl")?;
    let programs = world.programs(EwsMode::NoEws, RepairLevel::Hrp00);
    let mut sim = world.build(&programs, world.file.seed)?;
    let mut obs = ReportObserver::new(JsonLinesSink::new(out));
    sim.run(&mut obs)?;
    if let Some(e) = obs.take_error() {
        eprintln!("report error: {e}");
    }
    let (_, stats) = obs.into_parts();
    println!(
        "Baseline: {} displacement episodes, {} households displaced > 5 years  →  output/villages/baseline.jsonl",
        stats.displacement_episodes,
        stats.displacement_distribution().more_than_5,
    );
    println!();
    Ok(())
}
