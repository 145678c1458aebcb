//! Integration tests for fdm-report.

use fdm_agent::{
    HouseholdRecord, HouseholdStore, HouseholdStoreBuilder, Material, TrappedCoefficients, Village,
};
use fdm_behavior::ProgramConfig;
use fdm_core::{EventId, GeoPoint, SimConfig, Year};
use fdm_hazard::{FloodCalendar, FloodEvent};
use fdm_sim::{Sim, SimBuilder};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Identical well-off, risk-aware mud-brick households of four people.
fn records(n: usize) -> Vec<HouseholdRecord> {
    (0..n)
        .map(|i| HouseholdRecord {
            position:              GeoPoint::new(0.0, i as f32 * 0.01),
            village:               Village::WadRamliCamp,
            material:              Material::MudBrick,
            base_income:           2.0,
            household_size:        4,
            vulnerability:         0.0,
            livestock:             0.0,
            house_ownership:       0.0,
            cropland:              0.0,
            obstacles_to_movement: false,
            flood_prone:           true,
            awareness:             0.9,
            fear:                  0.9,
            flood_exposure:        0,
        })
        .collect()
}

fn store(n: usize) -> HouseholdStore {
    HouseholdStoreBuilder::new().initial_trust(0.8).extend(records(n)).build().unwrap()
}

/// A ruinous 1.5 m flood over every household in year 1.
fn flood_in_year_one(n: usize) -> FloodCalendar {
    let mut cal = FloodCalendar::empty(n);
    let event = FloodEvent { id: EventId(0), calendar_year: 2001, return_period: 50.0, depths: vec![1_500.0; n] };
    cal.add_event(Year(1), event).unwrap();
    cal
}

fn sim(n: usize, years: u32, programs: ProgramConfig) -> Sim<FloodCalendar> {
    let config = SimConfig { start_year: 2000, total_years: years, seed: 11, snapshot_interval_years: 1 };
    let never_trapped =
        TrappedCoefficients { village_effects: [-40.0; Village::COUNT], ..TrappedCoefficients::default() };
    SimBuilder::new(config, store(n), flood_in_year_one(n))
        .programs(programs)
        .trapped_coefficients(never_trapped)
        .build()
        .unwrap()
}

// ── MemorySink ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod memory_sink_tests {
    use fdm_sim::YearSummary;

    use super::store;
    use crate::{HouseholdSnapshot, MemorySink, ReportError, ReportSink};
    use fdm_core::Year;

    #[test]
    fn keeps_rows_in_order() {
        let households = store(3);
        let mut sink = MemorySink::new();
        sink.write_summary(&YearSummary::collect(Year(0), 2000, false, false, &households)).unwrap();
        sink.write_snapshots(&HouseholdSnapshot::all(Year(0), &households)).unwrap();
        sink.write_snapshots(&HouseholdSnapshot::all(Year(1), &households)).unwrap();

        assert_eq!(sink.summaries.len(), 1);
        assert_eq!(sink.snapshots.len(), 6);
        let ids: Vec<u32> = sink.snapshots_of(1).map(|r| r.agent_id).collect();
        assert_eq!(ids, [0, 1, 2]);
    }

    #[test]
    fn writes_after_finish_fail() {
        let households = store(1);
        let mut sink = MemorySink::new();
        sink.finish().unwrap();
        sink.finish().unwrap();
        assert!(sink.is_finished());

        let err = sink.write_snapshots(&HouseholdSnapshot::all(Year(0), &households)).unwrap_err();
        assert!(matches!(err, ReportError::Finished));
        assert!(sink.snapshots.is_empty());
    }
}

// ── Household rows ────────────────────────────────────────────────────────────

#[cfg(test)]
mod row_tests {
    use fdm_agent::{Status, Village};
    use fdm_core::{AgentId, Year};

    use super::store;
    use crate::HouseholdSnapshot;

    #[test]
    fn row_copies_household_state() {
        let mut households = store(2);
        households.house_damage[1] = 0.4;
        households.livelihood_damage[1] = 0.5;

        let row = HouseholdSnapshot::of(Year(3), &households, AgentId(1));
        assert_eq!(row.year, 3);
        assert_eq!(row.agent_id, 1);
        assert_eq!(row.village, Village::WadRamliCamp);
        assert_eq!(row.status, Status::Normal);
        assert_eq!(row.house_damage, 0.4);
        assert!((row.perception - 0.9).abs() < 1e-12);
        // 2.0 base income at half livelihood.
        assert!((row.income - 1.0).abs() < 1e-12);
        assert_eq!(row.displacement_time, 0);
        assert!(!row.received_flood);
    }
}

// ── ReportObserver ────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use std::io;

    use fdm_behavior::ProgramConfig;
    use fdm_sim::YearSummary;

    use super::sim;
    use crate::{HouseholdSnapshot, MemorySink, ReportError, ReportObserver, ReportResult, ReportSink};

    /// Accepts summaries, rejects household rows.
    #[derive(Default)]
    struct BrokenRows {
        summaries: usize,
    }

    impl ReportSink for BrokenRows {
        fn write_summary(&mut self, _: &YearSummary) -> ReportResult<()> {
            self.summaries += 1;
            Ok(())
        }

        fn write_snapshots(&mut self, _: &[HouseholdSnapshot]) -> ReportResult<()> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full").into())
        }

        fn finish(&mut self) -> ReportResult<()> {
            Ok(())
        }
    }

    #[test]
    fn writes_every_year_and_snapshot() {
        let n = 5;
        let mut sim = sim(n, 3, ProgramConfig::default());
        let mut obs = ReportObserver::new(MemorySink::new());
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none());

        let (sink, stats) = obs.into_parts();
        assert!(sink.is_finished());
        let years: Vec<u32> = sink.summaries.iter().map(|s| s.year.0).collect();
        assert_eq!(years, [0, 1, 2, 3]);
        assert_eq!(sink.snapshots.len(), 4 * n);
        assert!(sink.snapshots_of(0).all(|r| r.house_damage == 0.0));
        assert!(sink.snapshots_of(1).all(|r| r.received_flood));
        assert_eq!(stats.years, 3);
    }

    #[test]
    fn summaries_only_skips_household_rows() {
        let mut sim = sim(4, 2, ProgramConfig::default());
        let mut obs = ReportObserver::new(MemorySink::new()).summaries_only();
        sim.run(&mut obs).unwrap();
        assert_eq!(obs.sink().summaries.len(), 3);
        assert!(obs.sink().snapshots.is_empty());
    }

    #[test]
    fn first_sink_error_is_kept() {
        let mut sim = sim(4, 3, ProgramConfig::default());
        let mut obs = ReportObserver::new(BrokenRows::default());
        sim.run(&mut obs).unwrap();

        // Summaries keep flowing after a failed snapshot.
        assert_eq!(obs.sink().summaries, 4);
        assert!(matches!(obs.take_error(), Some(ReportError::Io(_))));
        assert!(obs.take_error().is_none());
    }
}

// ── RunStatistics ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod stats_tests {
    use fdm_behavior::{ProgramConfig, RepairLevel};
    use fdm_hazard::EwsMode;
    use fdm_core::Year;
    use fdm_sim::{SimObserver, YearActivity, YearSummary};

    use super::{sim, store};
    use crate::{DisplacementDistribution, MemorySink, ReportObserver, RunStatistics};

    #[test]
    fn unwarned_flood_counts_displacement() {
        let n = 10;
        let mut sim = sim(n, 3, ProgramConfig::default());
        let mut stats = RunStatistics::new();
        sim.run(&mut stats).unwrap();

        assert_eq!(stats.years, 3);
        assert_eq!(stats.flood_years, 1);
        assert_eq!(stats.warning_years, 0);
        assert_eq!(stats.displacement_episodes, n);
        assert_eq!(stats.flood_evacuations, 0);
        assert_eq!(stats.false_alarm_evacuations, 0);
        assert_eq!(stats.trapped_episodes, 0);
        assert_eq!(stats.peak_displaced, n);
        assert_eq!(stats.final_displaced, n);
        assert_eq!(stats.flooded_population, 4 * n as u64);
        assert_eq!(stats.affected_population, 0);
    }

    #[test]
    fn ruined_houses_keep_households_away() {
        let n = 10;
        let mut sim = sim(n, 3, ProgramConfig::default());
        let mut stats = RunStatistics::new();
        sim.run(&mut stats).unwrap();

        // Displaced in year 1, counted from the return decision of year 2.
        assert!(stats.max_displacement().iter().all(|&t| t == 2));
        let dist = stats.displacement_distribution();
        assert_eq!(dist, DisplacementDistribution { up_to_2: n, ..DisplacementDistribution::default() });
        assert_eq!(dist.total(), n);
    }

    #[test]
    fn perfect_warning_counts_flood_evacuations() {
        let n = 8;
        let programs = ProgramConfig::from_presets(EwsMode::PerfectEws, RepairLevel::Hrp00);
        let mut sim = sim(n, 2, programs);
        let mut stats = RunStatistics::new();
        sim.run(&mut stats).unwrap();

        assert_eq!(stats.warning_years, 1);
        assert_eq!(stats.flood_evacuations, n);
        assert_eq!(stats.false_alarm_evacuations, 0);
        // Evacuees cannot return to ruined houses.
        assert_eq!(stats.displacement_episodes, n);
        assert_eq!(stats.affected_population, 0);
    }

    #[test]
    fn initial_state_only_sizes_the_table() {
        let households = store(6);
        let summary = YearSummary::collect(Year(0), 2000, false, false, &households);
        let mut stats = RunStatistics::new();
        stats.on_year_end(&summary, &YearActivity::default(), &households);

        assert_eq!(stats.years, 0);
        assert_eq!(stats.max_displacement().len(), 6);
        assert_eq!(stats.displacement_distribution().never, 6);
    }

    #[test]
    fn observer_pair_sees_the_same_run() {
        let mut sim = sim(6, 3, ProgramConfig::default());
        let mut pair = (ReportObserver::new(MemorySink::new()).summaries_only(), RunStatistics::new());
        sim.run(&mut pair).unwrap();

        let (report, stats) = pair;
        assert_eq!(report.stats(), &stats);
        assert_eq!(report.sink().summaries.len(), 4);
    }
}

// ── JSON lines ────────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "json"))]
mod json_tests {
    use fdm_behavior::ProgramConfig;

    use super::sim;
    use crate::{JsonLinesSink, ReportObserver};

    #[test]
    fn one_tagged_object_per_line() {
        let n = 3;
        let mut sim = sim(n, 2, ProgramConfig::default());
        let mut obs = ReportObserver::new(JsonLinesSink::new(Vec::new()));
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none());

        let (sink, _) = obs.into_parts();
        let text = String::from_utf8(sink.into_inner().unwrap()).unwrap();
        let lines: Vec<serde_json::Value> =
            text.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
        assert_eq!(lines.len(), 3 + 3 * n);

        assert_eq!(lines[0]["kind"], "summary");
        assert_eq!(lines[0]["year"], 0);
        assert_eq!(lines[1]["kind"], "household");
        assert_eq!(lines[1]["agent_id"], 0);
        let summaries = lines.iter().filter(|l| l["kind"] == "summary").count();
        assert_eq!(summaries, 3);
    }
}
