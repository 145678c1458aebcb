//! Unit tests for fdm-behavior.
//!
//! Households live in the reference village with zero covariates so the
//! trapped probability is whatever a test writes into the store.

use fdm_agent::{
    HouseholdRecord, HouseholdStore, HouseholdStoreBuilder, Material, TrappedCoefficients,
    TrappedProbabilityModel, Village,
};
use fdm_core::{AgentId, GeoPoint, Year};
use fdm_hazard::{DamageCurves, FloodCalendar, FloodEvent, LivelihoodCurve};
use fdm_spatial::NeighborTable;

use crate::{DecisionParams, ProgramConfig, StageContext};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn record(base_income: f64) -> HouseholdRecord {
    HouseholdRecord {
        position:              GeoPoint::new(0.0, 0.0),
        village:               Village::WadRamliCamp,
        material:              Material::MudBrick,
        base_income,
        household_size:        4,
        vulnerability:         0.0,
        livestock:             0.0,
        house_ownership:       0.0,
        cropland:              0.0,
        obstacles_to_movement: false,
        flood_prone:           true,
        awareness:             0.4,
        fear:                  0.6,
        flood_exposure:        0,
    }
}

/// `n` non-poor households with trust 0.8 and no neighbours.
fn store(n: usize) -> HouseholdStore {
    HouseholdStoreBuilder::new()
        .initial_trust(0.8)
        .extend((0..n).map(|_| record(2.0)))
        .build()
        .unwrap()
}

/// Everything a `StageContext` borrows.
struct World {
    params:     DecisionParams,
    programs:   ProgramConfig,
    neighbours: NeighborTable,
    flood:      FloodCalendar,
    curves:     DamageCurves,
    livelihood: LivelihoodCurve,
    trapped:    TrappedProbabilityModel,
}

impl World {
    fn new(store: &HouseholdStore) -> Self {
        Self {
            params:     DecisionParams::default(),
            programs:   ProgramConfig::default(),
            neighbours: NeighborTable::isolated(store.count),
            flood:      FloodCalendar::empty(store.count),
            curves:     DamageCurves::default(),
            livelihood: LivelihoodCurve::default(),
            trapped:    TrappedProbabilityModel::for_population(store, TrappedCoefficients::default()),
        }
    }

    fn with_neighbours(mut self, lists: Vec<Vec<u32>>) -> Self {
        let lists = lists
            .into_iter()
            .map(|l| l.into_iter().map(AgentId).collect())
            .collect();
        self.neighbours = NeighborTable::from_lists(lists).unwrap();
        self
    }

    /// Flood `Year(1)` with the given per-household depths.
    fn with_flood(mut self, depths: Vec<f32>) -> Self {
        let event = FloodEvent { id: fdm_core::EventId(0), calendar_year: 1, return_period: 25.0, depths };
        self.flood.add_event(Year(1), event).unwrap();
        self
    }

    fn ctx(&self, flood_event: bool, early_warning: bool) -> StageContext<'_> {
        StageContext {
            year: Year(1),
            flood_event,
            early_warning,
            params:     &self.params,
            programs:   &self.programs,
            neighbours: &self.neighbours,
            flood:      &self.flood,
            curves:     &self.curves,
            livelihood: &self.livelihood,
            trapped:    &self.trapped,
        }
    }
}

fn a(i: u32) -> AgentId {
    AgentId(i)
}

// ── Social influence ──────────────────────────────────────────────────────────

#[cfg(test)]
mod social_tests {
    use super::*;
    use crate::social::{any_neighbour, fraction_exceeds, neighbour_fraction};

    #[test]
    fn no_neighbours_never_triggers() {
        assert_eq!(neighbour_fraction(&[], |_| true), None);
        assert!(!fraction_exceeds(&[], 0.0, |_| true));
        assert!(!any_neighbour(&[], |_| true));
    }

    #[test]
    fn threshold_is_strict() {
        let n = [a(1), a(2), a(3), a(4)];
        assert_eq!(neighbour_fraction(&n, |x| x.0 <= 2), Some(0.5));
        assert!(!fraction_exceeds(&n, 0.5, |x| x.0 <= 2));
        assert!(fraction_exceeds(&n, 0.5, |x| x.0 <= 3));
    }
}

// ── Decisions ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod decision_tests {
    use fdm_agent::{Status, Transition};
    use fdm_core::SimRng;

    use super::*;
    use crate::{check_for_early_warning, displacement_decision, relocate, return_decision};

    #[test]
    fn high_damage_displaces_when_never_trapped() {
        let mut s = store(1);
        let w = World::new(&s);
        s.house_damage[0] = 0.8;
        s.trapped_probability[0] = 0.0;
        let t = displacement_decision(&mut s, a(0), &w.ctx(false, false), &mut SimRng::new(1));
        assert_eq!(t, Transition::BecameDisplaced);
        assert_eq!(s.status[0], Status::Displaced);
        assert!(s.status_changed[0]);
    }

    #[test]
    fn high_damage_traps_when_always_trapped() {
        let mut s = store(1);
        let w = World::new(&s);
        s.house_damage[0] = 0.8;
        s.trapped_probability[0] = 1.0;
        let t = displacement_decision(&mut s, a(0), &w.ctx(false, false), &mut SimRng::new(1));
        assert_eq!(t, Transition::BecameTrapped);
        assert_eq!(s.status[0], Status::Trapped);
    }

    #[test]
    fn damage_exactly_at_low_threshold_is_safe() {
        let mut s = store(1);
        let w = World::new(&s);
        s.house_damage[0] = w.params.low_damage_threshold;
        s.livelihood_damage[0] = w.params.low_damage_threshold;
        s.awareness[0] = 1.0;
        s.fear[0] = 1.0;
        let t = displacement_decision(&mut s, a(0), &w.ctx(false, false), &mut SimRng::new(1));
        assert_eq!(t, Transition::Unchanged);
        assert_eq!(s.status[0], Status::Normal);
    }

    #[test]
    fn medium_band_follows_perception() {
        let mut s = store(2);
        let w = World::new(&s);
        s.house_damage[0] = 0.4;
        s.house_damage[1] = 0.4;
        s.awareness[0] = 0.9;
        s.fear[0] = 0.9;
        s.awareness[1] = 0.1;
        s.fear[1] = 0.1;
        let ctx = w.ctx(false, false);
        let mut rng = SimRng::new(3);
        assert_eq!(displacement_decision(&mut s, a(0), &ctx, &mut rng), Transition::BecameDisplaced);
        assert_eq!(displacement_decision(&mut s, a(1), &ctx, &mut rng), Transition::Unchanged);
    }

    #[test]
    fn livelihood_axis_alone_can_force_displacement() {
        let mut s = store(1);
        let w = World::new(&s);
        s.livelihood_damage[0] = 0.9;
        s.awareness[0] = 0.0;
        s.fear[0] = 0.0;
        let t = displacement_decision(&mut s, a(0), &w.ctx(false, false), &mut SimRng::new(1));
        assert_eq!(t, Transition::BecameDisplaced);
    }

    #[test]
    fn away_households_are_not_redecided() {
        let mut s = store(1);
        let w = World::new(&s);
        s.status[0] = Status::Evacuated;
        s.house_damage[0] = 1.0;
        let t = displacement_decision(&mut s, a(0), &w.ctx(false, false), &mut SimRng::new(1));
        assert_eq!(t, Transition::Unchanged);
        assert_eq!(s.status[0], Status::Evacuated);
    }

    #[test]
    fn trapped_household_can_be_displaced() {
        let mut s = store(1);
        let w = World::new(&s);
        s.status[0] = Status::Trapped;
        s.house_damage[0] = 0.9;
        let t = displacement_decision(&mut s, a(0), &w.ctx(false, false), &mut SimRng::new(1));
        assert_eq!(t, Transition::BecameDisplaced);
        assert!(!s.status_changed[0], "only departures from normal are flagged");
    }

    #[test]
    fn obstacles_push_towards_trapped() {
        let mut s = store(1);
        let mut w = World::new(&s);
        w.params.obstacle_penalty = 1.0;
        s.obstacles_to_movement[0] = true;
        s.trapped_probability[0] = 0.0;
        let t = relocate(&mut s, a(0), Status::Displaced, &w.params, &mut SimRng::new(1));
        assert_eq!(t, Transition::BecameTrapped);
    }

    // ── return_decision ───────────────────────────────────────────────────

    #[test]
    fn evacuated_non_poor_returns_below_high_threshold() {
        let mut s = store(1);
        let w = World::new(&s);
        s.status[0] = Status::Evacuated;
        s.house_damage[0] = 0.5;
        let t = return_decision(&mut s, a(0), &w.ctx(false, false), &mut SimRng::new(1));
        assert_eq!(t, Transition::BecameNormal);
        assert_eq!(s.displacement_time[0], 0);
    }

    #[test]
    fn evacuated_poor_needs_low_damage_to_return() {
        let mut s = HouseholdStoreBuilder::new().push(record(0.5)).build().unwrap();
        let w = World::new(&s);
        s.status[0] = Status::Evacuated;
        s.house_damage[0] = 0.5;
        s.trapped_probability[0] = 0.0;
        let t = return_decision(&mut s, a(0), &w.ctx(false, false), &mut SimRng::new(1));
        assert_eq!(t, Transition::BecameDisplaced);
        assert_eq!(s.displacement_time[0], 1);
        assert!(s.strict_return[0]);
    }

    #[test]
    fn evacuated_with_ruined_house_may_be_trapped() {
        let mut s = store(1);
        let w = World::new(&s);
        s.status[0] = Status::Evacuated;
        s.house_damage[0] = 0.9;
        s.trapped_probability[0] = 1.0;
        let t = return_decision(&mut s, a(0), &w.ctx(false, false), &mut SimRng::new(1));
        assert_eq!(t, Transition::BecameTrapped);
        assert_eq!(s.displacement_time[0], 0);
    }

    #[test]
    fn displaced_returns_when_house_is_habitable() {
        let mut s = store(1);
        let w = World::new(&s);
        s.status[0] = Status::Displaced;
        s.displacement_time[0] = 3;
        s.house_damage[0] = 0.3;
        let t = return_decision(&mut s, a(0), &w.ctx(false, false), &mut SimRng::new(1));
        assert_eq!(t, Transition::BecameNormal);
        assert_eq!(s.displacement_time[0], 0);
    }

    #[test]
    fn displacement_time_counts_consecutive_years() {
        let mut s = store(1);
        let w = World::new(&s);
        s.status[0] = Status::Displaced;
        s.house_damage[0] = 0.7;
        let ctx = w.ctx(false, false);
        let mut rng = SimRng::new(1);
        for expected in 1..=3 {
            assert_eq!(return_decision(&mut s, a(0), &ctx, &mut rng), Transition::Unchanged);
            assert_eq!(s.displacement_time[0], expected);
        }
        assert!(s.check_displacement_time().is_ok());
    }

    #[test]
    fn return_decision_is_a_no_op_for_normal_and_trapped() {
        let mut s = store(2);
        let w = World::new(&s);
        s.status[1] = Status::Trapped;
        s.house_damage[0] = 0.9;
        s.house_damage[1] = 0.9;
        let ctx = w.ctx(false, false);
        let mut rng = SimRng::new(1);
        for _ in 0..2 {
            for i in 0..2 {
                assert_eq!(return_decision(&mut s, a(i), &ctx, &mut rng), Transition::Unchanged);
            }
        }
        assert_eq!(s.status, vec![Status::Normal, Status::Trapped]);
        assert_eq!(s.displacement_time, vec![0, 0]);
        assert!(s.check_displacement_time().is_ok());
    }

    #[test]
    fn second_return_decision_keeps_status() {
        // (base income, status, house damage) for poor and non-poor households
        // on both sides of each threshold.
        let cases = [
            (0.5, Status::Evacuated, 0.1),
            (0.5, Status::Evacuated, 0.5),
            (0.5, Status::Evacuated, 0.9),
            (2.0, Status::Evacuated, 0.5),
            (2.0, Status::Evacuated, 0.9),
            (0.5, Status::Displaced, 0.5),
            (2.0, Status::Displaced, 0.5),
            (2.0, Status::Displaced, 0.9),
        ];
        let mut s = HouseholdStoreBuilder::new()
            .extend(cases.iter().map(|&(income, _, _)| record(income)))
            .build()
            .unwrap();
        let w = World::new(&s);
        for (i, &(_, status, damage)) in cases.iter().enumerate() {
            s.status[i] = status;
            s.house_damage[i] = damage;
            s.trapped_probability[i] = 0.0;
            if status == Status::Displaced {
                s.displacement_time[i] = 1;
            }
        }
        let ctx = w.ctx(false, false);
        let mut rng = SimRng::new(5);

        for i in 0..cases.len() {
            return_decision(&mut s, a(i as u32), &ctx, &mut rng);
        }
        let after_first = s.status.clone();
        for i in 0..cases.len() {
            assert_eq!(
                return_decision(&mut s, a(i as u32), &ctx, &mut rng),
                Transition::Unchanged,
                "household {i}: {:?}",
                cases[i]
            );
        }
        assert_eq!(s.status, after_first);
        assert_eq!(
            after_first,
            [
                Status::Normal,
                Status::Displaced,
                Status::Displaced,
                Status::Normal,
                Status::Displaced,
                Status::Normal,
                Status::Normal,
                Status::Displaced,
            ]
        );
        assert!(s.check_displacement_time().is_ok());
    }

    #[test]
    fn poor_evacuee_returns_below_low_threshold_once_displaced() {
        let mut s = HouseholdStoreBuilder::new().push(record(0.5)).build().unwrap();
        let w = World::new(&s);
        s.status[0] = Status::Evacuated;
        s.house_damage[0] = 0.5;
        s.trapped_probability[0] = 0.0;
        let ctx = w.ctx(false, false);
        let mut rng = SimRng::new(1);
        assert_eq!(return_decision(&mut s, a(0), &ctx, &mut rng), Transition::BecameDisplaced);

        s.house_damage[0] = 0.2;
        assert_eq!(return_decision(&mut s, a(0), &ctx, &mut rng), Transition::BecameNormal);
        assert!(!s.strict_return[0]);
        assert_eq!(s.displacement_time[0], 0);
    }

    // ── check_for_early_warning ───────────────────────────────────────────

    fn warned() -> (HouseholdStore, World) {
        let mut s = store(1);
        let w = World::new(&s);
        s.awareness[0] = 0.9;
        s.fear[0] = 0.9;
        s.trapped_probability[0] = 0.0;
        (s, w)
    }

    #[test]
    fn trusting_aware_household_evacuates() {
        let (mut s, w) = warned();
        let t = check_for_early_warning(&mut s, a(0), &w.ctx(false, true), &mut SimRng::new(1));
        assert_eq!(t, Transition::BecameEvacuated);
        assert!(s.alerted[0]);
    }

    #[test]
    fn no_warning_no_reaction() {
        let (mut s, w) = warned();
        let t = check_for_early_warning(&mut s, a(0), &w.ctx(true, false), &mut SimRng::new(1));
        assert_eq!(t, Transition::Unchanged);
        assert!(!s.alerted[0]);
    }

    #[test]
    fn distrust_ignores_warning_but_is_alerted() {
        let (mut s, w) = warned();
        s.trust[0] = 0.2;
        let t = check_for_early_warning(&mut s, a(0), &w.ctx(false, true), &mut SimRng::new(1));
        assert_eq!(t, Transition::Unchanged);
        assert!(s.alerted[0]);
        assert!(!s.prepared[0]);
    }

    #[test]
    fn trapped_and_poor_cannot_evacuate() {
        let (mut s, w) = warned();
        s.status[0] = Status::Trapped;
        let ctx = w.ctx(false, true);
        assert_eq!(check_for_early_warning(&mut s, a(0), &ctx, &mut SimRng::new(1)), Transition::Unchanged);
        assert!(s.alerted[0]);

        let mut poor = HouseholdStoreBuilder::new().initial_trust(0.9).push(record(0.5)).build().unwrap();
        poor.awareness[0] = 0.9;
        poor.fear[0] = 0.9;
        assert_eq!(check_for_early_warning(&mut poor, a(0), &ctx, &mut SimRng::new(1)), Transition::Unchanged);
        assert_eq!(poor.status[0], Status::Normal);
    }

    #[test]
    fn low_perception_prepares_instead() {
        let (mut s, w) = warned();
        s.awareness[0] = 0.1;
        s.fear[0] = 0.1;
        let t = check_for_early_warning(&mut s, a(0), &w.ctx(false, true), &mut SimRng::new(1));
        assert_eq!(t, Transition::Unchanged);
        assert!(s.prepared[0]);
    }

    #[test]
    fn only_flood_prone_households_at_home_are_alerted() {
        let (mut s, w) = warned();
        s.flood_prone[0] = false;
        check_for_early_warning(&mut s, a(0), &w.ctx(false, true), &mut SimRng::new(1));
        assert!(!s.alerted[0]);

        s.flood_prone[0] = true;
        s.status[0] = Status::Displaced;
        check_for_early_warning(&mut s, a(0), &w.ctx(false, true), &mut SimRng::new(1));
        assert!(!s.alerted[0]);
    }
}

// ── Contagion ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod contagion_tests {
    use fdm_agent::{Status, Transition};
    use fdm_core::SimRng;

    use super::*;
    use crate::{check_neighbours_for_displacement, check_neighbours_for_evacuation, StatusSnapshot};

    /// Household 0 with households 1..=10 as neighbours, the first
    /// `displaced` of which are displaced.
    fn ring(displaced: usize) -> (HouseholdStore, World) {
        let mut s = store(11);
        let mut lists = vec![(1..=10).collect::<Vec<u32>>()];
        lists.extend((1..=10).map(|_| vec![0]));
        let w = World::new(&s).with_neighbours(lists);
        for i in 1..=displaced {
            s.status[i] = Status::Displaced;
        }
        s.awareness[0] = 0.9;
        s.fear[0] = 0.9;
        s.trapped_probability[0] = 0.0;
        (s, w)
    }

    #[test]
    fn eight_of_ten_displaced_neighbours_trigger() {
        let (mut s, w) = ring(8);
        let snap = StatusSnapshot::capture(&s);
        let t = check_neighbours_for_displacement(&mut s, a(0), &snap, &w.ctx(false, false), &mut SimRng::new(1));
        assert_eq!(t, Transition::BecameDisplaced);
    }

    #[test]
    fn five_of_ten_displaced_neighbours_do_not_trigger() {
        let (mut s, w) = ring(5);
        let snap = StatusSnapshot::capture(&s);
        let t = check_neighbours_for_displacement(&mut s, a(0), &snap, &w.ctx(false, false), &mut SimRng::new(1));
        assert_eq!(t, Transition::Unchanged);
        assert_eq!(s.status[0], Status::Normal);
    }

    #[test]
    fn own_perception_must_clear_threshold() {
        let (mut s, w) = ring(10);
        s.awareness[0] = 0.2;
        s.fear[0] = 0.2;
        let snap = StatusSnapshot::capture(&s);
        let t = check_neighbours_for_displacement(&mut s, a(0), &snap, &w.ctx(false, false), &mut SimRng::new(1));
        assert_eq!(t, Transition::Unchanged);
    }

    #[test]
    fn isolated_household_never_follows() {
        let mut s = store(1);
        let w = World::new(&s);
        s.awareness[0] = 1.0;
        s.fear[0] = 1.0;
        let snap = StatusSnapshot::capture(&s);
        let t = check_neighbours_for_displacement(&mut s, a(0), &snap, &w.ctx(false, false), &mut SimRng::new(1));
        assert_eq!(t, Transition::Unchanged);
    }

    #[test]
    fn decisions_read_the_stage_start_snapshot() {
        // 0 sees {2, 3}, both displaced.  1 sees {0, 2, 4}: one displaced at
        // stage start, two if 0's move this stage were visible.
        let mut s = store(5);
        let mut w = World::new(&s).with_neighbours(vec![
            vec![2, 3],
            vec![0, 2, 4],
            vec![],
            vec![],
            vec![],
        ]);
        w.params.displacement_contagion_fraction = 0.5;
        s.status[2] = Status::Displaced;
        s.status[3] = Status::Displaced;
        for i in 0..2 {
            s.awareness[i] = 0.9;
            s.fear[i] = 0.9;
            s.trapped_probability[i] = 0.0;
        }
        let ctx = w.ctx(false, false);
        let snap = StatusSnapshot::capture(&s);
        let mut rng = SimRng::new(1);
        assert_eq!(check_neighbours_for_displacement(&mut s, a(0), &snap, &ctx, &mut rng), Transition::BecameDisplaced);
        assert_eq!(check_neighbours_for_displacement(&mut s, a(1), &snap, &ctx, &mut rng), Transition::Unchanged);
        assert_eq!(s.status[1], Status::Normal);
    }

    #[test]
    fn evacuation_contagion_needs_a_warning_year() {
        let mut s = store(3);
        let w = World::new(&s).with_neighbours(vec![vec![1, 2], vec![0], vec![0]]);
        s.status[1] = Status::Evacuated;
        s.status[2] = Status::Evacuated;
        s.trapped_probability[0] = 0.0;
        let snap = StatusSnapshot::capture(&s);
        let mut rng = SimRng::new(1);
        let t = check_neighbours_for_evacuation(&mut s, a(0), &snap, &w.ctx(false, false), &mut rng);
        assert_eq!(t, Transition::Unchanged);
        let t = check_neighbours_for_evacuation(&mut s, a(0), &snap, &w.ctx(false, true), &mut rng);
        assert_eq!(t, Transition::BecameEvacuated);
    }

    #[test]
    fn majority_prepared_neighbours_spread_preparedness() {
        let mut s = store(4);
        let w = World::new(&s).with_neighbours(vec![vec![1, 2, 3], vec![], vec![], vec![]]);
        s.prepared[1] = true;
        s.prepared[2] = true;
        let mut snap = StatusSnapshot::default();
        snap.recapture(&s);
        let t = check_neighbours_for_evacuation(&mut s, a(0), &snap, &w.ctx(false, true), &mut SimRng::new(1));
        assert_eq!(t, Transition::Unchanged);
        assert!(s.prepared[0]);
    }
}

// ── Flood reaction ────────────────────────────────────────────────────────────

#[cfg(test)]
mod flood_tests {
    use super::*;
    use crate::react_to_flood;

    #[test]
    fn house_damage_is_a_high_water_mark() {
        let mut s = store(1);
        let w = World::new(&s).with_flood(vec![250.0]);
        s.house_damage[0] = 0.5;
        let impact = react_to_flood(&mut s, a(0), &w.ctx(true, false));
        assert_eq!(s.house_damage[0], 0.5);
        assert_eq!(impact.house, 0.0);
        assert_eq!(s.last_house_damage[0], 0.0);
        assert!(s.received_flood[0]);
        assert_eq!(s.flood_exposure[0], 1);
    }

    #[test]
    fn deeper_water_raises_damage_to_curve_value() {
        let mut s = store(1);
        let w = World::new(&s).with_flood(vec![500.0]);
        s.house_damage[0] = 0.1;
        react_to_flood(&mut s, a(0), &w.ctx(true, false));
        let expected = w.curves.house_damage(500.0, Material::MudBrick);
        assert!((s.house_damage[0] - expected).abs() < 1e-12);
        assert!((s.last_house_damage[0] - (expected - 0.1)).abs() < 1e-12);
    }

    #[test]
    fn livelihood_damage_accumulates_and_clips() {
        let mut s = store(1);
        let w = World::new(&s).with_flood(vec![550.0]);
        let ctx = w.ctx(true, false);
        react_to_flood(&mut s, a(0), &ctx);
        assert!((s.livelihood_damage[0] - 0.5).abs() < 1e-9);
        react_to_flood(&mut s, a(0), &ctx);
        react_to_flood(&mut s, a(0), &ctx);
        assert_eq!(s.livelihood_damage[0], 1.0);
        assert_eq!(s.last_livelihood_damage[0], 0.0);
    }

    #[test]
    fn prepared_households_lose_less_livelihood() {
        let mut s = store(2);
        let w = World::new(&s).with_flood(vec![550.0, 550.0]);
        s.prepared[1] = true;
        let ctx = w.ctx(true, false);
        react_to_flood(&mut s, a(0), &ctx);
        react_to_flood(&mut s, a(1), &ctx);
        assert!((s.livelihood_damage[1] - s.livelihood_damage[0] * 0.5).abs() < 1e-9);
        assert_eq!(s.house_damage[0], s.house_damage[1]);
    }

    #[test]
    fn dry_or_invalid_water_leaves_household_untouched() {
        let mut s = store(2);
        let w = World::new(&s).with_flood(vec![0.0, f32::NAN]);
        let ctx = w.ctx(true, false);
        for i in 0..2 {
            react_to_flood(&mut s, a(i), &ctx);
        }
        assert_eq!(s.received_flood, vec![false, false]);
        assert_eq!(s.house_damage, vec![0.0, 0.0]);
        assert_eq!(s.flood_exposure, vec![0, 0]);
    }

    #[test]
    fn no_event_no_damage() {
        let mut s = store(1);
        let w = World::new(&s).with_flood(vec![900.0]);
        react_to_flood(&mut s, a(0), &w.ctx(false, false));
        assert!(!s.received_flood[0]);
        assert_eq!(s.house_damage[0], 0.0);
    }
}

// ── Sentiment ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod sentiment_tests {
    use fdm_agent::Status;
    use fdm_core::SimRng;

    use super::*;
    use crate::update_sentiments;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn quiet_year_decays_awareness_and_fear() {
        let mut s = store(1);
        let w = World::new(&s);
        assert!(update_sentiments(&mut s, a(0), &w.ctx(false, false), &mut SimRng::new(1)));
        assert!(close(s.awareness[0], 0.3));
        assert!(close(s.fear[0], 0.5));
        assert!(close(s.trust[0], 0.8));
    }

    #[test]
    fn false_alarm_costs_trust() {
        let mut s = store(1);
        let w = World::new(&s);
        s.alerted[0] = true;
        update_sentiments(&mut s, a(0), &w.ctx(false, true), &mut SimRng::new(1));
        assert!(close(s.trust[0], 0.7));
    }

    #[test]
    fn awareness_program_floors_decay() {
        let mut s = store(1);
        let mut w = World::new(&s);
        w.programs.awareness_program = true;
        s.awareness[0] = 0.55;
        s.fear[0] = 0.2;
        update_sentiments(&mut s, a(0), &w.ctx(false, false), &mut SimRng::new(1));
        assert!(close(s.awareness[0], 0.5));
        assert!(close(s.fear[0], 0.5));
    }

    #[test]
    fn warned_flood_restores_trust() {
        let mut s = store(1);
        let w = World::new(&s);
        s.trust[0] = 0.3;
        s.alerted[0] = true;
        s.received_flood[0] = true;
        update_sentiments(&mut s, a(0), &w.ctx(true, true), &mut SimRng::new(1));
        assert_eq!(s.trust[0], 1.0);
        assert!(close(s.fear[0], 0.6));
    }

    #[test]
    fn unwarned_flood_costs_trust_and_raises_fear() {
        let mut s = store(1);
        let w = World::new(&s);
        s.received_flood[0] = true;
        update_sentiments(&mut s, a(0), &w.ctx(true, false), &mut SimRng::new(1));
        assert!(close(s.trust[0], 0.7));
        assert!(close(s.fear[0], 0.7));
    }

    #[test]
    fn own_damage_raises_awareness() {
        let mut s = store(1);
        let w = World::new(&s);
        s.received_flood[0] = true;
        s.house_damage[0] = 0.5;
        update_sentiments(&mut s, a(0), &w.ctx(true, false), &mut SimRng::new(1));
        assert!(close(s.awareness[0], 0.8));
    }

    #[test]
    fn flooded_neighbour_counts_as_flood_nearby() {
        let mut s = store(2);
        let w = World::new(&s).with_neighbours(vec![vec![1], vec![0]]);
        s.received_flood[1] = true;
        s.alerted[0] = true;
        s.trust[0] = 0.4;
        update_sentiments(&mut s, a(0), &w.ctx(true, true), &mut SimRng::new(1));
        assert_eq!(s.trust[0], 1.0);
    }

    #[test]
    fn near_miss_draw_follows_current_awareness() {
        // Neighbour 1 flooded with a ruined house: 1/1 > 25 %.
        let mut s = store(2);
        let w = World::new(&s).with_neighbours(vec![vec![1], vec![0]]);
        s.received_flood[1] = true;
        s.house_damage[1] = 0.9;
        let ctx = w.ctx(true, false);
        let mut rng = SimRng::new(5);

        s.awareness[0] = 1.0;
        update_sentiments(&mut s, a(0), &ctx, &mut rng);
        assert_eq!(s.awareness[0], 1.0, "certain increase, clipped");

        s.awareness[0] = 0.0;
        update_sentiments(&mut s, a(0), &ctx, &mut rng);
        assert_eq!(s.awareness[0], 0.0, "certain decrease, floored");
    }

    #[test]
    fn near_miss_rises_in_proportion_to_awareness() {
        let mut s = store(2);
        let w = World::new(&s).with_neighbours(vec![vec![1], vec![0]]);
        s.received_flood[1] = true;
        s.house_damage[1] = 0.9;
        let ctx = w.ctx(true, false);
        let mut rng = SimRng::new(6);
        let trials = 4_000;
        let mut rises = 0;
        for _ in 0..trials {
            s.awareness[0] = 0.7;
            update_sentiments(&mut s, a(0), &ctx, &mut rng);
            if s.awareness[0] > 0.7 {
                rises += 1;
            }
        }
        let share = rises as f64 / trials as f64;
        assert!((share - 0.7).abs() < 0.04, "rise share {share}");
    }

    #[test]
    fn away_households_skip_unless_they_just_left() {
        let mut s = store(2);
        let w = World::new(&s);
        s.status[0] = Status::Displaced;
        s.status[1] = Status::Displaced;
        s.status_changed[1] = true;
        let ctx = w.ctx(false, false);
        let mut rng = SimRng::new(1);
        assert!(!update_sentiments(&mut s, a(0), &ctx, &mut rng));
        assert!(close(s.awareness[0], 0.4));
        assert!(update_sentiments(&mut s, a(1), &ctx, &mut rng));
        assert!(close(s.awareness[1], 0.3));
    }
}

// ── Recovery ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod recovery_tests {
    use fdm_agent::Status;
    use fdm_core::SimRng;

    use super::*;
    use crate::{fix_damage, fix_neighbours_damage, RepairOutcome};

    #[test]
    fn certain_repair_program_fixes_severe_damage() {
        let mut s = store(1);
        let mut w = World::new(&s);
        w.programs.house_repair_program = 1.0;
        s.house_damage[0] = 0.9;
        let out = fix_damage(&mut s, a(0), &w.ctx(false, false), &mut SimRng::new(1));
        assert_eq!(out, RepairOutcome::Repaired);
        assert_eq!(s.house_damage[0], 0.0);
        assert_eq!(s.material[0], Material::MudBrick);
    }

    #[test]
    fn improvement_program_upgrades_material() {
        let mut s = store(1);
        let mut w = World::new(&s);
        w.programs.house_repair_program = 1.0;
        w.programs.house_improvement_program = true;
        s.house_damage[0] = 0.9;
        s.status[0] = Status::Displaced;
        fix_damage(&mut s, a(0), &w.ctx(false, false), &mut SimRng::new(1));
        assert_eq!(s.house_damage[0], 0.0);
        assert_eq!(s.material[0], Material::BEST);
    }

    #[test]
    fn own_recovery_scales_with_surplus_and_material() {
        let mut s = store(2);
        let w = World::new(&s);
        s.house_damage[0] = 0.9;
        s.house_damage[1] = 0.9;
        s.material[1] = Material::Concrete;
        let ctx = w.ctx(false, false);
        let mut rng = SimRng::new(1);
        assert_eq!(fix_damage(&mut s, a(0), &ctx, &mut rng), RepairOutcome::Recovered);
        fix_damage(&mut s, a(1), &ctx, &mut rng);
        // income 2.0, poverty line 1.0 → full surplus.
        assert!((s.house_damage[0] - (0.9 - 0.3 * 0.6)).abs() < 1e-12);
        assert!((s.house_damage[1] - (0.9 - 0.3 * 0.7)).abs() < 1e-12);
    }

    #[test]
    fn poor_and_away_households_do_not_self_repair() {
        let mut s = HouseholdStoreBuilder::new().push(record(0.8)).push(record(3.0)).build().unwrap();
        let w = World::new(&s);
        s.house_damage = vec![0.5, 0.5];
        s.status[1] = Status::Evacuated;
        let ctx = w.ctx(false, false);
        let mut rng = SimRng::new(1);
        assert_eq!(fix_damage(&mut s, a(0), &ctx, &mut rng), RepairOutcome::Untouched);
        assert_eq!(fix_damage(&mut s, a(1), &ctx, &mut rng), RepairOutcome::Untouched);
        assert_eq!(s.house_damage, vec![0.5, 0.5]);
    }

    #[test]
    fn livelihood_recovers_at_home_and_away() {
        let mut s = store(2);
        let w = World::new(&s);
        s.livelihood_damage = vec![0.5, 0.1];
        s.status[1] = Status::Displaced;
        let ctx = w.ctx(false, false);
        let mut rng = SimRng::new(1);
        fix_damage(&mut s, a(0), &ctx, &mut rng);
        fix_damage(&mut s, a(1), &ctx, &mut rng);
        assert!((s.livelihood_damage[0] - 0.3).abs() < 1e-12);
        assert_eq!(s.livelihood_damage[1], 0.0);
    }

    #[test]
    fn sound_households_help_damaged_neighbours() {
        let mut s = store(3);
        let w = World::new(&s).with_neighbours(vec![vec![1, 2], vec![0], vec![0]]);
        s.house_damage[1] = 0.3;
        let helped = fix_neighbours_damage(&mut s, a(0), &w.ctx(false, false));
        assert_eq!(helped, 1);
        assert!((s.house_damage[1] - 0.25).abs() < 1e-12);
        assert_eq!(s.house_damage[2], 0.0);
    }

    #[test]
    fn flooded_or_damaged_households_do_not_help() {
        let mut s = store(2);
        let w = World::new(&s).with_neighbours(vec![vec![1], vec![0]]);
        s.house_damage[1] = 0.5;
        s.received_flood[0] = true;
        assert_eq!(fix_neighbours_damage(&mut s, a(0), &w.ctx(true, false)), 0);
        s.received_flood[0] = false;
        s.house_damage[0] = 0.3;
        assert_eq!(fix_neighbours_damage(&mut s, a(0), &w.ctx(false, false)), 0);
        assert_eq!(s.house_damage[1], 0.5);
    }

    #[test]
    fn spillover_is_last_writer_wins_within_the_stage() {
        // 0 is sound, 1 is just above the low threshold, 2 is damaged.
        // 0 helping 1 first makes 1 sound enough to help 2 in the same stage.
        let build = || {
            let mut s = store(3);
            s.house_damage = vec![0.0, 0.28, 0.5];
            s
        };
        let w = World::new(&build()).with_neighbours(vec![vec![1], vec![0, 2], vec![1]]);
        let ctx = w.ctx(false, false);

        let mut forward = build();
        for i in [0, 1, 2] {
            fix_neighbours_damage(&mut forward, a(i), &ctx);
        }
        assert!((forward.house_damage[1] - 0.23).abs() < 1e-12);
        assert!((forward.house_damage[2] - 0.45).abs() < 1e-12);

        let mut backward = build();
        for i in [2, 1, 0] {
            fix_neighbours_damage(&mut backward, a(i), &ctx);
        }
        assert!((backward.house_damage[1] - 0.23).abs() < 1e-12);
        assert_eq!(backward.house_damage[2], 0.5);
    }

    #[test]
    fn repeated_help_floors_at_zero() {
        let mut s = store(3);
        let w = World::new(&s).with_neighbours(vec![vec![2], vec![2], vec![0, 1]]);
        s.house_damage[2] = 0.07;
        let ctx = w.ctx(false, false);
        fix_neighbours_damage(&mut s, a(0), &ctx);
        fix_neighbours_damage(&mut s, a(1), &ctx);
        assert_eq!(s.house_damage[2], 0.0);
    }
}

// ── Configuration ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod config_tests {
    use fdm_hazard::{EwsMode, Material};

    use crate::{BehaviorError, DecisionParams, MaterialRecovery, ProgramConfig, RepairLevel};

    #[test]
    fn defaults_validate() {
        assert!(DecisionParams::default().validate().is_ok());
        assert!(ProgramConfig::default().validate().is_ok());
    }

    #[test]
    fn better_materials_recover_faster_by_default() {
        let m = MaterialRecovery::default();
        assert!(m.multiplier(Material::Concrete) > m.multiplier(Material::MudBrick));
        assert!(m.multiplier(Material::MudBrick) > m.multiplier(Material::InformalSettlement));
        assert_eq!(m.multiplier(Material::InformalSettlement), 0.5);
    }

    #[test]
    fn threshold_order_enforced() {
        let params = DecisionParams { low_damage_threshold: 0.7, ..DecisionParams::default() };
        assert!(matches!(params.validate(), Err(BehaviorError::ThresholdOrder { .. })));
    }

    #[test]
    fn out_of_range_values_rejected() {
        let params = DecisionParams { trust_change: -0.1, ..DecisionParams::default() };
        assert!(params.validate().is_err());
        let params = DecisionParams { poverty_line: 0.0, ..DecisionParams::default() };
        assert!(params.validate().is_err());
        let programs = ProgramConfig { house_repair_program: 1.5, ..ProgramConfig::default() };
        assert!(programs.validate().is_err());
    }

    #[test]
    fn presets_combine() {
        let p = ProgramConfig::from_presets(EwsMode::GoodEws, RepairLevel::Hrp60Hi);
        assert!(p.early_warning.enabled);
        assert_eq!(p.house_repair_program, 0.6);
        assert!(p.house_improvement_program);
        assert!(!p.basic_income_program);
    }

    #[test]
    fn repair_levels_parse() {
        for level in RepairLevel::ALL {
            assert_eq!(level.as_str().parse::<RepairLevel>().unwrap(), level);
        }
        assert!("hrp_45".parse::<RepairLevel>().is_err());
    }

    #[test]
    fn program_floors_and_basic_income() {
        let params = DecisionParams::default();
        let mut p = ProgramConfig::default();
        assert_eq!(p.sentiment_floor(&params), 0.0);
        assert_eq!(p.basic_income(&params), 0.0);
        p.awareness_program = true;
        p.basic_income_program = true;
        assert_eq!(p.sentiment_floor(&params), 0.5);
        assert_eq!(p.basic_income(&params), 1.0);
    }
}
