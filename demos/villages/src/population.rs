//! Synthetic seven-village population and flood record.
//!
//! The villages sit along a river running north-south at `lon = 32.55`;
//! households closer to the bank flood deeper.  Covariates are drawn from a
//! dedicated RNG so every policy combination sees the same population.

use fdm_agent::{HouseholdRecord, Material, Village};
use fdm_core::{EventId, GeoPoint, SimRng};
use fdm_hazard::{FloodEvent, Scenario};

const RIVER_LON:    f32 = 32.55;
/// Spacing of the household grid within a village (degrees, ≈ 110 m).
const SPACING:      f32 = 0.001;
/// Chance of a flood in any calendar year.
const FLOOD_CHANCE: f64 = 0.2;

/// Village centre: seven villages spread 5 km apart along the river.
fn centre(village: Village) -> GeoPoint {
    let k = village.index() as f32;
    GeoPoint::new(15.40 + k * 0.045, RIVER_LON + 0.004 + (k % 3.0) * 0.003)
}

/// `per_village` households for each village, 8 to a row.
pub fn households(per_village: usize, seed: u64) -> Vec<HouseholdRecord> {
    let mut rng = SimRng::new(seed);
    let mut records = Vec::with_capacity(per_village * Village::COUNT);
    for village in Village::ALL {
        let c = centre(village);
        for i in 0..per_village {
            let position = GeoPoint::new(c.lat + (i / 8) as f32 * SPACING, c.lon + (i % 8) as f32 * SPACING);
            let material = match rng.gen_range(0..10) {
                0..=2 => Material::Concrete,
                3..=8 => Material::MudBrick,
                _ => Material::InformalSettlement,
            };
            let awareness: f64 = rng.gen_range(0.1..0.8);
            records.push(HouseholdRecord {
                position,
                village,
                material,
                base_income:           rng.gen_range(0.5..3.0),
                household_size:        rng.gen_range(2..=9),
                vulnerability:         rng.gen_range(-1.0..1.0),
                livestock:             if rng.gen_bool(0.4) { 1.0 } else { 0.0 },
                house_ownership:       rng.gen_range(-1.0..1.0),
                cropland:              rng.gen_range(0.0..2.0),
                obstacles_to_movement: rng.gen_bool(0.1),
                flood_prone:           position.lon - RIVER_LON < 0.010,
                awareness,
                fear:                  (awareness + rng.gen_range(-0.2..0.2)).clamp(0.0, 1.0),
                flood_exposure:        rng.gen_range(0..3),
            });
        }
    }
    records
}

/// Flood events over the scenario window, one per flooded calendar year.
pub fn flood_record(records: &[HouseholdRecord], scenario: &Scenario, seed: u64) -> Vec<FloodEvent> {
    let mut rng = SimRng::new(seed ^ 0xF100D);
    let mut events = Vec::new();
    for calendar_year in scenario.start_year..scenario.end_year {
        if !rng.gen_bool(FLOOD_CHANCE) {
            continue;
        }
        let return_period: f32 = rng.gen_range(2.0..100.0);
        // Crest height grows with the return period.
        let crest_mm = 400.0 + 600.0 * return_period.log10();
        let depths = records
            .iter()
            .map(|r| {
                let from_bank_m = (r.position.lon - RIVER_LON) * 110_000.0;
                (crest_mm - from_bank_m * 1.2).max(0.0)
            })
            .collect();
        events.push(FloodEvent { id: EventId(events.len() as u32), calendar_year, return_period, depths });
    }
    events
}
