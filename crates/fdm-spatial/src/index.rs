//! Radius queries over household positions.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) holds one `[lat, lon]` point per household.  The
//! radius is expressed in degrees, matching how the population data is
//! geocoded, so the index uses plain squared Euclidean distance in lat/lon
//! space.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use fdm_core::{AgentId, GeoPoint};

use crate::{SpatialError, SpatialResult};

// ── NeighborIndex ─────────────────────────────────────────────────────────────

/// Answers "which other households lie within `radius` of this one?".
///
/// Implementations must never include `agent` itself in the result, and
/// should return ids in ascending order so neighbour tables are
/// independent of the index's internal layout.
pub trait NeighborIndex {
    /// Number of households the index was built over.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All other households within `radius` (inclusive) of `agent`.
    fn neighbors_within(&self, agent: AgentId, radius: f32) -> Vec<AgentId>;
}

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Entry stored in the R-tree: a 2-D `[lat, lon]` point with its household.
#[derive(Clone)]
struct HouseholdEntry {
    point: [f32; 2], // [lat, lon]
    id:    AgentId,
}

impl RTreeObject for HouseholdEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for HouseholdEntry {
    /// Squared Euclidean distance in lat/lon space.
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        GeoPoint::new(self.point[0], self.point[1])
            .distance_deg_sq(GeoPoint::new(point[0], point[1]))
    }
}

// ── RTreeIndex ────────────────────────────────────────────────────────────────

/// [`NeighborIndex`] backed by a bulk-loaded R-tree.
pub struct RTreeIndex {
    positions: Vec<GeoPoint>,
    tree:      RTree<HouseholdEntry>,
}

impl RTreeIndex {
    /// Bulk-load the index.  `positions[i]` is the location of `AgentId(i)`.
    ///
    /// Fails if any position is NaN or infinite; such a household could
    /// never be matched consistently.
    pub fn new(positions: &[GeoPoint]) -> SpatialResult<Self> {
        let mut entries = Vec::with_capacity(positions.len());
        for (i, &pos) in positions.iter().enumerate() {
            let id = AgentId(i as u32);
            if !pos.is_finite() {
                return Err(SpatialError::NonFinitePosition { agent: id, pos });
            }
            entries.push(HouseholdEntry { point: [pos.lat, pos.lon], id });
        }
        Ok(Self {
            positions: positions.to_vec(),
            tree:      RTree::bulk_load(entries),
        })
    }

    /// Position of `agent` as supplied at construction.
    #[inline]
    pub fn position(&self, agent: AgentId) -> GeoPoint {
        self.positions[agent.index()]
    }
}

impl NeighborIndex for RTreeIndex {
    fn len(&self) -> usize {
        self.positions.len()
    }

    fn neighbors_within(&self, agent: AgentId, radius: f32) -> Vec<AgentId> {
        let pos = self.position(agent);
        let mut found: Vec<AgentId> = self
            .tree
            .locate_within_distance([pos.lat, pos.lon], radius * radius)
            .map(|e| e.id)
            .filter(|&id| id != agent)
            .collect();
        found.sort_unstable();
        found
    }
}
