//! Precomputed neighbour lists.
//!
//! # Data layout
//!
//! Neighbour lists use **Compressed Sparse Row (CSR)** format.  Given an
//! `AgentId a`, its neighbours occupy the slice:
//!
//! ```text
//! ids[ offsets[a] .. offsets[a+1] ]
//! ```
//!
//! The table is built once at model construction and is read-only for the
//! rest of the run; every stage that aggregates over neighbours iterates a
//! contiguous slice with no allocation.

use fdm_core::AgentId;

use crate::{NeighborIndex, SpatialError, SpatialResult};

/// Arena of neighbour-id lists keyed by `AgentId`.
#[derive(Clone, Debug, Default)]
pub struct NeighborTable {
    /// CSR row pointer.  Length = `household_count + 1`.
    offsets: Vec<u32>,
    /// Concatenated neighbour lists, each sorted ascending.
    ids:     Vec<AgentId>,
}

impl NeighborTable {
    /// Query `index` once per household with `radius` and freeze the result.
    pub fn from_index<I: NeighborIndex + ?Sized>(index: &I, radius: f32) -> SpatialResult<Self> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(SpatialError::InvalidRadius(radius));
        }
        let count = index.len();
        let mut offsets = Vec::with_capacity(count + 1);
        let mut ids = Vec::new();
        offsets.push(0);
        for i in 0..count as u32 {
            ids.extend(index.neighbors_within(AgentId(i), radius));
            offsets.push(ids.len() as u32);
        }
        Ok(Self { offsets, ids })
    }

    /// Build from explicit per-household lists (`lists[i]` belongs to
    /// `AgentId(i)`).  Lists are sorted and de-duplicated; references outside
    /// the population or to the household itself are rejected.
    pub fn from_lists(lists: Vec<Vec<AgentId>>) -> SpatialResult<Self> {
        let count = lists.len();
        let mut offsets = Vec::with_capacity(count + 1);
        let mut ids = Vec::new();
        offsets.push(0);
        for (i, mut list) in lists.into_iter().enumerate() {
            let agent = AgentId(i as u32);
            list.sort_unstable();
            list.dedup();
            for &n in &list {
                if n.index() >= count {
                    return Err(SpatialError::NeighbourOutOfRange { agent, neighbour: n, count });
                }
                if n == agent {
                    return Err(SpatialError::SelfNeighbour(agent));
                }
            }
            ids.extend(list);
            offsets.push(ids.len() as u32);
        }
        Ok(Self { offsets, ids })
    }

    /// A table of `count` households with no neighbours at all.
    pub fn isolated(count: usize) -> Self {
        Self { offsets: vec![0; count + 1], ids: Vec::new() }
    }

    /// Number of households covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Neighbours of `agent`, sorted ascending.  Contiguous: no allocation.
    #[inline]
    pub fn neighbours(&self, agent: AgentId) -> &[AgentId] {
        let start = self.offsets[agent.index()] as usize;
        let end   = self.offsets[agent.index() + 1] as usize;
        &self.ids[start..end]
    }

    /// Number of neighbours of `agent`.
    #[inline]
    pub fn degree(&self, agent: AgentId) -> usize {
        self.neighbours(agent).len()
    }

    /// Total number of directed neighbour links.
    pub fn link_count(&self) -> usize {
        self.ids.len()
    }
}
