//! `fdm-spatial`: neighbourhood queries over household positions.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`index`]   | `NeighborIndex` trait, `RTreeIndex` (rstar-backed)          |
//! | [`table`]   | `NeighborTable`: CSR arena of neighbour-id lists           |
//! | [`error`]   | `SpatialError`, `SpatialResult<T>`                          |
//!
//! Household positions never change during a run, so the simulation queries
//! the index exactly once per household at construction and keeps the
//! answers in a [`NeighborTable`].  Stages read neighbour lists from the
//! table; they never touch the R-tree.

pub mod error;
pub mod index;
pub mod table;


pub use error::{SpatialError, SpatialResult};
pub use index::{NeighborIndex, RTreeIndex};
pub use table::NeighborTable;
