//! Spatial indexing for O(log n) hit testing.
//!
//! This module provides an R-tree based spatial index used to pick points
//! from clicks and rectangle selections on the map.

mod rtree;

pub use rtree::SpatialIndex;
