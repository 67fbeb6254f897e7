//! R-tree based spatial index using the rstar crate.
//!
//! Provides O(log n) queries for picking points on the map:
//! - Nearest point within a click radius
//! - Rectangle selection

use petgraph::stable_graph::NodeIndex;
use rstar::{AABB, PointDistance, RTree, RTreeObject};

/// A map position in the index, tagged with the store slot it belongs to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexedPoint {
    /// Store slot of the point.
    pub index: NodeIndex,
    pub x: f64,
    pub y: f64,
}

impl IndexedPoint {
    pub fn new(index: NodeIndex, x: f64, y: f64) -> Self {
        Self { index, x, y }
    }
}

impl RTreeObject for IndexedPoint {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.x, self.y])
    }
}

impl PointDistance for IndexedPoint {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.x - point[0];
        let dy = self.y - point[1];
        dx * dx + dy * dy
    }
}

/// Spatial index over point positions.
///
/// The store keeps this in lockstep with its points: every add, move and
/// removal goes through here as well.
pub struct SpatialIndex {
    tree: RTree<IndexedPoint>,
}

impl SpatialIndex {
    /// Create a new empty spatial index.
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    pub fn insert(&mut self, index: NodeIndex, x: f64, y: f64) {
        self.tree.insert(IndexedPoint::new(index, x, y));
    }

    /// Remove an entry. Returns true if it was present.
    pub fn remove(&mut self, index: NodeIndex, x: f64, y: f64) -> bool {
        self.tree.remove(&IndexedPoint::new(index, x, y)).is_some()
    }

    /// Nearest entry to `(x, y)` no further than `max_distance` away.
    pub fn nearest_within(&self, x: f64, y: f64, max_distance: f64) -> Option<NodeIndex> {
        let max_distance_sq = max_distance * max_distance;
        self.tree
            .nearest_neighbor(&[x, y])
            .filter(|point| point.distance_2(&[x, y]) <= max_distance_sq)
            .map(|point| point.index)
    }

    /// All entries inside the rectangle, corners in any order.
    pub fn in_rect(&self, x1: f64, y1: f64, x2: f64, y2: f64) -> Vec<NodeIndex> {
        let envelope = AABB::from_corners([x1, y1], [x2, y2]);
        self.tree
            .locate_in_envelope(&envelope)
            .map(|point| point.index)
            .collect()
    }

    /// Rebuild the index from `(slot, x, y)` tuples in one bulk load.
    pub fn rebuild(&mut self, points: &[(NodeIndex, f64, f64)]) {
        let entries: Vec<_> = points
            .iter()
            .map(|&(index, x, y)| IndexedPoint::new(index, x, y))
            .collect();

        self.tree = RTree::bulk_load(entries);
    }

    pub fn clear(&mut self) {
        self.tree = RTree::new();
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new()
    }
}
