//! GraphStore - named points and weighted undirected edges.
//!
//! Topology lives in a petgraph StableGraph so slots stay valid across
//! removals. Names map to slots through `index_of`, and every position is
//! mirrored in an R-tree for hit testing.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use petgraph::Undirected;
use petgraph::stable_graph::{EdgeReference, NodeIndex, StableGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences};

use super::edge::{EdgeRecord, geometric_weight, validate_weight};
use super::error::{GraphError, Result};
use super::point::{Point, normalize_id, validate_position};
use super::snapshot::GraphSnapshot;
use crate::config::EditorConfig;
use crate::spatial::SpatialIndex;

/// Undirected petgraph storage: points as node weights, distances as edge weights.
pub type PointGraph = StableGraph<Point, f64, Undirected>;

/// The endpoint of `edge` that is not `from`.
#[inline]
pub(crate) fn opposite(edge: EdgeReference<'_, f64>, from: NodeIndex) -> NodeIndex {
    if edge.source() == from {
        edge.target()
    } else {
        edge.source()
    }
}

/// The graph store.
///
/// Invariants held after every call, successful or not:
/// - every name in `index_of` points at a live slot holding a point of that name
/// - at most one edge per pair, no self-loops, weights positive and finite
/// - the spatial index holds exactly one entry per live point
pub struct GraphStore {
    graph: PointGraph,

    /// Map from point name to petgraph slot
    index_of: HashMap<String, NodeIndex>,

    /// Spatial index for hit testing
    spatial: SpatialIndex,
}

impl GraphStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            graph: StableGraph::default(),
            index_of: HashMap::new(),
            spatial: SpatialIndex::new(),
        }
    }

    /// Create a store with pre-allocated capacity.
    pub fn with_capacity(point_capacity: usize, edge_capacity: usize) -> Self {
        Self {
            graph: StableGraph::with_capacity(point_capacity, edge_capacity),
            index_of: HashMap::with_capacity(point_capacity),
            spatial: SpatialIndex::new(),
        }
    }

    /// Build a store from a snapshot.
    ///
    /// Points are added first, then edges, with the same validation as the
    /// individual operations. The first bad record rejects the whole snapshot.
    pub fn from_snapshot(snapshot: &GraphSnapshot) -> Result<Self> {
        let mut store = Self::with_capacity(snapshot.points.len(), snapshot.edges.len());
        for point in &snapshot.points {
            store.insert_point(&point.id, point.x, point.y)?;
        }
        for edge in &snapshot.edges {
            store.add_edge(&edge.u, &edge.v, edge.weight)?;
        }
        store.reindex();
        Ok(store)
    }

    // =========================================================================
    // Point Operations
    // =========================================================================

    /// Add a point at the given position.
    ///
    /// The name is trimmed first. Fails with `InvalidId` if nothing is left,
    /// `DuplicateId` if the name is taken and `InvalidPosition` if either
    /// coordinate is NaN or infinite.
    pub fn add_point(&mut self, id: &str, x: f64, y: f64) -> Result<()> {
        let index = self.insert_point(id, x, y)?;
        self.spatial.insert(index, x, y);
        Ok(())
    }

    fn insert_point(&mut self, id: &str, x: f64, y: f64) -> Result<NodeIndex> {
        let id = normalize_id(id)?;
        if self.index_of.contains_key(id) {
            return Err(GraphError::DuplicateId(id.to_string()));
        }
        validate_position(id, x, y)?;

        let index = self.graph.add_node(Point::new(id, x, y));
        self.index_of.insert(id.to_string(), index);
        Ok(index)
    }

    /// Remove a point and every edge touching it.
    pub fn remove_point(&mut self, id: &str) -> Result<()> {
        let index = self.slot(id)?;
        if let Some(point) = self.graph.remove_node(index) {
            self.index_of.remove(&point.id);
            if !self.spatial.remove(index, point.x, point.y) {
                self.reindex();
            }
        }
        Ok(())
    }

    /// Move a point. Edge weights are left as they are.
    ///
    /// Fails with `InvalidPosition` for a NaN or infinite coordinate, leaving
    /// the point where it was.
    pub fn move_point(&mut self, id: &str, x: f64, y: f64) -> Result<()> {
        let index = self.slot(id)?;
        let point = &mut self.graph[index];
        validate_position(&point.id, x, y)?;

        let (old_x, old_y) = point.position();
        point.x = x;
        point.y = y;
        if self.spatial.remove(index, old_x, old_y) {
            self.spatial.insert(index, x, y);
        } else {
            self.reindex();
        }
        Ok(())
    }

    pub fn point(&self, id: &str) -> Option<&Point> {
        self.index_of
            .get(id.trim())
            .and_then(|&index| self.graph.node_weight(index))
    }

    pub fn position(&self, id: &str) -> Option<(f64, f64)> {
        self.point(id).map(Point::position)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index_of.contains_key(id.trim())
    }

    /// Every known point name, in sorted order.
    pub fn all_point_ids(&self) -> BTreeSet<String> {
        self.index_of.keys().cloned().collect()
    }

    /// Every live point, in slot order.
    pub fn points(&self) -> impl Iterator<Item = &Point> + '_ {
        self.graph.node_indices().map(|index| &self.graph[index])
    }

    pub fn point_count(&self) -> usize {
        self.graph.node_count()
    }

    // =========================================================================
    // Edge Operations
    // =========================================================================

    /// Connect two points, replacing any existing edge between them.
    pub fn add_edge(&mut self, u: &str, v: &str, weight: f64) -> Result<()> {
        let a = self.slot(u)?;
        let b = self.slot(v)?;
        if a == b {
            return Err(GraphError::SelfLoop(self.graph[a].id.clone()));
        }
        let weight = validate_weight(weight)?;

        // update_edge finds an existing undirected edge in either direction
        self.graph.update_edge(a, b, weight);
        Ok(())
    }

    /// Connect two points with a weight derived from their positions.
    ///
    /// Returns the weight that was stored.
    pub fn add_edge_by_distance(&mut self, u: &str, v: &str, config: &EditorConfig) -> Result<f64> {
        let a = self.slot(u)?;
        let b = self.slot(v)?;
        let weight = geometric_weight(&self.graph[a], &self.graph[b], config);
        self.add_edge(u, v, weight)?;
        Ok(weight)
    }

    /// Disconnect two points. Returns whether an edge existed.
    pub fn remove_edge(&mut self, u: &str, v: &str) -> Result<bool> {
        let a = self.slot(u)?;
        let b = self.slot(v)?;
        Ok(match self.graph.find_edge(a, b) {
            Some(edge) => self.graph.remove_edge(edge).is_some(),
            None => false,
        })
    }

    /// Weight of the edge between two points, if they are connected.
    pub fn weight(&self, u: &str, v: &str) -> Option<f64> {
        let a = *self.index_of.get(u.trim())?;
        let b = *self.index_of.get(v.trim())?;
        self.graph
            .find_edge(a, b)
            .and_then(|edge| self.graph.edge_weight(edge))
            .copied()
    }

    /// Neighbors of a point with the weight of each connecting edge.
    pub fn neighbors(&self, id: &str) -> Result<BTreeMap<String, f64>> {
        let index = self.slot(id)?;
        Ok(self
            .graph
            .edges(index)
            .map(|edge| (self.graph[opposite(edge, index)].id.clone(), *edge.weight()))
            .collect())
    }

    /// Every edge once, as `u < v` records sorted by `(u, v)`.
    pub fn edges(&self) -> Vec<EdgeRecord> {
        let mut edges: Vec<_> = self
            .graph
            .edge_references()
            .map(|edge| {
                EdgeRecord::new(
                    self.graph[edge.source()].id.as_str(),
                    self.graph[edge.target()].id.as_str(),
                    *edge.weight(),
                )
            })
            .collect();
        edges.sort_by(|a, b| (&a.u, &a.v).cmp(&(&b.u, &b.v)));
        edges
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    // =========================================================================
    // Spatial Queries
    // =========================================================================

    /// The point closest to `(x, y)`, if one lies within `radius`.
    pub fn point_near(&self, x: f64, y: f64, radius: f64) -> Option<&str> {
        self.spatial
            .nearest_within(x, y, radius)
            .and_then(|index| self.graph.node_weight(index))
            .map(|point| point.id.as_str())
    }

    /// Names of all points inside a rectangle, sorted.
    pub fn points_in_rect(&self, x1: f64, y1: f64, x2: f64, y2: f64) -> Vec<String> {
        let mut ids: Vec<_> = self
            .spatial
            .in_rect(x1, y1, x2, y2)
            .into_iter()
            .filter_map(|index| self.graph.node_weight(index))
            .map(|point| point.id.clone())
            .collect();
        ids.sort();
        ids
    }

    fn reindex(&mut self) {
        let entries: Vec<_> = self
            .graph
            .node_indices()
            .map(|index| (index, self.graph[index].x, self.graph[index].y))
            .collect();
        self.spatial.rebuild(&entries);
    }

    // =========================================================================
    // Utilities
    // =========================================================================

    /// Positions along a route, in order, for drawing or animating it.
    pub fn route_polyline<S: AsRef<str>>(&self, path: &[S]) -> Result<Vec<(f64, f64)>> {
        path.iter()
            .map(|id| {
                let index = self.slot(id.as_ref())?;
                Ok(self.graph[index].position())
            })
            .collect()
    }

    /// Bounding box `(min_x, min_y, max_x, max_y)` of all points.
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        self.points().fold(None, |acc, p| {
            Some(match acc {
                None => (p.x, p.y, p.x, p.y),
                Some((min_x, min_y, max_x, max_y)) => {
                    (min_x.min(p.x), min_y.min(p.y), max_x.max(p.x), max_y.max(p.y))
                }
            })
        })
    }

    /// Points sorted by name and edges as `u < v` records.
    pub fn snapshot(&self) -> GraphSnapshot {
        let mut points: Vec<_> = self.points().cloned().collect();
        points.sort_by(|a, b| a.id.cmp(&b.id));
        GraphSnapshot {
            points,
            edges: self.edges(),
        }
    }

    /// Remove all points and edges.
    pub fn clear(&mut self) {
        self.graph.clear();
        self.index_of.clear();
        self.spatial.clear();
    }

    /// Slot of a known point, or `UnknownPoint`.
    pub(crate) fn slot(&self, id: &str) -> Result<NodeIndex> {
        let id = id.trim();
        self.index_of
            .get(id)
            .copied()
            .ok_or_else(|| GraphError::UnknownPoint(id.to_string()))
    }

    pub(crate) fn graph(&self) -> &PointGraph {
        &self.graph
    }
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> GraphStore {
        let mut store = GraphStore::new();
        store.add_point("A", 0.0, 0.0).unwrap();
        store.add_point("B", 3.0, 0.0).unwrap();
        store.add_point("C", 3.0, 4.0).unwrap();
        store.add_edge("A", "B", 3.0).unwrap();
        store.add_edge("B", "C", 4.0).unwrap();
        store.add_edge("A", "C", 10.0).unwrap();
        store
    }

    #[test]
    fn test_add_point() {
        let mut store = GraphStore::new();
        store.add_point("Howrah", 80.0, 280.0).unwrap();

        assert_eq!(store.point_count(), 1);
        assert_eq!(store.position("Howrah"), Some((80.0, 280.0)));
        assert!(store.neighbors("Howrah").unwrap().is_empty());
    }

    #[test]
    fn test_add_point_trims_name() {
        let mut store = GraphStore::new();
        store.add_point("  Victoria ", 1.0, 2.0).unwrap();

        assert!(store.contains("Victoria"));
        assert_eq!(store.all_point_ids().into_iter().collect::<Vec<_>>(), vec!["Victoria"]);
    }

    #[test]
    fn test_add_point_errors() {
        let mut store = GraphStore::new();
        assert_eq!(store.add_point("", 0.0, 0.0), Err(GraphError::InvalidId));
        assert_eq!(store.add_point("  ", 0.0, 0.0), Err(GraphError::InvalidId));

        store.add_point("X", 0.0, 0.0).unwrap();
        assert_eq!(
            store.add_point("X", 5.0, 5.0),
            Err(GraphError::DuplicateId("X".into()))
        );
        // the rejected call must not move the original
        assert_eq!(store.position("X"), Some((0.0, 0.0)));
        assert_eq!(store.point_count(), 1);
    }

    #[test]
    fn test_add_edge_is_symmetric() {
        let store = triangle();

        assert_eq!(store.neighbors("A").unwrap().get("B"), Some(&3.0));
        assert_eq!(store.neighbors("B").unwrap().get("A"), Some(&3.0));
        assert_eq!(store.weight("C", "B"), Some(4.0));
        assert_eq!(store.weight("B", "C"), Some(4.0));
        assert_eq!(store.edge_count(), 3);
    }

    #[test]
    fn test_add_edge_overwrites() {
        let mut store = triangle();
        store.add_edge("B", "A", 7.5).unwrap();

        assert_eq!(store.edge_count(), 3);
        assert_eq!(store.weight("A", "B"), Some(7.5));
        assert_eq!(store.neighbors("A").unwrap().get("B"), Some(&7.5));
        assert_eq!(store.neighbors("B").unwrap().get("A"), Some(&7.5));
        let ab: Vec<_> = store.edges().into_iter().filter(|e| e.u == "A" && e.v == "B").collect();
        assert_eq!(ab.len(), 1);
    }

    #[test]
    fn test_add_edge_errors_leave_store_unchanged() {
        let mut store = GraphStore::new();
        store.add_point("X", 0.0, 0.0).unwrap();
        store.add_point("Y", 1.0, 0.0).unwrap();

        assert_eq!(store.add_edge("X", "X", 5.0), Err(GraphError::SelfLoop("X".into())));
        assert_eq!(store.add_edge("X", "Y", -3.0), Err(GraphError::InvalidWeight(-3.0)));
        assert_eq!(store.add_edge("X", "Y", 0.0), Err(GraphError::InvalidWeight(0.0)));
        assert!(matches!(
            store.add_edge("X", "Y", f64::NAN),
            Err(GraphError::InvalidWeight(_))
        ));
        assert_eq!(
            store.add_edge("X", "Ghost", 1.0),
            Err(GraphError::UnknownPoint("Ghost".into()))
        );
        assert_eq!(
            store.add_edge("Ghost", "X", 1.0),
            Err(GraphError::UnknownPoint("Ghost".into()))
        );
        assert_eq!(store.edge_count(), 0);
    }

    #[test]
    fn test_neighbors_unknown() {
        let store = GraphStore::new();
        assert_eq!(
            store.neighbors("Ghost"),
            Err(GraphError::UnknownPoint("Ghost".into()))
        );
    }

    #[test]
    fn test_edges_are_canonical_and_sorted() {
        let mut store = triangle();
        store.add_edge("C", "A", 9.0).unwrap();

        let edges = store.edges();
        assert_eq!(
            edges,
            vec![
                EdgeRecord::new("A", "B", 3.0),
                EdgeRecord::new("A", "C", 9.0),
                EdgeRecord::new("B", "C", 4.0),
            ]
        );
    }

    #[test]
    fn test_remove_edge() {
        let mut store = triangle();

        assert_eq!(store.remove_edge("C", "A"), Ok(true));
        assert_eq!(store.remove_edge("A", "C"), Ok(false));
        assert_eq!(store.weight("A", "C"), None);
        assert!(!store.neighbors("C").unwrap().contains_key("A"));
        assert!(store.remove_edge("A", "Ghost").is_err());
    }

    #[test]
    fn test_remove_point_drops_its_edges() {
        let mut store = triangle();
        store.remove_point("B").unwrap();

        assert!(!store.contains("B"));
        assert_eq!(store.point_count(), 2);
        assert_eq!(store.edge_count(), 1);
        assert!(!store.neighbors("A").unwrap().contains_key("B"));
        assert!(!store.neighbors("C").unwrap().contains_key("B"));
        assert_eq!(store.point_near(3.0, 0.0, 0.5), None);

        // the name is free again
        store.add_point("B", 30.0, 0.0).unwrap();
        assert!(store.neighbors("B").unwrap().is_empty());
        assert_eq!(store.point_near(30.0, 0.0, 0.5), Some("B"));
    }

    #[test]
    fn test_move_point_updates_hit_testing() {
        let mut store = triangle();
        store.move_point("C", 100.0, 100.0).unwrap();

        assert_eq!(store.position("C"), Some((100.0, 100.0)));
        assert_eq!(store.point_near(3.0, 4.0, 1.0), None);
        assert_eq!(store.point_near(101.0, 100.0, 2.0), Some("C"));
        assert_eq!(store.weight("B", "C"), Some(4.0));
        assert!(store.move_point("Ghost", 0.0, 0.0).is_err());
    }

    #[test]
    fn test_non_finite_positions_rejected() {
        let mut store = triangle();

        assert!(matches!(
            store.add_point("D", f64::NAN, 0.0),
            Err(GraphError::InvalidPosition(ref id, _, y)) if id == "D" && y == 0.0
        ));
        assert!(matches!(
            store.add_point("D", 0.0, f64::INFINITY),
            Err(GraphError::InvalidPosition(..))
        ));
        assert!(!store.contains("D"));
        assert_eq!(store.point_count(), 3);
        assert_eq!(store.spatial.len(), 3);

        assert!(matches!(
            store.move_point("C", f64::NAN, f64::NAN),
            Err(GraphError::InvalidPosition(..))
        ));
        assert_eq!(store.position("C"), Some((3.0, 4.0)));
        assert_eq!(store.point_near(3.0, 4.0, 1.0), Some("C"));

        let mut snapshot = store.snapshot();
        snapshot.points.push(Point::new("D", f64::NEG_INFINITY, 0.0));
        assert!(matches!(
            GraphStore::from_snapshot(&snapshot),
            Err(GraphError::InvalidPosition(..))
        ));
    }

    #[test]
    fn test_spatial_entries_follow_slot_reuse() {
        let mut store = triangle();
        store.remove_point("A").unwrap();
        assert_eq!(store.spatial.len(), 2);

        store.add_point("D", 100.0, 100.0).unwrap();
        store.move_point("B", 50.0, 50.0).unwrap();
        assert_eq!(store.spatial.len(), store.point_count());
        assert_eq!(store.point_near(0.0, 0.0, 1.0), None);
        assert_eq!(store.point_near(100.0, 100.0, 1.0), Some("D"));
        assert_eq!(store.point_near(50.0, 50.0, 1.0), Some("B"));
    }

    #[test]
    fn test_points_in_rect() {
        let store = triangle();
        assert_eq!(store.points_in_rect(-1.0, -1.0, 4.0, 1.0), vec!["A", "B"]);
    }

    #[test]
    fn test_add_edge_by_distance() {
        let mut store = GraphStore::new();
        store.add_point("A", 0.0, 0.0).unwrap();
        store.add_point("C", 30.0, 40.0).unwrap();

        let weight = store
            .add_edge_by_distance("A", "C", &EditorConfig::default())
            .unwrap();
        assert_eq!(weight, 5.0);
        assert_eq!(store.weight("C", "A"), Some(5.0));
        assert_eq!(
            store.add_edge_by_distance("A", "A", &EditorConfig::default()),
            Err(GraphError::SelfLoop("A".into()))
        );
    }

    #[test]
    fn test_route_polyline() {
        let store = triangle();
        assert_eq!(
            store.route_polyline(&["A", "B", "C"]).unwrap(),
            vec![(0.0, 0.0), (3.0, 0.0), (3.0, 4.0)]
        );
        assert!(store.route_polyline(&["A", "Ghost"]).is_err());
        assert!(store.route_polyline::<&str>(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_bounds() {
        let mut store = GraphStore::new();
        assert_eq!(store.bounds(), None);

        store.add_point("W", -10.0, -5.0).unwrap();
        store.add_point("E", 10.0, 5.0).unwrap();
        assert_eq!(store.bounds(), Some((-10.0, -5.0, 10.0, 5.0)));

        store.remove_point("W").unwrap();
        assert_eq!(store.bounds(), Some((10.0, 5.0, 10.0, 5.0)));
    }

    #[test]
    fn test_snapshot_round_trip() {
        let store = triangle();
        let snapshot = store.snapshot();

        let ids: Vec<_> = snapshot.points.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B", "C"]);
        assert_eq!(snapshot.edges.len(), 3);

        let copy = GraphStore::from_snapshot(&snapshot).unwrap();
        assert_eq!(copy.snapshot(), snapshot);
        assert_eq!(copy.point_near(3.0, 4.0, 0.5), Some("C"));
    }

    #[test]
    fn test_from_snapshot_rejects_bad_records() {
        let mut snapshot = triangle().snapshot();
        snapshot.edges.push(EdgeRecord::new("A", "Ghost", 1.0));

        assert_eq!(
            GraphStore::from_snapshot(&snapshot).err(),
            Some(GraphError::UnknownPoint("Ghost".into()))
        );
    }

    #[test]
    fn test_clear() {
        let mut store = triangle();
        store.clear();

        assert_eq!(store.point_count(), 0);
        assert_eq!(store.edge_count(), 0);
        assert!(store.all_point_ids().is_empty());
        assert_eq!(store.point_near(0.0, 0.0, 100.0), None);

        store.add_point("A", 0.0, 0.0).unwrap();
        assert_eq!(store.point_count(), 1);
    }
}
