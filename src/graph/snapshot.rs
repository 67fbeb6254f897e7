//! Flat, serializable view of a store.

use serde::{Deserialize, Serialize};

use super::edge::EdgeRecord;
use super::point::Point;

/// Points as `{id, x, y}` records and each undirected edge once as `{u, v, weight}`.
///
/// Produced by [`GraphStore::snapshot`](super::GraphStore::snapshot) for
/// rendering and accepted by
/// [`GraphStore::from_snapshot`](super::GraphStore::from_snapshot) to swap in a
/// whole map at once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub points: Vec<Point>,
    pub edges: Vec<EdgeRecord>,
}
