//! Shortest-path routing over a [`GraphStore`](crate::graph::GraphStore).

mod dijkstra;

use std::fmt;

use serde::Serialize;

pub use dijkstra::shortest_path;

/// Outcome of one route query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathResult {
    /// Sum of edge weights along `path`, or +∞ when no route exists.
    pub total_distance: f64,
    /// Point names from source to destination inclusive, empty when unreachable.
    pub path: Vec<String>,
}

impl PathResult {
    /// The "no route" result.
    pub fn unreachable() -> Self {
        Self {
            total_distance: f64::INFINITY,
            path: Vec::new(),
        }
    }

    pub fn is_reachable(&self) -> bool {
        !self.path.is_empty()
    }

    /// Number of edges travelled.
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

impl fmt::Display for PathResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_reachable() {
            return write!(f, "No route found");
        }
        write!(f, "{} ({})", self.path.join(" → "), self.total_distance)
    }
}
