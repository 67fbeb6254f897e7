//! Single-source shortest path with early exit at the destination.
//!
//! # Algorithm
//!
//! Dijkstra over the store's undirected graph with a binary-heap frontier:
//! 1. Every slot starts at +∞ except the source at 0.
//! 2. Pop the unsettled point with the smallest tentative distance. Equal
//!    distances pop in name order, so results are deterministic.
//! 3. Stop once the destination is popped or the frontier runs dry.
//! 4. Relax each edge out of the popped point, remembering the predecessor
//!    whenever a strictly shorter distance is found.
//! 5. Walk predecessors back from the destination to build the path.
//!
//! Runs in O(E log V). The store is only borrowed, never changed. Distances
//! saturate at `f64::MAX`, so a route whose weights sum past it is still found
//! and reported at `f64::MAX`.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use petgraph::stable_graph::NodeIndex;
use petgraph::visit::{NodeIndexable, VisitMap, Visitable};

use super::PathResult;
use crate::graph::{GraphStore, Result, opposite};

/// Frontier entry. Orders so that `BinaryHeap` pops the smallest distance,
/// then the lexicographically smallest name.
#[derive(Debug)]
struct Candidate<'a> {
    distance: f64,
    id: &'a str,
    index: NodeIndex,
}

impl Ord for Candidate<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.id.cmp(self.id))
    }
}

impl PartialOrd for Candidate<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Candidate<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate<'_> {}

/// Find the minimum-weight route from `source` to `destination`.
///
/// Fails with `UnknownPoint` if either end is not in the store. An
/// unreachable destination is not an error: it yields
/// [`PathResult::unreachable`].
pub fn shortest_path(store: &GraphStore, source: &str, destination: &str) -> Result<PathResult> {
    let start = store.slot(source)?;
    let goal = store.slot(destination)?;
    let graph = store.graph();

    let bound = graph.node_bound();
    let mut distance = vec![f64::INFINITY; bound];
    let mut predecessor: Vec<Option<NodeIndex>> = vec![None; bound];
    let mut settled = graph.visit_map();
    let mut frontier = BinaryHeap::new();

    distance[start.index()] = 0.0;
    frontier.push(Candidate {
        distance: 0.0,
        id: &graph[start].id,
        index: start,
    });

    while let Some(Candidate { distance: d, index: u, .. }) = frontier.pop() {
        // stale entry left behind by a later improvement
        if !settled.visit(u) {
            continue;
        }
        if u == goal {
            break;
        }

        for edge in graph.edges(u) {
            let v = opposite(edge, u);
            if settled.is_visited(&v) {
                continue;
            }
            let alt = (d + *edge.weight()).min(f64::MAX);
            if alt < distance[v.index()] {
                distance[v.index()] = alt;
                predecessor[v.index()] = Some(u);
                frontier.push(Candidate {
                    distance: alt,
                    id: &graph[v].id,
                    index: v,
                });
            }
        }
    }

    if goal != start && predecessor[goal.index()].is_none() {
        return Ok(PathResult::unreachable());
    }
    let total_distance = distance[goal.index()];

    let mut path = vec![graph[goal].id.clone()];
    let mut cursor = goal;
    while let Some(previous) = predecessor[cursor.index()] {
        path.push(graph[previous].id.clone());
        cursor = previous;
    }
    path.reverse();

    Ok(PathResult {
        total_distance,
        path,
    })
}
