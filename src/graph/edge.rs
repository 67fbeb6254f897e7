//! Edge records and weight rules.
//!
//! Edges are undirected connections between two distinct points. The store
//! keeps one petgraph edge per pair; the record form below is what leaves
//! the store for drawing and snapshots.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::{GraphError, Result};
use super::point::Point;
use crate::config::EditorConfig;

/// One undirected edge, stored with `u < v` lexicographically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub u: String,
    pub v: String,
    pub weight: f64,
}

impl EdgeRecord {
    /// Build a record with its endpoints put in canonical order.
    pub fn new(a: impl Into<String>, b: impl Into<String>, weight: f64) -> Self {
        let (a, b) = (a.into(), b.into());
        if a <= b {
            Self { u: a, v: b, weight }
        } else {
            Self { u: b, v: a, weight }
        }
    }
}

impl fmt::Display for EdgeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ↔ {} ({})", self.u, self.v, self.weight)
    }
}

/// Accept only strictly positive, finite weights.
#[inline]
pub fn validate_weight(weight: f64) -> Result<f64> {
    if weight.is_finite() && weight > 0.0 {
        Ok(weight)
    } else {
        Err(GraphError::InvalidWeight(weight))
    }
}

/// Weight derived from the straight-line distance between two points.
///
/// The distance is divided by `distance_scale` and, when `round_weights` is
/// set, rounded to an integer. The result never drops below 1 when rounding,
/// so coincident or very close points still get a valid weight.
pub fn geometric_weight(a: &Point, b: &Point, config: &EditorConfig) -> f64 {
    let scaled = a.distance_to(b) / config.distance_scale;
    if config.round_weights {
        scaled.round().max(1.0)
    } else if scaled > 0.0 {
        scaled
    } else {
        f64::MIN_POSITIVE
    }
}
