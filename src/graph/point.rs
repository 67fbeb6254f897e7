//! Point type and related structures.
//!
//! Points are the vertices in the graph. Each point has:
//! - A unique name, which is also its only lookup key
//! - Position (x, y) in map space, used for drawing and hit testing only

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::{GraphError, Result};

/// A named, positioned vertex.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Unique, non-empty name.
    pub id: String,
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Point {
    /// Create a new Point. The id is not validated here; see [`normalize_id`].
    pub fn new(id: impl Into<String>, x: f64, y: f64) -> Self {
        Self { id: id.into(), x, y }
    }

    /// Get the position as an `(x, y)` pair.
    #[inline]
    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Euclidean distance to another point in map units.
    #[inline]
    pub fn distance_to(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.id, self.x, self.y)
    }
}

/// Trim a user-supplied point name and reject it if nothing is left.
pub fn normalize_id(raw: &str) -> Result<&str> {
    let id = raw.trim();
    if id.is_empty() {
        return Err(GraphError::InvalidId);
    }
    Ok(id)
}

/// Reject a position that is not finite on both axes.
pub fn validate_position(id: &str, x: f64, y: f64) -> Result<()> {
    if x.is_finite() && y.is_finite() {
        Ok(())
    } else {
        Err(GraphError::InvalidPosition(id.to_string(), x, y))
    }
}
