//! Graph data structures and operations.
//!
//! This module provides the point store: named points held in petgraph's
//! StableGraph with undirected, positively weighted edges, plus the error
//! type shared by every store and routing operation.

mod edge;
mod error;
mod point;
mod snapshot;
mod store;

pub use edge::{EdgeRecord, geometric_weight, validate_weight};
pub use error::{GraphError, Result};
pub use point::{Point, normalize_id, validate_position};
pub use snapshot::GraphSnapshot;
pub use store::{GraphStore, PointGraph};

pub(crate) use store::opposite;
