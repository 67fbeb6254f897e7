//! Error taxonomy for graph mutations and route queries.
//!
//! Every variant is a rejected operation. A failing call leaves the store
//! exactly as it was before the call.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GraphError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Point already exists: {0}")]
    DuplicateId(String),

    #[error("Point name must not be empty")]
    InvalidId,

    #[error("Unknown point: {0}")]
    UnknownPoint(String),

    #[error("Invalid position for {0}: ({1}, {2})")]
    InvalidPosition(String, f64, f64),

    #[error("Invalid distance: {0} (must be a positive finite number)")]
    InvalidWeight(f64),

    #[error("Cannot connect {0} to itself")]
    SelfLoop(String),
}
