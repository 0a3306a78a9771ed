//! Crate error type
//!
//! The simulation itself never fails once a [`World`](crate::sim::World) is
//! built; everything here is a startup/configuration failure.

use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Configuration values that cannot produce a sane arena
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// More balls than the configured capacity
    #[error("population of {count} balls exceeds capacity of {capacity}")]
    PopulationExceedsCapacity { count: usize, capacity: usize },

    /// A caller-supplied ball violates the entity invariants
    #[error("ball {index} is invalid: {reason}")]
    InvalidBall { index: usize, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),
}
