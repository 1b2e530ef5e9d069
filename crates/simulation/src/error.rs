//! Error types for simulation setup.

use selfstab_types::{GraphError, NodeId};
use thiserror::Error;

/// Errors detected before any round runs.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// The graph could not be built from its adjacency list.
    #[error("Invalid graph input: {0}")]
    InvalidGraphInput(#[from] GraphError),

    /// An explicit initial coloring does not cover every node exactly once.
    #[error("Initial coloring has {actual} entries, graph has {expected} nodes")]
    ColorCountMismatch { expected: usize, actual: usize },

    /// An initial color has no encoding (below -1).
    #[error("Initial color {value} for {node} is not a valid color")]
    InvalidInitialColor { node: NodeId, value: i64 },

    /// Random initial coloring asked to draw from an empty range.
    #[error("Random initial coloring needs a maximum color of at least 1")]
    ZeroPaletteBound,
}
