//! Core types for the self-stabilizing distance-2 coloring simulator.
//!
//! Everything here is plain data: the immutable [`Graph`] the protocol runs
//! over, the [`NodeId`] used to address its nodes, and the tagged [`Color`]
//! a node carries.

mod color;
mod graph;
mod identifiers;

pub use color::{Color, Placeholder};
pub use graph::{Graph, GraphError, REFERENCE_ADJACENCY};
pub use identifiers::NodeId;
