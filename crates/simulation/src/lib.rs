//! Deterministic simulation runner.
//!
//! This crate drives the distance-2 coloring protocol over a static graph
//! in synchronous rounds. Given the same graph, initial coloring and round
//! budget, it produces identical snapshots every run.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                  SimulationRunner                       │
//! │                                                         │
//! │  ┌────────────────────────────────────────────────────┐ │
//! │  │     Graph (immutable, adjacency order fixed)       │ │
//! │  └────────────────────────┬───────────────────────────┘ │
//! │                           │                             │
//! │                           ▼                             │
//! │  ┌────────────────────────────────────────────────────┐ │
//! │  │     states: Vec<NodeState>                         │ │
//! │  │     Nodes stepped 0..N in place each round         │ │
//! │  └────────────────────────┬───────────────────────────┘ │
//! │                           │                             │
//! │                           ▼                             │
//! │  ┌────────────────────────────────────────────────────┐ │
//! │  │     RoundSnapshot → SnapshotSink                   │ │
//! │  └────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod runner;
mod snapshot;
mod validation;

pub use config::{InitialColoring, SimulationConfig};
pub use error::SimulationError;
pub use runner::{Convergence, RunOutcome, SimulationRunner, SimulationStats};
pub use snapshot::{NullSink, RecordingSink, RoundSnapshot, SnapshotSink};
pub use validation::{check_coloring, find_conflicts, Conflict};
