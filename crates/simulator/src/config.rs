//! Configuration types for the simulator.

use selfstab_simulation::{InitialColoring, SimulationConfig};
use std::path::PathBuf;

/// Where the graph comes from.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum GraphSource {
    /// The built-in 12-node cycle with chords.
    #[default]
    Reference,

    /// A JSON file of the form `{"nodes": N, "adjacency": [[..], ..]}`.
    File(PathBuf),

    /// Ring on `n` nodes.
    Cycle(u32),

    /// Erdős–Rényi G(n, p) graph drawn from a seeded generator.
    Random {
        /// Number of nodes.
        nodes: u32,
        /// Probability of each edge, within `[0, 1]`.
        edge_probability: f64,
        /// Generator seed.
        seed: u64,
    },
}

/// Configuration for a simulator run.
#[derive(Clone, Debug)]
pub struct SimulatorConfig {
    /// Graph to color.
    pub graph: GraphSource,

    /// Round budget.
    pub rounds: u64,

    /// Stop as soon as a round changes nothing.
    pub stop_at_fixpoint: bool,

    /// Starting colors.
    pub initial: InitialColoring,

    /// Write one JSON line per round to this file.
    pub snapshots: Option<PathBuf>,
}

impl SimulatorConfig {
    /// Create a new simulator configuration.
    pub fn new(graph: GraphSource) -> Self {
        Self {
            graph,
            rounds: 40,
            stop_at_fixpoint: false,
            initial: InitialColoring::default(),
            snapshots: None,
        }
    }

    /// Set the round budget.
    pub fn with_rounds(mut self, rounds: u64) -> Self {
        self.rounds = rounds;
        self
    }

    /// Stop early once a round changes nothing.
    pub fn with_stop_at_fixpoint(mut self, stop: bool) -> Self {
        self.stop_at_fixpoint = stop;
        self
    }

    /// Set the starting colors.
    pub fn with_initial(mut self, initial: InitialColoring) -> Self {
        self.initial = initial;
        self
    }

    /// Draw starting colors from `1..=max` with the given seed.
    pub fn with_random_initial(self, seed: u64, max: u32) -> Self {
        self.with_initial(InitialColoring::Random { seed, max })
    }

    /// Export per-round snapshots to a file.
    pub fn with_snapshots(mut self, path: impl Into<PathBuf>) -> Self {
        self.snapshots = Some(path.into());
        self
    }

    /// Convert to a SimulationConfig for the underlying runner.
    pub fn to_simulation_config(&self) -> SimulationConfig {
        SimulationConfig::new(self.rounds)
            .with_stop_at_fixpoint(self.stop_at_fixpoint)
            .with_initial(self.initial.clone())
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self::new(GraphSource::default())
    }
}
