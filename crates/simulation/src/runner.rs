//! Round scheduler.

use crate::validation::check_coloring;
use crate::{RoundSnapshot, SimulationConfig, SimulationError, SnapshotSink};
use selfstab_protocol::{step, Neighborhood, NodeState, Phase, StateTable};
use selfstab_types::{Color, Graph, NodeId};
use tracing::{debug, info, trace};

/// Counters collected while running.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimulationStats {
    /// Rounds executed so far.
    pub rounds_executed: u64,

    /// First round after which the coloring was valid and every node was
    /// `Stable`.
    pub stabilized_round: Option<u64>,

    /// First round that left every node's state unchanged. From here on
    /// nothing changes.
    pub fixpoint_round: Option<u64>,

    /// Node color changes, counted per node step.
    pub color_changes: u64,

    /// Recolor transactions started.
    pub recolorings_started: u64,

    /// Recolor transactions committed.
    pub recolorings_completed: u64,
}

/// Whether the final coloring is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Convergence {
    /// The coloring passes [`check_coloring`].
    Converged,
    /// The budget ran out with an invalid coloring.
    NonConvergence,
}

/// Result of a run. Returned whether or not the coloring converged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    /// Total rounds executed by the runner.
    pub rounds: u64,
    /// Final color of every node.
    pub colors: Vec<Color>,
    /// Result of [`check_coloring`] on `colors`.
    pub valid: bool,
    /// `valid`, as a verdict.
    pub convergence: Convergence,
    /// Counters at the end of the run.
    pub stats: SimulationStats,
}

impl RunOutcome {
    /// Final colors in integer encoding.
    pub fn raw_colors(&self) -> Vec<i64> {
        self.colors.iter().map(|c| c.raw()).collect()
    }
}

/// Deterministic round-based runner.
///
/// Owns the graph and every node's state. Each round steps nodes `0..N` in
/// index order, in place: a node stepped later in a round already sees the
/// writes of nodes stepped earlier.
pub struct SimulationRunner {
    graph: Graph,
    states: Vec<NodeState>,
    config: SimulationConfig,
    round: u64,
    stats: SimulationStats,
}

impl SimulationRunner {
    /// Create a runner with every node in its initial state.
    pub fn new(graph: Graph, config: SimulationConfig) -> Result<Self, SimulationError> {
        let states = config
            .initial
            .colors(graph.node_count())?
            .into_iter()
            .map(NodeState::new)
            .collect();

        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            max_degree = graph.max_degree(),
            max_rounds = config.max_rounds,
            "Simulation created"
        );

        Ok(Self {
            graph,
            states,
            config,
            round: 0,
            stats: SimulationStats::default(),
        })
    }

    /// Validate an adjacency list and create a runner for it.
    pub fn from_adjacency(
        adjacency: Vec<Vec<u32>>,
        config: SimulationConfig,
    ) -> Result<Self, SimulationError> {
        let graph = Graph::from_adjacency(adjacency)?;
        Self::new(graph, config)
    }

    /// The graph being colored.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Configuration of this runner.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Every node's current state, in node order.
    pub fn states(&self) -> &[NodeState] {
        &self.states
    }

    /// Current state of one node.
    pub fn state(&self, node: NodeId) -> Option<&NodeState> {
        self.states.get(node.index())
    }

    /// Rounds executed so far.
    pub fn round(&self) -> u64 {
        self.round
    }

    /// Counters collected so far.
    pub fn stats(&self) -> &SimulationStats {
        &self.stats
    }

    /// Current color of every node.
    pub fn colors(&self) -> Vec<Color> {
        self.states.iter().map(|s| s.color).collect()
    }

    /// Snapshot of the current colors at the current round.
    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot::new(self.round, &self.colors())
    }

    /// Whether the current colors form a valid distance-2 coloring.
    pub fn check_coloring(&self) -> bool {
        check_coloring(&self.graph, &self.colors())
    }

    /// Valid coloring and no node requesting or running a transaction.
    pub fn is_stabilized(&self) -> bool {
        self.states.iter().all(|s| s.phase == Phase::Stable) && self.check_coloring()
    }

    /// Execute one round and return the resulting snapshot.
    pub fn run_round(&mut self) -> RoundSnapshot {
        let before = self.states.clone();

        for node in self.graph.nodes() {
            let old_color = self.states[node.index()].color;

            let mut view = Neighborhood::split(&self.graph, &mut self.states, node);
            let report = step(&mut view);

            if report.started {
                self.stats.recolorings_started += 1;
            }
            if report.finished {
                self.stats.recolorings_completed += 1;
            }
            if self.states[node.index()].color != old_color {
                self.stats.color_changes += 1;
            }
        }

        self.round += 1;
        self.stats.rounds_executed += 1;

        let changed = self.states != before;
        if !changed && self.stats.fixpoint_round.is_none() {
            self.stats.fixpoint_round = Some(self.round);
        }

        let valid = self.check_coloring();
        if self.stats.stabilized_round.is_none() && self.is_stabilized() {
            self.stats.stabilized_round = Some(self.round);
            debug!(round = self.round, "Coloring stabilized");
        }

        debug!(round = self.round, changed, valid, "Round complete");
        trace!(round = self.round, "State after round:\n{}", StateTable(&self.states));

        self.snapshot()
    }

    /// Run the configured round budget.
    pub fn run(&mut self, sink: &mut impl SnapshotSink) -> RunOutcome {
        self.run_rounds(self.config.max_rounds, sink)
    }

    /// Run up to `rounds` more rounds, passing each snapshot to `sink`.
    ///
    /// Stops early only when `stop_at_fixpoint` is set and a fixpoint has
    /// been reached.
    pub fn run_rounds(&mut self, rounds: u64, sink: &mut impl SnapshotSink) -> RunOutcome {
        for _ in 0..rounds {
            let snapshot = self.run_round();
            sink.on_round(&snapshot);

            if self.config.stop_at_fixpoint && self.stats.fixpoint_round.is_some() {
                debug!(round = self.round, "Fixpoint reached, stopping");
                break;
            }
        }

        let outcome = self.outcome();
        info!(
            rounds = outcome.rounds,
            valid = outcome.valid,
            stabilized_round = ?outcome.stats.stabilized_round,
            recolorings = outcome.stats.recolorings_completed,
            "Simulation finished"
        );
        outcome
    }

    /// Outcome for the current state.
    pub fn outcome(&self) -> RunOutcome {
        let colors = self.colors();
        let valid = check_coloring(&self.graph, &colors);
        RunOutcome {
            rounds: self.round,
            colors,
            valid,
            convergence: if valid {
                Convergence::Converged
            } else {
                Convergence::NonConvergence
            },
            stats: self.stats.clone(),
        }
    }
}
