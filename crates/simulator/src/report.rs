//! End-of-run report.

use selfstab_simulation::{find_conflicts, Conflict, Convergence, RunOutcome};
use selfstab_types::{Graph, NodeId};
use std::collections::BTreeSet;
use std::fmt;

/// Summary of a finished run.
#[derive(Debug, Clone)]
pub struct SimulationReport {
    /// Number of nodes.
    pub nodes: usize,
    /// Number of undirected edges.
    pub edges: usize,
    /// Largest node degree.
    pub max_degree: usize,
    /// What the runner returned.
    pub outcome: RunOutcome,
    /// Pairs still clashing at the end. Empty when the run converged.
    pub conflicts: Vec<Conflict>,
    /// Nodes left on a placeholder color at the end.
    pub placeholders: Vec<NodeId>,
}

impl SimulationReport {
    /// Build a report for `outcome` on `graph`.
    pub fn new(graph: &Graph, outcome: RunOutcome) -> Self {
        let conflicts = find_conflicts(graph, &outcome.colors);
        let placeholders = graph
            .nodes()
            .zip(&outcome.colors)
            .filter(|(_, color)| !color.is_assigned())
            .map(|(node, _)| node)
            .collect();
        Self {
            nodes: graph.node_count(),
            edges: graph.edge_count(),
            max_degree: graph.max_degree(),
            outcome,
            conflicts,
            placeholders,
        }
    }

    /// Whether the final coloring is valid.
    pub fn converged(&self) -> bool {
        self.outcome.convergence == Convergence::Converged
    }

    /// Number of distinct colors in use.
    pub fn colors_used(&self) -> usize {
        self.outcome.colors.iter().collect::<BTreeSet<_>>().len()
    }

    /// Print the report to stdout.
    pub fn print_summary(&self) {
        println!("{self}");
    }
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = &self.outcome.stats;
        let round_or_dash = |round: Option<u64>| match round {
            Some(r) => r.to_string(),
            None => "-".to_string(),
        };

        writeln!(f, "\n=== Simulation Summary ===")?;
        writeln!(
            f,
            "Graph:            {} nodes, {} edges, max degree {}",
            self.nodes, self.edges, self.max_degree
        )?;
        writeln!(f, "Rounds:           {}", self.outcome.rounds)?;
        writeln!(
            f,
            "Result:           {}",
            match self.outcome.convergence {
                Convergence::Converged => "converged",
                Convergence::NonConvergence => "did not converge",
            }
        )?;
        writeln!(f, "Stabilized at:    {}", round_or_dash(stats.stabilized_round))?;
        writeln!(f, "Fixpoint at:      {}", round_or_dash(stats.fixpoint_round))?;
        writeln!(
            f,
            "Recolorings:      {} started, {} completed",
            stats.recolorings_started, stats.recolorings_completed
        )?;
        writeln!(f, "Color changes:    {}", stats.color_changes)?;
        writeln!(f, "Colors used:      {}", self.colors_used())?;

        let colors: Vec<String> = self.outcome.colors.iter().map(|c| c.to_string()).collect();
        write!(f, "Final colors:     [{}]", colors.join(", "))?;

        if !self.conflicts.is_empty() {
            writeln!(f)?;
            write!(f, "Conflicts:       ")?;
            for conflict in &self.conflicts {
                write!(f, " {}-{} (d{})", conflict.a.0, conflict.b.0, conflict.distance)?;
            }
        }

        if !self.placeholders.is_empty() {
            let nodes: Vec<String> = self.placeholders.iter().map(|n| n.0.to_string()).collect();
            writeln!(f)?;
            write!(f, "Placeholders:     {}", nodes.join(", "))?;
        }
        Ok(())
    }
}
