//! Graph generators.

use rand::Rng;
use selfstab_types::{Graph, GraphError};

/// Trait for generating graphs.
pub trait GraphGenerator {
    /// Generate a graph. Deterministic generators ignore `rng`.
    fn generate(&self, rng: &mut impl Rng) -> Result<Graph, GraphError>;
}

/// Ring `0 - 1 - ... - (n-1) - 0`.
///
/// Fewer than three nodes degrade to a path.
#[derive(Clone, Copy, Debug)]
pub struct Cycle {
    /// Number of nodes.
    pub nodes: u32,
}

impl GraphGenerator for Cycle {
    fn generate(&self, _rng: &mut impl Rng) -> Result<Graph, GraphError> {
        let n = self.nodes;
        let edges: Vec<(u32, u32)> = match n {
            0 | 1 => Vec::new(),
            2 => vec![(0, 1)],
            _ => (0..n).map(|i| (i, (i + 1) % n)).collect(),
        };
        Graph::from_edges(n as usize, edges)
    }
}

/// G(n, p): every pair of distinct nodes is joined independently with
/// probability `edge_probability`.
#[derive(Clone, Copy, Debug)]
pub struct RandomGraph {
    /// Number of nodes.
    pub nodes: u32,
    /// Probability of each edge. Clamped to `[0, 1]`.
    pub edge_probability: f64,
}

impl GraphGenerator for RandomGraph {
    fn generate(&self, rng: &mut impl Rng) -> Result<Graph, GraphError> {
        let p = self.edge_probability.clamp(0.0, 1.0);
        let mut edges = Vec::new();
        for a in 0..self.nodes {
            for b in a + 1..self.nodes {
                if rng.gen_bool(p) {
                    edges.push((a, b));
                }
            }
        }
        Graph::from_edges(self.nodes as usize, edges)
    }
}
