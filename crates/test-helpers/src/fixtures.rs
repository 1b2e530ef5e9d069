//! Fixture graphs.
//!
//! All constructors panic on malformed input; they are for tests only.

use selfstab_types::Graph;

/// Coloring the reference graph settles on from an all-ones start.
pub const REFERENCE_FINAL_COLORS: [i64; 12] = [2, 3, 4, 2, 5, 2, 6, 3, 4, 7, 5, 1];

fn build(adjacency: Vec<Vec<u32>>) -> Graph {
    Graph::from_adjacency(adjacency).expect("fixture graph is well-formed")
}

/// The 12-node reference graph.
pub fn reference() -> Graph {
    Graph::reference()
}

/// Two adjacent nodes.
pub fn pair() -> Graph {
    build(vec![vec![1], vec![0]])
}

/// Path `0 - 1 - ... - (n-1)`.
pub fn path(n: u32) -> Graph {
    Graph::from_edges(n as usize, (1..n).map(|i| (i - 1, i))).expect("path is well-formed")
}

/// Center 0 joined to leaves `1..=leaves`.
pub fn star(leaves: u32) -> Graph {
    Graph::from_edges(leaves as usize + 1, (1..=leaves).map(|leaf| (0, leaf)))
        .expect("star is well-formed")
}

/// Complete graph on `n` nodes.
pub fn complete(n: u32) -> Graph {
    let edges = (0..n).flat_map(|a| (a + 1..n).map(move |b| (a, b)));
    Graph::from_edges(n as usize, edges).expect("complete graph is well-formed")
}

/// `n` nodes and no edges.
pub fn isolated(n: usize) -> Graph {
    build(vec![Vec::new(); n])
}
