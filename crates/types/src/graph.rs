//! Static undirected graph.

use crate::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Errors that can occur when building a graph from an adjacency list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// An adjacency entry names a node that does not exist.
    #[error("node {node} lists neighbor {neighbor}, but the graph has only {node_count} nodes")]
    NodeOutOfRange {
        node: u32,
        neighbor: u32,
        node_count: usize,
    },

    /// Declared node count differs from the number of adjacency rows.
    #[error("graph declares {declared} nodes but the adjacency list has {actual} rows")]
    SizeMismatch { declared: usize, actual: usize },

    /// An edge is listed in one direction only.
    #[error("edge {from} -> {to} has no matching {to} -> {from}")]
    Asymmetric { from: u32, to: u32 },

    /// More nodes than a `NodeId` can address.
    #[error("graph has {0} nodes, more than a node id can address")]
    TooManyNodes(usize),
}

/// An immutable undirected graph stored as an adjacency list.
///
/// Neighbor order is preserved exactly as given: the protocol scans
/// neighbors in this order, so it determines which conflict a node picks
/// up first.
///
/// Self-loops are not rejected, but a well-formed input has none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GraphFile", into = "GraphFile")]
pub struct Graph {
    adjacency: Vec<Vec<NodeId>>,
}

/// On-disk shape of a graph: `{"nodes": N, "adjacency": [[..], ..]}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct GraphFile {
    nodes: usize,
    adjacency: Vec<Vec<u32>>,
}

impl TryFrom<GraphFile> for Graph {
    type Error = GraphError;

    fn try_from(file: GraphFile) -> Result<Self, Self::Error> {
        Graph::with_declared_size(file.nodes, file.adjacency)
    }
}

impl From<Graph> for GraphFile {
    fn from(graph: Graph) -> Self {
        GraphFile {
            nodes: graph.node_count(),
            adjacency: graph
                .adjacency
                .into_iter()
                .map(|row| row.into_iter().map(|n| n.0).collect())
                .collect(),
        }
    }
}

/// Adjacency of the built-in 12-node cycle with chords.
pub const REFERENCE_ADJACENCY: [&[u32]; 12] = [
    &[1, 11],
    &[0, 2],
    &[1, 3, 4],
    &[2, 10],
    &[2, 5],
    &[4, 6],
    &[5, 7, 8],
    &[6, 9],
    &[6, 9],
    &[7, 8, 10],
    &[3, 9, 11],
    &[0, 10],
];

impl Graph {
    /// The built-in 12-node reference graph, built from [`REFERENCE_ADJACENCY`].
    pub fn reference() -> Self {
        Self {
            adjacency: REFERENCE_ADJACENCY
                .iter()
                .map(|row| row.iter().copied().map(NodeId).collect())
                .collect(),
        }
    }

    /// Build a graph from an adjacency list, one row per node.
    ///
    /// Every neighbor id must be in range and every edge must be listed in
    /// both directions.
    pub fn from_adjacency(adjacency: Vec<Vec<u32>>) -> Result<Self, GraphError> {
        let node_count = adjacency.len();
        if NodeId::from_index(node_count).is_none() {
            return Err(GraphError::TooManyNodes(node_count));
        }

        for (node, row) in adjacency.iter().enumerate() {
            for &neighbor in row {
                if neighbor as usize >= node_count {
                    return Err(GraphError::NodeOutOfRange {
                        node: node as u32,
                        neighbor,
                        node_count,
                    });
                }
            }
        }

        for (node, row) in adjacency.iter().enumerate() {
            let node = node as u32;
            for &neighbor in row {
                if !adjacency[neighbor as usize].contains(&node) {
                    return Err(GraphError::Asymmetric {
                        from: node,
                        to: neighbor,
                    });
                }
            }
        }

        Ok(Self {
            adjacency: adjacency
                .into_iter()
                .map(|row| row.into_iter().map(NodeId).collect())
                .collect(),
        })
    }

    /// Build a graph, checking the adjacency list against a declared size.
    pub fn with_declared_size(
        declared: usize,
        adjacency: Vec<Vec<u32>>,
    ) -> Result<Self, GraphError> {
        if declared != adjacency.len() {
            return Err(GraphError::SizeMismatch {
                declared,
                actual: adjacency.len(),
            });
        }
        Self::from_adjacency(adjacency)
    }

    /// Build a graph from an undirected edge list.
    ///
    /// Each edge is inserted in both directions; neighbor rows come out
    /// sorted ascending with duplicates removed.
    pub fn from_edges(
        node_count: usize,
        edges: impl IntoIterator<Item = (u32, u32)>,
    ) -> Result<Self, GraphError> {
        if NodeId::from_index(node_count).is_none() {
            return Err(GraphError::TooManyNodes(node_count));
        }

        let mut rows: Vec<BTreeSet<u32>> = vec![BTreeSet::new(); node_count];
        for (a, b) in edges {
            for (node, neighbor) in [(a, b), (b, a)] {
                if node as usize >= node_count || neighbor as usize >= node_count {
                    return Err(GraphError::NodeOutOfRange {
                        node,
                        neighbor,
                        node_count,
                    });
                }
            }
            rows[a as usize].insert(b);
            rows[b as usize].insert(a);
        }

        Self::from_adjacency(rows.into_iter().map(|r| r.into_iter().collect()).collect())
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// All node ids in index order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.adjacency.len() as u32).map(NodeId)
    }

    /// Neighbors of a node, in adjacency order.
    ///
    /// # Panics
    ///
    /// Panics if `node` is not a node of this graph.
    pub fn neighbors(&self, node: NodeId) -> &[NodeId] {
        &self.adjacency[node.index()]
    }

    /// Whether `node` is a node of this graph.
    pub fn contains(&self, node: NodeId) -> bool {
        node.index() < self.adjacency.len()
    }

    /// Number of neighbors of a node.
    pub fn degree(&self, node: NodeId) -> usize {
        self.neighbors(node).len()
    }

    /// Largest degree in the graph (0 for an empty graph).
    pub fn max_degree(&self) -> usize {
        self.adjacency.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Nodes at distance exactly two from `node`, ascending.
    pub fn distance_two_neighbors(&self, node: NodeId) -> Vec<NodeId> {
        let direct = self.neighbors(node);
        self.neighbors(node)
            .iter()
            .flat_map(|&j| self.neighbors(j).iter().copied())
            .filter(|&k| k != node && !direct.contains(&k))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(n: u32) -> Graph {
        Graph::from_edges(n as usize, (1..n).map(|i| (i - 1, i))).unwrap()
    }

    #[test]
    fn test_from_adjacency_keeps_order() {
        let graph = Graph::from_adjacency(vec![vec![2, 1], vec![0], vec![0]]).unwrap();

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.neighbors(NodeId(0)), &[NodeId(2), NodeId(1)]);
        assert_eq!(graph.max_degree(), 2);
    }

    #[test]
    fn test_out_of_range_neighbor_rejected() {
        let err = Graph::from_adjacency(vec![vec![1], vec![0, 2]]).unwrap_err();
        assert_eq!(
            err,
            GraphError::NodeOutOfRange {
                node: 1,
                neighbor: 2,
                node_count: 2
            }
        );
    }

    #[test]
    fn test_declared_size_mismatch_rejected() {
        let err = Graph::with_declared_size(3, vec![vec![1], vec![0]]).unwrap_err();
        assert_eq!(
            err,
            GraphError::SizeMismatch {
                declared: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn test_asymmetric_edge_rejected() {
        let err = Graph::from_adjacency(vec![vec![1], vec![]]).unwrap_err();
        assert_eq!(err, GraphError::Asymmetric { from: 0, to: 1 });
    }

    #[test]
    fn test_from_edges_symmetrizes() {
        let graph = Graph::from_edges(3, [(0, 2), (2, 1), (0, 2)]).unwrap();

        assert_eq!(graph.neighbors(NodeId(0)), &[NodeId(2)]);
        assert_eq!(graph.neighbors(NodeId(2)), &[NodeId(0), NodeId(1)]);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_from_edges_out_of_range() {
        assert!(matches!(
            Graph::from_edges(2, [(0, 5)]),
            Err(GraphError::NodeOutOfRange { .. })
        ));
    }

    #[test]
    fn test_distance_two_neighbors() {
        let graph = path(5);

        assert_eq!(graph.distance_two_neighbors(NodeId(0)), vec![NodeId(2)]);
        assert_eq!(
            graph.distance_two_neighbors(NodeId(2)),
            vec![NodeId(0), NodeId(4)]
        );
    }

    #[test]
    fn test_empty_graph() {
        let graph = Graph::from_adjacency(Vec::new()).unwrap();
        assert!(graph.is_empty());
        assert_eq!(graph.max_degree(), 0);
        assert_eq!(graph.nodes().count(), 0);
    }

    #[test]
    fn test_reference_is_well_formed() {
        let checked =
            Graph::from_adjacency(REFERENCE_ADJACENCY.iter().map(|row| row.to_vec()).collect())
                .unwrap();

        assert_eq!(Graph::reference(), checked);
        assert_eq!(checked.node_count(), 12);
        assert_eq!(checked.edge_count(), 14);
        assert_eq!(checked.neighbors(NodeId(2)), &[NodeId(1), NodeId(3), NodeId(4)]);
    }

    #[test]
    fn test_json_round_trip_validates() {
        let graph = path(3);
        let json = serde_json::to_string(&graph).unwrap();
        assert_eq!(json, r#"{"nodes":3,"adjacency":[[1],[0,2],[1]]}"#);
        assert_eq!(serde_json::from_str::<Graph>(&json).unwrap(), graph);

        let bad = r#"{"nodes":2,"adjacency":[[1],[0,2]]}"#;
        assert!(serde_json::from_str::<Graph>(bad).is_err());
    }
}
