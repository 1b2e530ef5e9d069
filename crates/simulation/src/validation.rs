//! Read-only validity checks over a color assignment.

use selfstab_types::{Color, Graph, NodeId};
use std::collections::BTreeSet;

/// Two nodes within distance two holding the same color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Conflict {
    /// Lower node id of the pair.
    pub a: NodeId,
    /// Higher node id of the pair.
    pub b: NodeId,
    /// Graph distance between them (1 or 2).
    pub distance: u8,
}

/// Whether `colors` is a proper distance-2 coloring of `graph`.
///
/// Every node must hold an assigned color (a placeholder is not a
/// committed color), no two neighbors may share a color, and no two nodes
/// with a common neighbor may share a color.
pub fn check_coloring(graph: &Graph, colors: &[Color]) -> bool {
    if colors.len() != graph.node_count() || !colors.iter().all(|c| c.is_assigned()) {
        return false;
    }

    for i in graph.nodes() {
        let color = colors[i.index()];
        for &j in graph.neighbors(i) {
            if colors[j.index()] == color {
                return false;
            }
        }
    }

    for i in graph.nodes() {
        let color = colors[i.index()];
        for &j in graph.neighbors(i) {
            for &k in graph.neighbors(j) {
                if k != i && colors[k.index()] == color {
                    return false;
                }
            }
        }
    }

    true
}

/// Every same-colored pair within distance two, ascending.
///
/// Each pair is reported once, at its shortest distance.
///
/// # Panics
///
/// Panics if `colors` has fewer entries than the graph has nodes.
pub fn find_conflicts(graph: &Graph, colors: &[Color]) -> Vec<Conflict> {
    let mut found = BTreeSet::new();

    for i in graph.nodes() {
        let color = colors[i.index()];
        for &j in graph.neighbors(i) {
            if i < j && colors[j.index()] == color {
                found.insert(Conflict {
                    a: i,
                    b: j,
                    distance: 1,
                });
            }
        }
        for k in graph.distance_two_neighbors(i) {
            if i < k && colors[k.index()] == color {
                found.insert(Conflict {
                    a: i,
                    b: k,
                    distance: 2,
                });
            }
        }
    }

    found.into_iter().collect()
}
