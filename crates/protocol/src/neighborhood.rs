//! Borrowed view of the shared state from one node's point of view.

use crate::NodeState;
use selfstab_types::{Graph, NodeId};

/// One node's view of the whole state table during its update.
///
/// Holds an exclusive borrow of the node's own record and shared borrows of
/// every other record, so a rule can read any node but write only its own.
/// Lookups of the owning node go through the exclusive borrow and therefore
/// see writes made earlier in the same step.
pub struct Neighborhood<'a> {
    node: NodeId,
    graph: &'a Graph,
    before: &'a [NodeState],
    own: &'a mut NodeState,
    after: &'a [NodeState],
}

impl<'a> Neighborhood<'a> {
    /// Split `states` around `node`.
    ///
    /// # Panics
    ///
    /// Panics if `node` has no slot in `states`.
    pub fn split(graph: &'a Graph, states: &'a mut [NodeState], node: NodeId) -> Self {
        let (before, rest) = states.split_at_mut(node.index());
        let (own, after) = rest
            .split_first_mut()
            .unwrap_or_else(|| panic!("no state slot for {node}"));
        Self {
            node,
            graph,
            before,
            own,
            after,
        }
    }

    /// The node this view belongs to.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// The graph being colored.
    pub fn graph(&self) -> &'a Graph {
        self.graph
    }

    /// Neighbors of the owning node, in adjacency order.
    pub fn neighbors(&self) -> &'a [NodeId] {
        self.graph.neighbors(self.node)
    }

    /// Neighbors of any node, in adjacency order.
    pub fn neighbors_of(&self, node: NodeId) -> &'a [NodeId] {
        self.graph.neighbors(node)
    }

    /// Read-only access to the owning node's record.
    pub fn own(&self) -> &NodeState {
        &*self.own
    }

    /// Exclusive access to the owning node's record.
    pub fn own_mut(&mut self) -> &mut NodeState {
        &mut *self.own
    }

    /// Current record of any node.
    pub fn state(&self, node: NodeId) -> &NodeState {
        let index = node.index();
        let mine = self.node.index();
        if index < mine {
            &self.before[index]
        } else if index == mine {
            &*self.own
        } else {
            &self.after[index - mine - 1]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use selfstab_test_helpers::fixtures;
    use selfstab_types::Color;

    #[test]
    fn test_state_lookup_around_owner() {
        let graph = fixtures::path(3);
        let mut states: Vec<_> = (1..=3).map(|c| NodeState::new(Color::Assigned(c))).collect();

        {
            let mut view = Neighborhood::split(&graph, &mut states, NodeId(1));
            view.own_mut().color = Color::Assigned(9);

            assert_eq!(view.state(NodeId(0)).color, Color::Assigned(1));
            assert_eq!(view.state(NodeId(1)).color, Color::Assigned(9));
            assert_eq!(view.state(NodeId(2)).color, Color::Assigned(3));
            assert_eq!(view.neighbors(), &[NodeId(0), NodeId(2)]);
        }
        assert_eq!(states[1].color, Color::Assigned(9));
    }

    #[test]
    fn test_split_at_edges() {
        let graph = fixtures::path(2);
        let mut states = vec![NodeState::default(), NodeState::new(Color::Assigned(2))];

        {
            let first = Neighborhood::split(&graph, &mut states, NodeId(0));
            assert_eq!(first.state(NodeId(1)).color, Color::Assigned(2));
        }

        let last = Neighborhood::split(&graph, &mut states, NodeId(1));
        assert_eq!(last.state(NodeId(0)).color, Color::FIRST);
    }
}
