//! Per-node protocol state.

use selfstab_types::{Color, NodeId};
use std::fmt;

/// Where a node is in its own recolor transaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Not asking to recolor.
    #[default]
    Stable,
    /// Current color is known to be bad; waiting for every neighbor to
    /// help before starting.
    Requesting,
    /// Transaction running: the color is a placeholder or a tentative
    /// value that neighbors have not all confirmed yet.
    Coloring,
}

impl Phase {
    /// Whether the node wants a new color (requesting or already coloring).
    pub fn wants_recolor(self) -> bool {
        matches!(self, Phase::Requesting | Phase::Coloring)
    }

    /// Whether a recolor transaction is running.
    pub fn in_progress(self) -> bool {
        self == Phase::Coloring
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Stable => "stable",
            Phase::Requesting => "requesting",
            Phase::Coloring => "coloring",
        };
        f.write_str(name)
    }
}

/// A candidate color offered to the node a helper points at.
///
/// `observed` is the helped node's color as the helper last saw it;
/// `ceiling` is the smallest color the helper can accept for it. A helped
/// node only moves on once every helper observes its current color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Proposal {
    /// Color of the helped node when this proposal was computed.
    pub observed: Color,
    /// Smallest conflict-free color at or above `observed`.
    pub ceiling: u32,
}

impl Proposal {
    /// Ceiling as a color.
    pub fn ceiling_color(&self) -> Color {
        Color::Assigned(self.ceiling)
    }

    /// The proposal was computed against `color`.
    pub fn observes(&self, color: Color) -> bool {
        self.observed == color
    }

    /// The proposal was computed against `color` and demands something higher.
    pub fn objects_to(&self, color: Color) -> bool {
        self.observes(color) && self.ceiling_color() > color
    }

    /// The proposal was computed against `color` and accepts exactly it.
    pub fn confirms(&self, color: Color) -> bool {
        self.observes(color) && self.ceiling_color() == color
    }
}

/// Mutable record of one node.
///
/// Written only by the node's own rules; read by its neighbors and by
/// nodes two hops away.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeState {
    /// Size of the closed neighborhood: 1 + number of neighbors.
    pub dist1_degree: u32,
    /// Upper bound on the colors this node may need.
    pub dist2_degree: u32,
    /// Current color.
    pub color: Color,
    /// Recolor transaction phase.
    pub phase: Phase,
    /// Neighbor this node is currently helping.
    pub helper: Option<NodeId>,
    /// Offer for `helper`, or for this node itself while coloring.
    pub proposal: Option<Proposal>,
}

impl NodeState {
    /// Fresh state holding an arbitrary starting color.
    pub fn new(color: Color) -> Self {
        Self {
            dist1_degree: 0,
            dist2_degree: 0,
            color,
            phase: Phase::Stable,
            helper: None,
            proposal: None,
        }
    }

    /// Whether the node wants a new color.
    pub fn wants_recolor(&self) -> bool {
        self.phase.wants_recolor()
    }

    /// Whether the node is running a recolor transaction.
    pub fn in_progress(&self) -> bool {
        self.phase.in_progress()
    }

    /// Whether this node's helper pointer names `node`.
    pub fn is_helping(&self, node: NodeId) -> bool {
        self.helper == Some(node)
    }
}

impl Default for NodeState {
    fn default() -> Self {
        Self::new(Color::FIRST)
    }
}

/// Human-readable table of every node's state, one row per node.
pub struct StateTable<'a>(pub &'a [NodeState]);

impl fmt::Display for StateTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>5} {:>5} {:>5} {:>6} {:<10} {:>7} {:>9}",
            "node", "deg1", "deg2", "color", "phase", "helper", "proposal"
        )?;
        for (index, state) in self.0.iter().enumerate() {
            let helper = state
                .helper
                .map(|h| h.0.to_string())
                .unwrap_or_else(|| "-".to_string());
            let proposal = state
                .proposal
                .map(|p| format!("{}/{}", p.observed, p.ceiling))
                .unwrap_or_else(|| "-".to_string());
            writeln!(
                f,
                "{:>5} {:>5} {:>5} {:>6} {:<10} {:>7} {:>9}",
                index,
                state.dist1_degree,
                state.dist2_degree,
                state.color.to_string(),
                state.phase.to_string(),
                helper,
                proposal
            )?;
        }
        Ok(())
    }
}
