//! Self-stabilizing distance-2 coloring protocol.
//!
//! This crate holds the per-node state machine. It is driven one node at a
//! time by a runner (see `selfstab-simulation`) and never performs I/O.
//!
//! # Architecture
//!
//! Each call to [`step`] applies three layers of rules to a single node:
//!
//! - **Layer 1** ([`layer1`]): recompute degree bounds, drop recolor
//!   transactions that collide with a neighbor's.
//! - **Layer 2** ([`layer2`]): point at a neighbor that needs help and offer
//!   it a candidate color.
//! - **Layer 3** ([`layer3`]): request, run and finish this node's own
//!   recolor transaction.
//!
//! A node reads its neighbors' current records and writes only its own, via
//! the borrowed [`Neighborhood`] view. Writes are visible to every node
//! stepped after it.

pub mod layer1;
pub mod layer2;
pub mod layer3;
mod neighborhood;
mod state;

pub use layer2::{next_color, Assist};
pub use neighborhood::Neighborhood;
pub use state::{NodeState, Phase, Proposal, StateTable};

/// What happened to a node's recolor transaction during one [`step`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    /// The node entered `Coloring` this step.
    pub started: bool,
    /// The node committed its color and returned to `Stable` this step.
    pub finished: bool,
}

/// Apply every rule of the protocol to the node owning `view`, in order.
pub fn step(view: &mut Neighborhood<'_>) -> StepReport {
    layer1::update_degrees(view);
    layer1::reset_if_invalid(view);

    layer2::notify_neighbor(view);
    layer2::respond_to_color(view);

    layer3::detect_need_for_recolor(view);
    let started = layer3::try_start_recoloring(view);
    layer3::advance_coloring(view);
    let finished = layer3::try_finish_coloring(view);

    StepReport { started, finished }
}
