//! Layer 1: degree estimation and reset.
//!
//! Degrees are recomputed from neighbor records every step. A neighbor not
//! yet stepped in the current round still shows last round's value; the
//! bounds settle once every node has been stepped twice.

use crate::{Neighborhood, Phase};
use tracing::debug;

/// Recompute `dist1_degree` and `dist2_degree` for the owning node.
///
/// `dist2_degree` is the sum of the neighbors' `dist1_degree`, minus the
/// node's own, plus two. It saturates at zero while neighbor degrees are
/// still stale.
pub fn update_degrees(view: &mut Neighborhood<'_>) {
    let neighbors = view.neighbors();
    let dist1 = neighbors.len() as u32 + 1;
    let neighbor_sum: u32 = neighbors
        .iter()
        .map(|&j| view.state(j).dist1_degree)
        .sum();

    let own = view.own_mut();
    own.dist1_degree = dist1;
    own.dist2_degree = (neighbor_sum + 2).saturating_sub(dist1);
}

/// Abort a recolor transaction that runs alongside a neighbor's.
///
/// Two adjacent nodes must never be coloring at once. The node falls back
/// to `Requesting` and retries once its neighbors are done. A node that is
/// coloring always wants a color, so there is no spurious transaction to
/// clear beyond this.
pub fn reset_if_invalid(view: &mut Neighborhood<'_>) {
    if view.own().phase != Phase::Coloring {
        return;
    }

    let neighbor_coloring = view
        .neighbors()
        .iter()
        .any(|&j| view.state(j).in_progress());

    if neighbor_coloring {
        debug!(node = view.node().0, "Neighbor is coloring, aborting transaction");
        view.own_mut().phase = Phase::Requesting;
    }
}
