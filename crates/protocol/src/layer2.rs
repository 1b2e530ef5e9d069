//! Layer 2: conflict detection and the helper pointer.
//!
//! Every node points at (at most) one neighbor that needs a new color and
//! keeps a [`Proposal`] for it: the color it saw that neighbor holding, and
//! the smallest color it could accept for it. The helped node reads these
//! proposals in layer 3 to decide when and where to move.

use crate::{Neighborhood, Proposal};
use selfstab_types::{Color, NodeId};
use tracing::trace;

/// Outcome of a conflict scan: the neighbor to help and the offer for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assist {
    /// Neighbor that needs help.
    pub target: NodeId,
    /// Offer for `target`; None when no candidate fits under the bound.
    pub proposal: Option<Proposal>,
}

/// Smallest color the owning node can accept for `target`.
///
/// Searches `w` from `max(1, color[target])` up to the owner's
/// `dist2_degree` and returns the first `w` that no neighbor other than
/// `target` holds and that differs from the owner's own color (unless the
/// owner is asking for itself). Returns None when the range is exhausted;
/// the caller simply retries next round.
pub fn next_color(view: &Neighborhood<'_>, target: NodeId) -> Option<Proposal> {
    let me = view.node();
    let own = view.own();
    let observed = view.state(target).color;

    let ceiling = (observed.search_floor()..=own.dist2_degree).find(|&w| {
        let candidate = Color::Assigned(w);
        let taken_by_neighbor = view
            .neighbors()
            .iter()
            .any(|&k| k != target && view.state(k).color == candidate);
        let taken_by_self = me != target && own.color == candidate;
        !taken_by_neighbor && !taken_by_self
    });

    if ceiling.is_none() {
        trace!(
            node = me.0,
            target = target.0,
            bound = own.dist2_degree,
            "No candidate color under bound"
        );
    }

    ceiling.map(|ceiling| Proposal { observed, ceiling })
}

/// Whether neighbor `j` of the owning node needs help.
///
/// True if `j` wants to recolor, clashes with one of its own neighbors,
/// clashes with the owner, or shares its color with another neighbor of the
/// owner (the two are at distance two through the owner).
fn needs_help(view: &Neighborhood<'_>, j: NodeId) -> bool {
    let me = view.node();
    let state = view.state(j);
    let color = state.color;

    if state.wants_recolor() {
        return true;
    }

    let clashes_locally = view
        .neighbors_of(j)
        .iter()
        .any(|&k| k != j && view.state(k).color == color);
    if clashes_locally {
        return true;
    }

    if j != me && view.own().color == color {
        return true;
    }

    view.neighbors()
        .iter()
        .any(|&k| k != j && view.state(k).color == color)
}

/// First neighbor, in adjacency order, that needs help.
///
/// The scan is first-match rather than best-match so that runs are
/// reproducible step for step.
pub fn find_conflicting_neighbor(view: &Neighborhood<'_>) -> Option<Assist> {
    view.neighbors()
        .iter()
        .copied()
        .find(|&j| needs_help(view, j))
        .map(|target| Assist {
            target,
            proposal: next_color(view, target),
        })
}

/// Re-aim the helper pointer unless the current target is mid-transaction.
pub fn notify_neighbor(view: &mut Neighborhood<'_>) {
    let busy_target = view
        .own()
        .helper
        .is_some_and(|h| view.state(h).in_progress());
    if busy_target {
        return;
    }

    let assist = find_conflicting_neighbor(view);
    let own = view.own_mut();
    match assist {
        Some(Assist { target, proposal }) => {
            own.helper = Some(target);
            own.proposal = proposal;
        }
        None => {
            own.helper = None;
            own.proposal = None;
        }
    }

    trace!(
        node = view.node().0,
        helper = ?view.own().helper,
        proposal = ?view.own().proposal,
        "Helper pointer updated"
    );
}

/// Refresh the offer for a target that is mid-transaction.
pub fn respond_to_color(view: &mut Neighborhood<'_>) {
    let Some(target) = view.own().helper else {
        return;
    };
    if !view.state(target).in_progress() {
        return;
    }

    let proposal = next_color(view, target);
    view.own_mut().proposal = proposal;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NodeState, Phase};
    use selfstab_test_helpers::fixtures;
    use selfstab_types::{Graph, Placeholder};
    use tracing_test::traced_test;

    /// Center 0 with leaves 1..=4; leaf 1 is the target, leaves 2..=4 hold
    /// colors 2, 3 and 5.
    fn crowded_center(own: u32, target: u32, bound: u32) -> (Graph, Vec<NodeState>) {
        let graph = fixtures::star(4);
        let mut states: Vec<_> = [own, target, 2, 3, 5]
            .into_iter()
            .map(|c| NodeState::new(Color::Assigned(c)))
            .collect();
        states[0].dist2_degree = bound;
        (graph, states)
    }

    #[traced_test]
    #[test]
    fn test_next_color_skips_neighbors_and_self() {
        let (graph, mut states) = crowded_center(1, 1, 6);
        let view = Neighborhood::split(&graph, &mut states, NodeId(0));

        assert_eq!(
            next_color(&view, NodeId(1)),
            Some(Proposal {
                observed: Color::Assigned(1),
                ceiling: 4
            })
        );
    }

    #[traced_test]
    #[test]
    fn test_next_color_lowest_free() {
        let (graph, mut states) = crowded_center(6, 1, 6);
        let view = Neighborhood::split(&graph, &mut states, NodeId(0));

        assert_eq!(next_color(&view, NodeId(1)).map(|p| p.ceiling), Some(1));
    }

    #[traced_test]
    #[test]
    fn test_next_color_starts_at_target_color() {
        let (graph, mut states) = crowded_center(1, 5, 6);
        let view = Neighborhood::split(&graph, &mut states, NodeId(0));

        assert_eq!(
            next_color(&view, NodeId(1)),
            Some(Proposal {
                observed: Color::Assigned(5),
                ceiling: 6
            })
        );
    }

    #[traced_test]
    #[test]
    fn test_next_color_exhausted() {
        let (graph, mut states) = crowded_center(1, 5, 5);
        let view = Neighborhood::split(&graph, &mut states, NodeId(0));

        assert_eq!(next_color(&view, NodeId(1)), None);
    }

    #[traced_test]
    #[test]
    fn test_next_color_for_self_allows_own_color() {
        let (graph, mut states) = crowded_center(1, 6, 6);
        let view = Neighborhood::split(&graph, &mut states, NodeId(0));

        assert_eq!(next_color(&view, NodeId(0)).map(|p| p.ceiling), Some(1));
    }

    #[traced_test]
    #[test]
    fn test_next_color_from_placeholder_starts_at_one() {
        let (graph, mut states) = crowded_center(4, 1, 6);
        states[1].color = Color::Transitional(Placeholder::First);
        let view = Neighborhood::split(&graph, &mut states, NodeId(0));

        assert_eq!(
            next_color(&view, NodeId(1)),
            Some(Proposal {
                observed: Color::Transitional(Placeholder::First),
                ceiling: 1
            })
        );
    }

    #[traced_test]
    #[test]
    fn test_find_prefers_first_in_adjacency_order() {
        let graph = fixtures::path(3);
        let mut states = vec![NodeState::default(); 3];
        for state in &mut states {
            state.dist2_degree = 3;
        }
        let view = Neighborhood::split(&graph, &mut states, NodeId(1));

        let assist = find_conflicting_neighbor(&view).unwrap();
        assert_eq!(assist.target, NodeId(0));
        assert_eq!(assist.proposal.map(|p| p.ceiling), Some(2));
    }

    #[traced_test]
    #[test]
    fn test_find_detects_requesting_neighbor() {
        let graph = fixtures::path(3);
        let mut states: Vec<_> = [1, 2, 3]
            .into_iter()
            .map(|c| NodeState::new(Color::Assigned(c)))
            .collect();
        states[2].phase = Phase::Requesting;
        let view = Neighborhood::split(&graph, &mut states, NodeId(1));

        assert_eq!(find_conflicting_neighbor(&view).unwrap().target, NodeId(2));
    }

    #[traced_test]
    #[test]
    fn test_find_detects_siblings_sharing_color() {
        let graph = fixtures::star(3);
        let mut states: Vec<_> = [1, 2, 3, 2]
            .into_iter()
            .map(|c| NodeState::new(Color::Assigned(c)))
            .collect();
        states[0].dist2_degree = 4;
        let view = Neighborhood::split(&graph, &mut states, NodeId(0));

        let assist = find_conflicting_neighbor(&view).unwrap();
        assert_eq!(assist.target, NodeId(1));
        assert_eq!(assist.proposal.map(|p| p.ceiling), Some(4));
    }

    #[traced_test]
    #[test]
    fn test_find_nothing_when_properly_colored() {
        let graph = fixtures::path(3);
        let mut states: Vec<_> = [1, 2, 3]
            .into_iter()
            .map(|c| NodeState::new(Color::Assigned(c)))
            .collect();
        let view = Neighborhood::split(&graph, &mut states, NodeId(1));

        assert_eq!(find_conflicting_neighbor(&view), None);
    }

    #[traced_test]
    #[test]
    fn test_notify_keeps_pointer_on_coloring_target() {
        let graph = fixtures::path(3);
        let mut states: Vec<_> = [1, 2, 3]
            .into_iter()
            .map(|c| NodeState::new(Color::Assigned(c)))
            .collect();
        states[2].phase = Phase::Coloring;
        states[1].helper = Some(NodeId(2));

        notify_neighbor(&mut Neighborhood::split(&graph, &mut states, NodeId(1)));
        assert_eq!(states[1].helper, Some(NodeId(2)));

        states[2].phase = Phase::Stable;
        notify_neighbor(&mut Neighborhood::split(&graph, &mut states, NodeId(1)));
        assert_eq!(states[1].helper, None);
        assert_eq!(states[1].proposal, None);
    }

    #[traced_test]
    #[test]
    fn test_respond_tracks_target_color() {
        let graph = fixtures::pair();
        let mut states = vec![NodeState::default(); 2];
        states[0].dist2_degree = 2;
        states[1].phase = Phase::Coloring;
        states[1].color = Color::Transitional(Placeholder::Second);
        states[0].helper = Some(NodeId(1));

        respond_to_color(&mut Neighborhood::split(&graph, &mut states, NodeId(0)));

        assert_eq!(
            states[0].proposal,
            Some(Proposal {
                observed: Color::Transitional(Placeholder::Second),
                ceiling: 2
            })
        );
    }
}
