//! Layer 3: the recolor transaction.
//!
//! ```text
//!   Stable ──(bad color / objection)──▶ Requesting
//!     ▲                                     │ every neighbor helping and
//!     │                                     │ observing the current color
//!     │                                     ▼
//!     └──────(every helper confirms)─── Coloring
//!                                    placeholder -1 ▶ 0 ▶ max ceiling
//! ```
//!
//! A node never commits a color until every neighbor helping it has observed
//! and accepted exactly that value, so two neighbors cannot settle on
//! clashing colors in the same round.

use crate::layer2::next_color;
use crate::{Neighborhood, Phase, Proposal};
use selfstab_types::{Color, Placeholder};
use tracing::debug;

/// Proposals of every neighbor whose helper pointer names the owning node.
fn helper_proposals(view: &Neighborhood<'_>) -> Vec<Option<Proposal>> {
    let me = view.node();
    view.neighbors()
        .iter()
        .map(|&j| view.state(j))
        .filter(|state| state.is_helping(me))
        .map(|state| state.proposal)
        .collect()
}

fn transition(view: &mut Neighborhood<'_>, to: Phase) {
    let node = view.node().0;
    let own = view.own_mut();
    debug!(
        node,
        from = %own.phase,
        to = %to,
        color = %own.color,
        "Phase transition"
    );
    own.phase = to;
}

/// Flag the owning node for recoloring when its color is known to be bad.
///
/// The color is bad if a helping neighbor observes it and demands a higher
/// ceiling, or if it lies outside `[1, dist2_degree]`.
pub fn detect_need_for_recolor(view: &mut Neighborhood<'_>) {
    if view.own().phase != Phase::Stable {
        return;
    }

    let color = view.own().color;
    let objected = helper_proposals(view)
        .into_iter()
        .flatten()
        .any(|p| p.objects_to(color));
    let out_of_range = !color.within(view.own().dist2_degree);

    if objected || out_of_range {
        transition(view, Phase::Requesting);
    }
}

/// Start the transaction once every neighbor is helping and observes the
/// current color.
///
/// The node drops to the first placeholder, which differs from every real
/// color, forcing all helpers to recompute their offers. Returns whether
/// the transaction started.
pub fn try_start_recoloring(view: &mut Neighborhood<'_>) -> bool {
    if view.own().phase != Phase::Requesting {
        return false;
    }

    let me = view.node();
    let color = view.own().color;
    let all_helping = view.neighbors().iter().all(|&j| {
        let state = view.state(j);
        state.is_helping(me) && state.proposal.is_some_and(|p| p.observes(color))
    });
    if !all_helping {
        return false;
    }

    transition(view, Phase::Coloring);
    view.own_mut().color = Color::Transitional(Placeholder::First);
    let proposal = next_color(view, me);
    view.own_mut().proposal = proposal;
    true
}

/// Move the tentative color forward once every helper has observed it and
/// at least one still objects.
///
/// The first placeholder moves to the second; after that the node jumps to
/// the largest ceiling any helper asked for. A placeholder nobody objects to
/// (no neighbor is helping) is replaced by the node's own offer.
pub fn advance_coloring(view: &mut Neighborhood<'_>) {
    if view.own().phase != Phase::Coloring {
        return;
    }

    let me = view.node();
    let color = view.own().color;
    let proposals = helper_proposals(view);

    let acknowledged = proposals
        .iter()
        .all(|p| p.is_some_and(|p| p.observes(color)));
    if !acknowledged {
        return;
    }

    let objected = proposals.iter().flatten().any(|p| p.objects_to(color));
    let next = if objected {
        color.next_placeholder().or_else(|| {
            proposals
                .iter()
                .flatten()
                .map(|p| p.ceiling)
                .max()
                .map(Color::Assigned)
        })
    } else if !color.is_assigned() {
        next_color(view, me).map(|p| p.ceiling_color())
    } else {
        None
    };
    let Some(next) = next else {
        return;
    };

    debug!(node = me.0, from = %color, to = %next, "Tentative color advanced");
    view.own_mut().color = next;
    let proposal = next_color(view, me);
    view.own_mut().proposal = proposal;
}

/// Commit the tentative color once every helper confirms it exactly.
///
/// A placeholder is never committed. Returns whether the transaction
/// finished.
pub fn try_finish_coloring(view: &mut Neighborhood<'_>) -> bool {
    if view.own().phase != Phase::Coloring {
        return false;
    }

    let color = view.own().color;
    if !color.is_assigned() {
        return false;
    }
    let confirmed = helper_proposals(view)
        .into_iter()
        .all(|p| p.is_some_and(|p| p.confirms(color)));
    if !confirmed {
        return false;
    }

    transition(view, Phase::Stable);
    true
}
