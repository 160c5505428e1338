//! Short-edge collapse: merge transit edges shorter than a threshold into
//! their endpoint, the way the original's `removeEdgesShorterThan` runs
//! before combinatorial-graph construction (spec §4.1).
//!
//! Merging can turn a previously non-degenerate neighboring edge into one
//! short enough to also qualify, so this runs as a fixed-point loop: rescan
//! from scratch after every merge until no edge is short enough, then drop
//! any self-loops (from the merge, or already present in malformed input).

use crate::transit_graph::TransitGraph;
use petgraph::graph::{EdgeIndex, NodeIndex};

/// Repeatedly merge the shortest sub-threshold edge's endpoints until none
/// remain, then discard resulting self-loops. Returns the number of merges
/// performed.
pub fn collapse_short_edges(tg: &mut TransitGraph, min_len: f64) -> usize {
    let mut merges = 0;
    loop {
        let shortest = tg
            .edge_indices()
            .map(|e| (e, tg.edge(e).length()))
            .filter(|&(e, len)| len < min_len && is_collapsible(tg, e))
            .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap());

        let Some((edge, _)) = shortest else {
            break;
        };

        let (a, b) = tg.endpoints(edge);
        let (keep, remove) = order_merge_pair(tg, a, b);
        let new_pos = tg.node(a).pos.midpoint(&tg.node(b).pos);
        tg.merge_nodes(keep, remove, new_pos);
        merges += 1;
    }
    tg.remove_self_loops();
    merges
}

/// A short edge is only eligible for collapse if both endpoints have degree
/// greater than 1 (a degree-1 terminal stop is never a degree-two
/// micro-edge) and at least one endpoint carries no stop (so two genuinely
/// distinct, separately-stopped stations are never silently merged),
/// matching `Octilinearizer.cpp:33-36`.
fn is_collapsible(tg: &TransitGraph, e: EdgeIndex) -> bool {
    let (a, b) = tg.endpoints(e);
    tg.degree(a) > 1
        && tg.degree(b) > 1
        && (!tg.node(a).has_stops() || !tg.node(b).has_stops())
}

/// Which of `a`/`b` survives a merge: prefer keeping the node carrying stops
/// (so a station's identity is never silently dropped), falling back to the
/// lower graph index for determinism.
fn order_merge_pair(tg: &TransitGraph, a: NodeIndex, b: NodeIndex) -> (NodeIndex, NodeIndex) {
    match (tg.node(a).has_stops(), tg.node(b).has_stops()) {
        (true, false) => (a, b),
        (false, true) => (b, a),
        _ => {
            if a.index() <= b.index() {
                (a, b)
            } else {
                (b, a)
            }
        }
    }
}

#[cfg(test)]
#[path = "../unit_tests/preprocessing.rs"]
mod tests;
