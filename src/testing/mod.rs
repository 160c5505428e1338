//! Fixture builders and assertion macros shared by this crate's own test
//! suite: small, hand-placed [`TransitGraph`]s exercising the shapes the
//! octilinearization engine has to handle (a lone edge, a cycle, a branch
//! point, a long chain) without each test file hand-rolling node/edge wiring.

#[macro_use]
mod macros;

use crate::geom::Point;
use crate::transit_graph::{LineId, LineOccurrence, StopId, TransitEdge, TransitGraph, TransitNode};

/// A single edge between two stops, one line running `from -> to`.
pub fn single_edge(from: Point, to: Point) -> TransitGraph {
    let mut tg = TransitGraph::new();
    let a = tg.add_node(TransitNode::with_stop(from, StopId(0)));
    let b = tg.add_node(TransitNode::with_stop(to, StopId(1)));
    let line = LineOccurrence {
        line: LineId(0),
        forward: true,
    };
    tg.add_edge(a, b, TransitEdge::straight(from, to, vec![line]));
    tg
}

/// Three stops forming a non-degenerate triangle, one line running all the
/// way around it.
pub fn triangle(scale: f64) -> TransitGraph {
    let pts = [
        Point::new(0.0, 0.0),
        Point::new(scale, 0.0),
        Point::new(scale * 0.5, scale * 0.866_025_4),
    ];
    let mut tg = TransitGraph::new();
    let nodes: Vec<_> = pts
        .iter()
        .enumerate()
        .map(|(i, &p)| tg.add_node(TransitNode::with_stop(p, StopId(i as u64))))
        .collect();
    for i in 0..3 {
        let (a, b) = (nodes[i], nodes[(i + 1) % 3]);
        let (pa, pb) = (tg.node(a).pos, tg.node(b).pos);
        let line = LineOccurrence {
            line: LineId(0),
            forward: true,
        };
        tg.add_edge(a, b, TransitEdge::straight(pa, pb, vec![line]));
    }
    tg
}

/// `n` stops spaced `spacing` world units apart along the x axis, threaded
/// by one line end to end. Requires `n >= 2`.
pub fn line_chain(n: usize, spacing: f64) -> TransitGraph {
    assert!(n >= 2, "a chain needs at least two stops");
    let mut tg = TransitGraph::new();
    let nodes: Vec<_> = (0..n)
        .map(|i| {
            tg.add_node(TransitNode::with_stop(
                Point::new(i as f64 * spacing, 0.0),
                StopId(i as u64),
            ))
        })
        .collect();
    for w in nodes.windows(2) {
        let (a, b) = (w[0], w[1]);
        let (pa, pb) = (tg.node(a).pos, tg.node(b).pos);
        let line = LineOccurrence {
            line: LineId(0),
            forward: true,
        };
        tg.add_edge(a, b, TransitEdge::straight(pa, pb, vec![line]));
    }
    tg
}

/// A branch point: one center stop with `arms` edges radiating out to leaf
/// stops spaced evenly around it, each carrying its own line. Requires
/// `arms >= 3` (a branch point, not a pass-through).
pub fn star(arms: usize, radius: f64) -> TransitGraph {
    assert!(arms >= 3, "a star needs at least three arms to branch");
    let mut tg = TransitGraph::new();
    let center = tg.add_node(TransitNode::with_stop(Point::new(0.0, 0.0), StopId(0)));
    for i in 0..arms {
        let angle = 2.0 * std::f64::consts::PI * i as f64 / arms as f64;
        let leaf_pos = Point::new(radius * angle.cos(), radius * angle.sin());
        let leaf = tg.add_node(TransitNode::with_stop(leaf_pos, StopId((i + 1) as u64)));
        let line = LineOccurrence {
            line: LineId(i as u64),
            forward: true,
        };
        tg.add_edge(
            center,
            leaf,
            TransitEdge::straight(Point::new(0.0, 0.0), leaf_pos, vec![line]),
        );
    }
    tg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_edge_has_one_edge_two_nodes() {
        let tg = single_edge(Point::new(0.0, 0.0), Point::new(3.0, 4.0));
        assert_eq!(tg.num_nodes(), 2);
        assert_eq!(tg.num_edges(), 1);
    }

    #[test]
    fn triangle_has_three_nodes_and_edges() {
        let tg = triangle(10.0);
        assert_eq!(tg.num_nodes(), 3);
        assert_eq!(tg.num_edges(), 3);
    }

    #[test]
    fn line_chain_has_n_minus_one_edges() {
        let tg = line_chain(5, 2.0);
        assert_eq!(tg.num_nodes(), 5);
        assert_eq!(tg.num_edges(), 4);
    }

    #[test]
    fn star_has_arms_plus_one_nodes() {
        let tg = star(4, 10.0);
        assert_eq!(tg.num_nodes(), 5);
        assert_eq!(tg.num_edges(), 4);
    }

    #[test]
    #[should_panic(expected = "at least two stops")]
    fn line_chain_requires_two_stops() {
        line_chain(1, 1.0);
    }

    #[test]
    #[should_panic(expected = "at least three arms")]
    fn star_requires_three_arms() {
        star(2, 1.0);
    }
}
