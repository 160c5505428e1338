use super::*;
use crate::geom::Point;
use crate::transit_graph::{LineId, LineOccurrence, StopId, TransitEdge, TransitGraph, TransitNode};

fn line() -> LineOccurrence {
    LineOccurrence {
        line: LineId(0),
        forward: true,
    }
}

#[test]
fn leaves_long_edges_untouched() {
    let mut tg = TransitGraph::new();
    let a = tg.add_node(TransitNode::new(Point::new(0.0, 0.0)));
    let b = tg.add_node(TransitNode::new(Point::new(10.0, 0.0)));
    tg.add_edge(a, b, TransitEdge::straight(Point::new(0.0, 0.0), Point::new(10.0, 0.0), vec![line()]));

    let merges = collapse_short_edges(&mut tg, 1.0);

    assert_eq!(merges, 0);
    assert_eq!(tg.num_nodes(), 2);
    assert_eq!(tg.num_edges(), 1);
}

#[test]
fn collapses_a_short_waypoint_edge_into_its_midpoint() {
    // x -- a -- b -- y: a-b is a short, no-stop, degree-two micro-edge and
    // must collapse; x and y just give a/b the degree > 1 collapse requires.
    let mut tg = TransitGraph::new();
    let x = tg.add_node(TransitNode::new(Point::new(-1.0, 0.0)));
    let a = tg.add_node(TransitNode::new(Point::new(0.0, 0.0)));
    let b = tg.add_node(TransitNode::new(Point::new(0.5, 0.0)));
    let y = tg.add_node(TransitNode::new(Point::new(1.5, 0.0)));
    tg.add_edge(x, a, TransitEdge::straight(Point::new(-1.0, 0.0), Point::new(0.0, 0.0), vec![line()]));
    tg.add_edge(a, b, TransitEdge::straight(Point::new(0.0, 0.0), Point::new(0.5, 0.0), vec![line()]));
    tg.add_edge(b, y, TransitEdge::straight(Point::new(0.5, 0.0), Point::new(1.5, 0.0), vec![line()]));

    let merges = collapse_short_edges(&mut tg, 1.0);

    assert_eq!(merges, 1);
    assert_eq!(tg.num_nodes(), 3);
    assert_eq!(tg.num_edges(), 2);
}

#[test]
fn prefers_keeping_the_node_with_stops() {
    // other -- waypoint -- stop -- leaf: both waypoint and stop have degree
    // 2, and waypoint carries no stop, so the short waypoint-stop edge
    // collapses; the stop's identity must survive the merge.
    let mut tg = TransitGraph::new();
    let other = tg.add_node(TransitNode::new(Point::new(-1.0, 0.0)));
    let waypoint = tg.add_node(TransitNode::new(Point::new(0.0, 0.0)));
    let stop = tg.add_node(TransitNode::with_stop(Point::new(0.5, 0.0), StopId(9)));
    let leaf = tg.add_node(TransitNode::new(Point::new(1.5, 0.0)));
    tg.add_edge(other, waypoint, TransitEdge::straight(Point::new(-1.0, 0.0), Point::new(0.0, 0.0), vec![line()]));
    tg.add_edge(
        waypoint,
        stop,
        TransitEdge::straight(Point::new(0.0, 0.0), Point::new(0.5, 0.0), vec![line()]),
    );
    tg.add_edge(stop, leaf, TransitEdge::straight(Point::new(0.5, 0.0), Point::new(1.5, 0.0), vec![line()]));

    collapse_short_edges(&mut tg, 1.0);

    assert_eq!(tg.num_nodes(), 3);
    assert_eq!(tg.node(stop).stops, vec![StopId(9)]);
}

#[test]
fn cascades_until_no_short_edge_remains() {
    // p0 -- a -- b -- c -- p1: a,b,c are 0.4 apart, no stops, each degree 2;
    // collapsing a-b brings the new midpoint close enough to c to need a
    // second merge, leaving only the anchors p0/p1 and the merged waypoint.
    let mut tg = TransitGraph::new();
    let p0 = tg.add_node(TransitNode::new(Point::new(-10.0, 0.0)));
    let a = tg.add_node(TransitNode::new(Point::new(0.0, 0.0)));
    let b = tg.add_node(TransitNode::new(Point::new(0.4, 0.0)));
    let c = tg.add_node(TransitNode::new(Point::new(0.8, 0.0)));
    let p1 = tg.add_node(TransitNode::new(Point::new(10.8, 0.0)));
    tg.add_edge(p0, a, TransitEdge::straight(Point::new(-10.0, 0.0), Point::new(0.0, 0.0), vec![line()]));
    tg.add_edge(a, b, TransitEdge::straight(Point::new(0.0, 0.0), Point::new(0.4, 0.0), vec![line()]));
    tg.add_edge(b, c, TransitEdge::straight(Point::new(0.4, 0.0), Point::new(0.8, 0.0), vec![line()]));
    tg.add_edge(c, p1, TransitEdge::straight(Point::new(0.8, 0.0), Point::new(10.8, 0.0), vec![line()]));

    let merges = collapse_short_edges(&mut tg, 1.0);

    assert_eq!(merges, 2);
    assert_eq!(tg.num_nodes(), 3);
    assert_eq!(tg.num_edges(), 2);
}

#[test]
fn parallel_short_edges_collapse_to_a_single_node_with_no_edges() {
    let mut tg = TransitGraph::new();
    let a = tg.add_node(TransitNode::new(Point::new(0.0, 0.0)));
    let b = tg.add_node(TransitNode::new(Point::new(0.5, 0.0)));
    // Two parallel short edges between the same pair of nodes: both vanish
    // with the removed node, since neither is the one edge directly joining
    // the merged pair's survivors to anything else.
    tg.add_edge(a, b, TransitEdge::straight(Point::new(0.0, 0.0), Point::new(0.5, 0.0), vec![line()]));
    tg.add_edge(a, b, TransitEdge::straight(Point::new(0.0, 0.0), Point::new(0.5, 0.0), vec![line()]));

    collapse_short_edges(&mut tg, 1.0);

    assert_eq!(tg.num_nodes(), 1);
    assert_eq!(tg.num_edges(), 0);
}

#[test]
fn pre_existing_self_loop_is_dropped_even_with_no_short_edges() {
    let mut tg = TransitGraph::new();
    let a = tg.add_node(TransitNode::new(Point::new(0.0, 0.0)));
    let b = tg.add_node(TransitNode::new(Point::new(10.0, 0.0)));
    tg.add_edge(a, b, TransitEdge::straight(Point::new(0.0, 0.0), Point::new(10.0, 0.0), vec![line()]));
    tg.add_edge(a, a, TransitEdge::straight(Point::new(0.0, 0.0), Point::new(0.0, 0.0), vec![line()]));

    collapse_short_edges(&mut tg, 1.0);

    assert_eq!(tg.num_nodes(), 2);
    assert_eq!(tg.num_edges(), 1);
}
