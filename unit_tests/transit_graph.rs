use super::*;
use crate::geom::Point;

fn sample_line(line: u64, forward: bool) -> LineOccurrence {
    LineOccurrence {
        line: LineId(line),
        forward,
    }
}

#[test]
fn new_graph_is_empty() {
    let tg = TransitGraph::new();
    assert!(tg.is_empty());
    assert_eq!(tg.num_nodes(), 0);
    assert_eq!(tg.num_edges(), 0);
    assert!(tg.bbox().is_none());
}

#[test]
fn add_node_and_edge_round_trip() {
    let mut tg = TransitGraph::new();
    let a = tg.add_node(TransitNode::new(Point::new(0.0, 0.0)));
    let b = tg.add_node(TransitNode::new(Point::new(1.0, 1.0)));
    let e = tg.add_edge(
        a,
        b,
        TransitEdge::straight(Point::new(0.0, 0.0), Point::new(1.0, 1.0), vec![sample_line(1, true)]),
    );
    assert_eq!(tg.num_nodes(), 2);
    assert_eq!(tg.num_edges(), 1);
    assert_eq!(tg.endpoints(e), (a, b));
    assert_eq!(tg.degree(a), 1);
    assert_eq!(tg.degree(b), 1);
}

#[test]
fn edge_length_is_polyline_length() {
    let mut tg = TransitGraph::new();
    let a = tg.add_node(TransitNode::new(Point::new(0.0, 0.0)));
    let b = tg.add_node(TransitNode::new(Point::new(3.0, 4.0)));
    let e = tg.add_edge(a, b, TransitEdge::straight(Point::new(0.0, 0.0), Point::new(3.0, 4.0), vec![]));
    assert_eq!(tg.edge(e).length(), 5.0);
}

#[test]
fn bbox_spans_all_nodes() {
    let mut tg = TransitGraph::new();
    tg.add_node(TransitNode::new(Point::new(-2.0, 0.0)));
    tg.add_node(TransitNode::new(Point::new(3.0, 5.0)));
    let bbox = tg.bbox().unwrap();
    assert_eq!(bbox.min, Point::new(-2.0, 0.0));
    assert_eq!(bbox.max, Point::new(3.0, 5.0));
}

#[test]
fn incident_lists_both_ends() {
    let mut tg = TransitGraph::new();
    let a = tg.add_node(TransitNode::new(Point::new(0.0, 0.0)));
    let b = tg.add_node(TransitNode::new(Point::new(1.0, 0.0)));
    let c = tg.add_node(TransitNode::new(Point::new(2.0, 0.0)));
    tg.add_edge(a, b, TransitEdge::straight(Point::new(0.0, 0.0), Point::new(1.0, 0.0), vec![]));
    tg.add_edge(b, c, TransitEdge::straight(Point::new(1.0, 0.0), Point::new(2.0, 0.0), vec![]));
    assert_eq!(tg.incident(b).len(), 2);
}

#[test]
fn merge_nodes_reattaches_other_edges_and_appends_stops() {
    let mut tg = TransitGraph::new();
    let a = tg.add_node(TransitNode::with_stop(Point::new(0.0, 0.0), StopId(1)));
    let b = tg.add_node(TransitNode::with_stop(Point::new(1.0, 0.0), StopId(2)));
    let c = tg.add_node(TransitNode::new(Point::new(2.0, 0.0)));
    tg.add_edge(a, b, TransitEdge::straight(Point::new(0.0, 0.0), Point::new(1.0, 0.0), vec![]));
    tg.add_edge(b, c, TransitEdge::straight(Point::new(1.0, 0.0), Point::new(2.0, 0.0), vec![]));

    tg.merge_nodes(a, b, Point::new(0.5, 0.0));

    assert_eq!(tg.num_nodes(), 2);
    assert_eq!(tg.num_edges(), 1);
    assert_eq!(tg.node(a).pos, Point::new(0.5, 0.0));
    assert_eq!(tg.node(a).stops, vec![StopId(1), StopId(2)]);
    let (_e, other) = tg.incident(a)[0];
    assert_eq!(other, c);
}

#[test]
fn merge_nodes_drops_the_direct_edge_between_them() {
    let mut tg = TransitGraph::new();
    let a = tg.add_node(TransitNode::new(Point::new(0.0, 0.0)));
    let b = tg.add_node(TransitNode::new(Point::new(1.0, 0.0)));
    tg.add_edge(a, b, TransitEdge::straight(Point::new(0.0, 0.0), Point::new(1.0, 0.0), vec![]));

    tg.merge_nodes(a, b, Point::new(0.5, 0.0));

    assert_eq!(tg.num_nodes(), 1);
    assert_eq!(tg.num_edges(), 0);
}

#[test]
fn remove_self_loops_drops_only_loops() {
    let mut tg = TransitGraph::new();
    let a = tg.add_node(TransitNode::new(Point::new(0.0, 0.0)));
    let b = tg.add_node(TransitNode::new(Point::new(1.0, 0.0)));
    tg.add_edge(a, b, TransitEdge::straight(Point::new(0.0, 0.0), Point::new(1.0, 0.0), vec![]));
    tg.add_edge(a, a, TransitEdge::straight(Point::new(0.0, 0.0), Point::new(0.0, 0.0), vec![]));

    let removed = tg.remove_self_loops();

    assert_eq!(removed, 1);
    assert_eq!(tg.num_edges(), 1);
}

#[test]
fn json_round_trip_preserves_structure() {
    let mut tg = TransitGraph::new();
    let a = tg.add_node(TransitNode::with_stop(Point::new(0.0, 0.0), StopId(7)));
    let b = tg.add_node(TransitNode::new(Point::new(5.0, 5.0)));
    tg.add_edge(
        a,
        b,
        TransitEdge::straight(Point::new(0.0, 0.0), Point::new(5.0, 5.0), vec![sample_line(3, false)]),
    );

    let json = tg.to_json_string().unwrap();
    let round_tripped = TransitGraph::from_json_str(&json).unwrap();

    assert_eq!(round_tripped.num_nodes(), 2);
    assert_eq!(round_tripped.num_edges(), 1);
    assert_eq!(round_tripped.node(a).stops, vec![StopId(7)]);
}

#[test]
fn from_json_str_rejects_garbage() {
    assert!(TransitGraph::from_json_str("not json").is_err());
}
