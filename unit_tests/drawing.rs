use super::*;
use crate::config::Penalties;
use crate::geom::{BBox, Point};
use crate::topology::comb_graph::{CombEdgeId, CombNodeId};
use crate::topology::grid_graph::GridGraph;

fn grid() -> GridGraph {
    GridGraph::new(
        BBox::of([Point::new(0.0, 0.0), Point::new(10.0, 10.0)]),
        1.0,
        1.0,
        Penalties::default_values(),
    )
}

fn step(x: usize, y: usize, in_port: Option<u8>, out_port: Option<u8>) -> GridStep {
    GridStep {
        x,
        y,
        in_port,
        out_port,
    }
}

#[test]
fn new_drawing_is_empty() {
    let d = Drawing::new();
    assert_eq!(d.score(), 0.0);
    assert_eq!(d.num_placed_edges(), 0);
    assert!(!d.is_node_placed(CombNodeId(0)));
}

#[test]
fn place_node_settles_it_on_the_grid() {
    let mut g = grid();
    let mut d = Drawing::new();
    d.place_node(&mut g, CombNodeId(0), 2, 3);
    assert_eq!(d.node_center(CombNodeId(0)), Some((2, 3)));
    assert!(g.is_settled(2, 3));
    assert_eq!(g.settled_node(2, 3), Some(CombNodeId(0)));
}

#[test]
#[should_panic(expected = "already placed")]
fn place_node_twice_panics() {
    let mut g = grid();
    let mut d = Drawing::new();
    d.place_node(&mut g, CombNodeId(0), 0, 0);
    d.place_node(&mut g, CombNodeId(0), 1, 1);
}

#[test]
fn unplace_node_frees_the_grid_cell() {
    let mut g = grid();
    let mut d = Drawing::new();
    d.place_node(&mut g, CombNodeId(0), 2, 2);
    d.unplace_node(&mut g, CombNodeId(0));
    assert!(!d.is_node_placed(CombNodeId(0)));
    assert!(!g.is_settled(2, 2));
}

#[test]
fn place_edge_accumulates_score_and_claims_ports() {
    let mut g = grid();
    let mut d = Drawing::new();
    d.place_node(&mut g, CombNodeId(0), 1, 1);
    d.place_node(&mut g, CombNodeId(1), 2, 1);
    let steps = vec![step(1, 1, None, Some(0)), step(2, 1, Some(4), None)];
    d.place_edge(&mut g, CombEdgeId(0), CombNodeId(0), CombNodeId(1), steps, 1.5);

    assert_eq!(d.score(), 1.5);
    assert!(d.is_edge_placed(CombEdgeId(0)));
    assert_eq!(d.edge_cost(CombEdgeId(0)), Some(1.5));
    assert!(g.is_port_used(1, 1, 0));
    assert!(g.is_port_used(2, 1, 4));
}

#[test]
#[should_panic(expected = "edge already placed")]
fn place_edge_twice_panics() {
    let mut g = grid();
    let mut d = Drawing::new();
    d.place_node(&mut g, CombNodeId(0), 0, 0);
    d.place_node(&mut g, CombNodeId(1), 1, 0);
    let steps = vec![step(0, 0, None, Some(0)), step(1, 0, Some(4), None)];
    d.place_edge(&mut g, CombEdgeId(0), CombNodeId(0), CombNodeId(1), steps.clone(), 1.0);
    d.place_edge(&mut g, CombEdgeId(0), CombNodeId(0), CombNodeId(1), steps, 1.0);
}

#[test]
fn erase_edge_reverses_place_edge() {
    let mut g = grid();
    let mut d = Drawing::new();
    d.place_node(&mut g, CombNodeId(0), 0, 0);
    d.place_node(&mut g, CombNodeId(1), 1, 0);
    let steps = vec![step(0, 0, None, Some(0)), step(1, 0, Some(4), None)];
    d.place_edge(&mut g, CombEdgeId(0), CombNodeId(0), CombNodeId(1), steps, 2.0);

    d.erase_edge(&mut g, CombEdgeId(0));

    assert_eq!(d.score(), 0.0);
    assert!(!d.is_edge_placed(CombEdgeId(0)));
    assert!(!g.is_port_used(0, 0, 0));
    assert!(!g.is_port_used(1, 0, 4));
}

#[test]
fn incident_ports_reports_both_endpoints_port() {
    let mut g = grid();
    let mut d = Drawing::new();
    d.place_node(&mut g, CombNodeId(0), 0, 0);
    d.place_node(&mut g, CombNodeId(1), 1, 0);
    let steps = vec![step(0, 0, None, Some(0)), step(1, 0, Some(4), None)];
    d.place_edge(&mut g, CombEdgeId(0), CombNodeId(0), CombNodeId(1), steps, 1.0);

    assert_eq!(d.incident_ports(CombNodeId(0)), vec![(CombEdgeId(0), 0)]);
    assert_eq!(d.incident_ports(CombNodeId(1)), vec![(CombEdgeId(0), 4)]);
}

#[test]
fn erase_incident_removes_every_edge_touching_a_node_and_returns_them() {
    let mut g = grid();
    let mut d = Drawing::new();
    d.place_node(&mut g, CombNodeId(0), 1, 1);
    d.place_node(&mut g, CombNodeId(1), 2, 1);
    d.place_node(&mut g, CombNodeId(2), 1, 2);

    d.place_edge(
        &mut g,
        CombEdgeId(0),
        CombNodeId(0),
        CombNodeId(1),
        vec![step(1, 1, None, Some(0)), step(2, 1, Some(4), None)],
        1.0,
    );
    d.place_edge(
        &mut g,
        CombEdgeId(1),
        CombNodeId(0),
        CombNodeId(2),
        vec![step(1, 1, None, Some(2)), step(1, 2, Some(6), None)],
        1.0,
    );

    let removed = d.erase_incident(&mut g, CombNodeId(0));

    assert_eq!(removed.len(), 2);
    assert_eq!(d.num_placed_edges(), 0);
    assert_eq!(d.score(), 0.0);
    assert!(!g.is_port_used(1, 1, 0));
    assert!(!g.is_port_used(1, 1, 2));
    // The untouched endpoints' claims on the opposite cells are also freed.
    assert!(!g.is_port_used(2, 1, 4));
    assert!(!g.is_port_used(1, 2, 6));
}

#[test]
fn unplace_node_after_erasing_its_edges_succeeds() {
    let mut g = grid();
    let mut d = Drawing::new();
    d.place_node(&mut g, CombNodeId(0), 1, 1);
    d.place_node(&mut g, CombNodeId(1), 2, 1);
    d.place_edge(
        &mut g,
        CombEdgeId(0),
        CombNodeId(0),
        CombNodeId(1),
        vec![step(1, 1, None, Some(0)), step(2, 1, Some(4), None)],
        1.0,
    );

    d.erase_incident(&mut g, CombNodeId(0));
    d.unplace_node(&mut g, CombNodeId(0));

    assert!(!d.is_node_placed(CombNodeId(0)));
}
