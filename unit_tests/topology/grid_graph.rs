use super::*;
use crate::config::Penalties;
use crate::geom::{BBox, Point};

fn grid() -> GridGraph {
    GridGraph::new(
        BBox::of([Point::new(0.0, 0.0), Point::new(10.0, 10.0)]),
        1.0,
        1.0,
        Penalties::default_values(),
    )
}

#[test]
fn is_axial_alternates_around_the_octagon() {
    assert!(is_axial(0));
    assert!(!is_axial(1));
    assert!(is_axial(2));
    assert!(!is_axial(3));
}

#[test]
fn turn_cost_is_symmetric() {
    let p = Penalties::default_values();
    for a in 0u8..8 {
        for b in 0u8..8 {
            assert_eq!(turn_cost_for(a, b, &p), turn_cost_for(b, a, &p));
        }
    }
}

#[test]
fn turn_cost_straight_through_is_free() {
    let p = Penalties::default_values();
    assert_eq!(turn_cost_for(0, 4, &p), 0.0);
}

#[test]
fn turn_cost_full_reversal_is_p180() {
    let p = Penalties::default_values();
    assert_eq!(turn_cost_for(0, 0, &p), p.p_180);
}

#[test]
fn turn_cost_matches_expected_bucket_for_each_step() {
    let p = Penalties::default_values();
    assert_eq!(turn_cost_for(0, 3, &p), p.p_45);
    assert_eq!(turn_cost_for(0, 2, &p), p.p_90);
    assert_eq!(turn_cost_for(0, 1, &p), p.p_135);
}

#[test]
fn new_grid_covers_the_padded_bbox() {
    let g = grid();
    assert!(g.width() >= 10);
    assert!(g.height() >= 10);
}

#[test]
fn world_pos_is_the_cell_center() {
    let g = grid();
    let p0 = g.world_pos(0, 0);
    let p1 = g.world_pos(1, 0);
    assert!((p1.x - p0.x - g.cell_size()).abs() < 1e-9);
    assert_eq!(p1.y, p0.y);
}

#[test]
fn nearest_cell_round_trips_a_center() {
    let g = grid();
    let (x, y) = (3, 4);
    let pos = g.world_pos(x, y);
    assert_eq!(g.nearest_cell(pos), (x, y));
}

#[test]
fn nearest_cell_clamps_to_bounds() {
    let g = grid();
    let far = Point::new(-1000.0, -1000.0);
    let (x, y) = g.nearest_cell(far);
    assert_eq!((x, y), (0, 0));
}

#[test]
fn neighbor_out_of_bounds_is_none() {
    let g = grid();
    assert_eq!(g.neighbor(0, 0, 4), None); // west, off the left edge
}

#[test]
fn neighbor_in_bounds_matches_dirs() {
    let g = grid();
    assert_eq!(g.neighbor(2, 2, 0), Some((3, 2)));
    assert_eq!(g.neighbor(2, 2, 2), Some((2, 3)));
}

#[test]
fn settle_and_unsettle_node_round_trip() {
    let mut g = grid();
    let node = CombNodeId(7);
    g.settle_nd(1, 1, node);
    assert!(g.is_settled(1, 1));
    assert_eq!(g.settled_node(1, 1), Some(node));
    assert_eq!(g.find_settled(node), Some((1, 1)));

    g.unsettle_nd(1, 1);
    assert!(!g.is_settled(1, 1));
    assert_eq!(g.find_settled(node), None);
}

#[test]
fn unsettled_within_excludes_settled_cells() {
    let mut g = grid();
    let center = g.world_pos(5, 5);
    g.settle_nd(5, 5, CombNodeId(0));

    let cells = g.unsettled_within(center, 0.5);

    assert!(!cells.contains(&(5, 5)));
}

#[test]
fn open_sink_then_entry_cost_reflects_base_offset() {
    let mut g = grid();
    g.open_node_sink(2, 2, 3.0);
    assert_eq!(g.sink_entry_cost(2, 2, 0), Some(3.0));
    g.close_node_sink(2, 2);
    assert_eq!(g.sink_entry_cost(2, 2, 0), None);
}

#[test]
fn add_sink_cost_layers_on_top_of_base_offset() {
    let mut g = grid();
    g.open_node_sink(2, 2, 1.0);
    let mut extra = [0.0; 8];
    extra[3] = 5.0;
    g.add_sink_cost(2, 2, extra);
    assert_eq!(g.sink_entry_cost(2, 2, 3), Some(6.0));
    assert_eq!(g.sink_entry_cost(2, 2, 0), Some(1.0));
}

#[test]
fn opening_an_already_open_sink_accumulates_offset() {
    let mut g = grid();
    g.open_node_sink(2, 2, 1.0);
    g.open_node_sink(2, 2, 2.0);
    assert_eq!(g.sink_entry_cost(2, 2, 0), Some(3.0));
    g.close_node_sink(2, 2);
}

#[test]
fn sink_entry_cost_is_none_for_a_used_port() {
    let mut g = grid();
    g.settle_edg(&[GridStep {
        x: 2,
        y: 2,
        in_port: None,
        out_port: Some(0),
    }]);
    g.open_node_sink(2, 2, 0.0);
    assert_eq!(g.sink_entry_cost(2, 2, 0), None);
    assert_eq!(g.sink_entry_cost(2, 2, 1), Some(0.0));
}

#[test]
fn grid_edge_open_is_false_once_either_side_is_used() {
    let mut g = grid();
    assert!(g.grid_edge_open(2, 2, 0));
    g.settle_edg(&[GridStep {
        x: 2,
        y: 2,
        in_port: None,
        out_port: Some(0),
    }]);
    assert!(!g.grid_edge_open(2, 2, 0));
}

#[test]
fn settle_edg_closes_the_perpendicular_axis_on_a_straight_pass() {
    let mut g = grid();
    // Entering from the west (port 4) and leaving east (port 0) is a
    // straight pass-through; the north/south grid edges at this cell must
    // close to prevent a crossing.
    g.settle_edg(&[GridStep {
        x: 2,
        y: 2,
        in_port: Some(4),
        out_port: Some(0),
    }]);
    assert!(!g.grid_edge_open(2, 2, 2)); // north
    assert!(!g.grid_edge_open(2, 2, 6)); // south
    assert!(!g.grid_edge_open(2, 2, 0)); // east is used directly too
}

#[test]
fn unsettle_edg_is_the_exact_inverse_of_settle_edg() {
    let mut g = grid();
    let steps = [GridStep {
        x: 2,
        y: 2,
        in_port: Some(4),
        out_port: Some(0),
    }];
    g.settle_edg(&steps);
    g.unsettle_edg(&steps);

    assert!(g.grid_edge_open(2, 2, 0));
    assert!(g.grid_edge_open(2, 2, 2));
    assert!(g.grid_edge_open(2, 2, 6));
    assert!(!g.is_port_used(2, 2, 4));
    assert!(!g.is_port_used(2, 2, 0));
}

#[test]
fn bend_edge_open_is_false_if_either_port_is_used() {
    let mut g = grid();
    assert!(g.bend_edge_open(1, 1, 0, 2));
    g.settle_edg(&[GridStep {
        x: 1,
        y: 1,
        in_port: Some(0),
        out_port: None,
    }]);
    assert!(!g.bend_edge_open(1, 1, 0, 2));
}

#[test]
fn add_and_read_cost_vector() {
    let mut g = grid();
    g.add_cost_vector(0, 0, [1.0; 8]);
    g.add_cost_vector(0, 0, [2.0; 8]);
    assert_eq!(g.cost_vector(0, 0), [3.0; 8]);
}
