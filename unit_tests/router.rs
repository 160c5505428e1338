use super::*;
use crate::config::Penalties;
use crate::geom::{BBox, Point};

fn grid(w: f64, h: f64, cell_size: f64) -> GridGraph {
    GridGraph::new(
        BBox::of([Point::new(0.0, 0.0), Point::new(w, h)]),
        cell_size,
        1.0,
        Penalties::default_values(),
    )
}

fn candidate(x: usize, y: usize) -> SinkCandidate {
    SinkCandidate {
        x,
        y,
        base_offset: 0.0,
        port_cost: [0.0; 8],
    }
}

#[test]
fn routes_a_single_axial_step() {
    let mut g = grid(10.0, 10.0, 1.0);
    let from = candidate(2, 2);
    let to = candidate(3, 2);

    let outcome = route(&mut g, &[from], &[to], None).expect("adjacent cells must route");

    assert_eq!(outcome.from_cell, (2, 2));
    assert_eq!(outcome.to_cell, (3, 2));
    assert_eq!(outcome.cost, g.penalties().horizontal_pen);
}

#[test]
fn prefers_fewer_turns_over_a_longer_straight_run() {
    let mut g = grid(10.0, 10.0, 1.0);
    // A diagonal step costs the same per-step as an axial one by default, so
    // the direct diagonal neighbor is strictly cheaper than going around.
    let from = candidate(2, 2);
    let to = candidate(3, 3);

    let outcome = route(&mut g, &[from], &[to], None).unwrap();

    assert_eq!(outcome.cost, g.penalties().diagonal_pen);
    assert_eq!(outcome.steps.len(), 2);
}

#[test]
fn routing_closes_sinks_even_on_failure() {
    let mut g = grid(10.0, 10.0, 1.0);
    let from = candidate(0, 0);

    // No target candidates at all: the search must exhaust and fail.
    let outcome = route(&mut g, &[from], &[], None);

    assert!(outcome.is_none());
    // The source sink must have been closed regardless.
    assert!(g.sink_entry_cost(0, 0, 0).is_none());
}

#[test]
fn unreachable_cutoff_yields_no_route() {
    let mut g = grid(10.0, 10.0, 1.0);
    let from = candidate(0, 0);
    let to = candidate(9, 9);

    let outcome = route(&mut g, &[from], &[to], Some(0.01));

    assert!(outcome.is_none());
}

#[test]
fn multi_source_multi_target_picks_the_cheapest_pair() {
    let mut g = grid(10.0, 10.0, 1.0);
    let from = vec![candidate(0, 0), candidate(5, 5)];
    let to = vec![candidate(6, 5)];

    let outcome = route(&mut g, &from, &to, None).unwrap();

    assert_eq!(outcome.from_cell, (5, 5));
    assert_eq!(outcome.cost, g.penalties().horizontal_pen);
}

#[test]
fn a_bend_in_the_path_incurs_the_matching_turn_cost() {
    let mut g = grid(10.0, 10.0, 1.0);
    // From (2,2) east then north to (3,3) forces a 90 degree bend at (3,2)
    // if the diagonal step is blocked by closing it directly.
    g.open_node_sink(2, 2, 0.0);
    g.open_node_sink(3, 3, 0.0);
    // Directly verify turn_cost is symmetric, the property the router's
    // undirected-graph modeling depends on.
    for a in 0u8..8 {
        for b in 0u8..8 {
            assert_eq!(g.turn_cost(a, b), g.turn_cost(b, a));
        }
    }
    g.close_node_sink(2, 2);
    g.close_node_sink(3, 3);
}

#[test]
fn default_cutoff_scales_with_chebyshev_distance() {
    let g = grid(10.0, 10.0, 1.0);
    let near = default_cutoff(&g, &[candidate(2, 2)], &[candidate(2, 2)]);
    let far = default_cutoff(&g, &[candidate(0, 0)], &[candidate(5, 5)]);

    assert!(far > near);
    assert_eq!(far, 5.0 * near);
}

#[test]
fn default_cutoff_is_generous_enough_to_find_the_true_optimum() {
    let mut g = grid(10.0, 10.0, 1.0);
    let from = [candidate(2, 2)];
    let to = [candidate(6, 6)];

    let cutoff = default_cutoff(&g, &from, &to);
    let outcome = route(&mut g, &from, &to, Some(cutoff)).expect("generous cutoff must still route");

    // Four diagonal steps, the true optimum for a (4, 4) offset.
    assert_eq!(outcome.steps.len(), 5);
    assert_eq!(outcome.cost, 4.0 * g.penalties().diagonal_pen);
}
