use super::*;
use crate::config::Penalties;

fn penalties() -> Penalties {
    Penalties::default_values()
}

#[test]
fn empty_node_has_no_cost_anywhere() {
    let cost = node_cost_vector(&[], &penalties());
    assert_eq!(cost, [0.0; 8]);
}

#[test]
fn already_used_port_is_blocked() {
    let placed = [PlacedIncidence {
        port: 3,
        ideal_port_distance: 0.0,
    }];
    let cost = node_cost_vector(&placed, &penalties());
    assert_eq!(cost[3], f64::INFINITY);
}

#[test]
fn adjacent_port_gets_spacing_penalty() {
    let placed = [PlacedIncidence {
        port: 0,
        ideal_port_distance: 4.0,
    }];
    let cost = node_cost_vector(&placed, &penalties());
    // Port 1 is one step from the used port 0: spacing penalty applies, plus
    // whatever bend mismatch its actual distance (1) has from the ideal (4).
    let p = penalties();
    let expected_bend = (1.0 - 4.0f64).abs() * p.p_45;
    assert_eq!(cost[1], p.p_45 + expected_bend);
}

#[test]
fn opposite_port_matching_ideal_distance_has_no_bend_penalty() {
    let placed = [PlacedIncidence {
        port: 0,
        ideal_port_distance: 4.0,
    }];
    let cost = node_cost_vector(&placed, &penalties());
    // Port 4 is exactly opposite (circular distance 4), matching the ideal.
    assert_eq!(cost[4], 0.0);
}

#[test]
fn circular_distance_wraps_around_the_octagon() {
    // Port 7 is one step from port 0 going the other way around.
    let placed = [PlacedIncidence {
        port: 0,
        ideal_port_distance: 0.0,
    }];
    let cost = node_cost_vector(&placed, &penalties());
    let p = penalties();
    assert_eq!(cost[7], p.p_45 + 1.0 * p.p_45);
}

#[test]
fn ideal_port_distance_is_zero_for_isolated_node() {
    assert_eq!(ideal_port_distance(0, 0, 0), 0.0);
}

#[test]
fn ideal_port_distance_splits_budget_for_degree_two() {
    // Opposite sides of a degree-2 node sit 4 ports (half the octagon) apart.
    assert_eq!(ideal_port_distance(0, 1, 2), 4.0);
}

#[test]
fn ideal_port_distance_is_symmetric_in_position_choice() {
    assert_eq!(ideal_port_distance(1, 3, 4), ideal_port_distance(3, 1, 4));
}

#[test]
fn ideal_port_distance_takes_the_shorter_way_around() {
    // With degree 8, adjacent cyclic positions are a single port step apart.
    assert_eq!(ideal_port_distance(0, 1, 8), 1.0);
    assert_eq!(ideal_port_distance(0, 7, 8), 1.0);
}
