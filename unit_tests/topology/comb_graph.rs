use super::*;
use crate::testing::{line_chain, single_edge, star, triangle};

#[test]
fn single_edge_becomes_two_comb_nodes_one_edge() {
    let tg = single_edge(crate::geom::Point::new(0.0, 0.0), crate::geom::Point::new(3.0, 4.0));
    let comb = CombGraph::build(&tg);

    assert_eq!(comb.num_nodes(), 2);
    assert_eq!(comb.num_edges(), 1);
    let eid = comb.edge_ids().next().unwrap();
    let edge = comb.edge(eid);
    assert_ne!(edge.from, edge.to);
    assert_eq!(comb.node(edge.from).degree(), 1);
    assert_eq!(comb.node(edge.to).degree(), 1);
}

#[test]
fn a_long_chain_collapses_interior_stopless_nodes_only_if_degree_two() {
    // Every node in line_chain carries a stop, so none collapse: a chain of
    // stops is a sequence of comb nodes, not one contracted edge.
    let tg = line_chain(5, 2.0);
    let comb = CombGraph::build(&tg);

    assert_eq!(comb.num_nodes(), 5);
    assert_eq!(comb.num_edges(), 4);
}

#[test]
fn triangle_has_three_comb_nodes_each_of_degree_two() {
    let tg = triangle(10.0);
    let comb = CombGraph::build(&tg);

    assert_eq!(comb.num_nodes(), 3);
    assert_eq!(comb.num_edges(), 3);
    for n in comb.node_ids() {
        assert_eq!(comb.node(n).degree(), 2);
    }
}

#[test]
fn star_center_has_degree_equal_to_arm_count() {
    let tg = star(5, 10.0);
    let comb = CombGraph::build(&tg);

    let center = comb
        .node_ids()
        .find(|&n| comb.node(n).degree() == 5)
        .expect("center node must have degree 5");
    assert_eq!(comb.node(center).edge_order().len(), 5);
}

#[test]
fn edge_order_is_a_consistent_cyclic_permutation() {
    let tg = star(4, 10.0);
    let comb = CombGraph::build(&tg);
    let center = comb
        .node_ids()
        .find(|&n| comb.node(n).degree() == 4)
        .unwrap();
    let order = comb.node(center).edge_order().to_vec();

    // Walking next_after all the way around returns to the start.
    let mut cur = order[0];
    for _ in 0..order.len() {
        cur = comb.node(center).next_after(cur).unwrap();
    }
    assert_eq!(cur, order[0]);
}

#[test]
fn other_end_returns_the_opposite_endpoint() {
    let tg = single_edge(crate::geom::Point::new(0.0, 0.0), crate::geom::Point::new(1.0, 0.0));
    let comb = CombGraph::build(&tg);
    let eid = comb.edge_ids().next().unwrap();
    let edge = comb.edge(eid);

    assert_eq!(comb.other_end(eid, edge.from), edge.to);
    assert_eq!(comb.other_end(eid, edge.to), edge.from);
}

#[test]
fn geo_length_of_a_single_straight_edge_is_its_euclidean_length() {
    let tg = single_edge(crate::geom::Point::new(0.0, 0.0), crate::geom::Point::new(3.0, 4.0));
    let comb = CombGraph::build(&tg);
    let eid = comb.edge_ids().next().unwrap();

    assert_eq!(comb.edge(eid).geo_length(&tg), 5.0);
}
