use super::*;
use crate::config::Penalties;
use crate::testing::single_edge;
use crate::topology::comb_graph::CombGraph;

fn penalties() -> Penalties {
    Penalties::default_values()
}

#[test]
fn a_perfectly_horizontal_edge_is_assigned_direction_zero() {
    let tg = single_edge(crate::geom::Point::new(0.0, 0.0), crate::geom::Point::new(10.0, 0.0));
    let comb = CombGraph::build(&tg);

    let hints = assign_directions(&comb, &penalties()).expect("small ILP must solve");

    let eid = comb.edge_ids().next().unwrap();
    assert_eq!(hints[&eid], 0);
}

#[test]
fn a_perfectly_diagonal_edge_is_assigned_the_matching_diagonal_direction() {
    let tg = single_edge(crate::geom::Point::new(0.0, 0.0), crate::geom::Point::new(10.0, 10.0));
    let comb = CombGraph::build(&tg);

    let hints = assign_directions(&comb, &penalties()).expect("small ILP must solve");

    let eid = comb.edge_ids().next().unwrap();
    assert_eq!(hints[&eid], 1);
}

#[test]
fn every_edge_gets_exactly_one_direction() {
    let tg = crate::testing::triangle(10.0);
    let comb = CombGraph::build(&tg);

    let hints = assign_directions(&comb, &penalties()).unwrap();

    assert_eq!(hints.len(), comb.num_edges());
    for eid in comb.edge_ids() {
        assert!(hints.contains_key(&eid));
    }
}

#[test]
fn a_graph_with_no_edges_yields_no_hints() {
    let mut tg = crate::transit_graph::TransitGraph::new();
    tg.add_node(crate::transit_graph::TransitNode::new(crate::geom::Point::new(
        0.0, 0.0,
    )));
    let comb = CombGraph::build(&tg);

    let hints = assign_directions(&comb, &penalties()).unwrap();

    assert!(hints.is_empty());
}

#[test]
fn angular_cost_is_zero_on_axis_and_grows_with_each_45_degree_step() {
    let p = penalties();
    assert_eq!(angular_cost(0.0, 0.0, &p), 0.0);
    assert_eq!(
        angular_cost(0.0, std::f64::consts::FRAC_PI_4, &p),
        p.p_45
    );
    assert_eq!(
        angular_cost(0.0, std::f64::consts::FRAC_PI_2, &p),
        p.p_90
    );
    assert_eq!(angular_cost(0.0, std::f64::consts::PI, &p), p.p_180);
}
