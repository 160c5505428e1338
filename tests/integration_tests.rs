//! End-to-end tests for the octilinearization engine.
//!
//! These exercise the public [`octilinearize`] entry point against small,
//! hand-built transit graphs rather than any single internal module.

use octilinearizer::assert_octilinear_graph;
use octilinearizer::prelude::*;
use octilinearizer::testing::{line_chain, single_edge, star, triangle};

mod empty_and_trivial_graphs {
    use super::*;

    #[test]
    fn an_empty_graph_embeds_to_an_empty_graph() {
        let tg = TransitGraph::new();
        let cfg = Config::new(10.0);

        let out = octilinearize(&tg, &cfg).expect("an empty graph always embeds");

        assert_eq!(out.transit_graph.num_nodes(), 0);
        assert_eq!(out.transit_graph.num_edges(), 0);
    }

    #[test]
    fn a_single_isolated_stop_with_no_edges_embeds_to_one_node() {
        let mut tg = TransitGraph::new();
        tg.add_node(TransitNode::with_stop(Point::new(0.0, 0.0), StopId(0)));
        let cfg = Config::new(10.0);

        let out = octilinearize(&tg, &cfg).expect("a single stop always embeds");

        assert_eq!(out.transit_graph.num_nodes(), 1);
        assert_eq!(out.transit_graph.num_edges(), 0);
    }

    #[test]
    fn a_single_edge_is_redrawn_octilinearly() {
        let tg = single_edge(Point::new(0.0, 0.0), Point::new(11.0, 7.0));
        let cfg = Config::new(5.0);

        let out = octilinearize(&tg, &cfg).expect("a lone edge always embeds");

        assert_eq!(out.transit_graph.num_nodes(), 2);
        assert_eq!(out.transit_graph.num_edges(), 1);
        assert_octilinear_graph!(&out.transit_graph, 1e-6);
    }
}

mod branching_and_cycles {
    use super::*;

    #[test]
    fn a_right_triangle_keeps_all_three_stops_and_edges() {
        let tg = triangle(25.0);
        let cfg = Config::new(8.0);

        let out = octilinearize(&tg, &cfg).expect("a small triangle always embeds");

        assert_eq!(out.transit_graph.num_nodes(), 3);
        assert_eq!(out.transit_graph.num_edges(), 3);
        assert_octilinear_graph!(&out.transit_graph, 1e-6);
    }

    #[test]
    fn a_five_arm_branch_point_keeps_every_arm_distinct() {
        let tg = star(5, 40.0);
        let cfg = Config::new(10.0);

        let out = octilinearize(&tg, &cfg).expect("a modest star always embeds");

        assert_eq!(out.transit_graph.num_nodes(), 6);
        assert_eq!(out.transit_graph.num_edges(), 5);
        assert_octilinear_graph!(&out.transit_graph, 1e-6);

        // Every arm must still terminate at a distinct node: no two leaves
        // were accidentally collapsed onto the same grid cell.
        let mut positions: Vec<(i64, i64)> = out
            .transit_graph
            .node_indices()
            .map(|n| {
                let p = out.transit_graph.node(n).pos;
                ((p.x * 1000.0).round() as i64, (p.y * 1000.0).round() as i64)
            })
            .collect();
        positions.sort();
        positions.dedup();
        assert_eq!(positions.len(), 6);
    }
}

mod preprocessing_and_degenerate_input {
    use super::*;

    #[test]
    fn a_short_waypoint_edge_merges_away() {
        // grid_size 10 means collapse_short_edges runs with a 5.0 threshold.
        // a (stop) -- w (no stop, degree 2) -- b (stop): the a-w edge is a
        // 0.2-unit micro-edge, w has no stop and degree > 1 on both ends, so
        // it's eligible for collapse and a absorbs w.
        let mut tg = TransitGraph::new();
        let a = tg.add_node(TransitNode::with_stop(Point::new(0.0, 0.0), StopId(0)));
        let w = tg.add_node(TransitNode::new(Point::new(0.2, 0.0)));
        let b = tg.add_node(TransitNode::with_stop(Point::new(20.0, 0.0), StopId(1)));
        let line = LineOccurrence {
            line: LineId(0),
            forward: true,
        };
        tg.add_edge(
            a,
            w,
            TransitEdge::straight(Point::new(0.0, 0.0), Point::new(0.2, 0.0), vec![line]),
        );
        tg.add_edge(
            w,
            b,
            TransitEdge::straight(Point::new(0.2, 0.0), Point::new(20.0, 0.0), vec![line]),
        );
        let cfg = Config::new(10.0);

        let out = octilinearize(&tg, &cfg).unwrap();

        assert_eq!(out.transit_graph.num_nodes(), 2);
        assert_eq!(out.transit_graph.num_edges(), 1);
    }

    #[test]
    fn two_stopped_terminal_stations_never_merge_even_when_very_close() {
        // Two genuinely distinct, separately-stopped stations joined by one
        // short edge must survive as two nodes: both have degree 1, so the
        // edge never qualifies for collapse no matter how close they are.
        let tg = single_edge(Point::new(0.0, 0.0), Point::new(0.2, 0.0));
        let cfg = Config::new(10.0);

        let out = octilinearize(&tg, &cfg).unwrap();

        assert_eq!(out.transit_graph.num_nodes(), 2);
        assert_eq!(out.transit_graph.num_edges(), 1);
    }

    #[test]
    fn an_overcrowded_single_row_grid_reports_no_embedding_found() {
        // Eight stops spaced just above the collapse threshold along one
        // axis, packed onto a grid with no padding: the single row of cells
        // is narrower than the stop count, so embedding is impossible.
        let tg = line_chain(8, 5.1);
        let mut cfg = Config::new(10.0);
        cfg.border_rad = 0.0;
        cfg.retries = 0;
        cfg.iters = 0;

        let result = octilinearize(&tg, &cfg);

        assert!(matches!(result, Err(OctiError::NoEmbeddingFound { .. })));
    }
}

mod determinism {
    use super::*;

    #[test]
    fn the_same_seed_and_input_always_produce_the_same_drawing() {
        let tg = star(6, 35.0);
        let cfg = Config::new(10.0);

        let first = octilinearize(&tg, &cfg).unwrap();
        let second = octilinearize(&tg, &cfg).unwrap();

        assert_eq!(
            first.transit_graph.to_json_string().unwrap(),
            second.transit_graph.to_json_string().unwrap()
        );
    }

    #[test]
    fn a_chain_of_stops_is_also_deterministic_across_runs() {
        let tg = line_chain(7, 12.0);
        let mut cfg = Config::new(6.0);
        cfg.seed = 42;

        let first = octilinearize(&tg, &cfg).unwrap();
        let second = octilinearize(&tg, &cfg).unwrap();

        assert_eq!(
            first.transit_graph.to_json_string().unwrap(),
            second.transit_graph.to_json_string().unwrap()
        );
    }
}
