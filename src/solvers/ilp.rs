//! ILP-based direction assignment, the `Backend::Ilp` alternative to the
//! randomized heuristic scheduler (spec §4.5's "optional ILP back-end").
//!
//! The original project's grid-consistent ILP formulation
//! (`ILPGridOptimizer`) is not among the retained original sources, so this
//! solves a smaller, genuinely ILP-shaped problem instead: for every
//! combinatorial edge, pick one of the eight octilinear directions (as a
//! binary selection, exactly one per edge) minimizing total angular
//! deviation cost from the edge's true geographic bearing, weighted by
//! length. [`crate::octilinearizer::octilinearize`] feeds the result back
//! into the ordinary router as a per-edge direction preference (a cost bias
//! on misaligned ports) rather than solving placement and routing
//! themselves as one program.

use crate::config::Penalties;
use crate::error::{OctiError, Result};
use crate::topology::comb_graph::{CombEdgeId, CombGraph};
use good_lp::{default_solver, variable, Expression, ProblemVariables, Solution, SolverModel, Variable};
use std::collections::HashMap;
use std::f64::consts::{FRAC_PI_4, PI};

/// For every non-self-loop combinatorial edge, the octilinear direction
/// (0..8, compass index per [`crate::topology::grid_graph::DIRS`]) whose
/// angular deviation from the edge's true bearing, weighted by length, is
/// cheapest under a joint exactly-one-per-edge ILP.
pub fn assign_directions(comb: &CombGraph, penalties: &Penalties) -> Result<HashMap<CombEdgeId, u8>> {
    let edges: Vec<CombEdgeId> = comb
        .edge_ids()
        .filter(|&e| comb.edge(e).from != comb.edge(e).to)
        .collect();
    if edges.is_empty() {
        return Ok(HashMap::new());
    }

    let mut vars_builder = ProblemVariables::new();
    let mut x: HashMap<(CombEdgeId, u8), Variable> = HashMap::new();
    for &eid in &edges {
        for d in 0u8..8 {
            x.insert((eid, d), vars_builder.add(variable().binary()));
        }
    }

    let mut terms: Vec<Expression> = Vec::with_capacity(edges.len() * 8);
    for &eid in &edges {
        let edge = comb.edge(eid);
        let from = comb.node(edge.from).pos;
        let to = comb.node(edge.to).pos;
        let bearing = from.angle_to(&to);
        let weight = from.dist(&to);
        for d in 0u8..8 {
            let dir_angle = d as f64 * FRAC_PI_4;
            let cost = weight * angular_cost(bearing, dir_angle, penalties);
            terms.push(cost * x[&(eid, d)]);
        }
    }
    let objective: Expression = terms.into_iter().sum();

    let mut model = vars_builder.minimise(objective).using(default_solver);
    for &eid in &edges {
        let one_hot: Expression = (0u8..8).map(|d| 1.0 * x[&(eid, d)]).sum();
        model = model.with(one_hot.eq(1.0));
    }

    let solution = model
        .solve()
        .map_err(|e| OctiError::IlpInfeasible(e.to_string()))?;

    let mut result = HashMap::with_capacity(edges.len());
    for &eid in &edges {
        let chosen = (0u8..8)
            .max_by(|&a, &b| {
                solution
                    .value(x[&(eid, a)])
                    .partial_cmp(&solution.value(x[&(eid, b)]))
                    .unwrap()
            })
            .unwrap();
        result.insert(eid, chosen);
    }
    Ok(result)
}

/// Penalty for a candidate direction `dir_angle` standing in for a true
/// bearing `bearing`, quantized to the same 45 degree buckets as
/// [`crate::topology::grid_graph::GridGraph::turn_cost`].
fn angular_cost(bearing: f64, dir_angle: f64, penalties: &Penalties) -> f64 {
    let mut diff = (bearing - dir_angle).abs() % (2.0 * PI);
    if diff > PI {
        diff = 2.0 * PI - diff;
    }
    let steps = (diff / FRAC_PI_4).round() as i32;
    match steps {
        0 => 0.0,
        1 => penalties.p_45,
        2 => penalties.p_90,
        3 => penalties.p_135,
        _ => penalties.p_180,
    }
}

#[cfg(test)]
#[path = "../../unit_tests/solvers/ilp.rs"]
mod tests;
