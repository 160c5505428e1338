//! Shortest-path routing of one combinatorial edge across the octilinear
//! lattice (spec §4.3/§5).
//!
//! The lattice is treated as one undirected graph over `Port(x, y, dir)`
//! nodes: a grid edge connects `Port(x, y, d)` to `Port(nx, ny, (d+4)%8)` of
//! the neighbor in direction `d`; a bend edge connects any two ports of the
//! same cell. [`GridGraph::turn_cost`] is symmetric in its two arguments, so
//! this is a genuinely undirected shortest-path problem and a plain
//! Dijkstra search (no source/target distinction beyond which ports are
//! seeded) is correct. A `cutoff` prunes the search once the frontier's
//! minimum distance exceeds it, standing in for the original's admissible
//! A* heuristic — correct, if not as fast, since Dijkstra over non-negative
//! weights already explores nodes in non-decreasing cost order.

use crate::topology::grid_graph::{GridGraph, GridStep};
use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

/// Calibration constant for [`default_cutoff`]'s search-budget slack: a
/// routed edge's total cost is not allowed to exceed `PEN_PER_GRID_SLACK`
/// times the cheapest possible per-step cost times the Chebyshev distance
/// (in cells) between its candidate cells. Kept as the literal `3` rather
/// than re-derived from the penalty set — a tuned slack factor, not a
/// closed-form bound.
pub const PEN_PER_GRID_SLACK: f64 = 3.0;

/// A generous cutoff for [`route`]: `PEN_PER_GRID_SLACK` times the
/// worst-case Chebyshev distance (in cells) between any `from` candidate
/// and any `to` candidate, times a per-step budget that assumes every step
/// pays the pricier of the two grid-edge penalties *and* a full-reversal
/// turn. Deliberately loose — it's a search-budget cutoff, not a bound
/// derived from the true cheapest path — so it prunes runaway search
/// without risking pruning away the true optimum.
pub fn default_cutoff(grid: &GridGraph, from: &[SinkCandidate], to: &[SinkCandidate]) -> f64 {
    let mut max_dist = 0.0f64;
    for a in from {
        for b in to {
            let dx = (a.x as f64 - b.x as f64).abs();
            let dy = (a.y as f64 - b.y as f64).abs();
            max_dist = max_dist.max(dx.max(dy));
        }
    }
    let penalties = grid.penalties();
    let worst_step = penalties.horizontal_pen.max(penalties.diagonal_pen) + penalties.p_180;
    max_dist.max(1.0) * worst_step * PEN_PER_GRID_SLACK
}

/// One cell a path may originate or terminate at, together with the
/// per-port costs of doing so: `base_offset` (e.g. geographic placement
/// cost) plus `port_cost` (topological/spacing/bend costs from
/// [`crate::node_cost`]).
#[derive(Debug, Clone, Copy)]
pub struct SinkCandidate {
    pub x: usize,
    pub y: usize,
    pub base_offset: f64,
    pub port_cost: [f64; 8],
}

/// A successfully routed path.
#[derive(Debug, Clone)]
pub struct RouteOutcome {
    pub from_cell: (usize, usize),
    pub to_cell: (usize, usize),
    pub steps: Vec<GridStep>,
    pub cost: f64,
}

fn encode(grid: &GridGraph, x: usize, y: usize, dir: u8) -> usize {
    (y * grid.width() + x) * 8 + dir as usize
}

fn decode(grid: &GridGraph, code: usize) -> (usize, usize, u8) {
    let cell = code / 8;
    let dir = (code % 8) as u8;
    (cell % grid.width(), cell / grid.width(), dir)
}

/// Find the cheapest path from any of `from` to any of `to`, opening both
/// candidate sets as ephemeral sinks for the duration of the search and
/// closing them again before returning (success or failure).
pub fn route(
    grid: &mut GridGraph,
    from: &[SinkCandidate],
    to: &[SinkCandidate],
    cutoff: Option<f64>,
) -> Option<RouteOutcome> {
    for c in from.iter().chain(to.iter()) {
        grid.open_node_sink(c.x, c.y, c.base_offset);
        grid.add_sink_cost(c.x, c.y, c.port_cost);
    }

    let result = search(grid, from, to, cutoff);

    for c in from.iter().chain(to.iter()) {
        grid.close_node_sink(c.x, c.y);
    }

    result
}

fn search(
    grid: &GridGraph,
    from: &[SinkCandidate],
    to: &[SinkCandidate],
    cutoff: Option<f64>,
) -> Option<RouteOutcome> {
    let target_cells: HashMap<(usize, usize), ()> =
        to.iter().map(|c| ((c.x, c.y), ())).collect();

    let mut dist: HashMap<usize, f64> = HashMap::new();
    let mut prev: HashMap<usize, usize> = HashMap::new();
    let mut heap: BinaryHeap<Reverse<(OrderedFloat<f64>, usize)>> = BinaryHeap::new();

    for c in from {
        for port in 0u8..8 {
            if let Some(cost) = grid.sink_entry_cost(c.x, c.y, port) {
                let code = encode(grid, c.x, c.y, port);
                if cost < *dist.get(&code).unwrap_or(&f64::INFINITY) {
                    dist.insert(code, cost);
                    heap.push(Reverse((OrderedFloat(cost), code)));
                }
            }
        }
    }

    let mut goal: Option<(usize, f64)> = None;

    while let Some(Reverse((OrderedFloat(d), code))) = heap.pop() {
        if d > *dist.get(&code).unwrap_or(&f64::INFINITY) {
            continue;
        }
        if let Some(cutoff) = cutoff {
            if d > cutoff {
                break;
            }
        }
        let (x, y, port) = decode(grid, code);

        if target_cells.contains_key(&(x, y)) {
            if let Some(entry) = grid.sink_entry_cost(x, y, port) {
                let total = d + entry;
                let better = match goal {
                    Some((_, best)) => total < best,
                    None => true,
                };
                if better {
                    goal = Some((code, total));
                }
            }
        }

        // Grid-edge neighbors.
        if grid.grid_edge_open(x, y, port) {
            if let Some((nx, ny)) = grid.neighbor(x, y, port) {
                let opp = (port + 4) % 8;
                let ncode = encode(grid, nx, ny, opp);
                let ncost = d + grid.step_cost(port);
                if ncost < *dist.get(&ncode).unwrap_or(&f64::INFINITY) {
                    dist.insert(ncode, ncost);
                    prev.insert(ncode, code);
                    heap.push(Reverse((OrderedFloat(ncost), ncode)));
                }
            }
        }

        // Bend-edge neighbors (same cell, other ports).
        for out_port in 0u8..8 {
            if out_port == port {
                continue;
            }
            if !grid.bend_edge_open(x, y, port, out_port) {
                continue;
            }
            let ncode = encode(grid, x, y, out_port);
            let ncost = d + grid.turn_cost(port, out_port);
            if ncost < *dist.get(&ncode).unwrap_or(&f64::INFINITY) {
                dist.insert(ncode, ncost);
                prev.insert(ncode, code);
                heap.push(Reverse((OrderedFloat(ncost), ncode)));
            }
        }
    }

    let (goal_code, cost) = goal?;
    let steps = reconstruct(grid, &prev, goal_code);
    let from_cell = {
        let first_code = *path_codes(&prev, goal_code).last().unwrap();
        let (x, y, _) = decode(grid, first_code);
        (x, y)
    };
    let (tx, ty, _) = decode(grid, goal_code);
    Some(RouteOutcome {
        from_cell,
        to_cell: (tx, ty),
        steps,
        cost,
    })
}

/// Walk `prev` back from `goal_code` to a source node, returning the node
/// codes in root-to-goal order (source first).
fn path_codes(prev: &HashMap<usize, usize>, goal_code: usize) -> Vec<usize> {
    let mut codes = vec![goal_code];
    let mut cur = goal_code;
    while let Some(&p) = prev.get(&cur) {
        codes.push(p);
        cur = p;
    }
    codes.reverse();
    codes
}

/// Convert the node-code path into a `GridStep` sequence, merging consecutive
/// same-cell port visits (bend edges) into a single step's in/out ports.
fn reconstruct(grid: &GridGraph, prev: &HashMap<usize, usize>, goal_code: usize) -> Vec<GridStep> {
    let codes = path_codes(prev, goal_code);
    let mut steps: Vec<GridStep> = Vec::new();

    for &code in &codes {
        let (x, y, port) = decode(grid, code);
        match steps.last_mut() {
            Some(last) if last.x == x && last.y == y => {
                last.out_port = Some(port);
            }
            _ => steps.push(GridStep {
                x,
                y,
                in_port: Some(port),
                out_port: None,
            }),
        }
    }

    steps
}

#[cfg(test)]
#[path = "../unit_tests/router.rs"]
mod tests;
