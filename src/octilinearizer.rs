//! The outer scheduling loop: randomized-retry initial embedding followed by
//! iterative node-relocation local search, and the public [`octilinearize`]
//! entry point (spec §4.5, grounded on the original's `Octilinearizer::draw`).

use crate::config::Config;
use crate::drawing::Drawing;
use crate::error::{OctiError, Result};
use crate::geom::Point;
use crate::node_cost::{ideal_port_distance, node_cost_vector, PlacedIncidence};
use crate::preprocessing;
use crate::router::{self, SinkCandidate};
use crate::topology::comb_graph::{CombEdgeId, CombGraph, CombNodeId};
use crate::topology::grid_graph::GridGraph;
use crate::transit_graph::{LineOccurrence, TransitEdge, TransitGraph, TransitNode};
use petgraph::graph::NodeIndex;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::HashMap;

/// A transit edge is collapsed into a single combinatorial edge once its
/// length drops below `grid_size * SHORT_EDGE_FACTOR` (spec §4.1).
const SHORT_EDGE_FACTOR: f64 = 0.5;

/// Result of a successful octilinearization run.
#[derive(Debug, Clone)]
pub struct OctiOutput {
    /// The redrawn transit graph: one node per combinatorial node (at its
    /// settled grid cell's world position), one edge per combinatorial edge
    /// (geometry following its routed grid path; lines the union of every
    /// constituent transit edge's lines).
    pub transit_graph: TransitGraph,
    /// The grid the embedding was computed on, exposed read-only for
    /// rendering or debugging.
    pub grid: GridGraph,
}

/// Redraw `tg` as an octilinear transit graph under `cfg`.
///
/// # Errors
/// Returns [`OctiError::InvalidConfig`] if `cfg` fails validation, or
/// [`OctiError::NoEmbeddingFound`] if no randomized attempt manages to route
/// every combinatorial edge within the grid.
pub fn octilinearize(tg: &TransitGraph, cfg: &Config) -> Result<OctiOutput> {
    cfg.validate()?;

    if tg.is_empty() {
        return Ok(OctiOutput {
            transit_graph: TransitGraph::new(),
            grid: GridGraph::new(
                crate::geom::BBox::of([Point::new(0.0, 0.0)]),
                cfg.grid_size,
                cfg.border_rad,
                cfg.penalties,
            ),
        });
    }

    let mut working = tg.clone();
    preprocessing::collapse_short_edges(&mut working, cfg.grid_size * SHORT_EDGE_FACTOR);
    let comb = CombGraph::build(&working);

    let hints = direction_hints(&comb, cfg)?;

    let _span = tracing::info_span!(
        "octilinearize",
        nodes = comb.num_nodes(),
        edges = comb.num_edges(),
        retries = cfg.retries,
    )
    .entered();

    let deadline = cfg.deadline.map(|d| std::time::Instant::now() + d);
    let best = run_attempts(&working, &comb, cfg, &hints, deadline);

    let (grid, drawing) = best.ok_or(OctiError::NoEmbeddingFound {
        grid_size: cfg.grid_size,
        border_rad: cfg.border_rad,
    })?;

    let transit_graph = project(&working, &comb, &drawing, &grid);
    Ok(OctiOutput {
        transit_graph,
        grid,
    })
}

/// Per-edge preferred octilinear direction, computed once up front when
/// `cfg.backend` is [`crate::config::Backend::Ilp`]; empty for the
/// heuristic backend, in which case routing is unbiased.
fn direction_hints(comb: &CombGraph, cfg: &Config) -> Result<HashMap<CombEdgeId, u8>> {
    match cfg.backend {
        crate::config::Backend::Heuristic => Ok(HashMap::new()),
        #[cfg(feature = "ilp-solver")]
        crate::config::Backend::Ilp => crate::solvers::ilp::assign_directions(comb, &cfg.penalties),
        #[cfg(not(feature = "ilp-solver"))]
        crate::config::Backend::Ilp => Err(OctiError::InvalidConfig(
            "Backend::Ilp requires the \"ilp-solver\" feature".to_string(),
        )),
    }
}

/// Extra per-port cost discouraging ports misaligned with `hint` (the edge's
/// ILP-preferred direction, from this node's perspective — already flipped
/// to the incoming side for a `to`-node hint by the caller).
fn direction_bias(hint: Option<u8>, penalties: &crate::config::Penalties) -> [f64; 8] {
    let mut bias = [0.0; 8];
    if let Some(h) = hint {
        for (port, slot) in bias.iter_mut().enumerate() {
            // turn_cost_for treats its arguments as a bend's in/out ports, where
            // matching ports are a U-turn (p_180) and opposite ports are
            // straight through (0.0) — the inverse of what alignment-with-hint
            // needs here, so the candidate port is queried against the hint's
            // opposite side.
            let opposite = (port as u8 + 4) % 8;
            *slot = crate::topology::grid_graph::turn_cost_for(h, opposite, penalties);
        }
    }
    bias
}

/// Keep whichever drawing scores lower; `candidate` wins ties against an
/// absent `best` but not against an equally-scored existing one (the
/// randomized retries only replace the incumbent on strict improvement).
fn pick_better(
    best: Option<(GridGraph, Drawing)>,
    candidate: (GridGraph, Drawing),
) -> (GridGraph, Drawing) {
    match best {
        Some((bg, bd)) if bd.score() <= candidate.1.score() => (bg, bd),
        _ => candidate,
    }
}

/// Derive an attempt's RNG seed from the base seed so every attempt is
/// reproducible on its own, independent of how attempts are scheduled
/// across workers or how many complete before a deadline cuts the run
/// short.
fn attempt_seed(base_seed: u64, attempt: u64) -> u64 {
    base_seed ^ attempt.wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Run `cfg.retries + 1` randomized attempts and keep the best, fanning
/// them across `cfg.worker_threads` workers via `std::thread::scope` when
/// more than one is configured. Each worker builds its own `GridGraph` per
/// attempt (never shared across workers) and folds its own contiguous
/// block of attempt indices with [`pick_better`]; the blocks (and the
/// final merge across workers) are visited in increasing attempt-index
/// order, so the tie-break ("earlier attempt wins") and the final result
/// match the single-threaded fold exactly, regardless of `worker_threads`
/// or actual completion order. A `deadline` is checked between attempts,
/// never before a worker's first, so an already-elapsed deadline still
/// yields at least one attempt per worker rather than an empty result.
fn run_attempts(
    tg: &TransitGraph,
    comb: &CombGraph,
    cfg: &Config,
    hints: &HashMap<CombEdgeId, u8>,
    deadline: Option<std::time::Instant>,
) -> Option<(GridGraph, Drawing)> {
    let num_attempts = cfg.retries as u64 + 1;
    let workers = (cfg.worker_threads as u64).clamp(1, num_attempts);
    let chunk = (num_attempts + workers - 1) / workers;

    let worker_bests: Vec<Option<(GridGraph, Drawing)>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|w| {
                let start = w * chunk;
                let end = (start + chunk).min(num_attempts);
                scope.spawn(move || {
                    let mut local: Option<(GridGraph, Drawing)> = None;
                    let mut attempt = start;
                    // Every non-empty block always completes its first
                    // attempt before consulting the deadline, so an
                    // already-elapsed deadline can't starve the search
                    // entirely.
                    loop {
                        if attempt >= end {
                            break;
                        }
                        let _span = tracing::debug_span!("attempt", index = attempt).entered();
                        let mut rng = StdRng::seed_from_u64(attempt_seed(cfg.seed, attempt));
                        match run_attempt(tg, comb, cfg, hints, &mut rng) {
                            Some(result) => {
                                tracing::debug!(score = result.1.score(), "attempt succeeded");
                                local = Some(pick_better(local, result));
                            }
                            None => tracing::debug!("attempt failed to route every edge"),
                        }
                        attempt += 1;
                        if deadline.is_some_and(|dl| std::time::Instant::now() >= dl) {
                            break;
                        }
                    }
                    local
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let mut best: Option<(GridGraph, Drawing)> = None;
    for worker_best in worker_bests {
        if let Some(result) = worker_best {
            best = Some(pick_better(best, result));
        }
    }
    best
}

/// One randomized initial embedding plus its relocation sweeps: a fresh
/// grid, a shuffled edge processing order, a greedy route-and-place pass
/// over every combinatorial edge and isolated node, then local search.
/// Returns `None` if any edge could not be routed.
fn run_attempt(
    tg: &TransitGraph,
    comb: &CombGraph,
    cfg: &Config,
    hints: &HashMap<CombEdgeId, u8>,
    rng: &mut StdRng,
) -> Option<(GridGraph, Drawing)> {
    let bbox = tg.bbox()?;
    let mut grid = GridGraph::new(bbox, cfg.grid_size, cfg.border_rad, cfg.penalties);
    let mut drawing = Drawing::new();

    let order = build_edge_order(comb, rng);
    for eid in order {
        route_and_commit(comb, &mut grid, &mut drawing, eid, cfg, hints).ok()?;
    }

    // Nodes with no incident edges (isolated stops) never get placed above.
    for node in comb.node_ids() {
        if drawing.is_node_placed(node) {
            continue;
        }
        let pos = comb.node(node).pos;
        let (x, y) = grid.nearest_cell(pos);
        if !grid.is_settled(x, y) {
            drawing.place_node(&mut grid, node, x, y);
        } else {
            let (cx, cy) = *find_candidate_cells(&grid, pos, cfg).first()?;
            drawing.place_node(&mut grid, node, cx, cy);
        }
    }

    run_relocation(comb, &mut grid, &mut drawing, cfg);
    Some((grid, drawing))
}

/// Determine a processing order for combinatorial edges via a randomized
/// depth-first walk per connected component: each node's incident edges are
/// shuffled before being pushed, so repeated calls with an advancing RNG
/// produce different (but still locality-preserving) orders. Stands in for
/// the original's priority-queue-plus-dangling-stack scheduler.
fn build_edge_order(comb: &CombGraph, rng: &mut StdRng) -> Vec<CombEdgeId> {
    let mut order = Vec::with_capacity(comb.num_edges());
    let mut edge_seen = vec![false; comb.num_edges()];
    let mut node_seen = vec![false; comb.num_nodes()];

    for start in comb.node_ids() {
        if node_seen[start.0] {
            continue;
        }
        let mut stack = vec![start];
        node_seen[start.0] = true;
        while let Some(n) = stack.pop() {
            let mut incident: Vec<CombEdgeId> = comb.node(n).edge_order().to_vec();
            incident.shuffle(rng);
            for e in incident {
                if edge_seen[e.0] {
                    continue;
                }
                edge_seen[e.0] = true;
                order.push(e);
                let other = comb.other_end(e, n);
                if !node_seen[other.0] {
                    node_seen[other.0] = true;
                    stack.push(other);
                }
            }
        }
    }
    order
}

/// Per-port cost vector a node's already-embedded incident edges impose on
/// routing one more edge incident to it (see [`crate::node_cost`]).
fn node_port_cost(
    comb: &CombGraph,
    drawing: &Drawing,
    node: CombNodeId,
    new_edge: CombEdgeId,
    cfg: &Config,
) -> [f64; 8] {
    let cnode = comb.node(node);
    let order = cnode.edge_order();
    let Some(new_pos) = order.iter().position(|&e| e == new_edge) else {
        return [0.0; 8];
    };
    let degree = cnode.degree();
    let placed: Vec<PlacedIncidence> = drawing
        .incident_ports(node)
        .into_iter()
        .filter_map(|(eid, port)| {
            let other_pos = order.iter().position(|&e| e == eid)?;
            Some(PlacedIncidence {
                port,
                ideal_port_distance: ideal_port_distance(new_pos, other_pos, degree),
            })
        })
        .collect();
    node_cost_vector(&placed, &cfg.penalties)
}

/// Candidate cells `node` could attach to for `new_edge`: its current cell
/// if already placed, otherwise every unsettled cell within a growing radius
/// of its true geographic position (spec §4.3's candidate search). Callers
/// routing an edge between two unsettled nodes must run both endpoints'
/// results through [`disambiguate_candidates`] before routing, since this
/// function has no visibility into the other endpoint's search.
fn build_candidates(
    comb: &CombGraph,
    grid: &GridGraph,
    drawing: &Drawing,
    node: CombNodeId,
    new_edge: CombEdgeId,
    cfg: &Config,
    hint: Option<u8>,
) -> (Vec<SinkCandidate>, bool) {
    if let Some((x, y)) = drawing.node_center(node) {
        let port_cost = node_port_cost(comb, drawing, node, new_edge, cfg);
        (
            vec![SinkCandidate {
                x,
                y,
                base_offset: 0.0,
                port_cost,
            }],
            true,
        )
    } else {
        let pos = comb.node(node).pos;
        let bias = direction_bias(hint, &cfg.penalties);
        let cells = find_candidate_cells(grid, pos, cfg);
        let cands = cells
            .into_iter()
            .map(|(x, y)| SinkCandidate {
                x,
                y,
                base_offset: sink_offset(grid, (x, y), pos, &cfg.penalties),
                port_cost: bias,
            })
            .collect();
        (cands, false)
    }
}

/// Sink-opening cost offset for attaching to `(x, y)` instead of `node`'s
/// true geographic position: `c_0 + floor(d / cellSize) * penPerGrid` (spec
/// §4.4's "Sink opening", `Octilinearizer.cpp:304-322`'s `costOffsetFrom`).
fn sink_offset(grid: &GridGraph, cell: (usize, usize), pos: Point, penalties: &crate::config::Penalties) -> f64 {
    let d = grid.world_pos(cell.0, cell.1).dist(&pos);
    penalties.c0() + (d / grid.cell_size()).floor() * penalties.pen_per_grid()
}

/// Remove any cell common to both endpoints' candidate sets, assigning it to
/// whichever endpoint's true geographic position is nearer (spec §4.4's
/// Voronoi partition, matching `getRtPair`'s `set_intersection`/
/// `set_difference` in `Octilinearizer.cpp:454-479`). `base_offset` is
/// monotonic in distance from the node to the cell (see [`sink_offset`]), so
/// comparing it directly tells which endpoint is nearer without
/// recomputing geometry. Candidates for an already-settled endpoint (the
/// singleton `base_offset == 0.0` case) are left untouched; only
/// independently-searched unsettled sets can collide.
fn disambiguate_candidates(
    from_placed: bool,
    mut from_cands: Vec<SinkCandidate>,
    to_placed: bool,
    mut to_cands: Vec<SinkCandidate>,
) -> (Vec<SinkCandidate>, Vec<SinkCandidate>) {
    if from_placed || to_placed {
        return (from_cands, to_cands);
    }
    let shared: Vec<(usize, usize)> = from_cands
        .iter()
        .filter(|f| to_cands.iter().any(|t| t.x == f.x && t.y == f.y))
        .map(|c| (c.x, c.y))
        .collect();
    for (cx, cy) in shared {
        let from_dist = from_cands.iter().find(|c| (c.x, c.y) == (cx, cy)).unwrap().base_offset;
        let to_dist = to_cands.iter().find(|c| (c.x, c.y) == (cx, cy)).unwrap().base_offset;
        if from_dist <= to_dist {
            to_cands.retain(|c| (c.x, c.y) != (cx, cy));
        } else {
            from_cands.retain(|c| (c.x, c.y) != (cx, cy));
        }
    }
    (from_cands, to_cands)
}

/// Grow the search radius from `radius_grow_start` to `radius_grow_max`
/// (multiples of cell size) until at least one unsettled cell is found.
fn find_candidate_cells(grid: &GridGraph, pos: Point, cfg: &Config) -> Vec<(usize, usize)> {
    let mut radius = cfg.radius_grow_start * cfg.grid_size;
    let max_radius = cfg.radius_grow_max * cfg.grid_size;
    loop {
        let cells = grid.unsettled_within(pos, radius);
        if !cells.is_empty() || radius >= max_radius {
            return cells;
        }
        radius = (radius * 1.5).min(max_radius);
    }
}

/// Route one combinatorial edge and commit it (and, if newly needed, its
/// endpoints) to `drawing`/`grid`.
fn route_and_commit(
    comb: &CombGraph,
    grid: &mut GridGraph,
    drawing: &mut Drawing,
    eid: CombEdgeId,
    cfg: &Config,
    hints: &HashMap<CombEdgeId, u8>,
) -> Result<()> {
    let edge = comb.edge(eid);
    let from_hint = hints.get(&eid).copied();
    let to_hint = from_hint.map(|h| (h + 4) % 8);
    let (from_cands, from_placed) =
        build_candidates(comb, grid, drawing, edge.from, eid, cfg, from_hint);
    let (to_cands, to_placed) = build_candidates(comb, grid, drawing, edge.to, eid, cfg, to_hint);
    let (from_cands, to_cands) =
        disambiguate_candidates(from_placed, from_cands, to_placed, to_cands);

    let infeasible = || OctiError::NoEmbeddingFound {
        grid_size: cfg.grid_size,
        border_rad: cfg.border_rad,
    };

    if from_cands.is_empty() || to_cands.is_empty() {
        return Err(infeasible());
    }

    let cutoff = router::default_cutoff(grid, &from_cands, &to_cands);
    let outcome =
        router::route(grid, &from_cands, &to_cands, Some(cutoff)).ok_or_else(infeasible)?;

    let from_offset = from_cands
        .iter()
        .find(|c| (c.x, c.y) == outcome.from_cell)
        .map_or(0.0, |c| c.base_offset);
    let to_offset = to_cands
        .iter()
        .find(|c| (c.x, c.y) == outcome.to_cell)
        .map_or(0.0, |c| c.base_offset);
    let intrinsic_cost = outcome.cost - from_offset - to_offset;

    if !from_placed {
        drawing.place_node(grid, edge.from, outcome.from_cell.0, outcome.from_cell.1);
    }
    if !to_placed {
        drawing.place_node(grid, edge.to, outcome.to_cell.0, outcome.to_cell.1);
    }
    drawing.place_edge(grid, eid, edge.from, edge.to, outcome.steps, intrinsic_cost);
    Ok(())
}

/// Run up to `cfg.iters` relocation sweeps, stopping once a sweep's total
/// improvement drops below `cfg.convergence_eps` (spec §4.5).
fn run_relocation(comb: &CombGraph, grid: &mut GridGraph, drawing: &mut Drawing, cfg: &Config) {
    for sweep in 0..cfg.iters {
        let _span = tracing::debug_span!("sweep", index = sweep).entered();
        let improvement = relocation_sweep(comb, grid, drawing, cfg);
        tracing::trace!(improvement, score = drawing.score(), "sweep complete");
        if improvement < cfg.convergence_eps {
            break;
        }
    }
}

/// Try relocating every placed node, in ascending id order, to the best of
/// its current cell and its eight neighbors. Returns the sweep's total
/// score improvement (always `>= 0`).
fn relocation_sweep(
    comb: &CombGraph,
    grid: &mut GridGraph,
    drawing: &mut Drawing,
    cfg: &Config,
) -> f64 {
    let mut total_improvement = 0.0;
    for node in comb.node_ids() {
        if !drawing.is_node_placed(node) || comb.node(node).degree() == 0 {
            continue;
        }
        total_improvement += try_relocate_node(comb, grid, drawing, node, cfg);
    }
    total_improvement
}

/// Attempt the 9-position relocation of a single node, committing whichever
/// position (its original included) yields the lowest total cost for its
/// incident edges. Returns the score improvement achieved (`old - new`,
/// `>= 0` since the original position is always a valid fallback).
fn try_relocate_node(
    comb: &CombGraph,
    grid: &mut GridGraph,
    drawing: &mut Drawing,
    node: CombNodeId,
    cfg: &Config,
) -> f64 {
    let (ox, oy) = drawing
        .node_center(node)
        .expect("caller checked is_node_placed");
    let incident_edges: Vec<CombEdgeId> = comb.node(node).edge_order().to_vec();
    let old_cost: f64 = incident_edges
        .iter()
        .filter_map(|&e| drawing.edge_cost(e))
        .sum();

    drawing.erase_incident(grid, node);
    drawing.unplace_node(grid, node);

    let mut candidates = vec![(ox, oy)];
    for dir in 0u8..8 {
        if let Some((nx, ny)) = grid.neighbor(ox, oy, dir) {
            if !grid.is_settled(nx, ny) {
                candidates.push((nx, ny));
            }
        }
    }

    let mut trial_costs: Vec<((usize, usize), f64)> = Vec::new();
    for &(cx, cy) in &candidates {
        if let Some(cost) = try_place_at(comb, grid, drawing, node, &incident_edges, cx, cy, cfg) {
            trial_costs.push(((cx, cy), cost));
        }
    }

    let winner = trial_costs
        .iter()
        .min_by(|a, b| {
            a.1.partial_cmp(&b.1)
                .unwrap()
                .then_with(|| (a.0 .1, a.0 .0).cmp(&(b.0 .1, b.0 .0)))
        })
        .copied()
        .unwrap_or(((ox, oy), old_cost));

    let committed = commit_placement(comb, grid, drawing, node, &incident_edges, winner.0, cfg);
    debug_assert!(committed.is_some(), "the winning candidate must be feasible");

    (old_cost - winner.1).max(0.0)
}

/// Tentatively place `node` at `(cx, cy)` and route every edge in
/// `incident_edges`, then roll everything back. Returns the total cost if
/// every edge routed successfully.
#[allow(clippy::too_many_arguments)]
fn try_place_at(
    comb: &CombGraph,
    grid: &mut GridGraph,
    drawing: &mut Drawing,
    node: CombNodeId,
    incident_edges: &[CombEdgeId],
    cx: usize,
    cy: usize,
    cfg: &Config,
) -> Option<f64> {
    let result = place_and_route(comb, grid, drawing, node, incident_edges, cx, cy, cfg);
    let placed_edges: Vec<CombEdgeId> = incident_edges
        .iter()
        .copied()
        .filter(|&e| drawing.is_edge_placed(e))
        .collect();
    for eid in placed_edges {
        drawing.erase_edge(grid, eid);
    }
    drawing.unplace_node(grid, node);
    result
}

/// Place `node` at `pos` for real. Only called with a position
/// `try_place_at` already confirmed feasible.
#[allow(clippy::too_many_arguments)]
fn commit_placement(
    comb: &CombGraph,
    grid: &mut GridGraph,
    drawing: &mut Drawing,
    node: CombNodeId,
    incident_edges: &[CombEdgeId],
    pos: (usize, usize),
    cfg: &Config,
) -> Option<f64> {
    place_and_route(comb, grid, drawing, node, incident_edges, pos.0, pos.1, cfg)
}

/// Settle `node` at `(cx, cy)` and route every edge in `incident_edges`
/// against its (already-placed) other endpoint. Returns the total routed
/// cost, or `None` if any edge could not be routed (in which case whatever
/// prefix did route is left committed — the caller is responsible for
/// rolling back via `erase`/`unplace`).
#[allow(clippy::too_many_arguments)]
fn place_and_route(
    comb: &CombGraph,
    grid: &mut GridGraph,
    drawing: &mut Drawing,
    node: CombNodeId,
    incident_edges: &[CombEdgeId],
    cx: usize,
    cy: usize,
    cfg: &Config,
) -> Option<f64> {
    drawing.place_node(grid, node, cx, cy);
    let mut total = 0.0;
    for &eid in incident_edges {
        let edge = comb.edge(eid);
        let other = comb.other_end(eid, node);
        let (ox2, oy2) = drawing.node_center(other)?;
        let node_is_from = edge.from == node;

        let this_cost = node_port_cost(comb, drawing, node, eid, cfg);
        let other_cost = node_port_cost(comb, drawing, other, eid, cfg);

        let (from_xy, from_cost, to_xy, to_cost) = if node_is_from {
            ((cx, cy), this_cost, (ox2, oy2), other_cost)
        } else {
            ((ox2, oy2), other_cost, (cx, cy), this_cost)
        };

        let from_cand = [SinkCandidate {
            x: from_xy.0,
            y: from_xy.1,
            base_offset: 0.0,
            port_cost: from_cost,
        }];
        let to_cand = [SinkCandidate {
            x: to_xy.0,
            y: to_xy.1,
            base_offset: 0.0,
            port_cost: to_cost,
        }];

        let cutoff = router::default_cutoff(grid, &from_cand, &to_cand);
        let outcome = router::route(grid, &from_cand, &to_cand, Some(cutoff))?;
        total += outcome.cost;
        drawing.place_edge(grid, eid, edge.from, edge.to, outcome.steps, outcome.cost);
    }
    Some(total)
}

/// Project a finished drawing back into transit-graph shape: one node per
/// combinatorial node at its settled cell's world position, one edge per
/// combinatorial edge carrying the union of its chain's lines and geometry
/// following the routed grid path. Intermediate degree-2 waypoint nodes the
/// combinatorial graph contracted away are not reconstructed — only stops
/// and branch points survive as nodes in the redrawn graph.
fn project(tg: &TransitGraph, comb: &CombGraph, drawing: &Drawing, grid: &GridGraph) -> TransitGraph {
    let mut out = TransitGraph::new();
    let mut node_map: HashMap<CombNodeId, NodeIndex> = HashMap::new();

    for node_id in comb.node_ids() {
        let cnode = comb.node(node_id);
        let pos = match drawing.node_center(node_id) {
            Some((x, y)) => grid.world_pos(x, y),
            None => cnode.pos,
        };
        let stops = tg.node(cnode.transit_node).stops.clone();
        let idx = out.add_node(TransitNode { pos, stops });
        node_map.insert(node_id, idx);
    }

    for edge_id in comb.edge_ids() {
        let cedge = comb.edge(edge_id);
        let a = node_map[&cedge.from];
        let b = node_map[&cedge.to];

        let polyline = match drawing.edge_path(edge_id) {
            Some(steps) if !steps.is_empty() => {
                steps.iter().map(|s| grid.world_pos(s.x, s.y)).collect()
            }
            _ => vec![
                out.node(a).pos,
                out.node(b).pos,
            ],
        };

        let mut lines: Vec<LineOccurrence> = Vec::new();
        for &(te, forward) in &cedge.transit_edges {
            for occ in &tg.edge(te).lines {
                if lines.iter().any(|l| l.line == occ.line) {
                    continue;
                }
                let effective_forward = if forward { occ.forward } else { !occ.forward };
                lines.push(LineOccurrence {
                    line: occ.line,
                    forward: effective_forward,
                });
            }
        }

        out.add_edge(a, b, TransitEdge { polyline, lines });
    }

    out
}

#[cfg(test)]
#[path = "../unit_tests/octilinearizer.rs"]
mod tests;
