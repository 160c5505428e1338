//! `GridGraph` — the octilinear lattice every combinatorial edge is routed
//! over (spec §3, §4.3).
//!
//! Each cell `(x, y)` has one center and eight ports, indexed 0..7 in 45
//! degree steps starting at compass east (`DIRS[0] = E`). Three edge kinds
//! exist conceptually:
//!
//! - **grid edges**: `Port(x, y, d)` to `Port(nx, ny, d)` of the neighboring
//!   cell in direction `d` — one step of travel.
//! - **port (bend) edges**: `Port(x, y, d1)` to `Port(x, y, d2)` of the same
//!   cell — changing heading while passing through a center. Cost is a
//!   turn penalty keyed by the angle between the heading you arrived with
//!   and the heading you leave with (0 when `d1`/`d2` are opposite, i.e. a
//!   straight pass-through; `p_180` when `d1 == d2`, a dead-end reversal).
//! - **sink edges**: ephemeral, opened only for the duration of one router
//!   call, connecting a virtual source/target directly into a center's
//!   ports with a per-port additive offset.
//!
//! This module owns the lattice and its settlement/closure bookkeeping; it
//! has no knowledge of [`crate::topology::comb_graph::CombGraph`] or
//! [`crate::drawing::Drawing`] — the per-port topological/spacing/bend cost
//! vectors those higher layers inject are plain `[f64; 8]` arrays added to a
//! cell's open sink (see [`crate::node_cost`]).

use crate::config::Penalties;
use crate::geom::{BBox, Point};
use crate::topology::comb_graph::CombNodeId;

/// The eight compass directions, 45 degrees apart, as `(dx, dy)` unit steps.
/// Index 0 is east; indices increase councounter-clockwise.
pub const DIRS: [(i32, i32); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// `true` for the four axial directions (E, N, W, S), `false` for diagonals.
pub fn is_axial(dir: u8) -> bool {
    dir % 2 == 0
}

/// The turn cost between two ports, independent of any particular
/// `GridGraph` instance — shared by [`GridGraph::turn_cost`] and the ILP
/// back-end's direction bias.
pub fn turn_cost_for(in_port: u8, out_port: u8, penalties: &Penalties) -> f64 {
    let delta = (out_port + 8 - in_port) % 8;
    let angle_steps = delta.min(8 - delta);
    match angle_steps {
        0 => penalties.p_180,
        1 => penalties.p_135,
        2 => penalties.p_90,
        3 => penalties.p_45,
        4 => 0.0,
        _ => unreachable!("delta is taken mod 8"),
    }
}

/// Per-cell mutable state.
#[derive(Debug, Clone)]
struct CellState {
    settled: Option<CombNodeId>,
    used_port: [bool; 8],
    /// Grid edge toward the neighbor in direction `d` is unusable: either it
    /// was claimed by a previously committed path's port, or it was closed
    /// as a crossing-prevention measure by [`GridGraph::settle_edg`].
    closed_grid_edge: [bool; 8],
    /// Per-port cost additions written once this node is settled (spec
    /// §4.3's "per-node cost additions").
    cost_vec: [f64; 8],
    /// `Some` while this cell is an active router source/target; `None`
    /// otherwise. Every `open` must be paired with a `close` (spec
    /// invariant).
    sink_offset: Option<[f64; 8]>,
}

impl CellState {
    fn new() -> Self {
        Self {
            settled: None,
            used_port: [false; 8],
            closed_grid_edge: [false; 8],
            cost_vec: [0.0; 8],
            sink_offset: None,
        }
    }
}

/// The octilinear lattice. Created once per routing attempt.
#[derive(Debug, Clone)]
pub struct GridGraph {
    w: usize,
    h: usize,
    cell_size: f64,
    origin: Point,
    penalties: Penalties,
    cells: Vec<CellState>,
}

/// One step of a routed path: the cell it passes through and the ports used
/// entering and leaving it (`None` for the very first/last endpoint side
/// with no predecessor/successor).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridStep {
    pub x: usize,
    pub y: usize,
    pub in_port: Option<u8>,
    pub out_port: Option<u8>,
}

impl GridGraph {
    /// Build a grid covering `bbox` padded by `border_rad` cells on every
    /// side, with the given cell size and penalty policy.
    pub fn new(bbox: BBox, cell_size: f64, border_rad: f64, penalties: Penalties) -> Self {
        let pad = border_rad * cell_size;
        let padded = bbox.padded(pad);
        let w = ((padded.width() / cell_size).ceil() as usize + 1).max(1);
        let h = ((padded.height() / cell_size).ceil() as usize + 1).max(1);
        Self {
            w,
            h,
            cell_size,
            origin: padded.min,
            penalties,
            cells: vec![CellState::new(); w * h],
        }
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    pub fn penalties(&self) -> &Penalties {
        &self.penalties
    }

    fn idx(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }

    pub fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h
    }

    /// World-space position of a cell's center.
    pub fn world_pos(&self, x: usize, y: usize) -> Point {
        Point::new(
            self.origin.x + (x as f64 + 0.5) * self.cell_size,
            self.origin.y + (y as f64 + 0.5) * self.cell_size,
        )
    }

    /// The cell whose center is nearest to `p`, clamped to the grid bounds.
    pub fn nearest_cell(&self, p: Point) -> (usize, usize) {
        let fx = (p.x - self.origin.x) / self.cell_size - 0.5;
        let fy = (p.y - self.origin.y) / self.cell_size - 0.5;
        let x = fx.round().clamp(0.0, (self.w - 1) as f64) as usize;
        let y = fy.round().clamp(0.0, (self.h - 1) as f64) as usize;
        (x, y)
    }

    /// Neighbor of `(x, y)` in direction `dir`, if in bounds.
    pub fn neighbor(&self, x: usize, y: usize, dir: u8) -> Option<(usize, usize)> {
        let (dx, dy) = DIRS[dir as usize];
        let nx = x as i64 + dx as i64;
        let ny = y as i64 + dy as i64;
        if self.in_bounds(nx, ny) {
            Some((nx as usize, ny as usize))
        } else {
            None
        }
    }

    /// All cells whose center lies within `radius` of `p` and that are not
    /// currently settled, sorted by `(y, x)` for determinism.
    pub fn unsettled_within(&self, p: Point, radius: f64) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        let cells = (radius / self.cell_size).ceil() as i64 + 1;
        let (cx, cy) = self.nearest_cell(p);
        for dy in -cells..=cells {
            for dx in -cells..=cells {
                let x = cx as i64 + dx;
                let y = cy as i64 + dy;
                if !self.in_bounds(x, y) {
                    continue;
                }
                let (x, y) = (x as usize, y as usize);
                if self.is_settled(x, y) {
                    continue;
                }
                if self.world_pos(x, y).dist(&p) <= radius {
                    out.push((x, y));
                }
            }
        }
        out.sort_unstable();
        out
    }

    pub fn is_settled(&self, x: usize, y: usize) -> bool {
        self.cells[self.idx(x, y)].settled.is_some()
    }

    pub fn settled_node(&self, x: usize, y: usize) -> Option<CombNodeId> {
        self.cells[self.idx(x, y)].settled
    }

    /// Find the single cell, if any, that `node` is already settled to.
    pub fn find_settled(&self, node: CombNodeId) -> Option<(usize, usize)> {
        for y in 0..self.h {
            for x in 0..self.w {
                if self.cells[self.idx(x, y)].settled == Some(node) {
                    return Some((x, y));
                }
            }
        }
        None
    }

    pub fn is_port_used(&self, x: usize, y: usize, port: u8) -> bool {
        self.cells[self.idx(x, y)].used_port[port as usize]
    }

    /// Cost of a grid edge (one step) in direction `dir`, before any sink
    /// offset or turn cost.
    pub fn step_cost(&self, dir: u8) -> f64 {
        if is_axial(dir) {
            self.penalties.horizontal_pen
        } else {
            self.penalties.diagonal_pen
        }
    }

    /// `true` if the grid edge from `(x, y)` toward `dir` may currently be
    /// used: in bounds, not closed on either side, and neither endpoint
    /// port already claimed by a different committed path.
    pub fn grid_edge_open(&self, x: usize, y: usize, dir: u8) -> bool {
        let Some((nx, ny)) = self.neighbor(x, y, dir) else {
            return false;
        };
        let here = &self.cells[self.idx(x, y)];
        let there = &self.cells[self.idx(nx, ny)];
        let opp = (dir + 4) % 8;
        !here.closed_grid_edge[dir as usize]
            && !there.closed_grid_edge[opp as usize]
            && !here.used_port[dir as usize]
            && !there.used_port[opp as usize]
    }

    /// Turn cost of entering a cell via `in_port` and leaving via
    /// `out_port`. `in_port`/`out_port` are compass directions (the port a
    /// path attaches to), not headings; see the module doc for the mapping
    /// from port pair to bend angle.
    pub fn turn_cost(&self, in_port: u8, out_port: u8) -> f64 {
        turn_cost_for(in_port, out_port, &self.penalties)
    }

    /// `true` if a bend edge between `in_port` and `out_port` at `(x, y)`
    /// may currently be used (neither port already claimed).
    pub fn bend_edge_open(&self, x: usize, y: usize, in_port: u8, out_port: u8) -> bool {
        let cell = &self.cells[self.idx(x, y)];
        !cell.used_port[in_port as usize] && !cell.used_port[out_port as usize]
    }

    /// Open `(x, y)` as a router source/target. `base_offset` is added to
    /// every port; per-port topological/spacing/bend costs are layered on
    /// top with [`GridGraph::add_sink_cost`].
    ///
    /// Opening a cell that is already open (e.g. the same cell appears in
    /// both the source and target candidate sets of a self-loop) adds the
    /// new offset on top of the existing one rather than failing, so a
    /// close call is still owed once per open call.
    pub fn open_node_sink(&mut self, x: usize, y: usize, base_offset: f64) {
        let cell = &mut self.cells[self.idx(x, y)];
        match cell.sink_offset.as_mut() {
            Some(offsets) => {
                for o in offsets.iter_mut() {
                    *o += base_offset;
                }
            }
            None => cell.sink_offset = Some([base_offset; 8]),
        }
    }

    /// Add a per-port cost vector to an already-open sink.
    pub fn add_sink_cost(&mut self, x: usize, y: usize, extra: [f64; 8]) {
        let cell = &mut self.cells[self.idx(x, y)];
        if let Some(offsets) = cell.sink_offset.as_mut() {
            for p in 0..8 {
                offsets[p] += extra[p];
            }
        }
    }

    /// Cost of entering the grid at `(x, y)` via `port`, while the sink is
    /// open. Returns `None` if the sink is closed or the port is unusable.
    pub fn sink_entry_cost(&self, x: usize, y: usize, port: u8) -> Option<f64> {
        let cell = &self.cells[self.idx(x, y)];
        if cell.used_port[port as usize] {
            return None;
        }
        cell.sink_offset.map(|offsets| offsets[port as usize])
    }

    pub fn close_node_sink(&mut self, x: usize, y: usize) {
        self.cells[self.idx(x, y)].sink_offset = None;
    }

    /// Anchor `node` at `(x, y)`.
    pub fn settle_nd(&mut self, x: usize, y: usize, node: CombNodeId) {
        self.cells[self.idx(x, y)].settled = Some(node);
    }

    /// Reverse [`GridGraph::settle_nd`].
    pub fn unsettle_nd(&mut self, x: usize, y: usize) {
        self.cells[self.idx(x, y)].settled = None;
    }

    pub fn add_cost_vector(&mut self, x: usize, y: usize, vec: [f64; 8]) {
        let cell = &mut self.cells[self.idx(x, y)];
        for p in 0..8 {
            cell.cost_vec[p] += vec[p];
        }
    }

    pub fn cost_vector(&self, x: usize, y: usize) -> [f64; 8] {
        self.cells[self.idx(x, y)].cost_vec
    }

    /// Claim every port a committed path touches, and close the grid edges
    /// perpendicular to a straight-through pass so a future path cannot
    /// cross this one at the same cell without sharing a port (spec
    /// §4.3's `settleEdg`). Mirrored exactly by [`GridGraph::unsettle_edg`].
    pub fn settle_edg(&mut self, steps: &[GridStep]) {
        for step in steps {
            let idx = self.idx(step.x, step.y);
            if let Some(p) = step.in_port {
                self.cells[idx].used_port[p as usize] = true;
            }
            if let Some(p) = step.out_port {
                self.cells[idx].used_port[p as usize] = true;
            }
            if let (Some(in_p), Some(out_p)) = (step.in_port, step.out_port) {
                if (out_p + 4) % 8 == in_p {
                    // Straight pass-through: block the perpendicular axis so
                    // nothing can cross this path at this cell.
                    let perp_a = (in_p + 2) % 8;
                    let perp_b = (in_p + 6) % 8;
                    self.cells[idx].closed_grid_edge[perp_a as usize] = true;
                    self.cells[idx].closed_grid_edge[perp_b as usize] = true;
                }
            }
        }
    }

    /// Exact inverse of [`GridGraph::settle_edg`].
    pub fn unsettle_edg(&mut self, steps: &[GridStep]) {
        for step in steps {
            let idx = self.idx(step.x, step.y);
            if let Some(p) = step.in_port {
                self.cells[idx].used_port[p as usize] = false;
            }
            if let Some(p) = step.out_port {
                self.cells[idx].used_port[p as usize] = false;
            }
            if let (Some(in_p), Some(out_p)) = (step.in_port, step.out_port) {
                if (out_p + 4) % 8 == in_p {
                    let perp_a = (in_p + 2) % 8;
                    let perp_b = (in_p + 6) % 8;
                    self.cells[idx].closed_grid_edge[perp_a as usize] = false;
                    self.cells[idx].closed_grid_edge[perp_b as usize] = false;
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../unit_tests/topology/grid_graph.rs"]
mod tests;
