//! `Drawing` — the output of one octilinearization attempt: a grid center
//! for every combinatorial node and a grid path for every combinatorial
//! edge, plus the running total score (spec §4.4).
//!
//! A `Drawing` is a pure record; it does not itself own a
//! [`GridGraph`](crate::topology::grid_graph::GridGraph). Committing or
//! retracting a piece of it (one edge, one node) always touches both the
//! `Drawing` and the grid together, so every mutator here takes the grid as
//! an argument and keeps the two in lock-step. This is what lets the outer
//! loop retract a single node's incident edges, try alternate placements,
//! and restore the original on failure without rebuilding anything else.

use crate::topology::comb_graph::{CombEdgeId, CombNodeId};
use crate::topology::grid_graph::{GridGraph, GridStep};
use std::collections::HashMap;

/// A committed combinatorial edge: its grid path and the cost it contributed
/// to the drawing's total score.
#[derive(Debug, Clone)]
struct PlacedEdge {
    from: CombNodeId,
    to: CombNodeId,
    steps: Vec<GridStep>,
    cost: f64,
}

/// The full set of (node, grid cell) and (edge, grid path) assignments
/// produced so far, plus their summed cost.
#[derive(Debug, Clone, Default)]
pub struct Drawing {
    node_centers: HashMap<CombNodeId, (usize, usize)>,
    edges: HashMap<CombEdgeId, PlacedEdge>,
    score: f64,
}

impl Drawing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn node_center(&self, node: CombNodeId) -> Option<(usize, usize)> {
        self.node_centers.get(&node).copied()
    }

    pub fn is_node_placed(&self, node: CombNodeId) -> bool {
        self.node_centers.contains_key(&node)
    }

    pub fn edge_path(&self, edge: CombEdgeId) -> Option<&[GridStep]> {
        self.edges.get(&edge).map(|p| p.steps.as_slice())
    }

    pub fn edge_cost(&self, edge: CombEdgeId) -> Option<f64> {
        self.edges.get(&edge).map(|p| p.cost)
    }

    pub fn is_edge_placed(&self, edge: CombEdgeId) -> bool {
        self.edges.contains_key(&edge)
    }

    /// The ports a node's already-drawn incident edges occupy at its center,
    /// as `(edge, port)` pairs. Used to build node cost vectors (see
    /// [`crate::node_cost`]) before routing one more incident edge.
    pub fn incident_ports(&self, node: CombNodeId) -> Vec<(CombEdgeId, u8)> {
        let mut out = Vec::new();
        for (&eid, placed) in &self.edges {
            let first = placed.steps.first();
            let last = placed.steps.last();
            if placed.from == node {
                if let Some(step) = first {
                    if let Some(p) = step.in_port.or(step.out_port) {
                        out.push((eid, p));
                    }
                }
            }
            if placed.to == node {
                if let Some(step) = last {
                    if let Some(p) = step.out_port.or(step.in_port) {
                        out.push((eid, p));
                    }
                }
            }
        }
        out.sort_by_key(|(e, _)| e.0);
        out
    }

    /// Anchor `node` at `(x, y)` on `grid`.
    ///
    /// # Panics
    /// Panics if `node` is already placed.
    pub fn place_node(&mut self, grid: &mut GridGraph, node: CombNodeId, x: usize, y: usize) {
        assert!(
            self.node_centers.insert(node, (x, y)).is_none(),
            "node already placed"
        );
        grid.settle_nd(x, y, node);
    }

    /// Retract `node`'s placement. The caller must have already retracted
    /// every edge incident to it with [`Drawing::erase_edge`].
    ///
    /// # Panics
    /// Panics if any edge incident to `node` is still placed.
    pub fn unplace_node(&mut self, grid: &mut GridGraph, node: CombNodeId) {
        debug_assert!(
            self.edges
                .values()
                .all(|e| e.from != node && e.to != node),
            "node has placed incident edges"
        );
        if let Some((x, y)) = self.node_centers.remove(&node) {
            grid.unsettle_nd(x, y);
        }
    }

    /// Commit a routed path for `edge`, claiming its grid ports/edges.
    ///
    /// # Panics
    /// Panics if `edge` is already placed.
    pub fn place_edge(
        &mut self,
        grid: &mut GridGraph,
        edge: CombEdgeId,
        from: CombNodeId,
        to: CombNodeId,
        steps: Vec<GridStep>,
        cost: f64,
    ) {
        grid.settle_edg(&steps);
        self.score += cost;
        let prev = self.edges.insert(
            edge,
            PlacedEdge {
                from,
                to,
                steps,
                cost,
            },
        );
        assert!(prev.is_none(), "edge already placed");
    }

    /// Retract `edge`'s committed path, freeing its grid claims.
    pub fn erase_edge(&mut self, grid: &mut GridGraph, edge: CombEdgeId) {
        if let Some(placed) = self.edges.remove(&edge) {
            grid.unsettle_edg(&placed.steps);
            self.score -= placed.cost;
        }
    }

    /// Retract every edge incident to `node` (but not the node's own
    /// placement). Returns the removed edges so the caller can restore them
    /// verbatim on a failed relocation attempt.
    pub fn erase_incident(
        &mut self,
        grid: &mut GridGraph,
        node: CombNodeId,
    ) -> Vec<(CombEdgeId, CombNodeId, CombNodeId, Vec<GridStep>, f64)> {
        let incident: Vec<CombEdgeId> = self
            .edges
            .iter()
            .filter(|(_, e)| e.from == node || e.to == node)
            .map(|(&id, _)| id)
            .collect();
        let mut removed = Vec::with_capacity(incident.len());
        for eid in incident {
            let placed = self.edges.remove(&eid).expect("just filtered");
            grid.unsettle_edg(&placed.steps);
            self.score -= placed.cost;
            removed.push((eid, placed.from, placed.to, placed.steps, placed.cost));
        }
        removed
    }

    /// Number of placed combinatorial edges.
    pub fn num_placed_edges(&self) -> usize {
        self.edges.len()
    }
}

#[cfg(test)]
#[path = "../unit_tests/drawing.rs"]
mod tests;
