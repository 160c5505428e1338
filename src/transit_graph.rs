//! The external `TransitGraph` model: a planar multigraph of stops and line
//! segments. The octilinearization core treats this read-only except for
//! the short-edge collapse in [`crate::preprocessing`]. Loading/saving is a
//! thin JSON layer; rendering to SVG and the downstream line-ordering
//! optimizer (OptGraph untangling) live outside this crate's boundary.

use crate::error::{OctiError, Result};
use crate::geom::{BBox, Point};
use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};

/// Identifier of a stop (a named station, as opposed to a geometry-only
/// polyline waypoint).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StopId(pub u64);

/// Identifier of a line (route) threading through one or more edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LineId(pub u64);

/// One line's traversal of an edge, with the direction it runs in relative
/// to the edge's stored `from -> to` orientation. Mirrors the original's
/// `EdgeTripGeom` (trip/line association per edge, direction-aware).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineOccurrence {
    pub line: LineId,
    /// `true` if the line runs from -> to, `false` if to -> from.
    pub forward: bool,
}

/// A node in the transit graph: a geometric position, optionally carrying
/// stop metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitNode {
    pub pos: Point,
    /// Stops located at this node. Empty for a pure geometry waypoint
    /// (e.g. a bend in a line with no station).
    pub stops: Vec<StopId>,
}

impl TransitNode {
    pub fn new(pos: Point) -> Self {
        Self {
            pos,
            stops: Vec::new(),
        }
    }

    pub fn with_stop(pos: Point, stop: StopId) -> Self {
        Self {
            pos,
            stops: vec![stop],
        }
    }

    pub fn has_stops(&self) -> bool {
        !self.stops.is_empty()
    }
}

/// An edge in the transit graph: a polyline geometry carrying a set of lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitEdge {
    /// Polyline geometry from the `from` endpoint to the `to` endpoint,
    /// inclusive of both endpoints.
    pub polyline: Vec<Point>,
    pub lines: Vec<LineOccurrence>,
}

impl TransitEdge {
    pub fn straight(from: Point, to: Point, lines: Vec<LineOccurrence>) -> Self {
        Self {
            polyline: vec![from, to],
            lines,
        }
    }

    pub fn length(&self) -> f64 {
        crate::geom::polyline_length(&self.polyline)
    }
}

/// A planar multigraph of stops and line segments.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransitGraph {
    inner: UnGraph<TransitNode, TransitEdge>,
}

impl TransitGraph {
    pub fn new() -> Self {
        Self {
            inner: UnGraph::default(),
        }
    }

    pub fn add_node(&mut self, node: TransitNode) -> NodeIndex {
        self.inner.add_node(node)
    }

    pub fn add_edge(&mut self, from: NodeIndex, to: NodeIndex, edge: TransitEdge) -> EdgeIndex {
        self.inner.add_edge(from, to, edge)
    }

    pub fn node(&self, n: NodeIndex) -> &TransitNode {
        &self.inner[n]
    }

    pub fn node_mut(&mut self, n: NodeIndex) -> &mut TransitNode {
        &mut self.inner[n]
    }

    pub fn edge(&self, e: EdgeIndex) -> &TransitEdge {
        &self.inner[e]
    }

    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.inner.node_indices()
    }

    pub fn edge_indices(&self) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.inner.edge_indices()
    }

    pub fn num_nodes(&self) -> usize {
        self.inner.node_count()
    }

    pub fn num_edges(&self) -> usize {
        self.inner.edge_count()
    }

    pub fn degree(&self, n: NodeIndex) -> usize {
        self.inner.edges(n).count()
    }

    /// Edges incident to `n`, as (edge index, other endpoint) pairs.
    pub fn incident(&self, n: NodeIndex) -> Vec<(EdgeIndex, NodeIndex)> {
        self.inner
            .edges(n)
            .map(|e| (e.id(), e.source_other(n)))
            .collect()
    }

    /// Endpoints of `e` as `(from, to)`, in the orientation `add_edge` was
    /// called with.
    pub fn endpoints(&self, e: EdgeIndex) -> (NodeIndex, NodeIndex) {
        self.inner.edge_endpoints(e).expect("dangling edge index")
    }

    pub fn is_empty(&self) -> bool {
        self.inner.node_count() == 0
    }

    /// Bounding box of all node positions.
    ///
    /// Returns `None` for an empty graph.
    pub fn bbox(&self) -> Option<BBox> {
        if self.is_empty() {
            return None;
        }
        Some(BBox::of(self.inner.node_weights().map(|n| n.pos)))
    }

    /// Merge `remove` into `keep`: every edge incident to `remove` other
    /// than the edge directly joining `keep` and `remove` is re-attached to
    /// `keep`, `remove`'s stops are appended to `keep`'s, and `remove` (with
    /// its remaining edge to `keep`) is deleted. `keep`'s position becomes
    /// `new_pos`. Used by [`crate::preprocessing`] short-edge collapse.
    pub fn merge_nodes(&mut self, keep: NodeIndex, remove: NodeIndex, new_pos: Point) {
        let to_reattach: Vec<(NodeIndex, TransitEdge)> = self
            .inner
            .edges(remove)
            .filter(|e| e.source_other(remove) != keep)
            .map(|e| (e.source_other(remove), e.weight().clone()))
            .collect();

        let mut removed_stops = std::mem::take(&mut self.inner[remove].stops);
        self.inner[keep].stops.append(&mut removed_stops);
        self.inner[keep].pos = new_pos;

        for (other, weight) in to_reattach {
            self.inner.add_edge(keep, other, weight);
        }

        self.inner.remove_node(remove);
    }

    /// Drop every edge whose two endpoints are the same node. Such edges
    /// carry no combinatorial meaning (a node cannot sit at two cyclic
    /// positions in its own incidence order) and are discarded; called after
    /// [`crate::preprocessing`] short-edge collapse as a safety net for
    /// malformed input rather than because that collapse is known to
    /// introduce them.
    pub fn remove_self_loops(&mut self) -> usize {
        let mut removed = 0;
        loop {
            let next = self
                .inner
                .edge_indices()
                .find(|&e| {
                    let (a, b) = self.inner.edge_endpoints(e).expect("dangling edge index");
                    a == b
                });
            match next {
                Some(e) => {
                    self.inner.remove_edge(e);
                    removed += 1;
                }
                None => break,
            }
        }
        removed
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(|e| OctiError::MalformedInput(e.to_string()))
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| OctiError::MalformedInput(e.to_string()))
    }
}

/// Helper trait to get "the other endpoint of this edge reference" without
/// re-deriving it from raw source()/target() at every call site.
trait EdgeRefExt {
    fn source_other(&self, from: NodeIndex) -> NodeIndex;
}

impl<'a> EdgeRefExt for petgraph::graph::EdgeReference<'a, TransitEdge> {
    fn source_other(&self, from: NodeIndex) -> NodeIndex {
        if self.source() == from {
            self.target()
        } else {
            self.source()
        }
    }
}

#[cfg(test)]
#[path = "../unit_tests/transit_graph.rs"]
mod tests;
