//! `CombGraph` — the combinatorial graph, obtained by contracting chains of
//! degree-2 non-stop nodes in a [`TransitGraph`](crate::transit_graph::TransitGraph)
//! into single combinatorial edges (spec §4.2).

use crate::geom::Point;
use crate::transit_graph::TransitGraph;
use petgraph::graph::{EdgeIndex, NodeIndex};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// Index of a combinatorial node within a [`CombGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CombNodeId(pub usize);

/// Index of a combinatorial edge within a [`CombGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CombEdgeId(pub usize);

/// A combinatorial node: one underlying transit node plus the cyclic,
/// angularly-sorted sequence of its incident combinatorial edges.
///
/// Invariant (spec §3): `edge_order` is consistent across both endpoints of
/// every edge — each edge appears once per endpoint (twice, at two distinct
/// slots, if it is a self-loop).
#[derive(Debug, Clone)]
pub struct CombNode {
    pub transit_node: NodeIndex,
    pub pos: Point,
    edge_order: Vec<CombEdgeId>,
}

impl CombNode {
    /// Cyclic sequence of incident edges, in angular order.
    pub fn edge_order(&self) -> &[CombEdgeId] {
        &self.edge_order
    }

    pub fn degree(&self) -> usize {
        self.edge_order.len()
    }

    /// The edge following `after` in the cyclic ordering, wrapping around.
    /// Returns `None` if `after` is not incident to this node.
    pub fn next_after(&self, after: CombEdgeId) -> Option<CombEdgeId> {
        let pos = self.edge_order.iter().position(|&e| e == after)?;
        Some(self.edge_order[(pos + 1) % self.edge_order.len()])
    }
}

/// A combinatorial edge: the ordered chain of transit edges it represents,
/// from `from` to `to`.
#[derive(Debug, Clone)]
pub struct CombEdge {
    pub from: CombNodeId,
    pub to: CombNodeId,
    /// Underlying transit edges in walk order, each paired with whether it
    /// was traversed in its own stored from->to orientation.
    pub transit_edges: Vec<(EdgeIndex, bool)>,
}

impl CombEdge {
    /// Total geographic length of the chain this edge represents.
    pub fn geo_length(&self, tg: &TransitGraph) -> f64 {
        self.transit_edges
            .iter()
            .map(|(e, _)| tg.edge(*e).length())
            .sum()
    }
}

/// The combinatorial graph derived from a (preprocessed) [`TransitGraph`].
#[derive(Debug, Clone)]
pub struct CombGraph {
    nodes: Vec<CombNode>,
    edges: Vec<CombEdge>,
}

fn is_comb_node(tg: &TransitGraph, n: NodeIndex) -> bool {
    tg.node(n).has_stops() || tg.degree(n) != 2
}

/// Position of the point immediately adjacent to `leaving_from` along
/// transit edge `edge`, used to compute the angle at which a combinatorial
/// edge departs a node.
fn departure_point(tg: &TransitGraph, edge: EdgeIndex, leaving_from: NodeIndex) -> Point {
    let (a, _b) = tg.endpoints(edge);
    let poly = &tg.edge(edge).polyline;
    if poly.len() < 2 {
        return tg.node(leaving_from).pos;
    }
    if leaving_from == a {
        poly[1]
    } else {
        poly[poly.len() - 2]
    }
}

/// Whichever endpoint of `te` is geographically closer to `near` — used to
/// recover "which side of this transit edge is the node we're computing an
/// angle for" without threading walk direction through every call site.
fn nearer_endpoint(tg: &TransitGraph, te: EdgeIndex, near: Point) -> NodeIndex {
    let (a, b) = tg.endpoints(te);
    if tg.node(a).pos.dist(&near) <= tg.node(b).pos.dist(&near) {
        a
    } else {
        b
    }
}

impl CombGraph {
    /// Build a `CombGraph` from a transit graph. The transit graph is
    /// expected to already be preprocessed (see [`crate::preprocessing`]);
    /// building does not itself collapse short edges.
    pub fn build(tg: &TransitGraph) -> Self {
        let comb_ids = Self::assign_comb_nodes(tg);

        let mut by_id: Vec<Option<NodeIndex>> = vec![None; comb_ids.len()];
        for (&tn, &id) in &comb_ids {
            by_id[id.0] = Some(tn);
        }
        let mut nodes: Vec<CombNode> = by_id
            .into_iter()
            .map(|tn| {
                let tn = tn.expect("comb node ids are dense 0..n");
                CombNode {
                    transit_node: tn,
                    pos: tg.node(tn).pos,
                    edge_order: Vec::new(),
                }
            })
            .collect();

        let mut edges = Vec::new();
        let mut visited: HashSet<EdgeIndex> = HashSet::new();

        let mut starts: Vec<NodeIndex> = comb_ids.keys().copied().collect();
        starts.sort_by_key(|n| n.index());

        for start in starts {
            let mut incident: Vec<(EdgeIndex, NodeIndex)> = tg.incident(start);
            incident.sort_by_key(|(e, _)| e.index());
            for (first_edge, _) in incident {
                if visited.contains(&first_edge) {
                    continue;
                }
                let (chain, end) = Self::walk_chain(tg, start, first_edge, &mut visited);
                let from_id = comb_ids[&start];
                let to_id = comb_ids[&end];
                let edge_id = CombEdgeId(edges.len());
                edges.push(CombEdge {
                    from: from_id,
                    to: to_id,
                    transit_edges: chain,
                });
                nodes[from_id.0].edge_order.push(edge_id);
                nodes[to_id.0].edge_order.push(edge_id);
            }
        }

        let mut cg = Self { nodes, edges };
        cg.sort_edge_orderings(tg);
        cg
    }

    /// Decide which transit nodes become combinatorial nodes: every node
    /// carrying a stop, or whose degree is not exactly 2. For a connected
    /// component made entirely of degree-2, stopless nodes (a bare cycle),
    /// its lowest-index node is promoted so the component still anchors
    /// somewhere.
    fn assign_comb_nodes(tg: &TransitGraph) -> HashMap<NodeIndex, CombNodeId> {
        let mut is_comb: HashMap<NodeIndex, bool> =
            tg.node_indices().map(|n| (n, is_comb_node(tg, n))).collect();

        let mut seen: HashSet<NodeIndex> = HashSet::new();
        for start in tg.node_indices() {
            if seen.contains(&start) {
                continue;
            }
            let mut stack = vec![start];
            let mut component = Vec::new();
            seen.insert(start);
            while let Some(n) = stack.pop() {
                component.push(n);
                for (_, other) in tg.incident(n) {
                    if seen.insert(other) {
                        stack.push(other);
                    }
                }
            }
            if !component.is_empty() && component.iter().all(|n| !is_comb[n]) {
                let anchor = *component.iter().min_by_key(|n| n.index()).unwrap();
                is_comb.insert(anchor, true);
            }
        }

        let mut ordered: Vec<NodeIndex> = is_comb
            .iter()
            .filter(|(_, &v)| v)
            .map(|(&n, _)| n)
            .collect();
        ordered.sort_by_key(|n| n.index());

        ordered
            .into_iter()
            .enumerate()
            .map(|(i, n)| (n, CombNodeId(i)))
            .collect()
    }

    /// Walk a chain of degree-2, stopless transit nodes starting at `start`
    /// via `first_edge`, until a combinatorial node is reached. Returns the
    /// ordered list of (edge, forward) steps and the terminating node.
    fn walk_chain(
        tg: &TransitGraph,
        start: NodeIndex,
        first_edge: EdgeIndex,
        visited: &mut HashSet<EdgeIndex>,
    ) -> (Vec<(EdgeIndex, bool)>, NodeIndex) {
        let mut chain = Vec::new();
        let mut cur_node = start;
        let mut cur_edge = first_edge;
        loop {
            visited.insert(cur_edge);
            let (a, b) = tg.endpoints(cur_edge);
            let forward = a == cur_node;
            let next_node = if forward { b } else { a };
            chain.push((cur_edge, forward));

            if is_comb_node(tg, next_node) {
                return (chain, next_node);
            }

            let mut incident = tg.incident(next_node);
            incident.retain(|(e, _)| *e != cur_edge);
            let (next_edge, _) = incident
                .into_iter()
                .next()
                .expect("degree-2 non-stop node must have exactly one other incident edge");
            cur_edge = next_edge;
            cur_node = next_node;
        }
    }

    /// Sort each node's `edge_order` by the angle at which the edge departs
    /// it, ties broken by edge id for a deterministic, stable order.
    fn sort_edge_orderings(&mut self, tg: &TransitGraph) {
        for node_idx in 0..self.nodes.len() {
            let node_id = CombNodeId(node_idx);
            let pos = self.nodes[node_idx].pos;
            let order = self.nodes[node_idx].edge_order.clone();

            let mut from_slot_taken: HashSet<CombEdgeId> = HashSet::new();
            let mut keyed: Vec<(f64, CombEdgeId)> = Vec::with_capacity(order.len());
            for eid in order {
                let edge = &self.edges[eid.0];
                let use_from_side = if edge.from == edge.to {
                    from_slot_taken.insert(eid)
                } else {
                    edge.from == node_id
                };
                let step = if use_from_side {
                    edge.transit_edges.first()
                } else {
                    edge.transit_edges.last()
                };
                let angle = match step {
                    Some(&(te, _)) => {
                        let leaving_from = nearer_endpoint(tg, te, pos);
                        pos.angle_to(&departure_point(tg, te, leaving_from))
                    }
                    None => 0.0,
                };
                keyed.push((angle, eid));
            }
            keyed.sort_by(|a, b| {
                a.0.partial_cmp(&b.0)
                    .unwrap_or(Ordering::Equal)
                    .then(a.1.cmp(&b.1))
            });
            self.nodes[node_idx].edge_order = keyed.into_iter().map(|(_, e)| e).collect();
        }
    }

    pub fn node(&self, id: CombNodeId) -> &CombNode {
        &self.nodes[id.0]
    }

    pub fn edge(&self, id: CombEdgeId) -> &CombEdge {
        &self.edges[id.0]
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = CombNodeId> {
        (0..self.nodes.len()).map(CombNodeId)
    }

    pub fn edge_ids(&self) -> impl Iterator<Item = CombEdgeId> {
        (0..self.edges.len()).map(CombEdgeId)
    }

    /// The other endpoint of `edge`, given one of its endpoints.
    pub fn other_end(&self, edge: CombEdgeId, from: CombNodeId) -> CombNodeId {
        let e = &self.edges[edge.0];
        if e.from == from {
            e.to
        } else {
            e.from
        }
    }
}

#[cfg(test)]
#[path = "../../unit_tests/topology/comb_graph.rs"]
mod tests;
