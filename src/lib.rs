//! # Octilinearizer
//!
//! A library for redrawing transit network maps on an octilinear lattice:
//! every edge runs horizontally, vertically, or at a 45 degree diagonal.
//!
//! The pipeline is: load a [`transit_graph::TransitGraph`], collapse short
//! edges ([`preprocessing`]), contract it into a
//! [`topology::comb_graph::CombGraph`] of stops and branch points, then run
//! [`octilinearizer::octilinearize`] to route every combinatorial edge across
//! a [`topology::grid_graph::GridGraph`] and settle every node onto a grid
//! cell.
//!
//! ## Example
//!
//! ```rust
//! use octilinearizer::prelude::*;
//!
//! let mut tg = TransitGraph::new();
//! let a = tg.add_node(TransitNode::new(Point::new(0.0, 0.0)));
//! let b = tg.add_node(TransitNode::new(Point::new(10.0, 4.0)));
//! tg.add_edge(
//!     a,
//!     b,
//!     TransitEdge::straight(
//!         Point::new(0.0, 0.0),
//!         Point::new(10.0, 4.0),
//!         vec![LineOccurrence { line: LineId(1), forward: true }],
//!     ),
//! );
//!
//! let cfg = Config::new(5.0);
//! let output = octilinearize(&tg, &cfg).expect("small graphs always embed");
//! assert_eq!(output.transit_graph.num_nodes(), 2);
//! ```
//!
//! ## Modules
//!
//! - [`transit_graph`]: the external graph model (stops, lines, polylines).
//! - [`preprocessing`]: short-edge collapse run before contraction.
//! - [`topology`]: the combinatorial graph and the octilinear grid lattice.
//! - [`node_cost`]: per-port cost a node's existing incidences impose on a
//!   new edge.
//! - [`drawing`]: the mutable record of settled node cells and routed edges.
//! - [`router`]: shortest-path routing of one edge across the grid.
//! - [`octilinearizer`]: the outer scheduling loop and public entry point.
//! - [`solvers`]: alternative back-ends (currently an ILP direction-hint
//!   solver, gated behind the `ilp-solver` feature family).
//! - [`config`]: penalties and run configuration.
//! - [`error`]: the crate's error type.
//! - [`testing`]: fixture builders shared by this crate's own test suite.

pub mod config;
pub mod drawing;
pub mod error;
pub mod geom;
pub mod node_cost;
pub mod octilinearizer;
pub mod preprocessing;
pub mod router;
pub mod solvers;
pub mod testing;
pub mod topology;
pub mod transit_graph;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::{Backend, Config, Penalties};
    pub use crate::error::{OctiError, Result};
    pub use crate::geom::{polyline_length, BBox, Point};
    pub use crate::octilinearizer::{octilinearize, OctiOutput};
    pub use crate::transit_graph::{
        LineId, LineOccurrence, StopId, TransitEdge, TransitGraph, TransitNode,
    };
}

// Re-export commonly used items at crate root.
pub use error::{OctiError, Result};
pub use octilinearizer::octilinearize;
