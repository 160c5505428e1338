//! Penalties, scheduler configuration, and the heuristic/ILP mode selector.

use crate::error::{OctiError, Result};

/// Turn and traversal costs consumed by [`crate::topology::grid_graph::GridGraph`]
/// and [`crate::router::Router`].
///
/// All fields are non-negative doubles. `p_135 <= p_90 <= p_45` is expected
/// in practical configurations (not enforced, since pathological
/// configurations are still numerically well-defined); [`Config::validate`]
/// only rejects negative values and non-finite numbers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Penalties {
    /// Cost of a 45 degree turn at a settled center.
    pub p_45: f64,
    /// Cost of a 90 degree turn.
    pub p_90: f64,
    /// Cost of a 135 degree turn.
    pub p_135: f64,
    /// Cost of a full reversal (180 degrees).
    pub p_180: f64,
    /// Per-step cost of an axial (horizontal/vertical) grid edge.
    pub horizontal_pen: f64,
    /// Per-step cost of a diagonal grid edge.
    pub diagonal_pen: f64,
    /// Penalty applied when two combinatorial edges would have to cross.
    pub cross_pen: f64,
    /// Penalty applied when an edge must split around a settled node.
    pub split_pen: f64,
}

impl Penalties {
    /// Default penalty set. The upstream project's penalty constants live in
    /// its optimization module rather than its (rendering-focused) config
    /// header, so these values are chosen to satisfy the expected ordering
    /// `p_135 <= p_90 <= p_45 <= p_180` rather than copied from a specific
    /// source file.
    pub const fn default_values() -> Self {
        Self {
            p_45: 1.0,
            p_90: 1.5,
            p_135: 0.5,
            p_180: 3.0,
            horizontal_pen: 1.0,
            diagonal_pen: 1.0,
            cross_pen: 3.0,
            split_pen: 5.0,
        }
    }

    /// Per-step slack `c_0 = p_45 - p_135`, the fixed component of a sink's
    /// opening cost (spec §4.4's "Sink opening"; see [`Penalties::pen_per_grid`]).
    pub fn c0(&self) -> f64 {
        self.p_45 - self.p_135
    }

    /// Per-grid-cell slack added to a sink's opening cost for every whole
    /// cell between a node's true geographic position and a candidate
    /// center: `3 + c_0 + max(diagonalPen, horizontalPen)` (spec §4.4,
    /// matching the original's `penPerGrid`).
    pub fn pen_per_grid(&self) -> f64 {
        3.0 + self.c0() + self.horizontal_pen.max(self.diagonal_pen)
    }

    fn validate(&self) -> Result<()> {
        let fields = [
            ("p_45", self.p_45),
            ("p_90", self.p_90),
            ("p_135", self.p_135),
            ("p_180", self.p_180),
            ("horizontalPen", self.horizontal_pen),
            ("diagonalPen", self.diagonal_pen),
            ("crossPen", self.cross_pen),
            ("splitPen", self.split_pen),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(OctiError::InvalidConfig(format!(
                    "penalty {name} must be a non-negative finite number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for Penalties {
    fn default() -> Self {
        Self::default_values()
    }
}

/// Which embedding back-end `octilinearize` should run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    /// The randomized-retry, node-relocation outer loop of §4.5.
    #[default]
    Heuristic,
    /// The ILP-based alternative back-end ([`crate::solvers::ilp`]).
    Ilp,
}

/// Top-level configuration for one octilinearization run.
///
/// Lifetime: constructed once per call to [`crate::octilinearizer::octilinearize`],
/// validated up front, then treated as immutable and shared read-only across
/// attempts (see spec §5's "Shared resources").
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// World units per grid cell.
    pub grid_size: f64,
    /// Extra cells of padding around the input bounding box.
    pub border_rad: f64,
    /// Turn/traversal cost policy.
    pub penalties: Penalties,
    /// RNG seed; identical seed + input must produce byte-identical Drawings.
    pub seed: u64,
    /// Number of additional randomized-ordering attempts after the initial one.
    pub retries: usize,
    /// Maximum node-relocation sweeps.
    pub iters: usize,
    /// A sweep improving total score by less than this converges the outer loop.
    pub convergence_eps: f64,
    /// Starting candidate-search radius, in multiples of `grid_size`.
    pub radius_grow_start: f64,
    /// Maximum candidate-search radius, in multiples of `grid_size`.
    pub radius_grow_max: f64,
    /// Which back-end to run.
    pub backend: Backend,
    /// Number of attempts to fan out across worker threads (§5's Open
    /// Question on `cores`; the original hard-codes this to 1).
    pub worker_threads: usize,
    /// Optional wall-clock budget for the whole run. On expiry the best
    /// Drawing found so far is returned if any attempt completed.
    pub deadline: Option<std::time::Duration>,
}

impl Config {
    /// Construct a configuration with the crate's defaults and the given
    /// grid size (the one scalar every caller must choose explicitly).
    pub fn new(grid_size: f64) -> Self {
        Self {
            grid_size,
            border_rad: 2.0,
            penalties: Penalties::default(),
            seed: 0,
            retries: 10,
            iters: 100,
            convergence_eps: 0.05,
            radius_grow_start: 4.0,
            radius_grow_max: 25.0,
            backend: Backend::Heuristic,
            worker_threads: 1,
            deadline: None,
        }
    }

    /// Validate all scalar and penalty fields. Called once at the start of
    /// [`crate::octilinearizer::octilinearize`], before any routing work.
    pub fn validate(&self) -> Result<()> {
        if !(self.grid_size.is_finite() && self.grid_size > 0.0) {
            return Err(OctiError::InvalidConfig(format!(
                "gridSize must be positive, got {}",
                self.grid_size
            )));
        }
        if !(self.border_rad.is_finite() && self.border_rad >= 0.0) {
            return Err(OctiError::InvalidConfig(format!(
                "borderRad must be non-negative, got {}",
                self.border_rad
            )));
        }
        if !(self.convergence_eps.is_finite() && self.convergence_eps > 0.0) {
            return Err(OctiError::InvalidConfig(format!(
                "convergenceEps must be positive, got {}",
                self.convergence_eps
            )));
        }
        if self.radius_grow_start <= 0.0 || self.radius_grow_max < self.radius_grow_start {
            return Err(OctiError::InvalidConfig(format!(
                "radius growth bounds must satisfy 0 < start <= max, got start={}, max={}",
                self.radius_grow_start, self.radius_grow_max
            )));
        }
        if self.worker_threads == 0 {
            return Err(OctiError::InvalidConfig(
                "worker_threads must be at least 1".to_string(),
            ));
        }
        self.penalties.validate()
    }
}

#[cfg(test)]
#[path = "../unit_tests/config.rs"]
mod tests;
