//! Error types for the octilinearizer library.

use thiserror::Error;

/// Errors that can occur while octilinearizing a transit graph.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OctiError {
    /// A penalty or scalar in [`crate::config::Config`] is out of its valid range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The input transit graph has a malformed feature (e.g. a zero-length
    /// polyline, or an edge referencing an unknown node) that preprocessing
    /// could not resolve on its own.
    #[error("malformed input graph: {0}")]
    MalformedInput(String),

    /// No attempt produced a complete octilinear embedding at the
    /// configured grid size and bounding box.
    #[error(
        "no octilinear embedding found for grid size {grid_size} and border radius {border_rad}"
    )]
    NoEmbeddingFound { grid_size: f64, border_rad: f64 },

    /// The ILP back-end's solver failed or proved the formulation infeasible.
    #[error("ILP back-end infeasible: {0}")]
    IlpInfeasible(String),
}

/// Result type alias for octilinearizer operations.
pub type Result<T> = std::result::Result<T, OctiError>;
