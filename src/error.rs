//! Error types for the relaxation engine.

use nalgebra::Vector3;
use thiserror::Error;

/// Result type for fekete operations.
pub type Result<T> = std::result::Result<T, FeketeError>;

/// Errors that can stop a relaxation run.
#[derive(Debug, Error)]
pub enum FeketeError {
    /// Run parameters or the initial configuration were rejected before the loop started.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A non-finite value appeared while evaluating forces or renormalizing.
    ///
    /// `last_valid` holds the point set as it was at the start of the failing iteration.
    #[error("numerical divergence at iteration {iteration}, point {point}")]
    NumericalDivergence {
        iteration: usize,
        point: usize,
        last_valid: Vec<Vector3<f64>>,
    },

    /// A serialized configuration could not be parsed.
    #[error("config error: {0}")]
    Config(String),
}
