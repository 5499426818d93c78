//! Error types for solver operations.

use hn_core::error::HnError;
use hn_equipment::EquipmentError;
use hn_fluids::FluidError;
use hn_network::NetworkError;
use thiserror::Error;

/// Errors that can occur during network solving.
#[derive(Error, Debug)]
pub enum SolverError {
    /// The network cannot form a solvable system (no tank, no edges, ...).
    #[error("Topology error: {what}")]
    Topology { what: String },

    #[error("Convergence failed after {iterations} iterations (residual {residual_norm:.3e}): {reason}")]
    ConvergenceFailed {
        residual_norm: f64,
        iterations: usize,
        reason: String,
    },

    #[error("Invalid state: {what}")]
    InvalidState { what: String },

    #[error("Equipment error: {0}")]
    Equipment(#[from] EquipmentError),

    #[error("Fluid error: {0}")]
    Fluid(#[from] FluidError),

    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Numeric error: {what}")]
    Numeric { what: String },
}

pub type SolverResult<T> = Result<T, SolverError>;

impl From<SolverError> for HnError {
    fn from(e: SolverError) -> Self {
        match e {
            SolverError::Topology { .. } => HnError::InvalidArg { what: "topology" },
            SolverError::ConvergenceFailed { .. } => HnError::InvalidArg {
                what: "convergence",
            },
            SolverError::InvalidState { .. } => HnError::InvalidArg { what: "state" },
            SolverError::Equipment(_) => HnError::InvalidArg { what: "equipment" },
            SolverError::Fluid(_) => HnError::InvalidArg { what: "fluid" },
            SolverError::Network(_) => HnError::InvalidArg { what: "network" },
            SolverError::Numeric { .. } => HnError::InvalidArg { what: "numeric" },
        }
    }
}
