//! Fluid property errors.

use hn_core::HnError;
use thiserror::Error;

/// Result type for fluid operations.
pub type FluidResult<T> = Result<T, FluidError>;

/// Errors that can occur during fluid property calculations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FluidError {
    /// Correlation produced a non-physical value (negative density, etc.).
    #[error("Non-physical value for {what}: {value}")]
    NonPhysical { what: &'static str, value: f64 },

    /// Input outside the range where a correlation is defined.
    #[error("Value out of range for {what}: {value}")]
    OutOfRange { what: &'static str, value: f64 },
}

impl From<FluidError> for HnError {
    fn from(err: FluidError) -> Self {
        HnError::Invariant {
            what: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = FluidError::OutOfRange {
            what: "temperature",
            value: -3.0,
        };
        assert!(err.to_string().contains("temperature"));
        assert!(err.to_string().contains("-3"));
    }

    #[test]
    fn error_to_hn_error() {
        let fluid_err = FluidError::NonPhysical {
            what: "density",
            value: -1.0,
        };
        let hn_err: HnError = fluid_err.into();
        assert!(matches!(hn_err, HnError::Invariant { .. }));
    }
}
