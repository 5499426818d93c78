//! Error types for equipment operations.

use hn_core::HnError;
use hn_fluids::FluidError;
use thiserror::Error;

/// Errors that can occur while constructing or evaluating equipment.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EquipmentError {
    #[error("Invalid geometry: {what} = {value}")]
    InvalidGeometry { what: &'static str, value: f64 },

    #[error("Non-physical value: {what} = {value}")]
    NonPhysical { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Not supported: {what}")]
    NotSupported { what: &'static str },

    #[error("Fluid property error: {0}")]
    Fluid(#[from] FluidError),
}

pub type EquipmentResult<T> = Result<T, EquipmentError>;

impl From<EquipmentError> for HnError {
    fn from(e: EquipmentError) -> Self {
        match e {
            EquipmentError::InvalidArg { what } | EquipmentError::NotSupported { what } => {
                HnError::InvalidArg { what }
            }
            EquipmentError::InvalidGeometry { what, value }
            | EquipmentError::NonPhysical { what, value } => HnError::NonFinite { what, value },
            EquipmentError::Fluid(err) => err.into(),
        }
    }
}
