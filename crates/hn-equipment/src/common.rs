//! Common utilities for equipment calculations.

use crate::error::{EquipmentError, EquipmentResult};
use hn_core::numeric::{Real, ensure_finite};

/// Flows below this magnitude are treated as stagnant [m³/s]
pub const EPSILON_FLOW: Real = 1e-12;

/// Mass flows below this carry no thermal effect through a heat exchanger [kg/s]
pub const MIN_THERMAL_MASS_FLOW: Real = 1e-4;

/// Ensure a value is finite, returning EquipmentError if not.
pub fn check_finite(value: Real, what: &'static str) -> EquipmentResult<Real> {
    ensure_finite(value, what).map_err(|_| EquipmentError::NonPhysical { what, value })
}

/// Ensure a geometric dimension is finite and strictly positive.
pub fn check_dimension(value: Real, what: &'static str) -> EquipmentResult<Real> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(EquipmentError::InvalidGeometry { what, value })
    }
}

/// Ensure a parameter is finite and not negative.
pub fn check_non_negative(value: Real, what: &'static str) -> EquipmentResult<Real> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(EquipmentError::NonPhysical { what, value })
    }
}

/// Cross-sectional area of a circular bore [m²].
pub fn circle_area(diameter: Real) -> Real {
    std::f64::consts::PI * diameter * diameter / 4.0
}
