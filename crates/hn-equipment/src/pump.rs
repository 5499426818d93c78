//! Centrifugal pump with a quadratic head curve.

use crate::common::check_finite;
use crate::error::EquipmentResult;
use crate::traits::FlowElement;
use hn_core::Real;
use hn_core::units::constants::G_MPS2;

/// Pump with head curve `H = A + B·Q + C·Q²` [m].
///
/// Pressure is added, so [`FlowElement::pressure_drop`] returns `-ρ·g·H`.
/// Past shut-off the head goes negative and the pump acts as a restriction.
#[derive(Debug, Clone, PartialEq)]
pub struct Pump {
    /// Shut-off head [m]
    pub a: Real,
    /// Linear coefficient [m/(m³/s)]
    pub b: Real,
    /// Quadratic coefficient [m/(m³/s)²]
    pub c: Real,
}

impl Pump {
    pub fn new(a: Real, b: Real, c: Real) -> EquipmentResult<Self> {
        check_finite(a, "pump coefficient A")?;
        check_finite(b, "pump coefficient B")?;
        check_finite(c, "pump coefficient C")?;
        Ok(Self { a, b, c })
    }

    /// Head delivered at `flow` [m].
    pub fn head(&self, flow: Real) -> Real {
        self.a + self.b * flow + self.c * flow * flow
    }

    /// Pressure rise [Pa].
    pub fn pressure_rise(&self, flow: Real, density: Real) -> Real {
        density * G_MPS2 * self.head(flow)
    }
}

impl FlowElement for Pump {
    fn pressure_drop(&self, flow: Real, density: Real, _viscosity: Real) -> EquipmentResult<Real> {
        check_finite(-self.pressure_rise(flow, density), "pump pressure rise")
    }
}
