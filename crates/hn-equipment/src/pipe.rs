//! Pipe with friction using the Darcy-Weisbach correlation.

use crate::common::{EPSILON_FLOW, check_dimension, check_finite, check_non_negative, circle_area};
use crate::error::EquipmentResult;
use crate::traits::FlowElement;
use hn_core::Real;
use hn_core::units::Length;

/// Reynolds number below which flow is treated as laminar.
pub const LAMINAR_REYNOLDS: Real = 2300.0;

/// Straight pipe with Darcy-Weisbach friction loss.
///
/// The friction factor comes from the Reynolds number (laminar `64/Re`,
/// Haaland above [`LAMINAR_REYNOLDS`]) unless a fixed value is set with
/// [`Pipe::with_friction_factor`].
#[derive(Debug, Clone, PartialEq)]
pub struct Pipe {
    /// Pipe length
    pub length: Length,
    /// Pipe inner diameter
    pub diameter: Length,
    /// Surface roughness (absolute)
    pub roughness: Length,
    /// Fixed Darcy friction factor overriding the Reynolds correlation
    pub friction_factor: Option<Real>,
}

impl Pipe {
    /// Create a new pipe. Fails on a non-positive diameter.
    pub fn new(length: Length, diameter: Length, roughness: Length) -> EquipmentResult<Self> {
        check_non_negative(length.value, "pipe length")?;
        check_dimension(diameter.value, "pipe diameter")?;
        check_non_negative(roughness.value, "pipe roughness")?;
        Ok(Self {
            length,
            diameter,
            roughness,
            friction_factor: None,
        })
    }

    /// Fix the Darcy friction factor instead of computing it from Reynolds.
    pub fn with_friction_factor(mut self, f: Real) -> EquipmentResult<Self> {
        check_dimension(f, "friction factor")?;
        self.friction_factor = Some(f);
        Ok(self)
    }

    /// Flow area [m²].
    pub fn area(&self) -> Real {
        circle_area(self.diameter.value)
    }

    /// Mean velocity [m/s] for a signed volumetric flow.
    pub fn velocity(&self, flow: Real) -> Real {
        flow / self.area()
    }

    /// Reynolds number (always non-negative).
    pub fn reynolds(&self, flow: Real, density: Real, viscosity: Real) -> Real {
        density * self.velocity(flow).abs() * self.diameter.value / viscosity
    }

    /// Darcy friction factor from the Reynolds correlation.
    pub fn correlated_friction_factor(&self, reynolds: Real) -> Real {
        if reynolds < LAMINAR_REYNOLDS {
            64.0 / reynolds
        } else {
            // Haaland: 1/√f = -1.8·log10[(ε/D/3.7)^1.11 + 6.9/Re]
            let rel_roughness = self.roughness.value / self.diameter.value;
            let inv_sqrt_f =
                -1.8 * ((rel_roughness / 3.7).powf(1.11) + 6.9 / reynolds).log10();
            1.0 / (inv_sqrt_f * inv_sqrt_f)
        }
    }
}

impl FlowElement for Pipe {
    fn pressure_drop(&self, flow: Real, density: Real, viscosity: Real) -> EquipmentResult<Real> {
        let d = check_dimension(self.diameter.value, "pipe diameter")?;
        if flow.abs() < EPSILON_FLOW {
            return Ok(0.0);
        }

        let v = self.velocity(flow);
        let f = match self.friction_factor {
            Some(f) => f,
            None => {
                let re = check_finite(self.reynolds(flow, density, viscosity), "Reynolds number")?;
                self.correlated_friction_factor(re)
            }
        };

        // ΔP = f·(L/D)·ρ·v·|v|/2
        let dp = f * (self.length.value / d) * density * v * v.abs() / 2.0;
        check_finite(dp, "pipe pressure drop")
    }
}
