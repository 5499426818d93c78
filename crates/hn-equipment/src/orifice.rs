//! Sharp-edged orifice plate.

use crate::common::{check_dimension, check_finite, circle_area};
use crate::error::{EquipmentError, EquipmentResult};
use crate::traits::FlowElement;
use hn_core::Real;
use hn_core::numeric::signed_square;
use hn_core::units::Length;

/// Discharge coefficient of a sharp-edged plate.
pub const ORIFICE_CD: Real = 0.6;

/// Orifice plate in a pipe run.
///
/// The recoverable drop is the pipe dynamic pressure times
/// `(1−β⁴)/(Cd²·β⁴)`; the permanent loss keeps the `(1−β²)` fraction of it.
#[derive(Debug, Clone, PartialEq)]
pub struct Orifice {
    /// Inner diameter of the surrounding pipe
    pub pipe_diameter: Length,
    /// Bore diameter
    pub bore: Length,
}

impl Orifice {
    /// Create an orifice. Both diameters must be positive and the bore
    /// smaller than the pipe.
    pub fn new(pipe_diameter: Length, bore: Length) -> EquipmentResult<Self> {
        let orifice = Self {
            pipe_diameter,
            bore,
        };
        orifice.beta()?;
        Ok(orifice)
    }

    /// Diameter ratio `β = d_bore / d_pipe`.
    pub fn beta(&self) -> EquipmentResult<Real> {
        let d_pipe = check_dimension(self.pipe_diameter.value, "orifice pipe diameter")?;
        let d_bore = check_dimension(self.bore.value, "orifice bore")?;
        if d_bore >= d_pipe {
            return Err(EquipmentError::InvalidGeometry {
                what: "orifice bore must be smaller than pipe diameter",
                value: d_bore,
            });
        }
        Ok(d_bore / d_pipe)
    }
}

impl FlowElement for Orifice {
    fn pressure_drop(&self, flow: Real, density: Real, _viscosity: Real) -> EquipmentResult<Real> {
        let beta = self.beta()?;
        let beta2 = beta * beta;
        let beta4 = beta2 * beta2;

        let v = flow / circle_area(self.pipe_diameter.value);
        let dynamic = 0.5 * density * signed_square(v);
        let geometry = (1.0 - beta4) / (ORIFICE_CD * ORIFICE_CD * beta4);
        let recoverable = dynamic * geometry;

        check_finite(recoverable * (1.0 - beta2), "orifice pressure drop")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hn_core::units::m;

    #[test]
    fn smaller_bore_larger_drop() {
        let wide = Orifice::new(m(0.1), m(0.08)).unwrap();
        let narrow = Orifice::new(m(0.1), m(0.05)).unwrap();
        let q = 0.01;
        assert!(
            narrow.pressure_drop(q, 1000.0, 1e-3).unwrap()
                > wide.pressure_drop(q, 1000.0, 1e-3).unwrap()
        );
    }

    #[test]
    fn known_value() {
        let orifice = Orifice::new(m(0.1), m(0.05)).unwrap();
        let v = 0.01 / circle_area(0.1);
        let beta: f64 = 0.5;
        let expected = 0.5 * 1000.0 * v * v * (1.0 - beta.powi(4))
            / (0.36 * beta.powi(4))
            * (1.0 - beta * beta);
        let dp = orifice.pressure_drop(0.01, 1000.0, 1e-3).unwrap();
        assert!((dp - expected).abs() < 1e-6);
    }

    #[test]
    fn invalid_geometry_rejected() {
        assert!(Orifice::new(m(0.0), m(0.05)).is_err());
        assert!(Orifice::new(m(0.1), m(-0.05)).is_err());
        assert!(Orifice::new(m(0.1), m(0.1)).is_err());
    }
}
