//! Strainer/filter element with laminar loss.

use crate::common::{check_finite, check_non_negative};
use crate::error::EquipmentResult;
use crate::traits::FlowElement;
use hn_core::Real;

/// Filter with `Δp = R_clean · clog · μ · Q`.
///
/// The only device whose loss scales with viscosity rather than density,
/// so a cold (viscous) oil sees a much larger drop than a warm one.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    /// Clean resistance [1/m³]
    pub resistance: Real,
    /// Clogging multiplier (1 = clean)
    pub clogging: Real,
}

impl Filter {
    pub fn new(resistance: Real, clogging: Real) -> EquipmentResult<Self> {
        check_non_negative(resistance, "filter resistance")?;
        check_non_negative(clogging, "filter clogging factor")?;
        Ok(Self {
            resistance,
            clogging,
        })
    }
}

impl FlowElement for Filter {
    fn pressure_drop(&self, flow: Real, _density: Real, viscosity: Real) -> EquipmentResult<Real> {
        check_finite(
            self.resistance * self.clogging * viscosity * flow,
            "filter pressure drop",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hn_fluids::{FluidType, viscosity};

    #[test]
    fn linear_in_flow_and_viscosity() {
        let filter = Filter::new(1e6, 1.0).unwrap();
        let base = filter.pressure_drop(0.01, 1000.0, 1e-3).unwrap();
        assert!((base - 10.0).abs() < 1e-9);
        assert!((filter.pressure_drop(0.02, 1000.0, 1e-3).unwrap() - 2.0 * base).abs() < 1e-9);
        assert!((filter.pressure_drop(0.01, 1000.0, 2e-3).unwrap() - 2.0 * base).abs() < 1e-9);
    }

    #[test]
    fn independent_of_density() {
        let filter = Filter::new(1e6, 2.0).unwrap();
        let a = filter.pressure_drop(0.01, 860.0, 0.04).unwrap();
        let b = filter.pressure_drop(0.01, 1000.0, 0.04).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn warm_oil_drops_less() {
        let filter = Filter::new(1e6, 1.0).unwrap();
        let cold = filter
            .pressure_drop(0.001, 870.0, viscosity(FluidType::IsoVg46, 293.15).unwrap())
            .unwrap();
        let warm = filter
            .pressure_drop(0.001, 850.0, viscosity(FluidType::IsoVg46, 333.15).unwrap())
            .unwrap();
        assert!(warm < cold);
    }

    #[test]
    fn reverse_flow_sign() {
        let filter = Filter::new(1e6, 1.0).unwrap();
        assert!(filter.pressure_drop(-0.01, 1000.0, 1e-3).unwrap() < 0.0);
    }
}
