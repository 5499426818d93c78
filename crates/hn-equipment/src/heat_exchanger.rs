//! Heat exchanger: quadratic hydraulic loss plus a fixed thermal duty.

use crate::common::{MIN_THERMAL_MASS_FLOW, check_finite, check_non_negative};
use crate::error::EquipmentResult;
use crate::traits::FlowElement;
use hn_core::Real;
use hn_core::numeric::signed_square;
use hn_core::units::Power;
use hn_fluids::specific_heat;

/// Heat exchanger with `Δp = k·ρ·Q·|Q|` and `ΔT = duty / (ṁ·cp)`.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatExchanger {
    /// Heat added to the stream (negative cools)
    pub duty: Power,
    /// Hydraulic loss factor [1/m⁴]
    pub k_factor: Real,
}

impl HeatExchanger {
    pub fn new(duty: Power, k_factor: Real) -> EquipmentResult<Self> {
        check_finite(duty.value, "heat exchanger duty")?;
        check_non_negative(k_factor, "heat exchanger k-factor")?;
        Ok(Self { duty, k_factor })
    }

    /// Temperature change of a stream with mass flow `mass_flow` [kg/s].
    ///
    /// `cp` follows the stream density; a stagnant stream is unchanged.
    pub fn temperature_change(&self, mass_flow: Real, density: Real) -> Real {
        if mass_flow > MIN_THERMAL_MASS_FLOW {
            self.duty.value / (mass_flow * specific_heat(density))
        } else {
            0.0
        }
    }
}

impl FlowElement for HeatExchanger {
    fn pressure_drop(&self, flow: Real, density: Real, _viscosity: Real) -> EquipmentResult<Real> {
        check_finite(
            self.k_factor * density * signed_square(flow),
            "heat exchanger pressure drop",
        )
    }
}
