//! Process-wide defaults shared by every node of a network.

use crate::common::check_dimension;
use crate::error::{EquipmentError, EquipmentResult};
use crate::port::Port;
use hn_core::Real;
use hn_core::units::constants::{P_ATM_PA, T_AMBIENT_K};
use hn_fluids::FluidType;

/// Fluid defaults and convergence controls.
///
/// Built once when a network is assembled and shared read-only (via `Arc`)
/// by every node afterwards.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GlobalSettings {
    /// Fluid used wherever no boundary has determined one
    pub fluid: FluidType,
    /// Ambient temperature [K]
    pub ambient_temperature: Real,
    /// Atmospheric pressure above every tank surface [Pa]
    pub atmospheric_pressure: Real,
    /// Absolute wall roughness for pipes [m]
    pub roughness: Real,
    /// Fixed number of property propagation passes per residual evaluation
    pub property_iterations: usize,
    /// Residual norm below which a solution is accepted
    pub tolerance: Real,
    /// Iteration cap for the nonlinear solver
    pub max_iterations: usize,
    /// Starting flow for every edge [m³/s]
    pub initial_flow_guess: Real,
    /// Divisor bringing pressure residuals [Pa] to the scale of flow residuals
    pub pressure_scale: Real,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            fluid: FluidType::Water,
            ambient_temperature: T_AMBIENT_K,
            atmospheric_pressure: P_ATM_PA,
            roughness: 4.5e-5,
            property_iterations: 5,
            tolerance: 1e-6,
            max_iterations: 1000,
            initial_flow_guess: 0.1,
            pressure_scale: 1e5,
        }
    }
}

impl GlobalSettings {
    /// Reject settings no solve could use.
    pub fn validate(&self) -> EquipmentResult<()> {
        check_dimension(self.ambient_temperature, "ambient temperature")?;
        check_dimension(self.atmospheric_pressure, "atmospheric pressure")?;
        check_dimension(self.tolerance, "tolerance")?;
        check_dimension(self.pressure_scale, "pressure scale")?;
        if !(self.roughness.is_finite() && self.roughness >= 0.0) {
            return Err(EquipmentError::InvalidGeometry {
                what: "roughness",
                value: self.roughness,
            });
        }
        if !self.initial_flow_guess.is_finite() {
            return Err(EquipmentError::NonPhysical {
                what: "initial flow guess",
                value: self.initial_flow_guess,
            });
        }
        if self.max_iterations == 0 {
            return Err(EquipmentError::InvalidArg {
                what: "max_iterations must be at least 1",
            });
        }
        Ok(())
    }

    /// Stagnant port at ambient conditions with the default fluid.
    pub fn ambient_port(&self) -> EquipmentResult<Port> {
        Ok(Port::with_fluid(
            self.fluid,
            self.ambient_temperature,
            self.atmospheric_pressure,
        )?)
    }
}
