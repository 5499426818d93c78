//! Connection-point state records.

use hn_core::Real;
use hn_core::units::constants::{P_ATM_PA, T_AMBIENT_K};
use hn_fluids::{FluidResult, FluidType, properties};

/// Which side of a device a port sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PortRole {
    Inlet,
    Outlet,
}

impl PortRole {
    /// Whether a signed port flow carries fluid into the device.
    ///
    /// Inlet flow is positive when entering, outlet flow is positive when
    /// leaving, so an outlet with negative flow is also an inward port.
    pub fn is_inward(self, flow: Real) -> bool {
        match self {
            PortRole::Inlet => flow > 0.0,
            PortRole::Outlet => flow < 0.0,
        }
    }
}

/// Instantaneous physical state at a connection point.
///
/// `density` and `viscosity` are always evaluated from `fluid` at
/// `temperature`; use [`Port::set_thermal`] to change either.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Port {
    /// Absolute pressure [Pa]
    pub pressure: Real,
    /// Signed volumetric flow [m³/s], positive in the port's nominal direction
    pub flow_rate: Real,
    /// Temperature [K]
    pub temperature: Real,
    /// Density [kg/m³]
    pub density: Real,
    /// Dynamic viscosity [Pa·s]
    pub viscosity: Real,
    /// Fluid occupying the port
    pub fluid: FluidType,
}

impl Default for Port {
    fn default() -> Self {
        Self {
            pressure: P_ATM_PA,
            flow_rate: 0.0,
            temperature: T_AMBIENT_K,
            density: 1000.0,
            viscosity: 1.0e-3,
            fluid: FluidType::Water,
        }
    }
}

impl Port {
    /// Stagnant port at `pressure` filled with `fluid` at `temperature`.
    pub fn with_fluid(fluid: FluidType, temperature: Real, pressure: Real) -> FluidResult<Self> {
        let mut port = Port {
            pressure,
            ..Port::default()
        };
        port.set_thermal(fluid, temperature)?;
        Ok(port)
    }

    /// Assign fluid and temperature, re-evaluating density and viscosity.
    pub fn set_thermal(&mut self, fluid: FluidType, temperature: Real) -> FluidResult<()> {
        let props = properties(fluid, temperature)?;
        self.fluid = fluid;
        self.temperature = temperature;
        self.density = props.density;
        self.viscosity = props.viscosity;
        Ok(())
    }

    /// Copy the thermal half of another port's state (fluid, T, ρ, μ).
    pub fn copy_thermal_from(&mut self, other: &Port) {
        self.fluid = other.fluid;
        self.temperature = other.temperature;
        self.density = other.density;
        self.viscosity = other.viscosity;
    }

    /// Magnitude of the mass flow through the port [kg/s].
    pub fn mass_flow(&self) -> Real {
        self.flow_rate.abs() * self.density
    }
}
