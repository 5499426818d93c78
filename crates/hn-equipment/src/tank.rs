//! Reservoir boundary with fixed static-head pressure.

use crate::common::{check_dimension, check_finite, check_non_negative};
use crate::error::EquipmentResult;
use crate::port::Port;
use crate::traits::FlowElement;
use hn_core::Real;
use hn_core::units::constants::G_MPS2;
use hn_core::units::{Length, Temperature};
use hn_fluids::{FluidType, density};

/// Open reservoir. Every port sits at `p_atm + ρ·g·(elevation + level)`
/// regardless of flow, and carries the tank's own fluid and temperature.
#[derive(Debug, Clone, PartialEq)]
pub struct Tank {
    /// Height of the tank bottom above datum
    pub elevation: Length,
    /// Liquid height inside the tank
    pub level: Length,
    /// Bulk liquid temperature
    pub temperature: Temperature,
    pub fluid: FluidType,
}

impl Tank {
    pub fn new(
        elevation: Length,
        level: Length,
        temperature: Temperature,
        fluid: FluidType,
    ) -> EquipmentResult<Self> {
        check_finite(elevation.value, "tank elevation")?;
        check_non_negative(level.value, "tank level")?;
        check_dimension(temperature.value, "tank temperature")?;
        Ok(Self {
            elevation,
            level,
            temperature,
            fluid,
        })
    }

    /// Total static head above datum [m].
    pub fn head(&self) -> Real {
        self.elevation.value + self.level.value
    }

    /// Liquid density at the tank temperature [kg/m³].
    pub fn density(&self) -> EquipmentResult<Real> {
        Ok(density(self.fluid, self.temperature.value)?)
    }

    /// Boundary pressure [Pa] for the given atmospheric pressure.
    pub fn static_pressure(&self, p_atm: Real) -> EquipmentResult<Real> {
        Ok(p_atm + self.density()? * G_MPS2 * self.head())
    }

    /// Port state imposed by the tank on everything attached to it.
    pub fn boundary_port(&self, p_atm: Real) -> EquipmentResult<Port> {
        let pressure = self.static_pressure(p_atm)?;
        Ok(Port::with_fluid(
            self.fluid,
            self.temperature.value,
            pressure,
        )?)
    }
}

impl FlowElement for Tank {
    fn pressure_drop(&self, _flow: Real, _density: Real, _viscosity: Real) -> EquipmentResult<Real> {
        Ok(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hn_core::units::{k, m};

    #[test]
    fn static_head_law() {
        let tank = Tank::new(m(2.0), m(3.0), k(293.15), FluidType::Water).unwrap();
        let p = tank.static_pressure(101_325.0).unwrap();
        assert_eq!(p, 101_325.0 + 1000.0 * 9.81 * 5.0);
    }

    #[test]
    fn boundary_port_carries_tank_fluid() {
        let tank = Tank::new(m(0.0), m(1.0), k(323.15), FluidType::IsoVg46).unwrap();
        let port = tank.boundary_port(101_325.0).unwrap();
        assert_eq!(port.fluid, FluidType::IsoVg46);
        assert_eq!(port.temperature, 323.15);
        assert_eq!(port.pressure, tank.static_pressure(101_325.0).unwrap());
    }

    #[test]
    fn negative_level_rejected() {
        assert!(Tank::new(m(0.0), m(-1.0), k(293.15), FluidType::Water).is_err());
    }
}
