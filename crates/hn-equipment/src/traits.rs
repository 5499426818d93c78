//! Core trait for hydraulic flow elements.

use crate::error::EquipmentResult;
use hn_core::Real;

/// A device with a hydraulic transfer law between its inlet and outlet sides.
///
/// `pressure_drop` is the pressure lost from inlet to outlet for a signed
/// volumetric flow (positive = inlet → outlet). Resistive laws are odd in the
/// flow, so reverse flow yields a negative drop. Devices that add energy
/// (pumps) return a negative drop.
pub trait FlowElement: Send + Sync {
    /// Pressure lost from inlet to outlet [Pa].
    ///
    /// # Arguments
    /// * `flow` - Signed volumetric flow rate [m³/s]
    /// * `density` - Density of the fluid entering the device [kg/m³]
    /// * `viscosity` - Dynamic viscosity of the fluid entering the device [Pa·s]
    fn pressure_drop(&self, flow: Real, density: Real, viscosity: Real) -> EquipmentResult<Real>;
}
