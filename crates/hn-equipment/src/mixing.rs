//! Mass-flow-weighted temperature mixing across a node's ports.

use crate::error::EquipmentResult;
use crate::port::{Port, PortRole};
use hn_core::Real;
use hn_fluids::{FluidType, density};

/// Result of mixing every inward stream of a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MixState {
    /// Mass-flow-weighted inward temperature [K]
    pub temperature: Real,
    /// Fluid of the largest inward stream
    pub fluid: FluidType,
    /// Total inward mass flow [kg/s]
    pub mass_flow: Real,
    /// Density of the mixed stream [kg/m³]
    pub density: Real,
}

fn tagged<'a>(
    inlets: &'a [Port],
    outlets: &'a [Port],
) -> impl Iterator<Item = (PortRole, &'a Port)> {
    inlets
        .iter()
        .map(|p| (PortRole::Inlet, p))
        .chain(outlets.iter().map(|p| (PortRole::Outlet, p)))
}

/// Mix the inward streams. `None` when nothing flows in.
pub fn mixed_state(inlets: &[Port], outlets: &[Port]) -> EquipmentResult<Option<MixState>> {
    let mut mass_flow = 0.0;
    let mut weighted_t = 0.0;
    let mut dominant: Option<(FluidType, Real)> = None;

    for (role, port) in tagged(inlets, outlets) {
        if !role.is_inward(port.flow_rate) {
            continue;
        }
        let m = port.mass_flow();
        mass_flow += m;
        weighted_t += m * port.temperature;
        if dominant.is_none_or(|(_, best)| m > best) {
            dominant = Some((port.fluid, m));
        }
    }

    let Some((fluid, _)) = dominant else {
        return Ok(None);
    };
    if mass_flow <= 0.0 {
        return Ok(None);
    }

    let temperature = weighted_t / mass_flow;
    Ok(Some(MixState {
        temperature,
        fluid,
        mass_flow,
        density: density(fluid, temperature)?,
    }))
}

/// Assign `fluid` at `temperature` to every port not carrying flow inward.
pub fn apply_outward(
    inlets: &mut [Port],
    outlets: &mut [Port],
    fluid: FluidType,
    temperature: Real,
) -> EquipmentResult<()> {
    for port in inlets.iter_mut() {
        if !PortRole::Inlet.is_inward(port.flow_rate) {
            port.set_thermal(fluid, temperature)?;
        }
    }
    for port in outlets.iter_mut() {
        if !PortRole::Outlet.is_inward(port.flow_rate) {
            port.set_thermal(fluid, temperature)?;
        }
    }
    Ok(())
}

/// Mixing law: mix inward streams and propagate the result to outward ports.
pub fn mix_ports(inlets: &mut [Port], outlets: &mut [Port]) -> EquipmentResult<Option<MixState>> {
    let mix = mixed_state(inlets, outlets)?;
    if let Some(state) = mix {
        apply_outward(inlets, outlets, state.fluid, state.temperature)?;
    }
    Ok(mix)
}
