//! Equipment instance with its ports, as placed in a network.

use std::sync::Arc;

use crate::equipment::{Equipment, EquipmentKind};
use crate::error::{EquipmentError, EquipmentResult};
use crate::port::Port;
use crate::settings::GlobalSettings;
use crate::traits::FlowElement;
use crate::valve::Valve;
use hn_core::{NodeId, Real};

/// A piece of equipment, its ordered inlet/outlet ports and a shared
/// reference to the network's settings.
///
/// Port counts are fixed by the equipment variant at construction; the port
/// vectors are only ever exposed as slices.
#[derive(Debug, Clone)]
pub struct HydraulicNode {
    id: NodeId,
    key: String,
    name: String,
    equipment: Equipment,
    inlets: Vec<Port>,
    outlets: Vec<Port>,
    settings: Arc<GlobalSettings>,
}

impl HydraulicNode {
    /// Create a node with all ports at ambient conditions (tank ports at the
    /// tank's boundary state).
    pub fn new(
        id: NodeId,
        key: impl Into<String>,
        name: impl Into<String>,
        equipment: Equipment,
        settings: Arc<GlobalSettings>,
    ) -> EquipmentResult<Self> {
        let template = match &equipment {
            Equipment::Tank(tank) => tank.boundary_port(settings.atmospheric_pressure)?,
            _ => settings.ambient_port()?,
        };
        let (n_in, n_out) = equipment.port_counts();
        Ok(Self {
            id,
            key: key.into(),
            name: name.into(),
            equipment,
            inlets: vec![template; n_in],
            outlets: vec![template; n_out],
            settings,
        })
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Stable lookup key (unique within a network).
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> EquipmentKind {
        self.equipment.kind()
    }

    pub fn equipment(&self) -> &Equipment {
        &self.equipment
    }

    pub fn settings(&self) -> &GlobalSettings {
        &self.settings
    }

    pub fn is_boundary(&self) -> bool {
        self.equipment.is_boundary()
    }

    pub fn inlets(&self) -> &[Port] {
        &self.inlets
    }

    pub fn outlets(&self) -> &[Port] {
        &self.outlets
    }

    pub fn inlets_mut(&mut self) -> &mut [Port] {
        &mut self.inlets
    }

    pub fn outlets_mut(&mut self) -> &mut [Port] {
        &mut self.outlets
    }

    /// Adjustable valve parameters, if this node is a valve.
    pub fn valve_mut(&mut self) -> Option<&mut Valve> {
        match &mut self.equipment {
            Equipment::Valve(valve) => Some(valve),
            _ => None,
        }
    }

    /// Boundary pressure of a tank node.
    pub fn boundary_pressure(&self) -> EquipmentResult<Option<Real>> {
        match &self.equipment {
            Equipment::Tank(tank) => Ok(Some(
                tank.static_pressure(self.settings.atmospheric_pressure)?,
            )),
            _ => Ok(None),
        }
    }

    /// Volumetric throughput seen by the device: the sum of inlet flows.
    pub fn throughput(&self) -> Real {
        self.inlets.iter().map(|p| p.flow_rate).sum()
    }

    /// Port through which fluid enters for a signed throughput.
    pub fn upstream_port(&self, throughput: Real) -> EquipmentResult<&Port> {
        let port = if throughput >= 0.0 {
            self.inlets.first()
        } else {
            self.outlets.first()
        };
        port.ok_or(EquipmentError::InvalidArg {
            what: "node has no ports",
        })
    }

    /// Pressure lost across the device at its current port state [Pa].
    pub fn pressure_drop(&self, flow: Real, density: Real, viscosity: Real) -> EquipmentResult<Real> {
        self.equipment.pressure_drop(flow, density, viscosity)
    }

    /// Transfer function: derive the outlet side from the inlet side.
    ///
    /// The first inlet pressure is the node's reference pressure. Outlet
    /// pressures become `p_in − Δp(Q)` with ρ, μ from the upstream port, every
    /// inlet shares the reference pressure, and a single outlet carries the
    /// summed inlet flow. Tanks instead reset every port to their boundary
    /// state. Temperature is then propagated. Returns the pressure drop.
    pub fn calculate(&mut self) -> EquipmentResult<Real> {
        if let Equipment::Tank(tank) = &self.equipment {
            let boundary = tank.boundary_port(self.settings.atmospheric_pressure)?;
            for port in self.inlets.iter_mut().chain(self.outlets.iter_mut()) {
                let flow = port.flow_rate;
                *port = boundary;
                port.flow_rate = flow;
            }
            return Ok(0.0);
        }

        let q = self.throughput();
        let up = *self.upstream_port(q)?;
        let dp = self.pressure_drop(q, up.density, up.viscosity)?;
        let p_ref = self.inlets.first().map_or(up.pressure, |p| p.pressure);

        for port in self.inlets.iter_mut() {
            port.pressure = p_ref;
        }
        let single_outlet = self.outlets.len() == 1;
        for port in self.outlets.iter_mut() {
            port.pressure = p_ref - dp;
            if single_outlet {
                port.flow_rate = q;
            }
        }

        self.propagate_temperature()?;
        Ok(dp)
    }

    /// Apply the equipment's thermal law to this node's own ports.
    pub fn propagate_temperature(&mut self) -> EquipmentResult<()> {
        self.equipment
            .propagate_temperature(&mut self.inlets, &mut self.outlets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::junction::Mixer;
    use crate::pump::Pump;
    use crate::tank::Tank;
    use hn_core::units::{k, m};
    use hn_fluids::FluidType;

    fn settings() -> Arc<GlobalSettings> {
        Arc::new(GlobalSettings::default())
    }

    #[test]
    fn ports_created_per_variant() {
        let node = HydraulicNode::new(
            NodeId::from_index(0),
            "mix",
            "Mixer",
            Equipment::Mixer(Mixer::new(3).unwrap()),
            settings(),
        )
        .unwrap();
        assert_eq!(node.inlets().len(), 3);
        assert_eq!(node.outlets().len(), 1);
    }

    #[test]
    fn tank_ports_start_at_boundary() {
        let tank = Tank::new(m(0.0), m(5.0), k(293.15), FluidType::Water).unwrap();
        let node = HydraulicNode::new(
            NodeId::from_index(0),
            "t1",
            "Tank",
            Equipment::Tank(tank),
            settings(),
        )
        .unwrap();
        let p = node.boundary_pressure().unwrap().unwrap();
        assert_eq!(p, 101_325.0 + 1000.0 * 9.81 * 5.0);
        assert_eq!(node.outlets()[0].pressure, p);
    }

    #[test]
    fn pump_calculate_adds_head() {
        let mut node = HydraulicNode::new(
            NodeId::from_index(1),
            "p1",
            "Pump",
            Equipment::Pump(Pump::new(80.0, 0.0, -2000.0).unwrap()),
            settings(),
        )
        .unwrap();
        node.inlets_mut()[0].flow_rate = 0.1;
        node.inlets_mut()[0].pressure = 150_000.0;
        let dp = node.calculate().unwrap();
        let rise = 1000.0 * 9.81 * (80.0 - 2000.0 * 0.01);
        assert!((dp + rise).abs() < 1e-6);
        assert!((node.outlets()[0].pressure - (150_000.0 + rise)).abs() < 1e-6);
        assert!((node.outlets()[0].flow_rate - 0.1).abs() < 1e-15);
    }

    #[test]
    fn valve_lookup() {
        let mut node = HydraulicNode::new(
            NodeId::from_index(2),
            "v1",
            "Valve",
            Equipment::Valve(Valve::new(0.05, 50.0).unwrap()),
            settings(),
        )
        .unwrap();
        node.valve_mut().unwrap().set_opening(75.0).unwrap();
        match node.equipment() {
            Equipment::Valve(v) => assert_eq!(v.opening(), 75.0),
            other => panic!("unexpected {other:?}"),
        }
    }
}
