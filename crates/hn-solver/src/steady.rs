//! Converged solution and the telemetry write-back onto the network.

use hn_core::units::{Pressure, VolumeRate, m3ps, pa};
use hn_core::{EdgeId, NodeId, Real};
use hn_network::HydraulicNetwork;
use uom::si::pressure::pascal;
use uom::si::volume_rate::cubic_meter_per_second;

use crate::error::{SolverError, SolverResult};
use crate::sweep::PropertyField;

/// Solution state for a steady-state network.
#[derive(Clone, Debug)]
pub struct SteadySolution {
    /// Inlet pressure of every node in node order (tank static pressure for
    /// boundaries)
    pub node_pressures: Vec<Pressure>,
    /// Signed flow of every edge in edge order, positive source → target
    pub edge_flows: Vec<VolumeRate>,
    /// Residual norm at convergence
    pub residual_norm: f64,
    /// Number of iterations
    pub iterations: usize,
}

impl SteadySolution {
    pub(crate) fn new(
        inlet_pressures: &[Real],
        flows: &[Real],
        residual_norm: f64,
        iterations: usize,
    ) -> Self {
        Self {
            node_pressures: inlet_pressures.iter().map(|&p| pa(p)).collect(),
            edge_flows: flows.iter().map(|&q| m3ps(q)).collect(),
            residual_norm,
            iterations,
        }
    }

    /// Node inlet pressure [Pa].
    pub fn pressure_pa(&self, node: NodeId) -> Option<f64> {
        self.node_pressures
            .get(node.slot())
            .map(|p| p.get::<pascal>())
    }

    /// Signed edge flow [m³/s].
    pub fn flow_m3ps(&self, edge: EdgeId) -> Option<f64> {
        self.edge_flows
            .get(edge.slot())
            .map(|q| q.get::<cubic_meter_per_second>())
    }
}

/// Write the resolved state onto every node and edge port.
///
/// Node ports receive the swept fluid state and their summed edge flows; the
/// inlet pressures are set and each node's own transfer law then derives the
/// outlet side. Edge ends take the pressure of the node port they attach to.
pub(crate) fn write_back(
    network: &mut HydraulicNetwork,
    inlet_pressures: &[Real],
    flows: &[Real],
    field: &PropertyField,
) -> SolverResult<()> {
    let (nodes, edges) = network.parts_mut();

    for node in nodes.iter_mut() {
        let slot = node.id().slot();
        let (Some(inlets), Some(outlets), Some(&p_in)) = (
            field.inlets.get(slot),
            field.outlets.get(slot),
            inlet_pressures.get(slot),
        ) else {
            return Err(SolverError::InvalidState {
                what: format!("no solved state for node '{}'", node.key()),
            });
        };

        for (port, solved) in node.inlets_mut().iter_mut().zip(inlets) {
            *port = *solved;
            port.pressure = p_in;
        }
        for (port, solved) in node.outlets_mut().iter_mut().zip(outlets) {
            *port = *solved;
        }
        node.calculate()?;
    }

    for edge in edges.iter_mut() {
        let slot = edge.id.slot();
        let (Some(&q), Some(fluid)) = (flows.get(slot), field.edges.get(slot)) else {
            return Err(SolverError::InvalidState {
                what: format!("no solved state for edge '{}'", edge.key),
            });
        };
        let p_source = nodes
            .get(edge.source.slot())
            .and_then(|n| n.outlets().get(edge.source_port))
            .map(|p| p.pressure);
        let p_target = nodes
            .get(edge.target.slot())
            .and_then(|n| n.inlets().get(edge.target_port))
            .map(|p| p.pressure);
        let (Some(p_source), Some(p_target)) = (p_source, p_target) else {
            return Err(SolverError::InvalidState {
                what: format!("edge '{}' refers to a missing port", edge.key),
            });
        };

        edge.inlet = *fluid;
        edge.inlet.pressure = p_source;
        edge.inlet.flow_rate = q;

        edge.outlet = *fluid;
        edge.outlet.pressure = p_target;
        edge.outlet.flow_rate = q;
    }

    Ok(())
}
