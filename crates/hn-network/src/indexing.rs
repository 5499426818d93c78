//! Stable indexing for solver integration.
//!
//! Maps internal-node pressures and edge flows to contiguous positions in
//! the solver's unknown vector: `[P_internal..., Q_edges...]`.

use hn_core::{EdgeId, NodeId};

use crate::network::HydraulicNetwork;

/// Layout of the unknown vector.
///
/// Boundary nodes carry no unknown; their pressure is fixed by the tank.
#[derive(Debug, Clone)]
pub struct IndexMap {
    /// Unknown position -> internal node, in node order
    pressure_nodes: Vec<NodeId>,
    /// NodeId slot -> pressure position (None for boundaries)
    node_to_pressure: Vec<Option<usize>>,
    edge_count: usize,
}

impl IndexMap {
    pub fn from_network(network: &HydraulicNetwork) -> Self {
        let mut pressure_nodes = Vec::new();
        let mut node_to_pressure = vec![None; network.nodes().len()];

        for node in network.internal_nodes() {
            node_to_pressure[node.id().slot()] = Some(pressure_nodes.len());
            pressure_nodes.push(node.id());
        }

        Self {
            pressure_nodes,
            node_to_pressure,
            edge_count: network.edges().len(),
        }
    }

    /// Number of pressure unknowns (internal nodes).
    pub fn pressure_count(&self) -> usize {
        self.pressure_nodes.len()
    }

    /// Number of flow unknowns (edges).
    pub fn flow_count(&self) -> usize {
        self.edge_count
    }

    /// Length of the unknown vector.
    pub fn len(&self) -> usize {
        self.pressure_count() + self.flow_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pressure position for a node, or `None` for a boundary node.
    pub fn pressure_slot(&self, node: NodeId) -> Option<usize> {
        self.node_to_pressure.get(node.slot()).copied().flatten()
    }

    /// Flow position for an edge.
    pub fn flow_slot(&self, edge: EdgeId) -> usize {
        self.pressure_count() + edge.slot()
    }

    /// Internal nodes in unknown order.
    pub fn pressure_nodes(&self) -> &[NodeId] {
        &self.pressure_nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::NetworkBuilder;
    use hn_core::units::{k, m};
    use hn_equipment::{Equipment, Pipe, Pump, Tank};
    use hn_fluids::FluidType;

    #[test]
    fn boundaries_have_no_pressure_slot() {
        let mut b = NetworkBuilder::new();
        let tank = Tank::new(m(0.0), m(1.0), k(293.15), FluidType::Water).unwrap();
        let t1 = b.add_node("t1", "Sump", Equipment::Tank(tank.clone())).unwrap();
        let p1 = b
            .add_node("p1", "Pump", Equipment::Pump(Pump::new(80.0, 0.0, -2000.0).unwrap()))
            .unwrap();
        let t2 = b.add_node("t2", "Head", Equipment::Tank(tank)).unwrap();
        let pipe = Pipe::new(m(10.0), m(0.1), m(4.5e-5)).unwrap();
        let e1 = b.add_edge("e1", t1, p1, pipe.clone());
        let e2 = b.add_edge("e2", p1, t2, pipe);
        let net = b.build().unwrap();

        let map = IndexMap::from_network(&net);
        assert_eq!(map.pressure_count(), 1);
        assert_eq!(map.flow_count(), 2);
        assert_eq!(map.len(), 3);
        assert_eq!(map.pressure_slot(t1), None);
        assert_eq!(map.pressure_slot(p1), Some(0));
        assert_eq!(map.pressure_slot(t2), None);
        assert_eq!(map.flow_slot(e1), 1);
        assert_eq!(map.flow_slot(e2), 2);
    }

    #[test]
    fn empty_network_has_no_unknowns() {
        let net = NetworkBuilder::new().build().unwrap();
        let map = IndexMap::from_network(&net);
        assert!(map.is_empty());
        assert_eq!(map.pressure_slot(NodeId::from_index(0)), None);
    }
}
