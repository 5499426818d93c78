//! Property sweep: temperature, fluid, density and viscosity along the
//! current flow guess.
//!
//! The sweep never touches the network. It builds a scratch copy of every
//! port, starting from ambient conditions, so a residual evaluation is a pure
//! function of the unknowns.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use hn_core::{EdgeId, NodeId, Real};
use hn_equipment::{Port, mixing::mixed_state};
use hn_network::HydraulicNetwork;

use crate::error::SolverResult;

/// Scratch port states for every node and edge.
#[derive(Debug, Clone)]
pub struct PropertyField {
    /// Per node, inlet ports with their summed edge flows
    pub inlets: Vec<Vec<Port>>,
    /// Per node, outlet ports with their summed edge flows
    pub outlets: Vec<Vec<Port>>,
    /// Fluid state carried by each edge (pipes are isothermal)
    pub edges: Vec<Port>,
}

impl PropertyField {
    /// Ambient ports carrying the given edge flows.
    fn ambient(network: &HydraulicNetwork, flows: &[Real]) -> SolverResult<Self> {
        let ambient = network.settings().ambient_port()?;

        let mut inlets: Vec<Vec<Port>> = network
            .nodes()
            .iter()
            .map(|n| vec![ambient; n.inlets().len()])
            .collect();
        let mut outlets: Vec<Vec<Port>> = network
            .nodes()
            .iter()
            .map(|n| vec![ambient; n.outlets().len()])
            .collect();
        let mut edges = vec![ambient; network.edges().len()];

        for (edge, &q) in network.edges().iter().zip(flows) {
            if let Some(port) = outlets[edge.source.slot()].get_mut(edge.source_port) {
                port.flow_rate += q;
            }
            if let Some(port) = inlets[edge.target.slot()].get_mut(edge.target_port) {
                port.flow_rate += q;
            }
            edges[edge.id.slot()].flow_rate = q;
        }

        Ok(Self {
            inlets,
            outlets,
            edges,
        })
    }

    pub fn node_inlets(&self, node: NodeId) -> &[Port] {
        self.inlets.get(node.slot()).map_or(&[], Vec::as_slice)
    }

    pub fn node_outlets(&self, node: NodeId) -> &[Port] {
        self.outlets.get(node.slot()).map_or(&[], Vec::as_slice)
    }
}

/// Node visiting order for a flow guess: Kahn's algorithm on the graph with
/// every edge pointing downstream. Ties go to the lowest node index; a cycle
/// is entered at its lowest unvisited node.
pub fn flow_order(network: &HydraulicNetwork, flows: &[Real]) -> Vec<NodeId> {
    let n = network.nodes().len();
    let mut indegree = vec![0_usize; n];
    let mut downstream: Vec<Vec<usize>> = vec![Vec::new(); n];

    for (edge, &q) in network.edges().iter().zip(flows) {
        let (from, to) = if q >= 0.0 {
            (edge.source.slot(), edge.target.slot())
        } else {
            (edge.target.slot(), edge.source.slot())
        };
        downstream[from].push(to);
        indegree[to] += 1;
    }

    let mut ready: BinaryHeap<Reverse<usize>> =
        (0..n).filter(|&i| indegree[i] == 0).map(Reverse).collect();
    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);

    while order.len() < n {
        let next = match ready.pop() {
            Some(Reverse(i)) => i,
            None => match visited.iter().position(|v| !v) {
                Some(i) => i,
                None => break,
            },
        };
        if visited[next] {
            continue;
        }
        visited[next] = true;
        order.push(NodeId::from_usize(next));

        for &to in &downstream[next] {
            indegree[to] = indegree[to].saturating_sub(1);
            if indegree[to] == 0 && !visited[to] {
                ready.push(Reverse(to));
            }
        }
    }

    order
}

/// Run `settings.property_iterations` Gauss-Seidel passes for the given
/// edge flows.
///
/// Per visited node: edge states arriving at each inward port are mixed into
/// it, the equipment's thermal law runs over the node's ports, and the
/// resulting outward port states are pushed onto the edges leaving it.
pub fn property_sweep(network: &HydraulicNetwork, flows: &[Real]) -> SolverResult<PropertyField> {
    let mut field = PropertyField::ambient(network, flows)?;
    let order = flow_order(network, flows);
    let passes = network.settings().property_iterations.max(1);

    for _ in 0..passes {
        for &id in &order {
            visit(network, flows, &mut field, id)?;
        }
    }

    Ok(field)
}

fn visit(
    network: &HydraulicNetwork,
    flows: &[Real],
    field: &mut PropertyField,
    id: NodeId,
) -> SolverResult<()> {
    let Some(node) = network.node(id) else {
        return Ok(());
    };
    let slot = id.slot();
    let incoming = network.incoming(id);
    let outgoing = network.outgoing(id);

    // Pull: edges delivering into this node
    if !node.is_boundary() {
        for (port_idx, port) in field.inlets[slot].iter_mut().enumerate() {
            let arriving = incoming.iter().filter_map(|&e| {
                let edge = network.edge(e)?;
                let q = flows[e.slot()];
                (edge.target_port == port_idx && q > 0.0).then_some((e, q))
            });
            mix_into(port, arriving, &field.edges)?;
        }
        for (port_idx, port) in field.outlets[slot].iter_mut().enumerate() {
            let arriving = outgoing.iter().filter_map(|&e| {
                let edge = network.edge(e)?;
                let q = flows[e.slot()];
                (edge.source_port == port_idx && q < 0.0).then_some((e, q))
            });
            mix_into(port, arriving, &field.edges)?;
        }
    }

    node.equipment()
        .propagate_temperature(&mut field.inlets[slot], &mut field.outlets[slot])?;

    // Push: edges carrying fluid away from this node
    for &e in outgoing {
        let (Some(edge), Some(&q)) = (network.edge(e), flows.get(e.slot())) else {
            continue;
        };
        if q >= 0.0
            && let Some(port) = field.outlets[slot].get(edge.source_port)
        {
            field.edges[e.slot()].copy_thermal_from(port);
        }
    }
    for &e in incoming {
        let (Some(edge), Some(&q)) = (network.edge(e), flows.get(e.slot())) else {
            continue;
        };
        if q < 0.0
            && let Some(port) = field.inlets[slot].get(edge.target_port)
        {
            field.edges[e.slot()].copy_thermal_from(port);
        }
    }

    Ok(())
}

/// Mass-flow-weighted mix of the arriving edge states into one port.
fn mix_into(
    port: &mut Port,
    arriving: impl Iterator<Item = (EdgeId, Real)>,
    edges: &[Port],
) -> SolverResult<()> {
    let streams: Vec<Port> = arriving
        .filter_map(|(e, q)| {
            let mut stream = *edges.get(e.slot())?;
            stream.flow_rate = q.abs();
            Some(stream)
        })
        .collect();

    if let Some(mix) = mixed_state(&streams, &[])? {
        port.set_thermal(mix.fluid, mix.temperature)?;
    }
    Ok(())
}
