//! Problem definition for steady-state network solving.

use hn_core::{NodeId, Real};
use hn_equipment::FlowElement;
use hn_network::{HydraulicNetwork, IndexMap};
use nalgebra::DVector;

use crate::error::{SolverError, SolverResult};
use crate::sweep::{PropertyField, property_sweep};

/// Steady-state network problem definition.
///
/// Unknowns are one pressure per internal node (the pressure at all of its
/// inlet ports) followed by one signed flow per edge. Residuals are the
/// volumetric mass balance of every internal node followed by the momentum
/// balance of every edge, the latter divided by `pressure_scale`.
#[derive(Debug)]
pub struct SteadyProblem<'a> {
    network: &'a HydraulicNetwork,
    index: IndexMap,
    /// Tank static pressures by node slot (None for internal nodes)
    boundary: Vec<Option<Real>>,
    pressure_scale: Real,
}

impl<'a> SteadyProblem<'a> {
    /// Assemble the problem, failing fast on topologies no root-finder can
    /// handle.
    pub fn new(network: &'a HydraulicNetwork) -> SolverResult<Self> {
        let boundary = network
            .nodes()
            .iter()
            .map(|n| n.boundary_pressure())
            .collect::<Result<Vec<_>, _>>()?;

        if boundary.iter().all(Option::is_none) {
            return Err(SolverError::Topology {
                what: "network has no tank to anchor the pressure".to_string(),
            });
        }

        let index = IndexMap::from_network(network);
        if index.pressure_count() > 0 && index.flow_count() == 0 {
            return Err(SolverError::Topology {
                what: format!(
                    "{} internal node(s) but no edges to connect them",
                    index.pressure_count()
                ),
            });
        }

        Ok(Self {
            network,
            index,
            boundary,
            pressure_scale: network.settings().pressure_scale,
        })
    }

    pub fn network(&self) -> &HydraulicNetwork {
        self.network
    }

    pub fn index(&self) -> &IndexMap {
        &self.index
    }

    /// Length of the unknown (and residual) vector.
    pub fn unknown_count(&self) -> usize {
        self.index.len()
    }

    /// Mean tank pressure for every internal node, a uniform positive flow
    /// for every edge.
    pub fn initial_guess(&self) -> DVector<f64> {
        let tanks: Vec<Real> = self.boundary.iter().flatten().copied().collect();
        let mean = tanks.iter().sum::<Real>() / tanks.len().max(1) as Real;
        let q0 = self.network.settings().initial_flow_guess;

        let np = self.index.pressure_count();
        DVector::from_fn(self.unknown_count(), |i, _| if i < np { mean } else { q0 })
    }

    /// Edge flows in edge order.
    pub fn flows(&self, x: &DVector<f64>) -> Vec<Real> {
        let np = self.index.pressure_count();
        x.iter().skip(np).copied().collect()
    }

    /// Inlet pressure of every node in node order: tank static pressure or
    /// the node's unknown.
    pub fn inlet_pressures(&self, x: &DVector<f64>) -> Vec<Real> {
        self.network
            .nodes()
            .iter()
            .map(|node| {
                let id = node.id();
                match self.boundary[id.slot()] {
                    Some(p) => p,
                    None => self.index.pressure_slot(id).map_or(0.0, |i| x[i]),
                }
            })
            .collect()
    }

    /// Signed throughput of a node: the sum of the flows entering it.
    pub fn throughput(&self, node: NodeId, flows: &[Real]) -> Real {
        self.network
            .incoming(node)
            .iter()
            .map(|e| flows[e.slot()])
            .sum()
    }

    /// Outlet pressure of every node: tanks hold their static pressure,
    /// everything else loses `Δp(Q, ρ, μ)` with properties taken from the
    /// port fluid actually enters through.
    pub fn outlet_pressures(
        &self,
        inlet: &[Real],
        flows: &[Real],
        field: &PropertyField,
    ) -> SolverResult<Vec<Real>> {
        self.network
            .nodes()
            .iter()
            .map(|node| {
                let id = node.id();
                if let Some(p) = self.boundary[id.slot()] {
                    return Ok(p);
                }
                let q = self.throughput(id, flows);
                let upstream = if q >= 0.0 {
                    field.node_inlets(id).first()
                } else {
                    field.node_outlets(id).first()
                };
                let up = upstream.ok_or_else(|| SolverError::Topology {
                    what: format!("node '{}' has no ports", node.key()),
                })?;
                let dp = node.pressure_drop(q, up.density, up.viscosity)?;
                Ok(inlet[id.slot()] - dp)
            })
            .collect()
    }

    /// Residual vector for a candidate unknown vector.
    pub fn residuals(&self, x: &DVector<f64>) -> SolverResult<DVector<f64>> {
        let flows = self.flows(x);
        let field = property_sweep(self.network, &flows)?;
        self.residuals_with(x, &flows, &field)
    }

    /// Residuals for an already-swept property field.
    pub(crate) fn residuals_with(
        &self,
        x: &DVector<f64>,
        flows: &[Real],
        field: &PropertyField,
    ) -> SolverResult<DVector<f64>> {
        let inlet = self.inlet_pressures(x);
        let outlet = self.outlet_pressures(&inlet, flows, field)?;

        let mut r = DVector::zeros(self.unknown_count());

        // Mass balance per internal node [m³/s]
        for (i, &id) in self.index.pressure_nodes().iter().enumerate() {
            let inflow: Real = self.throughput(id, flows);
            let outflow: Real = self
                .network
                .outgoing(id)
                .iter()
                .map(|e| flows[e.slot()])
                .sum();
            r[i] = inflow - outflow;
        }

        // Momentum balance per edge, scaled to the flow residuals
        for edge in self.network.edges() {
            let q = flows[edge.id.slot()];
            let fluid = &field.edges[edge.id.slot()];
            let dp_pipe = edge.pipe.pressure_drop(q, fluid.density, fluid.viscosity)?;
            let balance = outlet[edge.source.slot()] - inlet[edge.target.slot()] - dp_pipe;
            r[self.index.flow_slot(edge.id)] = balance / self.pressure_scale;
        }

        Ok(r)
    }
}
