//! Serializable readings taken from a solved network.

use hn_equipment::Port;
use hn_fluids::FluidType;
use hn_network::HydraulicNetwork;
use hn_solver::SteadySolution;
use serde::{Deserialize, Serialize};

/// State at one port.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PortReading {
    pub pressure_pa: f64,
    pub temperature_k: f64,
    pub flow_m3_s: f64,
    pub density_kg_m3: f64,
    pub viscosity_pa_s: f64,
    pub fluid: FluidType,
}

impl From<&Port> for PortReading {
    fn from(port: &Port) -> Self {
        Self {
            pressure_pa: port.pressure,
            temperature_k: port.temperature,
            flow_m3_s: port.flow_rate,
            density_kg_m3: port.density,
            viscosity_pa_s: port.viscosity,
            fluid: port.fluid,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeReading {
    pub key: String,
    pub name: String,
    pub kind: String,
    pub inlets: Vec<PortReading>,
    pub outlets: Vec<PortReading>,
}

impl NodeReading {
    /// Pressure lost between the first inlet and first outlet (negative for
    /// a pump) [Pa].
    pub fn pressure_drop_pa(&self) -> Option<f64> {
        Some(self.inlets.first()?.pressure_pa - self.outlets.first()?.pressure_pa)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EdgeReading {
    pub key: String,
    pub from: String,
    pub to: String,
    pub flow_m3_s: f64,
    pub velocity_m_s: f64,
    pub reynolds: f64,
    pub pressure_drop_pa: f64,
    pub inlet: PortReading,
    pub outlet: PortReading,
}

/// Everything a front-end shows after a solve.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TelemetrySnapshot {
    pub iterations: usize,
    pub residual_norm: f64,
    pub nodes: Vec<NodeReading>,
    pub edges: Vec<EdgeReading>,
}

impl TelemetrySnapshot {
    /// Read the written-back port states of a solved network.
    pub fn capture(network: &HydraulicNetwork, solution: &SteadySolution) -> Self {
        let nodes = network
            .nodes()
            .iter()
            .map(|node| NodeReading {
                key: node.key().to_string(),
                name: node.name().to_string(),
                kind: node.kind().key().to_string(),
                inlets: node.inlets().iter().map(PortReading::from).collect(),
                outlets: node.outlets().iter().map(PortReading::from).collect(),
            })
            .collect();

        let key_of = |id| network.node(id).map_or("", |n| n.key()).to_string();
        let edges = network
            .edges()
            .iter()
            .map(|edge| {
                let q = edge.flow();
                EdgeReading {
                    key: edge.key.clone(),
                    from: key_of(edge.source),
                    to: key_of(edge.target),
                    flow_m3_s: q,
                    velocity_m_s: edge.pipe.velocity(q),
                    reynolds: edge
                        .pipe
                        .reynolds(q, edge.inlet.density, edge.inlet.viscosity),
                    pressure_drop_pa: edge.inlet.pressure - edge.outlet.pressure,
                    inlet: PortReading::from(&edge.inlet),
                    outlet: PortReading::from(&edge.outlet),
                }
            })
            .collect();

        Self {
            iterations: solution.iterations,
            residual_norm: solution.residual_norm,
            nodes,
            edges,
        }
    }

    pub fn node(&self, key: &str) -> Option<&NodeReading> {
        self.nodes.iter().find(|n| n.key == key)
    }

    pub fn edge(&self, key: &str) -> Option<&EdgeReading> {
        self.edges.iter().find(|e| e.key == key)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
