//! Core network data structures.

use std::collections::HashMap;
use std::sync::Arc;

use hn_core::{EdgeId, NodeId, Real};
use hn_equipment::{GlobalSettings, HydraulicNode, Pipe, Port, clamp_opening};

use crate::error::{NetworkError, NetworkResult};

/// A pipe run between an outlet port of `source` and an inlet port of `target`.
///
/// Positive `flow` in the ports means source → target.
#[derive(Debug, Clone)]
pub struct Edge {
    pub id: EdgeId,
    pub key: String,
    pub source: NodeId,
    /// Outlet port index on the source node
    pub source_port: usize,
    pub target: NodeId,
    /// Inlet port index on the target node
    pub target_port: usize,
    pub pipe: Pipe,
    /// Pipe end attached to the source node
    pub inlet: Port,
    /// Pipe end attached to the target node
    pub outlet: Port,
}

impl Edge {
    /// Signed flow carried by the edge, as last written back.
    pub fn flow(&self) -> Real {
        self.inlet.flow_rate
    }
}

/// A validated directed multigraph of equipment nodes joined by pipe edges.
///
/// Nodes and edges live in arenas indexed by their ids; iteration order is
/// insertion order, so solves are reproducible. Compact adjacency lists give
/// each node's incoming and outgoing edges.
#[derive(Debug, Clone)]
pub struct HydraulicNetwork {
    pub(crate) settings: Arc<GlobalSettings>,
    pub(crate) nodes: Vec<HydraulicNode>,
    pub(crate) edges: Vec<Edge>,
    pub(crate) node_keys: HashMap<String, NodeId>,

    /// Node i's outgoing edges are `out_edges[out_offsets[i]..out_offsets[i+1]]`.
    pub(crate) out_offsets: Vec<usize>,
    pub(crate) out_edges: Vec<EdgeId>,
    /// Node i's incoming edges are `in_edges[in_offsets[i]..in_offsets[i+1]]`.
    pub(crate) in_offsets: Vec<usize>,
    pub(crate) in_edges: Vec<EdgeId>,
}

fn csr_slice<'a>(offsets: &[usize], flat: &'a [EdgeId], node: NodeId) -> &'a [EdgeId] {
    let idx = node.slot();
    match (offsets.get(idx), offsets.get(idx + 1)) {
        (Some(&start), Some(&end)) => &flat[start..end],
        _ => &[],
    }
}

impl HydraulicNetwork {
    pub fn settings(&self) -> &GlobalSettings {
        &self.settings
    }

    pub fn nodes(&self) -> &[HydraulicNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: NodeId) -> Option<&HydraulicNode> {
        self.nodes.get(id.slot())
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.slot())
    }

    pub fn node_id(&self, key: &str) -> Option<NodeId> {
        self.node_keys.get(key).copied()
    }

    pub fn node_by_key(&self, key: &str) -> Option<&HydraulicNode> {
        self.node_id(key).and_then(|id| self.node(id))
    }

    pub fn edge_by_key(&self, key: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.key == key)
    }

    /// Edges leaving `node` through its outlet ports.
    pub fn outgoing(&self, node: NodeId) -> &[EdgeId] {
        csr_slice(&self.out_offsets, &self.out_edges, node)
    }

    /// Edges entering `node` through its inlet ports.
    pub fn incoming(&self, node: NodeId) -> &[EdgeId] {
        csr_slice(&self.in_offsets, &self.in_edges, node)
    }

    /// Boundary (tank) nodes in arena order.
    pub fn boundary_nodes(&self) -> impl Iterator<Item = &HydraulicNode> {
        self.nodes.iter().filter(|n| n.is_boundary())
    }

    /// Non-boundary nodes in arena order.
    pub fn internal_nodes(&self) -> impl Iterator<Item = &HydraulicNode> {
        self.nodes.iter().filter(|n| !n.is_boundary())
    }

    /// Split borrow for writing solver results onto nodes and edges together.
    pub fn parts_mut(&mut self) -> (&mut [HydraulicNode], &mut [Edge]) {
        (&mut self.nodes, &mut self.edges)
    }

    /// Reposition a valve. The opening is clamped to `[0.1, 100]` % before
    /// the node is touched; the clamped value is returned.
    pub fn set_valve_opening(&mut self, key: &str, opening_pct: Real) -> NetworkResult<Real> {
        let id = self.node_id(key).ok_or_else(|| NetworkError::UnknownKey {
            key: key.to_string(),
        })?;
        let clamped = clamp_opening(opening_pct);
        let valve = self
            .nodes
            .get_mut(id.slot())
            .and_then(HydraulicNode::valve_mut)
            .ok_or_else(|| NetworkError::NotAValve {
                key: key.to_string(),
            })?;
        valve.set_opening(clamped)?;
        tracing::debug!(node = key, opening = clamped, "valve repositioned");
        Ok(clamped)
    }
}
