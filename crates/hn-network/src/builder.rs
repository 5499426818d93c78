//! Incremental network builder.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use hn_core::{EdgeId, NodeId};
use hn_equipment::{Equipment, GlobalSettings, HydraulicNode, Pipe};

use crate::error::{NetworkError, NetworkResult};
use crate::network::{Edge, HydraulicNetwork};
use crate::validate;

/// Edge as declared, before validation.
#[derive(Debug, Clone)]
pub(crate) struct PendingEdge {
    pub key: String,
    pub source: NodeId,
    pub source_port: usize,
    pub target: NodeId,
    pub target_port: usize,
    pub pipe: Pipe,
}

/// Builder for constructing a network incrementally.
///
/// The settings are fixed here and shared by every node. Use `add_node` and
/// `add_edge`, then call `build()` to validate and freeze the topology.
#[derive(Debug)]
pub struct NetworkBuilder {
    settings: Arc<GlobalSettings>,
    nodes: Vec<HydraulicNode>,
    edges: Vec<PendingEdge>,
    node_keys: HashMap<String, NodeId>,
}

impl Default for NetworkBuilder {
    fn default() -> Self {
        Self {
            settings: Arc::new(GlobalSettings::default()),
            nodes: Vec::new(),
            edges: Vec::new(),
            node_keys: HashMap::new(),
        }
    }
}

impl NetworkBuilder {
    /// Builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder with explicit settings (validated here).
    pub fn with_settings(settings: GlobalSettings) -> NetworkResult<Self> {
        settings.validate()?;
        Ok(Self {
            settings: Arc::new(settings),
            ..Self::default()
        })
    }

    pub fn settings(&self) -> &GlobalSettings {
        &self.settings
    }

    /// Add an equipment node and return its ID. Keys must be unique.
    pub fn add_node(
        &mut self,
        key: impl Into<String>,
        name: impl Into<String>,
        equipment: Equipment,
    ) -> NetworkResult<NodeId> {
        let key = key.into();
        if self.node_keys.contains_key(&key) {
            return Err(NetworkError::DuplicateKey { what: "node", key });
        }
        let id = NodeId::from_usize(self.nodes.len());
        let node = HydraulicNode::new(id, key.clone(), name, equipment, Arc::clone(&self.settings))?;
        self.nodes.push(node);
        self.node_keys.insert(key, id);
        Ok(id)
    }

    /// Connect outlet port 0 of `source` to inlet port 0 of `target`.
    pub fn add_edge(
        &mut self,
        key: impl Into<String>,
        source: NodeId,
        target: NodeId,
        pipe: Pipe,
    ) -> EdgeId {
        self.add_edge_between_ports(key, (source, 0), (target, 0), pipe)
    }

    /// Connect a specific outlet port of the source to a specific inlet port
    /// of the target. References are checked by `build()`.
    pub fn add_edge_between_ports(
        &mut self,
        key: impl Into<String>,
        (source, source_port): (NodeId, usize),
        (target, target_port): (NodeId, usize),
        pipe: Pipe,
    ) -> EdgeId {
        let id = EdgeId::from_usize(self.edges.len());
        self.edges.push(PendingEdge {
            key: key.into(),
            source,
            source_port,
            target,
            target_port,
            pipe,
        });
        id
    }

    /// Look up a node added earlier.
    pub fn node_id(&self, key: &str) -> Option<NodeId> {
        self.node_keys.get(key).copied()
    }

    /// Validate and freeze the network.
    pub fn build(self) -> NetworkResult<HydraulicNetwork> {
        validate::validate_edges(&self.nodes, &self.edges)?;

        let ambient = self.settings.ambient_port()?;
        let edges: Vec<Edge> = self
            .edges
            .into_iter()
            .enumerate()
            .map(|(i, e)| Edge {
                id: EdgeId::from_usize(i),
                key: e.key,
                source: e.source,
                source_port: e.source_port,
                target: e.target,
                target_port: e.target_port,
                pipe: e.pipe,
                inlet: ambient,
                outlet: ambient,
            })
            .collect();

        let (out_offsets, out_edges) =
            Self::build_adjacency(self.nodes.len(), &edges, |e| e.source);
        let (in_offsets, in_edges) = Self::build_adjacency(self.nodes.len(), &edges, |e| e.target);

        tracing::debug!(
            nodes = self.nodes.len(),
            edges = edges.len(),
            "network built"
        );

        Ok(HydraulicNetwork {
            settings: self.settings,
            nodes: self.nodes,
            edges,
            node_keys: self.node_keys,
            out_offsets,
            out_edges,
            in_offsets,
            in_edges,
        })
    }

    /// Compact adjacency: for each node, the edges whose `endpoint` is it.
    fn build_adjacency(
        node_count: usize,
        edges: &[Edge],
        endpoint: impl Fn(&Edge) -> NodeId,
    ) -> (Vec<usize>, Vec<EdgeId>) {
        let mut per_node: Vec<Vec<EdgeId>> = vec![Vec::new(); node_count];
        for edge in edges {
            per_node[endpoint(edge).slot()].push(edge.id);
        }

        let mut offsets = Vec::with_capacity(node_count + 1);
        let mut flat = Vec::with_capacity(edges.len());
        offsets.push(0);
        for list in per_node {
            flat.extend(list);
            offsets.push(flat.len());
        }
        (offsets, flat)
    }
}

/// Edge keys must be unique.
pub(crate) fn duplicate_edge_key(edges: &[PendingEdge]) -> Option<&str> {
    let mut seen = HashSet::new();
    edges
        .iter()
        .find(|e| !seen.insert(e.key.as_str()))
        .map(|e| e.key.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hn_core::units::{k, m};
    use hn_equipment::{Tank, Valve};
    use hn_fluids::FluidType;

    fn tank(level: f64) -> Equipment {
        Equipment::Tank(Tank::new(m(0.0), m(level), k(293.15), FluidType::Water).unwrap())
    }

    fn pipe() -> Pipe {
        Pipe::new(m(10.0), m(0.1), m(4.5e-5)).unwrap()
    }

    #[test]
    fn builder_basic() {
        let mut b = NetworkBuilder::new();
        let t1 = b.add_node("t1", "Upper", tank(5.0)).unwrap();
        let v1 = b
            .add_node("v1", "Valve", Equipment::Valve(Valve::new(0.05, 50.0).unwrap()))
            .unwrap();
        let t2 = b.add_node("t2", "Lower", tank(2.0)).unwrap();
        let e1 = b.add_edge("e1", t1, v1, pipe());
        let e2 = b.add_edge("e2", v1, t2, pipe());

        assert_eq!(t1.index(), 0);
        assert_eq!(t2.index(), 2);
        assert_eq!(e2.index(), 1);

        let net = b.build().unwrap();
        assert_eq!(net.nodes().len(), 3);
        assert_eq!(net.outgoing(t1), &[e1]);
        assert_eq!(net.incoming(v1), &[e1]);
        assert_eq!(net.outgoing(v1), &[e2]);
        assert!(net.incoming(t1).is_empty());
    }

    #[test]
    fn duplicate_node_key_rejected() {
        let mut b = NetworkBuilder::new();
        b.add_node("a", "A", tank(1.0)).unwrap();
        let err = b.add_node("a", "A again", Equipment::Generic).unwrap_err();
        assert!(matches!(err, NetworkError::DuplicateKey { .. }));
    }

    #[test]
    fn invalid_settings_rejected() {
        let settings = GlobalSettings {
            max_iterations: 0,
            ..GlobalSettings::default()
        };
        assert!(NetworkBuilder::with_settings(settings).is_err());
    }

    #[test]
    fn nodes_share_settings() {
        let settings = GlobalSettings {
            property_iterations: 7,
            ..GlobalSettings::default()
        };
        let mut b = NetworkBuilder::with_settings(settings).unwrap();
        let a = b.add_node("a", "A", tank(1.0)).unwrap();
        let net = b.build().unwrap();
        assert_eq!(net.node(a).unwrap().settings().property_iterations, 7);
        assert_eq!(net.settings().property_iterations, 7);
    }
}
