//! Topology validation run by `NetworkBuilder::build`.

use hn_core::NodeId;
use hn_equipment::{HydraulicNode, PortRole};

use crate::builder::{PendingEdge, duplicate_edge_key};
use crate::error::{NetworkError, NetworkResult};

/// Validate declared edges against the node arena: endpoints exist, ports
/// are in range, no self-loops and edge keys are unique.
pub(crate) fn validate_edges(nodes: &[HydraulicNode], edges: &[PendingEdge]) -> NetworkResult<()> {
    if let Some(key) = duplicate_edge_key(edges) {
        return Err(NetworkError::DuplicateKey {
            what: "edge",
            key: key.to_string(),
        });
    }

    for edge in edges {
        let source = lookup(nodes, edge, edge.source)?;
        let target = lookup(nodes, edge, edge.target)?;

        if edge.source == edge.target {
            return Err(NetworkError::SelfLoop {
                edge: edge.key.clone(),
            });
        }

        check_port(edge, source, PortRole::Outlet, edge.source_port)?;
        check_port(edge, target, PortRole::Inlet, edge.target_port)?;
    }

    Ok(())
}

fn lookup<'a>(
    nodes: &'a [HydraulicNode],
    edge: &PendingEdge,
    id: NodeId,
) -> NetworkResult<&'a HydraulicNode> {
    nodes.get(id.slot()).ok_or_else(|| NetworkError::UnknownNode {
        edge: edge.key.clone(),
        node: id,
    })
}

fn check_port(
    edge: &PendingEdge,
    node: &HydraulicNode,
    role: PortRole,
    index: usize,
) -> NetworkResult<()> {
    let len = match role {
        PortRole::Inlet => node.inlets().len(),
        PortRole::Outlet => node.outlets().len(),
    };
    if index < len {
        Ok(())
    } else {
        Err(NetworkError::PortOutOfRange {
            edge: edge.key.clone(),
            node: node.key().to_string(),
            role,
            index,
            len,
        })
    }
}
