//! Network construction and lookup errors.

use hn_core::{HnError, NodeId};
use hn_equipment::{EquipmentError, PortRole};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NetworkError {
    /// Two nodes (or two edges) share a key.
    #[error("Duplicate {what} key '{key}'")]
    DuplicateKey { what: &'static str, key: String },

    /// An edge refers to a node that doesn't exist.
    #[error("Edge '{edge}' refers to non-existent node {node}")]
    UnknownNode { edge: String, node: NodeId },

    /// Lookup by key failed.
    #[error("No node with key '{key}'")]
    UnknownKey { key: String },

    /// An edge names a port index its node doesn't have.
    #[error("Edge '{edge}' uses {role:?} port {index} of '{node}', which has {len}")]
    PortOutOfRange {
        edge: String,
        node: String,
        role: PortRole,
        index: usize,
        len: usize,
    },

    /// An edge starts and ends on the same node.
    #[error("Edge '{edge}' connects a node to itself")]
    SelfLoop { edge: String },

    /// A valve operation was requested on another equipment type.
    #[error("Node '{key}' is not a valve")]
    NotAValve { key: String },

    #[error("Equipment error: {0}")]
    Equipment(#[from] EquipmentError),
}

pub type NetworkResult<T> = Result<T, NetworkError>;

impl From<NetworkError> for HnError {
    fn from(err: NetworkError) -> Self {
        HnError::Invariant {
            what: err.to_string(),
        }
    }
}
