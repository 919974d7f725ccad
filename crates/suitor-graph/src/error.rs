//! Error types for suitor-graph.

use thiserror::Error;

use crate::NodeId;

/// Result type for graph operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or mutating a graph.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A node id is not below the node count.
    #[error("node {node} out of range for graph with {nodes} nodes")]
    NodeOutOfRange { node: NodeId, nodes: usize },

    /// The edge does not exist.
    #[error("edge ({u}, {v}) does not exist")]
    MissingEdge { u: NodeId, v: NodeId },

    /// The edge already exists; multi-edges are not supported.
    #[error("edge ({u}, {v}) already exists")]
    DuplicateEdge { u: NodeId, v: NodeId },
}
