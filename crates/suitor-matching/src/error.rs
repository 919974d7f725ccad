//! Error types for suitor-matching.

use suitor_graph::NodeId;
use thiserror::Error;

/// Result type for suitor-matching operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when constructing matchers or reading results.
///
/// Only input rejected at the boundary is reported here. Internal
/// consistency violations panic.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The graph is directed.
    #[error("suitor matching does not support directed graphs")]
    DirectedGraph,

    /// The graph contains self-loops.
    #[error("suitor matching does not support self-loops ({count} found)")]
    SelfLoops { count: usize },

    /// A per-node capacity vector does not cover the node set.
    #[error("capacity vector has {actual} entries, graph has {expected} nodes")]
    CapacityLength { expected: usize, actual: usize },

    /// A single-partner view was requested for a node with another capacity.
    #[error("node {node} has capacity {capacity}, expected 1")]
    CapacityNotOne { node: NodeId, capacity: usize },

    /// The matching was requested before the matcher ran.
    #[error("matcher has not been run")]
    NotRun,
}
