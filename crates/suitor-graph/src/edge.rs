//! Unordered edges and weighted edges.

use crate::NodeId;

/// Edge weight. Matchers only ever match edges with non-negative weight.
pub type EdgeWeight = f64;

/// An unordered pair of nodes.
///
/// Field order is whatever the caller supplied; use [`Edge::key`] or
/// [`Edge::normalized`] when comparing edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    /// First endpoint
    pub u: NodeId,
    /// Second endpoint
    pub v: NodeId,
}

impl Edge {
    /// Create an edge between `u` and `v`.
    pub const fn new(u: NodeId, v: NodeId) -> Self {
        Self { u, v }
    }

    /// Endpoints ordered `(min, max)`.
    pub fn key(&self) -> (NodeId, NodeId) {
        if self.u <= self.v {
            (self.u, self.v)
        } else {
            (self.v, self.u)
        }
    }

    /// The same edge with endpoints ordered `(min, max)`.
    pub fn normalized(&self) -> Self {
        let (u, v) = self.key();
        Self { u, v }
    }

    /// Check if both endpoints are the same node.
    pub fn is_self_loop(&self) -> bool {
        self.u == self.v
    }

    /// The endpoint opposite `node`, or `None` if `node` is not an endpoint.
    pub fn other(&self, node: NodeId) -> Option<NodeId> {
        if node == self.u {
            Some(self.v)
        } else if node == self.v {
            Some(self.u)
        } else {
            None
        }
    }
}

impl From<(usize, usize)> for Edge {
    fn from((u, v): (usize, usize)) -> Self {
        Self::new(NodeId(u), NodeId(v))
    }
}

/// An unordered edge with a weight.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeightedEdge {
    /// First endpoint
    pub u: NodeId,
    /// Second endpoint
    pub v: NodeId,
    /// Edge weight
    pub weight: EdgeWeight,
}

impl WeightedEdge {
    /// Create a weighted edge.
    pub const fn new(u: NodeId, v: NodeId, weight: EdgeWeight) -> Self {
        Self { u, v, weight }
    }

    /// Drop the weight.
    pub const fn edge(&self) -> Edge {
        Edge::new(self.u, self.v)
    }
}

impl From<(usize, usize, EdgeWeight)> for WeightedEdge {
    fn from((u, v, weight): (usize, usize, EdgeWeight)) -> Self {
        Self::new(NodeId(u), NodeId(v), weight)
    }
}
